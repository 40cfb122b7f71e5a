//! Admin API 推广员管理

use actix_web::{Responder, web};
use tracing::trace;

use crate::services::{AgentInput, AgentService};

use super::helpers::{api_result, created_response, error_from_walink};
use super::types::{AgentResponse, DeletedResponse};

/// 推广员列表：id、display_name、contact、affiliate
pub async fn list_agents(service: web::Data<AgentService>) -> impl Responder {
    trace!("Admin API: list agents");
    api_result(service.list_agents().await)
}

pub async fn create_agent(
    service: web::Data<AgentService>,
    payload: web::Json<AgentInput>,
) -> impl Responder {
    match service.create_agent(payload.into_inner()).await {
        Ok(agent) => created_response(AgentResponse::from(agent)),
        Err(e) => error_from_walink(&e),
    }
}

pub async fn get_agent(service: web::Data<AgentService>, path: web::Path<i64>) -> impl Responder {
    api_result(service.get_agent(path.into_inner()).await)
}

pub async fn update_agent(
    service: web::Data<AgentService>,
    path: web::Path<i64>,
    payload: web::Json<AgentInput>,
) -> impl Responder {
    api_result(
        service
            .update_agent(path.into_inner(), payload.into_inner())
            .await
            .map(AgentResponse::from),
    )
}

pub async fn delete_agent(
    service: web::Data<AgentService>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    api_result(service.delete_agent(id).await.map(|_| DeletedResponse { id }))
}
