//! Admin API 活动管理

use actix_web::{HttpResponse, Responder, web};
use tracing::{info, trace};

use crate::services::{CampaignInput, CampaignService};

use super::helpers::{api_result, created_response, error_from_walink};
use super::types::{CampaignResponse, DeletedResponse};

/// 活动列表：id、title、default_number
pub async fn list_campaigns(service: web::Data<CampaignService>) -> impl Responder {
    trace!("Admin API: list campaigns");
    api_result(service.list_campaigns().await)
}

pub async fn create_campaign(
    service: web::Data<CampaignService>,
    payload: web::Json<CampaignInput>,
) -> impl Responder {
    match service.create_campaign(payload.into_inner()).await {
        Ok(campaign) => {
            let url = service.links().campaign_url(&campaign.slug);
            info!("Admin API: campaign #{} created", campaign.id);
            created_response(CampaignResponse::new(campaign, url))
        }
        Err(e) => error_from_walink(&e),
    }
}

pub async fn get_campaign(
    service: web::Data<CampaignService>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    api_result(service.get_campaign(id).await.map(|c| {
        let url = service.links().campaign_url(&c.slug);
        CampaignResponse::new(c, url)
    }))
}

pub async fn update_campaign(
    service: web::Data<CampaignService>,
    path: web::Path<i64>,
    payload: web::Json<CampaignInput>,
) -> impl Responder {
    let id = path.into_inner();
    api_result(
        service
            .update_campaign(id, payload.into_inner())
            .await
            .map(|c| {
                let url = service.links().campaign_url(&c.slug);
                CampaignResponse::new(c, url)
            }),
    )
}

pub async fn delete_campaign(
    service: web::Data<CampaignService>,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    api_result(
        service
            .delete_campaign(id)
            .await
            .map(|_| DeletedResponse { id }),
    )
}

/// 活动下每个推广员的推荐链接
pub async fn campaign_referral_links(
    service: web::Data<CampaignService>,
    path: web::Path<i64>,
) -> impl Responder {
    api_result(service.referral_links(path.into_inner()).await)
}
