//! Admin API 路由配置
//!
//! `/v1` 下按资源拆分路由。

use actix_web::web;

use crate::api::constants::ADMIN_API_VERSION;

use super::agents::{create_agent, delete_agent, get_agent, list_agents, update_agent};
use super::campaigns::{
    campaign_referral_links, create_campaign, delete_campaign, get_campaign, list_campaigns,
    update_campaign,
};
use super::entries::{export_entries, list_entries};

/// 活动管理路由 `/campaigns`
///
/// 包含：
/// - GET/HEAD /campaigns - 活动列表
/// - POST /campaigns - 创建活动
/// - GET/PUT/DELETE /campaigns/{id} - 单个活动
/// - GET /campaigns/{id}/links - 各推广员的推荐链接
pub fn campaigns_routes() -> actix_web::Scope {
    web::scope("/campaigns")
        .route("", web::get().to(list_campaigns))
        .route("", web::head().to(list_campaigns))
        .route("", web::post().to(create_campaign))
        .route("/{id}/links", web::get().to(campaign_referral_links))
        .route("/{id}", web::get().to(get_campaign))
        .route("/{id}", web::put().to(update_campaign))
        .route("/{id}", web::delete().to(delete_campaign))
}

/// 推广员管理路由 `/agents`
pub fn agents_routes() -> actix_web::Scope {
    web::scope("/agents")
        .route("", web::get().to(list_agents))
        .route("", web::head().to(list_agents))
        .route("", web::post().to(create_agent))
        .route("/{id}", web::get().to(get_agent))
        .route("/{id}", web::put().to(update_agent))
        .route("/{id}", web::delete().to(delete_agent))
}

/// 表单记录路由 `/entries`
///
/// `/export` 必须在其他子路由之前注册
pub fn entries_routes() -> actix_web::Scope {
    web::scope("/entries")
        .route("/export", web::get().to(export_entries))
        .route("", web::get().to(list_entries))
}

/// Admin API v1 全部路由
pub fn admin_v1_routes() -> actix_web::Scope {
    web::scope(ADMIN_API_VERSION)
        .service(campaigns_routes())
        .service(agents_routes())
        .service(entries_routes())
}
