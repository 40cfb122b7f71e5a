//! HTTP layer
//!
//! - `middleware`: request id, attribution and admin auth
//! - `services`: campaign page, form bridge, health and admin API handlers

pub mod constants;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use crate::config::StaticConfig;
use crate::services::{AgentService, CampaignLinks, CampaignService};
use crate::storage::{EntryStore, IdentityStore, SeaOrmStorage};
use middleware::AdminAuth;
use services::{AppStartTime, admin_v1_routes, campaign_routes, form_routes, health_routes};

/// handler 共享的状态，每个 worker 注册一份 `web::Data`
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<SeaOrmStorage>,
    pub identity: Arc<dyn IdentityStore>,
    pub entries: Arc<dyn EntryStore>,
    pub campaign_service: Arc<CampaignService>,
    pub agent_service: Arc<AgentService>,
    pub links: CampaignLinks,
    pub start_time: AppStartTime,
}

impl AppState {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        let links = CampaignLinks::from_config(config);
        Self {
            identity: storage.clone(),
            entries: storage.clone(),
            campaign_service: Arc::new(CampaignService::new(storage.clone(), links.clone())),
            agent_service: Arc::new(AgentService::new(storage.clone())),
            storage,
            links,
            start_time: AppStartTime {
                start_datetime: chrono::Utc::now(),
            },
        }
    }
}

/// 注册共享状态和全部路由
///
/// 归因中间件需要包在整个 App 外层，由调用方负责
pub fn configure_app(cfg: &mut web::ServiceConfig, state: &AppState, config: &StaticConfig) {
    let routes = &config.routes;

    cfg.app_data(web::Data::new(state.storage.clone()))
        .app_data(web::Data::new(state.identity.clone()))
        .app_data(web::Data::new(state.entries.clone()))
        .app_data(web::Data::from(state.campaign_service.clone()))
        .app_data(web::Data::from(state.agent_service.clone()))
        .app_data(web::Data::new(state.links.clone()))
        .app_data(web::Data::new(state.start_time.clone()));

    cfg.service(
        web::scope(routes.admin_prefix.trim_end_matches('/'))
            .wrap(AdminAuth::new(&config.api.admin_token))
            .service(admin_v1_routes()),
    )
    .service(web::scope(routes.health_prefix.trim_end_matches('/')).service(health_routes()))
    .service(form_routes(&routes.form_prefix))
    // 活动页前缀可能为空，必须最后注册
    .service(campaign_routes(&routes.campaign_prefix));
}

/// 启动时打印一次路由布局
pub fn log_route_layout(config: &StaticConfig) {
    let routes = &config.routes;
    if config.api.admin_token.is_empty() {
        info!("Admin API is disabled (api.admin_token is empty)");
    } else {
        info!("Admin API available at: {}{}", routes.admin_prefix, constants::ADMIN_API_VERSION);
    }
    info!("Health check available at: {}", routes.health_prefix);
    info!("Form bridge available at: {}", routes.form_prefix);
    info!("Campaign pages served under: {}/{{slug}}", routes.campaign_prefix);
}
