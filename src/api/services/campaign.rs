//! 活动页：`GET|HEAD <campaign_prefix>/{key}`

use actix_web::http::StatusCode;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION};
use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::api::middleware::AttributionContext;
use crate::services::campaign_redirect;
use crate::storage::IdentityStore;

pub struct CampaignViewService;

impl CampaignViewService {
    /// 活动页不渲染内容，只做跳转
    ///
    /// 跳转地址取决于归因 Cookie，因此禁止缓存
    #[instrument(skip(attribution, store), fields(key = %path))]
    pub async fn view(
        path: web::Path<String>,
        attribution: AttributionContext,
        store: web::Data<Arc<dyn IdentityStore>>,
    ) -> HttpResponse {
        let key = path.into_inner();

        match campaign_redirect(store.as_ref().as_ref(), &key, attribution.as_deref()).await {
            Ok(Some(url)) => {
                debug!("Campaign '{}' -> {}", key, url);
                HttpResponse::Found()
                    .insert_header((LOCATION, url))
                    .insert_header((CACHE_CONTROL, "no-store"))
                    .finish()
            }
            Ok(None) => {
                debug!("Campaign not found: {}", key);
                HttpResponse::build(StatusCode::NOT_FOUND)
                    .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
                    .body("Not Found")
            }
            Err(e) => {
                error!("Failed to load campaign '{}': {}", key, e);
                HttpResponse::InternalServerError()
                    .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
                    .body("Internal Server Error")
            }
        }
    }
}

/// 活动页路由
pub fn campaign_routes(campaign_prefix: &str) -> actix_web::Scope {
    web::scope(campaign_prefix.trim_end_matches('/'))
        .route("/{key}", web::get().to(CampaignViewService::view))
        .route("/{key}", web::head().to(CampaignViewService::view))
}
