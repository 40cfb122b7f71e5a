//! 表单桥接端点
//!
//! - `GET <form_prefix>/hidden-fields?tags=a,#12` 返回嵌入表单用的隐藏字段
//! - `POST <form_prefix>/{form_id}/entries` 接收 urlencoded 提交

use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, trace};

use crate::api::constants::FORM_PAYLOAD_LIMIT;
use crate::api::middleware::AttributionContext;
use crate::services::{CampaignLinks, FormSubmission, hidden_fields, submit_form};
use crate::storage::{EntryStore, IdentityStore};

#[derive(Debug, Deserialize)]
pub struct HiddenFieldsQuery {
    /// 逗号分隔的表单标签
    #[serde(default)]
    pub tags: Option<String>,
}

pub struct FormService;

impl FormService {
    pub async fn hidden_fields(
        query: web::Query<HiddenFieldsQuery>,
        attribution: AttributionContext,
    ) -> HttpResponse {
        let tags = query.tags.as_deref().unwrap_or_default();
        let fields = hidden_fields(
            tags.split(',').map(str::trim).filter(|t| !t.is_empty()),
            attribution.as_deref(),
        );
        trace!("Hidden fields for tags '{}': {:?}", tags, fields);

        HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "no-store"))
            .body(fields.to_html())
    }

    /// 保存提交；能解析到活动时 303 回活动页，否则返回保存的记录
    pub async fn submit_entry(
        path: web::Path<String>,
        body: web::Bytes,
        identity: web::Data<Arc<dyn IdentityStore>>,
        entries: web::Data<Arc<dyn EntryStore>>,
        links: web::Data<CampaignLinks>,
    ) -> HttpResponse {
        let form_id = path.into_inner();
        let pairs = url::form_urlencoded::parse(&body).into_owned();
        let submission = FormSubmission::from_pairs(form_id, pairs);

        let outcome = submit_form(
            identity.as_ref().as_ref(),
            entries.as_ref().as_ref(),
            submission,
            &links.base_url,
            &links.campaign_prefix,
        )
        .await;

        match outcome {
            Ok(outcome) => match outcome.redirect {
                Some(url) => HttpResponse::SeeOther()
                    .insert_header((LOCATION, url))
                    .finish(),
                None => HttpResponse::Ok().json(outcome.entry),
            },
            Err(e) => {
                error!("Failed to save form entry: {}", e);
                HttpResponse::build(e.http_status())
                    .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                    .body(e.error_type())
            }
        }
    }
}

/// 表单路由
pub fn form_routes(form_prefix: &str) -> actix_web::Scope {
    web::scope(form_prefix.trim_end_matches('/'))
        .app_data(web::PayloadConfig::new(FORM_PAYLOAD_LIMIT))
        .route("/hidden-fields", web::get().to(FormService::hidden_fields))
        .route("/{form_id}/entries", web::post().to(FormService::submit_entry))
}
