//! Admin API 表单记录查询与导出

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use tracing::{error, info};

use crate::storage::{EntryFilter, SeaOrmStorage};
use crate::utils::csv_handler::entries_to_csv_string;

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_from_walink, error_response};
use super::types::EntriesQuery;

/// 表单记录列表，最新的在前
pub async fn list_entries(
    storage: web::Data<Arc<SeaOrmStorage>>,
    query: web::Query<EntriesQuery>,
) -> impl Responder {
    let filter = EntryFilter {
        campaign_id: query.campaign_id,
        limit: query.limit,
    };
    api_result(storage.list_entries(filter).await)
}

/// 导出 CSV
pub async fn export_entries(
    storage: web::Data<Arc<SeaOrmStorage>>,
    query: web::Query<EntriesQuery>,
) -> HttpResponse {
    let filter = EntryFilter {
        campaign_id: query.campaign_id,
        limit: query.limit,
    };

    let entries = match storage.list_entries(filter).await {
        Ok(entries) => entries,
        Err(e) => return error_from_walink(&e),
    };

    let csv = match entries_to_csv_string(&entries) {
        Ok(csv) => csv,
        Err(e) => {
            error!("Failed to generate entries CSV: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ExportFailed,
                "Failed to generate CSV",
            );
        }
    };

    let filename = match query.campaign_id {
        Some(id) => format!("entries_campaign_{}_{}.csv", id, Utc::now().format("%Y%m%d_%H%M%S")),
        None => format!("entries_{}.csv", Utc::now().format("%Y%m%d_%H%M%S")),
    };
    info!("Admin API: exported {} entries as {}", entries.len(), filename);

    HttpResponse::Ok()
        .append_header(("Content-Type", "text/csv; charset=utf-8"))
        .append_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(csv)
}
