use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, trace};

use crate::api::services::admin::{ApiResponse, ErrorCode};
use crate::errors::Result;
use crate::storage::SeaOrmStorage;

/// 存储检查超时
const STORAGE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    pub campaigns_count: Option<u64>,
    pub agents_count: Option<u64>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub uptime_human: String,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u64,
}

/// 运行时长的可读形式，例如 `1d 2h 3m 4s`
pub fn format_uptime(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let secs = total_secs % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}

async fn count_all(storage: &SeaOrmStorage) -> Result<(u64, u64)> {
    let campaigns = storage.count_campaigns().await?;
    let agents = storage.count_agents().await?;
    Ok((campaigns, agents))
}

/// Health Service
///
/// 直接调用 storage 的计数方法，不经过业务服务层
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        storage: web::Data<Arc<SeaOrmStorage>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let backend = storage.get_backend_config().storage_type;

        let storage_status =
            match tokio::time::timeout(STORAGE_CHECK_TIMEOUT, count_all(&storage)).await {
                Ok(Ok((campaigns, agents))) => {
                    trace!(
                        "Storage health check passed, {} campaigns, {} agents",
                        campaigns, agents
                    );
                    HealthStorageCheck {
                        status: "healthy".to_string(),
                        backend,
                        campaigns_count: Some(campaigns),
                        agents_count: Some(agents),
                        error: None,
                    }
                }
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    HealthStorageCheck {
                        status: "unhealthy".to_string(),
                        backend,
                        campaigns_count: None,
                        agents_count: None,
                        error: Some(format!("database error: {}", e)),
                    }
                }
                Err(_) => {
                    error!("Storage health check timeout");
                    HealthStorageCheck {
                        status: "unhealthy".to_string(),
                        backend,
                        campaigns_count: None,
                        agents_count: None,
                        error: Some("timeout".to_string()),
                    }
                }
            };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;
        let uptime_human = format_uptime(uptime_seconds);
        let is_healthy = storage_status.status == "healthy";

        let health_data = HealthResponse {
            status: storage_status.status.clone(),
            timestamp: now.to_rfc3339(),
            uptime: uptime_seconds,
            uptime_human: uptime_human.clone(),
            storage: storage_status,
            response_time_ms: start_time.elapsed().as_millis() as u64,
        };

        let (status, code, message) = if is_healthy {
            (actix_web::http::StatusCode::OK, ErrorCode::Success, "OK")
        } else {
            (
                actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                "Service Unavailable",
            )
        };

        info!(
            "Health check completed in {:?}, status: {}, uptime: {}",
            start_time.elapsed(),
            health_data.status,
            uptime_human
        );

        HttpResponse::build(status)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ApiResponse {
                code: code as i32,
                message: message.to_string(),
                data: Some(health_data),
            })
    }

    // 活跃性检查，进程能响应即可
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::Ok()
            .append_header(("Content-Type", "text/plain"))
            .body("OK")
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
