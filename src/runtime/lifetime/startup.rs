use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::AppState;
use crate::config::StaticConfig;
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub state: AppState,
}

/// 打开存储（含迁移）并组装 handler 共享状态
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    check_site_config(config);

    let state = AppState::new(storage.clone(), config);
    info!("Pre-startup completed in {:?}", start_time.elapsed());

    Ok(StartupContext { storage, state })
}

/// 站点根地址只用于拼接跳转和推荐链接，格式有误时提前告警
fn check_site_config(config: &StaticConfig) {
    if let Err(e) = crate::utils::url_validator::validate_absolute_url(&config.site.base_url) {
        warn!(
            "site.base_url '{}' is not a valid absolute URL ({}); campaign links will be malformed",
            config.site.base_url, e
        );
    }
    if config.attribution.cookie_secure && config.site.base_url.starts_with("http://") {
        warn!("attribution.cookie_secure is enabled but site.base_url uses plain http");
    }
}
