//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::constants::FORM_PAYLOAD_LIMIT;
use crate::api::middleware::{AttributionLayer, RequestIdMiddleware};
use crate::api::{configure_app, log_route_layout};
use crate::config::get_config;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {}", e))?;

    let state = startup.state;
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);
    log_route_layout(&config);

    // storage 移入闭包前先拿到关闭用的连接
    let db_for_shutdown = startup.storage.get_db().clone();
    let app_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(AttributionLayer::new(
                state.identity.clone(),
                app_config.attribution.clone(),
            ))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Keep-Alive", "timeout=30, max=1000")),
            )
            .wrap(RequestIdMiddleware) // 最外层，日志里带上 request_id
            .app_data(actix_web::web::PayloadConfig::new(FORM_PAYLOAD_LIMIT))
            .configure(|cfg| configure_app(cfg, &state, &app_config))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
