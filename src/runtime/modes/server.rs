//! Server mode
//!
//! Builds the shared [`LinkService`] and serves the HTTP interface.

use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::services::AppStartTime;
use crate::config::StaticConfig;
use crate::services::LinkService;
use crate::storage::StorageFactory;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let store = StorageFactory::create(&config.storage).context("Failed to open link storage")?;
    let link_service = LinkService::new(store, config);

    if config.storage.backend == "memory" {
        warn!("Memory storage selected: links are lost when the server stops");
    }

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Using {} worker threads", cpu_count);
    info!("Starting server at http://{}", bind_address);
    info!(
        "QR codes encode {}",
        link_service.qr_target("{slug}")
    );

    let service_data = web::Data::new(link_service);
    let start_data = web::Data::new(app_start_time);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(service_data.clone())
            .app_data(start_data.clone())
            .configure(crate::api::configure)
    })
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    info!("Server stopped");
    Ok(())
}
