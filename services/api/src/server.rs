use crate::cli::ServeArgs;
use crate::demo::sample_applications;
use crate::infra::{load_applications, AppState, InMemoryApplicationRepository};
use crate::routes::with_export_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use study_portal::config::{AppConfig, AppEnvironment};
use study_portal::error::AppError;
use study_portal::telemetry;
use study_portal::workflows::applications::{DirectoryDownloader, ExportService, ExportState};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let seed = match &config.export.seed_file {
        Some(path) => load_applications(path)?,
        None if config.environment == AppEnvironment::Development => sample_applications(),
        None => Vec::new(),
    };
    let repository = Arc::new(InMemoryApplicationRepository::seeded(seed)?);
    let downloader = Arc::new(DirectoryDownloader::new(config.export.download_dir.clone()));
    let export_state = ExportState {
        service: Arc::new(ExportService::with_downloader(downloader)),
        repository,
    };

    let app = with_export_routes(export_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "application export service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
