use crate::cli::ServeArgs;
use crate::infra::{load_ratings, AppState, InMemoryRoadNetwork};
use crate::routes::with_condition_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pavement_condition::assessment::{ConditionReportError, ConditionReportService, RoadFixture};
use pavement_condition::config::AppConfig;
use pavement_condition::error::AppError;
use pavement_condition::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let network = Arc::new(InMemoryRoadNetwork::default());
    for path in &args.seed {
        for fixture in RoadFixture::from_path(path)? {
            network.seed(fixture).map_err(ConditionReportError::from)?;
        }
    }
    let seeded = network.road_ids().map_err(ConditionReportError::from)?;
    info!(roads = seeded.len(), "road network loaded");

    let ratings = load_ratings(&config.scoring)?;
    let service = Arc::new(ConditionReportService::with_ratings(
        network.clone(),
        network.clone(),
        network,
        Arc::new(ratings),
    ));

    let app = with_condition_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pavement condition service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
