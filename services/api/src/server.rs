use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryObjectStore};
use crate::routes::with_restaurant_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lunchping::config::AppConfig;
use lunchping::error::AppError;
use lunchping::places::{KakaoLocalClient, RestaurantService};
use lunchping::storage::{DirectoryObjectStore, ObjectStore};
use lunchping::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.places.api_key.is_empty() {
        warn!("KAKAO_REST_API_KEY is not set; restaurant search will answer 503");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let store: Arc<dyn ObjectStore> = if args.ephemeral_storage {
        Arc::new(InMemoryObjectStore::new(
            config.storage.bucket.clone(),
            config.storage.public_base_url.clone(),
        ))
    } else {
        Arc::new(DirectoryObjectStore::open(
            &config.storage.root,
            config.storage.bucket.clone(),
            config.storage.public_base_url.clone(),
        )
        .await?)
    };

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        store,
    };

    let provider = Arc::new(KakaoLocalClient::new(&config.places)?);
    let restaurant_service = Arc::new(RestaurantService::new(
        provider,
        config.clock,
        config.recommendation.flicker_count,
    ));

    let app = with_restaurant_routes(restaurant_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        bucket = %config.storage.bucket,
        ephemeral_storage = args.ephemeral_storage,
        "lunchping api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
