use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    Router,
};
use prometheus::Registry;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{health_check, metrics_handler};
use crate::lookup_client::PriceLookupClient;
use crate::metrics::JobMetrics;
use crate::middleware::request_id_middleware;
use crate::routes;
use crate::service::PriceJob;
use pricecheck_database::{
    create_blob_store, initialize_database, InMemoryResultStore, PriceResultRepository, ResultStore,
};
use pricecheck_utils::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub price_job: PriceJob,
    pub registry: Registry,
    pub config: Arc<AppConfig>,
}

/// Where price results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSink {
    Postgres,
    /// Keep results in memory only
    DryRun,
}

/// Wire the job from configuration: blob store, lookup client and result store.
pub async fn build_state(config: &AppConfig, sink: ResultSink) -> Result<AppState> {
    let registry = Registry::new();
    let metrics = JobMetrics::new()?;
    metrics.register(&registry)?;

    let blob_store = create_blob_store(&config.storage)?;
    let quote_source = Arc::new(PriceLookupClient::new(&config.lookup)?);

    let result_store: Arc<dyn ResultStore> = match sink {
        ResultSink::Postgres => {
            let pool = initialize_database(&config.database).await?;
            tracing::info!("Database connection established");
            Arc::new(PriceResultRepository::new(pool))
        }
        ResultSink::DryRun => {
            tracing::warn!("Dry run: price results are not persisted");
            Arc::new(InMemoryResultStore::new())
        }
    };

    let price_job = PriceJob::new(blob_store, quote_source, result_store, metrics)
        .with_max_quotes(config.lookup.max_quotes);

    Ok(AppState {
        price_job,
        registry,
        config: Arc::new(config.clone()),
    })
}

pub fn create_app(state: AppState) -> Router {
    let max_request_size = state.config.server.max_request_size;

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .merge(routes::create_job_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
                )
                .layer(DefaultBodyLimit::max(max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state)
}
