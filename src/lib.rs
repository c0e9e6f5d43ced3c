pub mod config;
pub mod modules;
pub mod services;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::{load_network_config, Config};
use modules::gas::gas_routes;
use modules::metrics::metrics_routes;
use services::gas::{GasError, GasEstimator};
use services::metrics::{metrics_middleware, MetricsRegistry};
use services::rpc::{ChainDataSource, HttpRpcClient};

pub struct AppState {
    /// Chain data source per network identifier (lowercase)
    pub sources: HashMap<String, Arc<dyn ChainDataSource>>,
    pub estimator: GasEstimator,
    pub metrics: Arc<MetricsRegistry>,
    /// Upper bound for one estimation pass
    pub request_timeout: Duration,
}

impl AppState {
    /// Build state with one JSON-RPC client per configured network
    pub fn from_config(config: &Config, metrics: Arc<MetricsRegistry>) -> Self {
        let sources = load_network_config()
            .into_iter()
            .map(|(network, endpoint)| {
                let client = HttpRpcClient::new(network.clone(), endpoint.rpc_url, endpoint.timeout);
                (network, Arc::new(client) as Arc<dyn ChainDataSource>)
            })
            .collect();

        Self {
            sources,
            estimator: GasEstimator::new(config.window_size),
            metrics,
            request_timeout: config.request_timeout,
        }
    }

    pub fn source(&self, network: &str) -> Result<Arc<dyn ChainDataSource>, GasError> {
        self.sources
            .get(&network.to_lowercase())
            .cloned()
            .ok_or_else(|| GasError::UnknownNetwork(network.to_string()))
    }
}

pub async fn create_app(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    let state = Arc::new(state);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/gas", gas_routes())
        .with_state(state)
        .merge(metrics_routes(metrics.clone()))
        .layer(middleware::from_fn_with_state(metrics, metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn root() -> &'static str {
    "Gas Tracker API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
