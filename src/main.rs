use gas_tracker::config::Config;
use gas_tracker::services::metrics::MetricsRegistry;
use gas_tracker::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gas_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load environment configuration");

    let metrics = MetricsRegistry::new().expect("Failed to initialize metrics registry");

    let state = AppState::from_config(&config, metrics);
    tracing::info!(
        "Sampling {} blocks per estimate on {:?}",
        config.window_size,
        state.sources.keys().collect::<Vec<_>>()
    );

    let app = gas_tracker::create_app(state).await;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await.unwrap();
    tracing::info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await.unwrap();
}
