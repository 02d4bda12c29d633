use gift_basket_rust::config::Config;
use gift_basket_rust::router::create_app_router;
use gift_basket_rust::state::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logging: RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    // Initialize application state
    let state = Arc::new(AppState::new());

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    tracing::info!("Server running on http://{}", config.bind_addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
