//! Axum application setup.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local frontend development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Merged table preview
        .route("/data", get(handlers::get_data))
        // Available filter options
        .route("/filters", get(handlers::get_filter_options))
        // Filtered rows + aggregates + chart series
        .route("/query", post(handlers::run_query))
        // Cache invalidation after a source file changes
        .route("/reload", post(handlers::reload));

    Router::new().nest("/api", api_routes).layer(cors).with_state(state)
}

/// Start the API server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    println!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
