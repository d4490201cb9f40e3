mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("supply_risk=info,supply_risk_tool_api=info")),
        )
        .init();

    tracing::info!("Initializing supply-risk SDK...");
    let risk = supply_risk::AsyncSupplyRisk::new(supply_risk::SupplyRisk::builder())
        .await
        .expect("Failed to initialize supply-risk SDK");
    tracing::info!("SDK ready.");

    let state = Arc::new(AppState { risk });

    let app = Router::new()
        .route("/api/tools", get(routes::tools::list_tools))
        .route("/api/tools/{name}", post(routes::tools::call_tool))
        .route("/api/report", get(routes::report::latest_report))
        .route("/api/commodities/{name}", get(routes::report::investigate))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
