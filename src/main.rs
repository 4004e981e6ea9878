use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skydesk::{app, config::Config, middleware, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkyDesk booking API");

    let state = AppState::new(config);
    let stats = state.inventory.stats();
    info!(
        "Floor plan loaded: {} seats, {} available",
        stats.total, stats.available
    );

    // Convenience for local runs: a ready-made session token, since the
    // authentication gate lives outside this service.
    if state.config.app.environment == "development" {
        match middleware::issue_token(&state.config.jwt, "demo-visitor", Some("demo@skydesk.local"))
        {
            Ok(token) => info!("Demo session token: {}", token),
            Err(e) => error!("Failed to issue demo token: {:?}", e),
        }
    }

    let addr: SocketAddr = format!("{}:{}", state.config.app.host, state.config.app.port)
        .parse()
        .expect("HOST/PORT must form a valid socket address");
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app(state).into_make_service())
        .await
        .unwrap();
}
