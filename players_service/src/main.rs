use std::net::SocketAddr;

use league_common::upstream::http_client;
use players_service::{client::TeamsClient, config::Config, db, routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting players service...");

    let config = Config::from_env().expect("Invalid configuration");

    let pool = db::connect(&config.database_url, config.max_connections)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connection established.");

    let http = http_client(config.upstream_timeout).expect("Failed to build HTTP client");
    tracing::info!("Teams service at {}", config.teams_service_url);

    let state = AppState {
        pool,
        teams: TeamsClient::new(http, config.teams_service_url.clone()),
    };

    let addr = SocketAddr::from((config.host, config.port));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
