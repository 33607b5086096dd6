use axum::{routing::get, Router};
use league_common::routes::health;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod teams;

/// Build the teams service router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Teams Service - v1.0" }))
        .route("/health", get(health::health_check))

        // Team endpoints
        .route("/teams", get(teams::get_teams).post(teams::create_team))
        .route(
            "/teams/{id}",
            get(teams::get_team_by_id)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route("/teams/{id}/avg-age", get(teams::get_average_age))
        .route("/teams/{id}/total-injured", get(teams::get_total_injured))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
