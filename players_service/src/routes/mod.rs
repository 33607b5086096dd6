use axum::{routing::{get, patch}, Router};
use league_common::routes::health;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod players;

/// Build the players service router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Players Service - v1.0" }))
        .route("/health", get(health::health_check))

        // Player endpoints
        .route("/players", get(players::get_players).post(players::create_player))
        .route("/players/batch", get(players::get_players_by_teams))
        .route(
            "/players/{id}",
            get(players::get_player_by_id)
                .put(players::update_player)
                .patch(players::transfer_player)
                .delete(players::delete_player),
        )
        .route("/players/{id}/injured", patch(players::toggle_injured))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
