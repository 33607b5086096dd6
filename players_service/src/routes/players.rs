use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use league_common::{ApiError, Player, PlayerInput, StatusResponse};
use serde::Deserialize;
use crate::{db, AppState};

// Query parameters for listing players
#[derive(Deserialize)]
pub struct ListPlayersQuery {
    #[serde(default)]
    team_id: Option<String>,
}

// Query parameters for the batch roster lookup
#[derive(Deserialize)]
pub struct BatchQuery {
    #[serde(default)]
    team_ids: String,
}

// Query parameters for transferring a player
#[derive(Deserialize)]
pub struct TransferQuery {
    #[serde(default)]
    team_id: Option<String>,
}

fn player_not_found(player_id: &str) -> ApiError {
    ApiError::NotFound(format!("Player with id {} not found", player_id))
}

/// Treat `?team_id=` the same as leaving it out.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated id list, dropping blanks and repeats.
fn parse_id_list(raw: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

// GET /players?team_id= - List players, optionally for one team
pub async fn get_players(
    State(state): State<AppState>,
    Query(params): Query<ListPlayersQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let team_id = non_blank(params.team_id);
    tracing::info!("Getting all players (team_id: {:?})", team_id);

    let players = match &team_id {
        Some(team_id) => db::get_players_by_team(&state.pool, team_id).await?,
        None => db::get_all_players(&state.pool).await?,
    };

    Ok(Json(players))
}

// GET /players/batch?team_ids=a,b - Rosters for several teams in one call
pub async fn get_players_by_teams(
    State(state): State<AppState>,
    Query(params): Query<BatchQuery>,
) -> Result<Json<HashMap<String, Vec<Player>>>, ApiError> {
    let team_ids = parse_id_list(&params.team_ids);
    tracing::info!("Getting players for {} teams", team_ids.len());

    let players = db::get_players_by_teams(&state.pool, &team_ids).await?;

    // Every requested team gets an entry, even with an empty roster
    let mut rosters: HashMap<String, Vec<Player>> = team_ids
        .into_iter()
        .map(|id| (id, Vec::new()))
        .collect();
    for player in players {
        if let Some(roster) = player.team_id.as_ref().and_then(|id| rosters.get_mut(id)) {
            roster.push(player);
        }
    }

    Ok(Json(rosters))
}

// GET /players/:id - Get player by ID
pub async fn get_player_by_id(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let player = db::get_player_by_id(&state.pool, &player_id)
        .await?
        .ok_or_else(|| player_not_found(&player_id))?;

    tracing::info!("Getting player with id {}: {:?}", player_id, player);
    Ok(Json(player))
}

// POST /players - Create a player
pub async fn create_player(
    State(state): State<AppState>,
    Json(input): Json<PlayerInput>,
) -> Result<Json<Player>, ApiError> {
    let player = db::insert_player(&state.pool, &input).await?;

    tracing::info!("New player created: {:?}", player);
    Ok(Json(player))
}

// PUT /players/:id - Replace a player
pub async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(input): Json<PlayerInput>,
) -> Result<Json<Player>, ApiError> {
    let player = db::update_player(&state.pool, &player_id, &input)
        .await?
        .ok_or_else(|| player_not_found(&player_id))?;

    tracing::info!("Player updated: {:?}", player);
    Ok(Json(player))
}

// DELETE /players/:id - Delete a player; succeeds whether or not it existed
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let removed = db::delete_player(&state.pool, &player_id).await?;

    tracing::info!("Deleted player with id {} ({} rows)", player_id, removed);
    Ok(Json(StatusResponse::ok()))
}

// PATCH /players/:id/injured - Flip the injured flag
pub async fn toggle_injured(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let player = db::toggle_injured(&state.pool, &player_id)
        .await?
        .ok_or_else(|| player_not_found(&player_id))?;

    tracing::info!("Player updated: {:?}", player);
    Ok(Json(player))
}

// PATCH /players/:id?team_id= - Move a player to another team, or to none
pub async fn transfer_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(params): Query<TransferQuery>,
) -> Result<Json<Player>, ApiError> {
    let team_id = non_blank(params.team_id);

    // The target team must exist in the teams service before we touch the player
    if let Some(team_id) = &team_id {
        if state.teams.get_team(team_id).await?.is_none() {
            return Err(ApiError::NotPerformed(format!(
                "team {} does not exist",
                team_id
            )));
        }
    }

    let player = db::set_player_team(&state.pool, &player_id, team_id.as_deref())
        .await?
        .ok_or_else(|| player_not_found(&player_id))?;

    tracing::info!("Player transferred: {:?}", player);
    Ok(Json(player))
}
