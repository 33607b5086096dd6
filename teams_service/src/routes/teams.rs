use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use league_common::{ApiError, Player, StatusResponse, Team, TeamInput};
use serde::Deserialize;
use crate::models::{AverageAgeResponse, TeamResponse, TotalInjuredResponse};
use crate::{db, stats, AppState};

/// Query parameters for team reads.
///
/// `expand` is a comma-separated list; `players` attaches each team's roster.
#[derive(Deserialize, Default)]
pub struct ExpandQuery {
    #[serde(default)]
    expand: Option<String>,
}

impl ExpandQuery {
    fn wants_players(&self) -> bool {
        self.expand
            .as_deref()
            .is_some_and(|expand| expand.split(',').any(|part| part.trim() == "players"))
    }
}

fn team_not_found(team_id: &str) -> ApiError {
    ApiError::NotFound(format!("Team with id {} not found", team_id))
}

/// Roster for the aggregates. A failed fetch counts as no players.
async fn roster_or_empty(state: &AppState, team_id: &str) -> Vec<Player> {
    match state.players.players_of_team(team_id).await {
        Ok(players) => players,
        Err(e) => {
            tracing::warn!("Could not fetch players of team {}: {}", team_id, e);
            Vec::new()
        }
    }
}

// GET /teams?expand=players - List all teams
pub async fn get_teams(
    State(state): State<AppState>,
    Query(params): Query<ExpandQuery>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let teams = db::get_all_teams(&state.pool).await?;

    if !params.wants_players() {
        return Ok(Json(teams.into_iter().map(TeamResponse::bare).collect()));
    }

    if state.batch_expand {
        let team_ids: Vec<String> = teams.iter().map(|t| t.id.clone()).collect();
        let mut rosters = state.players.players_of_teams(&team_ids).await?;

        let expanded = teams
            .into_iter()
            .map(|team| {
                let players = rosters.remove(&team.id).unwrap_or_default();
                TeamResponse::expanded(team, players)
            })
            .collect();
        return Ok(Json(expanded));
    }

    // One request per team
    tracing::warn!("n+1 requests: expanding {} teams one by one", teams.len());
    let mut expanded = Vec::with_capacity(teams.len());
    for team in teams {
        let players = state.players.players_of_team(&team.id).await?;
        tracing::info!("Players of team (team_id: {}): {}", team.id, players.len());
        expanded.push(TeamResponse::expanded(team, players));
    }

    Ok(Json(expanded))
}

// GET /teams/:id?expand=players - Get team by ID
pub async fn get_team_by_id(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<ExpandQuery>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = db::get_team_by_id(&state.pool, &team_id)
        .await?
        .ok_or_else(|| team_not_found(&team_id))?;

    if !params.wants_players() {
        return Ok(Json(TeamResponse::bare(team)));
    }

    let players = state.players.players_of_team(&team_id).await?;
    tracing::info!("Players of team (team_id: {}): {}", team_id, players.len());

    Ok(Json(TeamResponse::expanded(team, players)))
}

// POST /teams - Create a team
pub async fn create_team(
    State(state): State<AppState>,
    Json(input): Json<TeamInput>,
) -> Result<Json<Team>, ApiError> {
    let team = db::insert_team(&state.pool, &input).await?;

    tracing::info!("New team created: {:?}", team);
    Ok(Json(team))
}

// PUT /teams/:id - Replace a team
pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(input): Json<TeamInput>,
) -> Result<Json<Team>, ApiError> {
    let team = db::update_team(&state.pool, &team_id, &input)
        .await?
        .ok_or_else(|| team_not_found(&team_id))?;

    tracing::info!("Team updated: {:?}", team);
    Ok(Json(team))
}

// DELETE /teams/:id - Delete a team; its players keep pointing at it
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let removed = db::delete_team(&state.pool, &team_id).await?;

    tracing::info!("Deleted team with id {} ({} rows)", team_id, removed);
    Ok(Json(StatusResponse::ok()))
}

// GET /teams/:id/avg-age - Mean age of the roster, -1 without one
pub async fn get_average_age(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Json<AverageAgeResponse> {
    let players = roster_or_empty(&state, &team_id).await;
    let avg_age = stats::average_age(&players);

    if players.is_empty() {
        tracing::warn!("No players found for team_id={}", team_id);
    } else {
        tracing::info!("Average age for team_id={} is {:.2}", team_id, avg_age);
    }

    Json(AverageAgeResponse { avg_age })
}

// GET /teams/:id/total-injured - Injured players on the roster, -1 without one
pub async fn get_total_injured(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Json<TotalInjuredResponse> {
    let players = roster_or_empty(&state, &team_id).await;
    let total_injured = stats::total_injured(&players);

    if players.is_empty() {
        tracing::warn!("No players found for team_id={}", team_id);
    } else {
        tracing::info!("Total injured for team_id={} is {}", team_id, total_injured);
    }

    Json(TotalInjuredResponse { total_injured })
}
