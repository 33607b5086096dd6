//! Teams service: owns team records and asks the players service for
//! rosters when expanding teams or computing aggregates.

use sqlx::sqlite::SqlitePool;

pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod stats;

use client::PlayersClient;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub players: PlayersClient,
    /// Expand team lists with one batch call instead of one call per team
    pub batch_expand: bool,
}
