//! Players service: owns player records and checks transfers against the
//! teams service.

use sqlx::sqlite::SqlitePool;

pub mod client;
pub mod config;
pub mod db;
pub mod routes;

use client::TeamsClient;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub teams: TeamsClient,
}
