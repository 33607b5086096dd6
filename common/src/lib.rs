//! Data shapes and service plumbing shared by the players and teams services.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod upstream;

pub use error::ApiError;
pub use models::{Country, Player, PlayerInput, StatusResponse, Team, TeamInput};
