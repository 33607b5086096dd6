use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use league_common::config::{parse_or, service_url, string_or, ConfigError};

const DEFAULT_PORT: u16 = 8002;
const DEFAULT_DATABASE_URL: &str = "sqlite://teams.db";
const DEFAULT_PLAYERS_SERVICE_URL: &str = "http://localhost:8001";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// Teams service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// Base URL of the players service, without trailing slash
    pub players_service_url: String,
    pub upstream_timeout: Duration,
    /// Use `GET /players/batch` for `GET /teams?expand=players`
    pub roster_batch_expand: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database_url: string_or(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            players_service_url: service_url(&lookup, "PLAYERS_SERVICE_URL", DEFAULT_PLAYERS_SERVICE_URL)?,
            upstream_timeout: Duration::from_secs(parse_or(
                &lookup,
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?),
            roster_batch_expand: parse_or(&lookup, "ROSTER_BATCH_EXPAND", false)?,
        })
    }
}
