use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use league_common::config::{parse_or, service_url, string_or, ConfigError};

const DEFAULT_PORT: u16 = 8001;
const DEFAULT_DATABASE_URL: &str = "sqlite://players.db";
const DEFAULT_TEAMS_SERVICE_URL: &str = "http://localhost:8002";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// Players service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// Base URL of the teams service, without trailing slash
    pub teams_service_url: String,
    pub upstream_timeout: Duration,
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
            teams_service_url: service_url(&lookup, "TEAMS_SERVICE_URL", DEFAULT_TEAMS_SERVICE_URL)?,
            upstream_timeout: Duration::from_secs(parse_or(
                &lookup,
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?),
        })
    }
}
