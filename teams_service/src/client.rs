use std::collections::HashMap;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use league_common::upstream::{endpoint, UpstreamError};
use league_common::Player;

/// HTTP client for the players service.
#[derive(Debug, Clone)]
pub struct PlayersClient {
    http: Client,
    base_url: String,
}

impl PlayersClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// GET /players?team_id={id} on the players service.
    pub async fn players_of_team(&self, team_id: &str) -> Result<Vec<Player>, UpstreamError> {
        let mut url = endpoint(&self.base_url, &["players"])?;
        url.query_pairs_mut().append_pair("team_id", team_id);

        self.fetch(url).await
    }

    /// GET /players/batch?team_ids=a,b on the players service, keyed by team id.
    pub async fn players_of_teams(
        &self,
        team_ids: &[String],
    ) -> Result<HashMap<String, Vec<Player>>, UpstreamError> {
        if team_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut url = endpoint(&self.base_url, &["players", "batch"])?;
        url.query_pairs_mut().append_pair("team_ids", &team_ids.join(","));

        self.fetch(url).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, UpstreamError> {
        tracing::info!("Request [GET] {}", url);

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!("Error from players service for {} (status {})", url, status);
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.json::<T>().await.map_err(|e| {
            tracing::error!("Invalid JSON response from {}: {}", url, e);
            e
        })?;

        Ok(body)
    }
}
