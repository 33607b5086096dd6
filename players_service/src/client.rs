use reqwest::{Client, StatusCode};

use league_common::upstream::{endpoint, UpstreamError};
use league_common::Team;

/// HTTP client for the teams service.
#[derive(Debug, Clone)]
pub struct TeamsClient {
    http: Client,
    base_url: String,
}

impl TeamsClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// GET /teams/{id} on the teams service.
    ///
    /// A 404 from the remote is `Ok(None)`; any other non-success status is
    /// an error.
    pub async fn get_team(&self, team_id: &str) -> Result<Option<Team>, UpstreamError> {
        let url = endpoint(&self.base_url, &["teams", team_id])?;
        tracing::info!("Request [GET] {}", url);

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::warn!("Team with id {} not found in teams service", team_id);
            return Ok(None);
        }

        if !status.is_success() {
            tracing::warn!("Error from teams service fetching team {} (status {})", team_id, status);
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let team = response.json::<Team>().await.map_err(|e| {
            tracing::error!("Invalid JSON response when fetching team {}: {}", team_id, e);
            e
        })?;

        Ok(Some(team))
    }
}
