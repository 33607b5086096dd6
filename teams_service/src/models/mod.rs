use league_common::{Country, Player, Team};
use serde::{Deserialize, Serialize};

/// Row from the teams table. Country is stored as its display name.
#[derive(Debug, sqlx::FromRow)]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    pub country: String,
    pub description: String,
}

impl TeamRow {
    /// Convert database row to API format.
    pub fn into_team(self) -> Result<Team, sqlx::Error> {
        let country = self
            .country
            .parse::<Country>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Team {
            id: self.id,
            name: self.name,
            country,
            description: self.description,
        })
    }
}

/// A team as returned by the API, with its roster when expansion was asked for.
#[derive(Debug, Serialize, Deserialize)]
pub struct TeamResponse {
    #[serde(flatten)]
    pub team: Team,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<Player>>,
}

impl TeamResponse {
    pub fn bare(team: Team) -> Self {
        Self { team, players: None }
    }

    pub fn expanded(team: Team, players: Vec<Player>) -> Self {
        Self {
            team,
            players: Some(players),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AverageAgeResponse {
    #[serde(rename = "avgAge")]
    pub avg_age: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalInjuredResponse {
    pub total_injured: i64,
}
