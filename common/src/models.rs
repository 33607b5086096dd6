use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Player as stored by the players service and returned over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub number: i64,
    pub team_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub injured: bool,
}

/// Request body for creating or fully replacing a player.
///
/// Any `id` in the body is ignored; the store owns identifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInput {
    pub name: String,
    pub age: i64,
    pub number: i64,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub injured: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Countries a team may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Chile,
    Portugal,
    #[serde(rename = "España")]
    Espana,
    Francia,
}

#[derive(Debug, Error)]
#[error("unknown country: {0}")]
pub struct UnknownCountry(pub String);

impl Country {
    pub const ALL: [Country; 4] = [
        Country::Chile,
        Country::Portugal,
        Country::Espana,
        Country::Francia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Chile => "Chile",
            Country::Portugal => "Portugal",
            Country::Espana => "España",
            Country::Francia => "Francia",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCountry(s.to_string()))
    }
}

/// Team as stored by the teams service and returned over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub country: Country,
    #[serde(default)]
    pub description: String,
}

/// Request body for creating or fully replacing a team.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamInput {
    pub name: String,
    pub country: Country,
    #[serde(default)]
    pub description: String,
}

/// Body returned by delete endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
