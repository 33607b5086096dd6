use std::str::FromStr;

use league_common::{Team, TeamInput};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use crate::models::TeamRow;

/// Open the pool and bring the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // In-memory databases live only as long as their connection
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

// Team queries
pub async fn get_all_teams(pool: &SqlitePool) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, TeamRow>(
        r#"SELECT * FROM teams ORDER BY rowid"#
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(TeamRow::into_team)
    .collect()
}

pub async fn get_team_by_id(pool: &SqlitePool, team_id: &str) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, TeamRow>(
        r#"SELECT * FROM teams WHERE id = ?"#
    )
    .bind(team_id)
    .fetch_optional(pool)
    .await?
    .map(TeamRow::into_team)
    .transpose()
}

pub async fn insert_team(pool: &SqlitePool, team: &TeamInput) -> Result<Team, sqlx::Error> {
    sqlx::query_as::<_, TeamRow>(
        r#"INSERT INTO teams (id, name, country, description)
           VALUES (?, ?, ?, ?)
           RETURNING *"#
    )
    .bind(Uuid::new_v4().simple().to_string())
    .bind(&team.name)
    .bind(team.country.as_str())
    .bind(&team.description)
    .fetch_one(pool)
    .await?
    .into_team()
}

/// Replace every mutable field. `None` when the id does not exist.
pub async fn update_team(pool: &SqlitePool, team_id: &str, team: &TeamInput) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, TeamRow>(
        r#"UPDATE teams
           SET name = ?, country = ?, description = ?
           WHERE id = ?
           RETURNING *"#
    )
    .bind(&team.name)
    .bind(team.country.as_str())
    .bind(&team.description)
    .bind(team_id)
    .fetch_optional(pool)
    .await?
    .map(TeamRow::into_team)
    .transpose()
}

/// Players referencing the team are left alone.
pub async fn delete_team(pool: &SqlitePool, team_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM teams WHERE id = ?"#)
        .bind(team_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
