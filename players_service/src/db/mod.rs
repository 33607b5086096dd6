use std::str::FromStr;

use league_common::{Player, PlayerInput};
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;
use uuid::Uuid;

/// Open the pool and bring the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // In-memory databases live only as long as their connection, so never
    // let the pool recycle idle ones.
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

// Player queries
pub async fn get_all_players(pool: &SqlitePool) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM players ORDER BY rowid"#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_players_by_team(pool: &SqlitePool, team_id: &str) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM players WHERE team_id = ? ORDER BY rowid"#
    )
    .bind(team_id)
    .fetch_all(pool)
    .await
}

/// Bind parameters per `IN (...)` query; below SQLite's oldest default
/// variable limit of 999.
pub const TEAM_IDS_PER_QUERY: usize = 500;

/// All players whose team is one of `team_ids`, one query per chunk of
/// `TEAM_IDS_PER_QUERY` ids.
pub async fn get_players_by_teams(pool: &SqlitePool, team_ids: &[String]) -> Result<Vec<Player>, sqlx::Error> {
    let mut players = Vec::new();

    for chunk in team_ids.chunks(TEAM_IDS_PER_QUERY) {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM players WHERE team_id IN (");
        let mut separated = builder.separated(", ");
        for team_id in chunk {
            separated.push_bind(team_id.as_str());
        }
        separated.push_unseparated(") ORDER BY rowid");

        players.extend(builder.build_query_as::<Player>().fetch_all(pool).await?);
    }

    Ok(players)
}

pub async fn get_player_by_id(pool: &SqlitePool, player_id: &str) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_player(pool: &SqlitePool, player: &PlayerInput) -> Result<Player, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"INSERT INTO players (id, name, age, number, team_id, description, injured)
           VALUES (?, ?, ?, ?, ?, ?, ?)
           RETURNING *"#
    )
    .bind(Uuid::new_v4().simple().to_string())
    .bind(&player.name)
    .bind(player.age)
    .bind(player.number)
    .bind(&player.team_id)
    .bind(&player.description)
    .bind(player.injured)
    .fetch_one(pool)
    .await
}

/// Replace every mutable field. `None` when the id does not exist.
pub async fn update_player(pool: &SqlitePool, player_id: &str, player: &PlayerInput) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"UPDATE players
           SET name = ?, age = ?, number = ?, team_id = ?, description = ?, injured = ?
           WHERE id = ?
           RETURNING *"#
    )
    .bind(&player.name)
    .bind(player.age)
    .bind(player.number)
    .bind(&player.team_id)
    .bind(&player.description)
    .bind(player.injured)
    .bind(player_id)
    .fetch_optional(pool)
    .await
}

pub async fn toggle_injured(pool: &SqlitePool, player_id: &str) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"UPDATE players SET injured = NOT injured WHERE id = ? RETURNING *"#
    )
    .bind(player_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_player_team(pool: &SqlitePool, player_id: &str, team_id: Option<&str>) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"UPDATE players SET team_id = ? WHERE id = ? RETURNING *"#
    )
    .bind(team_id)
    .bind(player_id)
    .fetch_optional(pool)
    .await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_player(pool: &SqlitePool, player_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM players WHERE id = ?"#)
        .bind(player_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
