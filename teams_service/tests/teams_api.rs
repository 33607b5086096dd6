use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use league_common::upstream::http_client;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use teams_service::{client::PlayersClient, db, routes, AppState};
use tower::ServiceExt;

// Nothing listens here; tests that must not reach the players service use it.
const UNREACHABLE_PLAYERS: &str = "http://127.0.0.1:9";

async fn test_app(players_url: &str, batch_expand: bool) -> Router {
    let pool = db::connect("sqlite::memory:", 1).await.unwrap();
    let http = http_client(Duration::from_secs(2)).unwrap();

    routes::router(AppState {
        pool,
        players: PlayersClient::new(http, players_url),
        batch_expand,
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

async fn create(app: &Router, name: &str, country: &str) -> Value {
    let body = json!({"name": name, "country": country, "description": "Equipo"});
    let (status, team) = send(app, Method::POST, "/teams", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    team
}

fn player(name: &str, age: i64, team_id: &str, injured: bool) -> Value {
    json!({
        "id": format!("p-{name}"),
        "name": name,
        "age": age,
        "number": 7,
        "team_id": team_id,
        "description": "",
        "injured": injured
    })
}

async fn mock_roster(server: &mut ServerGuard, team_id: &str, roster: Value) -> Mock {
    server
        .mock("GET", "/players")
        .match_query(Matcher::UrlEncoded("team_id".into(), team_id.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(roster.to_string())
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn create_then_get_returns_the_same_record() {
    let app = test_app(UNREACHABLE_PLAYERS, false).await;

    let created = create(&app, "Colo-Colo", "Chile").await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["country"], "Chile");
    assert_eq!(created["description"], "Equipo");

    let (status, fetched) = send(&app, Method::GET, &format!("/teams/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_accepts_every_allowed_country() {
    let app = test_app(UNREACHABLE_PLAYERS, false).await;

    for country in ["Chile", "Portugal", "España", "Francia"] {
        let team = create(&app, "Club", country).await;
        assert_eq!(team["country"], country);
    }
}

#[tokio::test]
async fn create_rejects_unknown_country() {
    let app = test_app(UNREACHABLE_PLAYERS, false).await;

    let body = json!({"name": "Boca Juniors", "country": "Argentina"});
    let (status, _) = send(&app, Method::POST, "/teams", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, teams) = send(&app, Method::GET, "/teams", None).await;
    assert!(teams.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn get_unknown_team_is_not_found() {
    let app = test_app(UNREACHABLE_PLAYERS, false).await;

    let (status, body) = send(&app, Method::GET, "/teams/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Team with id missing not found");
}

#[tokio::test]
async fn update_replaces_every_field() {
    let app = test_app(UNREACHABLE_PLAYERS, false).await;
    let created = create(&app, "Colo-Colo", "Chile").await;
    let uri = format!("/teams/{}", created["id"].as_str().unwrap());

    let body = json!({"name": "Colo-Colo Actualizado", "country": "Portugal"});
    let (status, updated) = send(&app, Method::PUT, &uri, Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Colo-Colo Actualizado");
    assert_eq!(updated["country"], "Portugal");
    assert_eq!(updated["description"], "");

    let (status, _) = send(&app, Method::PUT, "/teams/missing", Some(json!({"name": "x", "country": "Chile"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_unconditional() {
    let app = test_app(UNREACHABLE_PLAYERS, false).await;
    let created = create(&app, "Sporting CP", "Portugal").await;
    let uri = format!("/teams/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_without_expand_does_not_call_players_service() {
    let app = test_app(UNREACHABLE_PLAYERS, false).await;
    create(&app, "Colo-Colo", "Chile").await;
    create(&app, "FC Barcelona", "España").await;

    let (status, teams) = send(&app, Method::GET, "/teams", None).await;
    assert_eq!(status, StatusCode::OK);

    let teams = teams.as_array().unwrap();
    assert_eq!(teams.len(), 2);
    assert!(teams.iter().all(|t| t.get("players").is_none()));
}

#[tokio::test]
async fn list_expansion_calls_players_service_once_per_team() {
    let mut server = Server::new_async().await;
    let app = test_app(&server.url(), false).await;
    let colo = create(&app, "Colo-Colo", "Chile").await;
    let psg = create(&app, "Paris Saint-Germain", "Francia").await;
    let colo_id = colo["id"].as_str().unwrap();
    let psg_id = psg["id"].as_str().unwrap();

    let colo_mock = mock_roster(&mut server, colo_id, json!([player("Messi", 37, colo_id, false)])).await;
    let psg_mock = mock_roster(&mut server, psg_id, json!([])).await;

    let (status, teams) = send(&app, Method::GET, "/teams?expand=players", None).await;

    colo_mock.assert_async().await;
    psg_mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);

    let teams = teams.as_array().unwrap();
    assert_eq!(teams[0]["id"], colo_id);
    assert_eq!(teams[0]["players"][0]["name"], "Messi");
    assert_eq!(teams[1]["players"], json!([]));
}

#[tokio::test]
async fn list_expansion_can_use_one_batch_call() {
    let mut server = Server::new_async().await;
    let app = test_app(&server.url(), true).await;
    let colo = create(&app, "Colo-Colo", "Chile").await;
    let psg = create(&app, "Paris Saint-Germain", "Francia").await;
    let colo_id = colo["id"].as_str().unwrap();
    let psg_id = psg["id"].as_str().unwrap();

    let per_team = server
        .mock("GET", "/players")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let batch = server
        .mock("GET", "/players/batch")
        .match_query(Matcher::UrlEncoded("team_ids".into(), format!("{colo_id},{psg_id}")))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ colo_id: [player("Messi", 37, colo_id, false)], psg_id: [] }).to_string())
        .expect(1)
        .create_async()
        .await;

    let (status, teams) = send(&app, Method::GET, "/teams?expand=players", None).await;

    batch.assert_async().await;
    per_team.assert_async().await;
    assert_eq!(status, StatusCode::OK);

    let teams = teams.as_array().unwrap();
    assert_eq!(teams[0]["players"][0]["name"], "Messi");
    assert_eq!(teams[1]["players"], json!([]));
}

#[tokio::test]
async fn get_with_expand_attaches_roster() {
    let mut server = Server::new_async().await;
    let app = test_app(&server.url(), false).await;
    let team = create(&app, "Colo-Colo", "Chile").await;
    let id = team["id"].as_str().unwrap();

    let roster = json!([player("Messi", 37, id, false)]);
    let mock = mock_roster(&mut server, id, roster.clone()).await;

    let (status, body) = send(&app, Method::GET, &format!("/teams/{id}?expand=players"), None).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Colo-Colo");
    assert_eq!(body["players"], roster);
}

#[tokio::test]
async fn expansion_fails_when_players_service_errors() {
    let mut server = Server::new_async().await;
    let app = test_app(&server.url(), false).await;
    let team = create(&app, "Colo-Colo", "Chile").await;
    let id = team["id"].as_str().unwrap();

    let _mock = server
        .mock("GET", "/players")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let (status, _) = send(&app, Method::GET, &format!("/teams/{id}?expand=players"), None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, _) = send(&app, Method::GET, "/teams?expand=players", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn average_age_over_roster() {
    let mut server = Server::new_async().await;
    let app = test_app(&server.url(), false).await;

    let roster = json!([
        player("Messi", 37, "T1", false),
        player("Ronaldo", 40, "T1", false),
        player("Mbappe", 26, "T1", true),
    ]);
    let _mock = mock_roster(&mut server, "T1", roster).await;

    let (status, body) = send(&app, Method::GET, "/teams/T1/avg-age", None).await;
    assert_eq!(status, StatusCode::OK);

    let avg = body["avgAge"].as_f64().unwrap();
    assert!((avg - 103.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn average_age_of_empty_roster_is_minus_one() {
    let mut server = Server::new_async().await;
    let app = test_app(&server.url(), false).await;
    let _mock = mock_roster(&mut server, "T1", json!([])).await;

    let (status, body) = send(&app, Method::GET, "/teams/T1/avg-age", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["avgAge"].as_f64(), Some(-1.0));
}

#[tokio::test]
async fn aggregates_degrade_to_minus_one_when_players_service_is_down() {
    let app = test_app(UNREACHABLE_PLAYERS, false).await;

    let (status, body) = send(&app, Method::GET, "/teams/T1/avg-age", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["avgAge"].as_f64(), Some(-1.0));

    let (status, body) = send(&app, Method::GET, "/teams/T1/total-injured", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_injured"], -1);
}

#[tokio::test]
async fn aggregates_degrade_to_minus_one_on_error_status() {
    let mut server = Server::new_async().await;
    let app = test_app(&server.url(), false).await;
    let _mock = server
        .mock("GET", "/players")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let (_, body) = send(&app, Method::GET, "/teams/T1/total-injured", None).await;
    assert_eq!(body["total_injured"], -1);
}

#[tokio::test]
async fn total_injured_counts_injured_players() {
    let mut server = Server::new_async().await;
    let app = test_app(&server.url(), false).await;

    let roster = json!([
        player("Messi", 37, "T1", false),
        player("Ronaldo", 40, "T1", false),
        player("Mbappe", 26, "T1", true),
    ]);
    let _mock = mock_roster(&mut server, "T1", roster).await;

    let (status, body) = send(&app, Method::GET, "/teams/T1/total-injured", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"total_injured": 1}));
}
