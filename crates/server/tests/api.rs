//! End-to-end exercises of the route table against an in-memory store.

use gamehub_http::method::Method;
use gamehub_http::parser::RequestParser;
use gamehub_http::request::Request;
use gamehub_http::response::{Response, StatusCode};
use gamehub_http::sync::ChunkReader;
use gamehub_server::router;
use gamehub_server::store::Store;
use serde_json::Value;

fn store() -> Store {
    let store = Store::open_in_memory().unwrap();
    store.init_tables().unwrap();
    store
}

fn send(store: &Store, method: Method, path: &str, body: &str) -> Response {
    let request = Request {
        method,
        path: path.to_string(),
        body: body.to_string(),
    };
    router::dispatch(store, &request)
}

fn json(response: &Response) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

fn register_ada(store: &Store) -> Value {
    let response = send(
        store,
        Method::Post,
        "/register",
        r#"{"username": "ada", "email": "ada@example.com",
            "password": "hunter2", "profile_image": "a.png"}"#,
    );
    assert_eq!(response.status, StatusCode::OK);
    json(&response)
}

fn add_portal(store: &Store) {
    let response = send(
        store,
        Method::Post,
        "/games",
        r#"{"added_by": 1, "title": "Portal", "genre": "puzzle",
            "cover_image": "c.png", "icon_image": "i.png", "developer": "Valve"}"#,
    );
    assert_eq!(response.body, r#"{"message":"Game inserted."}"#);
}

#[test]
fn register_login_and_profile_patch() {
    let store = store();
    let created = register_ada(&store);
    assert_eq!(created["username"], "ada");
    assert!(created.get("password").is_none());
    assert!(created.get("created_at").is_some());

    let response = send(
        &store,
        Method::Post,
        "/login",
        r#"{"username": "ada@example.com", "password": "hunter2"}"#,
    );
    assert_eq!(response.status, StatusCode::OK);
    assert!(json(&response).get("password").is_none());

    let response = send(
        &store,
        Method::Post,
        "/login",
        r#"{"username": "ada", "password": "nope"}"#,
    );
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, r#"{"error":"User not found."}"#);

    let response = send(
        &store,
        Method::Patch,
        "/me?user_id=1",
        r#"{"email": "ada@new.example"}"#,
    );
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(json(&response)["email"], "ada@new.example");
}

#[test]
fn game_crud_lifecycle() {
    let store = store();
    register_ada(&store);
    add_portal(&store);

    let response = send(&store, Method::Get, "/games", "");
    let rows = json(&response);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["title"], "Portal");

    let response = send(&store, Method::Get, "/games/1", "");
    assert_eq!(json(&response)["developer"], "Valve");

    let response = send(&store, Method::Patch, "/games/1", r#"{"genre": "physics"}"#);
    assert_eq!(response.body, r#"{"message":"Game updated."}"#);
    let response = send(&store, Method::Get, "/games/1", "");
    assert_eq!(json(&response)["genre"], "physics");

    // Deletes are unconditional and answer the same both times.
    for _ in 0..2 {
        let response = send(&store, Method::Delete, "/games/1", "");
        assert_eq!(response.body, r#"{"message":"Game deleted."}"#);
    }
    let response = send(&store, Method::Get, "/games/1", "");
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, r#"{"error":"Game not found."}"#);
}

#[test]
fn create_game_rejects_missing_title_without_inserting() {
    let store = store();
    register_ada(&store);
    let response = send(&store, Method::Post, "/games", r#"{"added_by": 1}"#);
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, r#"{"error":"Missing required field: title."}"#);

    let response = send(&store, Method::Get, "/games", "");
    assert_eq!(response.body, "[]");
}

#[test]
fn reviews_list_includes_the_reviewer_username() {
    let store = store();
    register_ada(&store);
    add_portal(&store);

    let response = send(
        &store,
        Method::Post,
        "/reviews/game/1",
        r#"{"user_id": 1, "rating": 4, "review_text": "good"}"#,
    );
    assert_eq!(response.body, r#"{"message":"Review inserted."}"#);

    let response = send(&store, Method::Get, "/reviews/game/1", "");
    let rows = json(&response);
    assert_eq!(rows[0]["username"], "ada");
    assert_eq!(rows[0]["rating"], "4");
}

#[test]
fn library_add_list_and_remove() {
    let store = store();
    register_ada(&store);
    add_portal(&store);

    let response = send(
        &store,
        Method::Post,
        "/me/games",
        r#"{"user_id": 1, "game_id": 1}"#,
    );
    assert_eq!(response.body, r#"{"message":"Game inserted to library."}"#);

    let response = send(&store, Method::Get, "/me/games?user_id=1", "");
    assert_eq!(json(&response)[0]["title"], "Portal");

    let response = send(&store, Method::Delete, "/me/games/1?user_id=1", "");
    assert_eq!(response.body, r#"{"message":"Game deleted from library."}"#);

    let response = send(&store, Method::Get, "/me/games?user_id=1", "");
    assert_eq!(response.body, "[]");
}

#[test]
fn library_list_without_query_does_not_route() {
    let store = store();
    let response = send(&store, Method::Get, "/me/games", "");
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, r#"{"error":"Not Found."}"#);
}

#[test]
fn achievement_lifecycle_and_unlocks() {
    let store = store();
    register_ada(&store);
    add_portal(&store);

    let response = send(
        &store,
        Method::Post,
        "/achievements",
        r#"{"game_id": 1, "name": "Cake", "description": "Find it.", "points": 10}"#,
    );
    assert_eq!(response.body, r#"{"message":"Achievement inserted."}"#);

    let response = send(
        &store,
        Method::Patch,
        "/achievements/1",
        r#"{"description": "Found it."}"#,
    );
    assert_eq!(response.body, r#"{"message":"Achievement updated."}"#);

    let response = send(&store, Method::Get, "/achievements/game/1", "");
    assert_eq!(json(&response)[0]["description"], "Found it.");

    let response = send(
        &store,
        Method::Post,
        "/me/achievements",
        r#"{"user_id": 1, "achievement_id": 1}"#,
    );
    assert_eq!(response.body, r#"{"message":"User achievement inserted."}"#);

    let response = send(&store, Method::Get, "/me/achievements?user_id=1", "");
    assert_eq!(json(&response)[0]["name"], "Cake");

    let response = send(&store, Method::Get, "/me/achievements/1?user_id=1", "");
    assert_eq!(json(&response).as_array().unwrap().len(), 1);

    let response = send(&store, Method::Delete, "/achievements/1", "");
    assert_eq!(response.body, r#"{"message":"Achievement deleted."}"#);
    let response = send(&store, Method::Get, "/achievements/1", "");
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, r#"{"error":"Achievement not found."}"#);
}

#[test]
fn posted_games_lists_what_the_user_added() {
    let store = store();
    register_ada(&store);
    add_portal(&store);

    let response = send(&store, Method::Get, "/me/posted-games?user_id=1", "");
    assert_eq!(json(&response)[0]["title"], "Portal");

    let response = send(&store, Method::Get, "/me/posted-games?user_id=2", "");
    assert_eq!(response.body, "[]");

    let response = send(&store, Method::Get, "/me/posted-games", "");
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        r#"{"error":"Missing required query: user_id."}"#
    );
}

#[test]
fn preflight_carries_cors_and_no_body() {
    let store = store();
    let response = send(&store, Method::Options, "/games/1", "");
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let wire = String::from_utf8(response.to_bytes().to_vec()).unwrap();
    assert!(wire.starts_with("HTTP/1.1 204 No Content\r\n"));
    assert!(wire.contains("Access-Control-Allow-Origin: *\r\n"));
    assert!(wire.contains("Access-Control-Allow-Methods: GET, POST, PATCH, DELETE, OPTIONS\r\n"));
    assert!(wire.contains("Access-Control-Allow-Headers: Content-Type\r\n"));
    assert!(!wire.contains("Content-Type: application/json"));
}

#[test]
fn malformed_body_is_reported_before_field_checks() {
    let store = store();
    let response = send(&store, Method::Post, "/register", "{broken");
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        r#"{"error":"Failed to parse JSON request body."}"#
    );
}

// One request walked through the wire layers: raw bytes in, framed,
// dispatched, serialized back out.
#[tokio::test]
async fn raw_bytes_to_wire_response() {
    let store = store();
    register_ada(&store);

    let body = r#"{"username": "ada", "password": "hunter2"}"#;
    let raw = format!(
        "POST /login HTTP/1.1\r\nHost: x\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );

    let (tx, reader) = ChunkReader::pair(1);
    tx.send(raw.into_bytes()).await.unwrap();
    drop(tx);

    let request = RequestParser::new(reader).parse().await.unwrap();
    assert_eq!(request.method, Method::Post);
    let response = router::dispatch(&store, &request);
    assert_eq!(response.status, StatusCode::OK);

    let wire = String::from_utf8(response.to_bytes().to_vec()).unwrap();
    assert!(wire.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(wire.contains("Content-Type: application/json\r\n"));
    let (_, sent_body) = wire.split_once("\r\n\r\n").unwrap();
    assert!(serde_json::from_str::<Value>(sent_body).is_ok());
}
