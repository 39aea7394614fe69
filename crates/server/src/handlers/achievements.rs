//! `/achievements`, `/games/{id}/achievements` and `/me/achievements`
//! handlers.

use gamehub_http::response::StatusCode;
use gamehub_http::target::QueryParams;
use rusqlite::ToSql;
use serde_json::Value;

use super::{
    HandlerResult, bind, json_response, message, object_or_empty, parse_body, required,
    required_user_id, rows_or_empty, run_statement, run_update,
};
use crate::store::Store;

pub fn get_by_id(store: &Store, id: &str) -> HandlerResult {
    let mut row = object_or_empty(store.query_object(
        "SELECT * FROM Achievements WHERE achievement_id = ?1;",
        &[&id],
    ));
    if row.is_empty() {
        row.insert(
            "error".into(),
            Value::String("Achievement not found.".into()),
        );
        return Err(json_response(StatusCode::NOT_FOUND, &Value::Object(row)));
    }
    Ok(json_response(StatusCode::OK, &Value::Object(row)))
}

pub fn create(store: &Store, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    let game_id = required(&document, "game_id")?;
    let name = required(&document, "name")?;
    let description = required(&document, "description")?;
    let points = required(&document, "points")?;

    let params = [bind(game_id), bind(name), bind(description), bind(points)];
    let refs: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
    run_statement(
        store,
        "INSERT INTO Achievements (game_id, name, description, points) \
         VALUES (?1, ?2, ?3, ?4);",
        &refs,
        "Inserted achievement",
    );
    Ok(message(StatusCode::OK, "Achievement inserted."))
}

pub fn patch_by_id(store: &Store, id: &str, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    run_update(
        store,
        &document,
        &["name", "description", "points"],
        "Achievements",
        "achievement_id",
        id,
    )?;
    Ok(message(StatusCode::OK, "Achievement updated."))
}

pub fn delete_by_id(store: &Store, id: &str) -> HandlerResult {
    run_statement(
        store,
        "DELETE FROM Achievements WHERE achievement_id = ?1;",
        &[&id],
        "Deleted achievement by id",
    );
    Ok(message(StatusCode::OK, "Achievement deleted."))
}

pub fn for_game(store: &Store, game_id: &str) -> HandlerResult {
    let rows = rows_or_empty(store.query_array(
        "SELECT * FROM Achievements WHERE game_id = ?1;",
        &[&game_id],
    ));
    Ok(json_response(StatusCode::OK, &Value::Array(rows)))
}

/// Achievements the query user has unlocked, across all games.
pub fn unlocked(store: &Store, query: &QueryParams) -> HandlerResult {
    let user_id = required_user_id(query)?;
    let rows = rows_or_empty(store.query_array(
        "SELECT Achievements.* FROM Achievements \
         INNER JOIN User_Achievements \
         ON Achievements.achievement_id = User_Achievements.achievement_id \
         WHERE User_Achievements.user_id = ?1;",
        &[&user_id],
    ));
    Ok(json_response(StatusCode::OK, &Value::Array(rows)))
}

/// Achievements the query user has unlocked in the path id's game.
pub fn unlocked_for_game(store: &Store, game_id: &str, query: &QueryParams) -> HandlerResult {
    let user_id = required_user_id(query)?;
    let rows = rows_or_empty(store.query_array(
        "SELECT Achievements.* FROM Achievements \
         INNER JOIN User_Achievements \
         ON Achievements.achievement_id = User_Achievements.achievement_id \
         WHERE Achievements.game_id = ?1 AND User_Achievements.user_id = ?2;",
        &[&game_id, &user_id],
    ));
    Ok(json_response(StatusCode::OK, &Value::Array(rows)))
}

pub fn unlock(store: &Store, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    let user_id = required(&document, "user_id")?;
    let achievement_id = required(&document, "achievement_id")?;

    let params = [bind(user_id), bind(achievement_id)];
    let refs: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
    run_statement(
        store,
        "INSERT INTO User_Achievements (user_id, achievement_id) VALUES (?1, ?2);",
        &refs,
        "Inserted user achievement",
    );
    Ok(message(StatusCode::OK, "User achievement inserted."))
}
