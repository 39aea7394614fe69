//! `/games` and `/me/posted-games` handlers.

use gamehub_http::response::StatusCode;
use gamehub_http::target::QueryParams;
use rusqlite::ToSql;
use serde_json::Value;

use super::{
    HandlerResult, bind, json_response, message, object_or_empty, parse_body, required,
    required_user_id, rows_or_empty, run_statement, run_update,
};
use crate::store::Store;

pub fn list(store: &Store) -> HandlerResult {
    let rows = rows_or_empty(store.query_array("SELECT * FROM Games;", &[]));
    Ok(json_response(StatusCode::OK, &Value::Array(rows)))
}

pub fn get_by_id(store: &Store, id: &str) -> HandlerResult {
    let mut row =
        object_or_empty(store.query_object("SELECT * FROM Games WHERE game_id = ?1;", &[&id]));
    if row.is_empty() {
        row.insert("error".into(), Value::String("Game not found.".into()));
        return Err(json_response(StatusCode::NOT_FOUND, &Value::Object(row)));
    }
    Ok(json_response(StatusCode::OK, &Value::Object(row)))
}

pub fn create(store: &Store, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    let added_by = required(&document, "added_by")?;
    let title = required(&document, "title")?;
    let genre = required(&document, "genre")?;
    let cover_image = required(&document, "cover_image")?;
    let icon_image = required(&document, "icon_image")?;
    let developer = required(&document, "developer")?;

    let params = [
        bind(added_by),
        bind(title),
        bind(genre),
        bind(cover_image),
        bind(icon_image),
        bind(developer),
    ];
    let refs: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
    run_statement(
        store,
        "INSERT INTO Games (added_by, title, genre, cover_image, icon_image, developer) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        &refs,
        "Inserted game",
    );
    Ok(message(StatusCode::OK, "Game inserted."))
}

pub fn delete_by_id(store: &Store, id: &str) -> HandlerResult {
    run_statement(
        store,
        "DELETE FROM Games WHERE game_id = ?1;",
        &[&id],
        "Deleted game by id",
    );
    Ok(message(StatusCode::OK, "Game deleted."))
}

pub fn patch_by_id(store: &Store, id: &str, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    run_update(
        store,
        &document,
        &[
            "title",
            "genre",
            "cover_image",
            "icon_image",
            "release_date",
            "developer",
        ],
        "Games",
        "game_id",
        id,
    )?;
    Ok(message(StatusCode::OK, "Game updated."))
}

/// Games added by the user, keyed on the `user_id` query parameter.
pub fn posted_by_user(store: &Store, query: &QueryParams) -> HandlerResult {
    let user_id = required_user_id(query)?;
    let rows = rows_or_empty(store.query_array(
        "SELECT Games.* FROM Games WHERE Games.added_by = ?1;",
        &[&user_id],
    ));
    Ok(json_response(StatusCode::OK, &Value::Array(rows)))
}
