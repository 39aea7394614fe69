//! `/me/games` library handlers.

use gamehub_http::response::StatusCode;
use gamehub_http::target::QueryParams;
use rusqlite::ToSql;
use serde_json::Value;

use super::{
    HandlerResult, bind, json_response, message, parse_body, required, required_user_id,
    rows_or_empty, run_statement,
};
use crate::store::Store;

/// Games in the user's library, keyed on the `user_id` query parameter.
pub fn list(store: &Store, query: &QueryParams) -> HandlerResult {
    let user_id = required_user_id(query)?;
    let rows = rows_or_empty(store.query_array(
        "SELECT Games.* FROM Libraries \
         INNER JOIN Games ON Libraries.game_id = Games.game_id \
         WHERE Libraries.user_id = ?1;",
        &[&user_id],
    ));
    Ok(json_response(StatusCode::OK, &Value::Array(rows)))
}

pub fn add(store: &Store, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    let user_id = required(&document, "user_id")?;
    let game_id = required(&document, "game_id")?;

    let params = [bind(user_id), bind(game_id)];
    let refs: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
    run_statement(
        store,
        "INSERT INTO Libraries (user_id, game_id) VALUES (?1, ?2);",
        &refs,
        "Inserted game into library",
    );
    Ok(message(StatusCode::OK, "Game inserted to library."))
}

/// Removes the path id's game from the query user's library.
pub fn remove(store: &Store, game_id: &str, query: &QueryParams) -> HandlerResult {
    let user_id = required_user_id(query)?;
    run_statement(
        store,
        "DELETE FROM Libraries WHERE game_id = ?1 AND user_id = ?2;",
        &[&game_id, &user_id],
        "Deleted game from library",
    );
    Ok(message(StatusCode::OK, "Game deleted from library."))
}
