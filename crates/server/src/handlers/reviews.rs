//! `/games/{id}/reviews` handlers.

use gamehub_http::response::StatusCode;
use rusqlite::ToSql;
use serde_json::Value;

use super::{
    HandlerResult, bind, json_response, message, parse_body, required, rows_or_empty,
    run_statement,
};
use crate::store::Store;

/// Reviews for a game, joined with the reviewer's username.
pub fn list_for_game(store: &Store, game_id: &str) -> HandlerResult {
    let rows = rows_or_empty(store.query_array(
        "SELECT Reviews.review_id, Reviews.game_id, Reviews.rating, \
         Reviews.review_text, Reviews.created_at, Users.username \
         FROM Reviews \
         INNER JOIN Users ON Reviews.user_id = Users.user_id \
         WHERE Reviews.game_id = ?1;",
        &[&game_id],
    ));
    Ok(json_response(StatusCode::OK, &Value::Array(rows)))
}

pub fn create(store: &Store, game_id: &str, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    let user_id = required(&document, "user_id")?;
    let rating = required(&document, "rating")?;
    let review_text = required(&document, "review_text")?;

    let params = [bind(user_id), bind(rating), bind(review_text)];
    let refs: Vec<&dyn ToSql> = std::iter::once(&game_id as &dyn ToSql)
        .chain(params.iter().map(|p| p as &dyn ToSql))
        .collect();
    run_statement(
        store,
        "INSERT INTO Reviews (game_id, user_id, rating, review_text) \
         VALUES (?1, ?2, ?3, ?4);",
        &refs,
        "Inserted review",
    );
    Ok(message(StatusCode::OK, "Review inserted."))
}
