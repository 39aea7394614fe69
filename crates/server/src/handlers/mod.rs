//! Route handlers and the response-construction contract they share.
//!
//! Every handler produces exactly one response on every path. The `Err`
//! side of [`HandlerResult`] is the early-exit response from validation
//! (malformed body, missing field, missing query parameter), so `?`
//! preserves fail-fast ordering: the first missing field wins and later
//! checks never run, and no SQL executes after a validation failure.

pub mod achievements;
pub mod games;
pub mod library;
pub mod reviews;
pub mod users;

use gamehub_http::response::{Response, StatusCode};
use gamehub_http::target::QueryParams;
use rusqlite::ToSql;
use rusqlite::types::Value as SqlValue;
use serde_json::{Value, json};

use crate::store::{Store, StoreError};

pub type HandlerResult = Result<Response, Response>;

/// Both sides of a handler result are responses; the router flattens.
pub fn into_response(result: HandlerResult) -> Response {
    result.unwrap_or_else(|response| response)
}

/// Serializes a JSON document into a response. A serialization failure is
/// the one server error still reported in-band.
pub fn json_response(status: StatusCode, document: &Value) -> Response {
    match serde_json::to_string(document) {
        Ok(body) => Response::new(status, body),
        Err(err) => {
            log::error!("failed to serialize response: {err}");
            Response::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error": "Failed to serialize JSON."}"#,
            )
        }
    }
}

pub fn message(status: StatusCode, text: &str) -> Response {
    json_response(status, &json!({ "message": text }))
}

pub fn error(status: StatusCode, text: &str) -> Response {
    json_response(status, &json!({ "error": text }))
}

pub fn bad_request(text: &str) -> Response {
    error(StatusCode::BAD_REQUEST, text)
}

/// Parses the request body as JSON.
pub fn parse_body(body: &str) -> Result<Value, Response> {
    serde_json::from_str(body).map_err(|_| bad_request("Failed to parse JSON request body."))
}

/// Fetches a required body field.
pub fn required<'a>(document: &'a Value, name: &str) -> Result<&'a Value, Response> {
    document
        .get(name)
        .ok_or_else(|| bad_request(&format!("Missing required field: {name}.")))
}

/// Fetches the `user_id` query parameter the `/me` endpoints key on.
pub fn required_user_id<'a>(query: &'a QueryParams) -> Result<&'a str, Response> {
    query
        .first("user_id")
        .ok_or_else(|| bad_request("Missing required query: user_id."))
}

/// JSON value to SQL parameter. Strings bind as text, numbers as
/// numbers; anything else degrades to its JSON text.
pub fn bind(value: &Value) -> SqlValue {
    match value {
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Number(n) if n.is_i64() => SqlValue::Integer(n.as_i64().unwrap_or_default()),
        Value::Number(n) => SqlValue::Real(n.as_f64().unwrap_or_default()),
        Value::Bool(b) => SqlValue::Integer(*b as i64),
        Value::Null => SqlValue::Null,
        other => SqlValue::Text(other.to_string()),
    }
}

/// The plaintext of a body field, for hashing.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Runs a mutating statement optimistically: a failure is logged and the
/// handler's success response is still built. PATCH, login and register
/// check execution explicitly instead.
pub fn run_statement(store: &Store, sql: &str, params: &[&dyn ToSql], description: &str) {
    match store.execute(sql, params) {
        Ok(_) => log::info!("{description}"),
        Err(err) => log::error!("{err}"),
    }
}

/// List queries degrade to an empty result on store failure; the failure
/// is logged, never sent to the client.
pub fn rows_or_empty(result: Result<Vec<Value>, StoreError>) -> Vec<Value> {
    result.unwrap_or_else(|err| {
        log::error!("{err}");
        Vec::new()
    })
}

/// By-id lookups degrade to the empty object, which downstream reads as
/// not-found.
pub fn object_or_empty(
    result: Result<serde_json::Map<String, Value>, StoreError>,
) -> serde_json::Map<String, Value> {
    result.unwrap_or_else(|err| {
        log::error!("{err}");
        serde_json::Map::new()
    })
}

/// Builds the SET clause for a PATCH from the allowed-field list. Only
/// fields present and string-typed in the body are appended, in list
/// order; everything binds positionally.
pub fn collect_updates(document: &Value, fields: &[&str]) -> (String, Vec<SqlValue>) {
    use std::fmt::Write;

    let mut clause = String::new();
    let mut params = Vec::new();
    for field in fields {
        let Some(item) = document.get(*field) else {
            continue;
        };
        if !item.is_string() {
            continue;
        }
        if !clause.is_empty() {
            clause.push_str(", ");
        }
        let _ = write!(clause, "{field} = ?{}", params.len() + 1);
        params.push(bind(item));
    }
    (clause, params)
}

/// Shared PATCH executor: no updatable fields is the caller's 400, an
/// execution failure its 500.
pub fn run_update(
    store: &Store,
    document: &Value,
    fields: &[&str],
    table: &str,
    key: &str,
    id: &str,
) -> Result<(), Response> {
    let (clause, mut params) = collect_updates(document, fields);
    if clause.is_empty() {
        return Err(bad_request("No fields provided to update."));
    }
    params.push(SqlValue::Text(id.to_string()));
    let sql = format!("UPDATE {table} SET {clause} WHERE {key} = ?{};", params.len());
    let refs: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
    match store.execute(&sql, &refs) {
        Ok(_) => Ok(()),
        Err(err) => {
            log::error!("{err}");
            Err(error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to execute SQL update.",
            ))
        }
    }
}
