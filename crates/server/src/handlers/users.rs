//! `/users` registration, `/users/login`, and `/me` profile updates.
//!
//! Stored passwords carry a per-user salt, so login fetches the account
//! row first and verifies the submitted password against its hash. The
//! `password` column is stripped from every row sent to a client.

use gamehub_http::response::StatusCode;
use gamehub_http::target::QueryParams;
use rusqlite::ToSql;
use serde_json::Value;

use super::{
    HandlerResult, error, json_response, object_or_empty, parse_body, required, required_user_id,
    run_update, value_text,
};
use crate::password;
use crate::store::Store;

pub fn register(store: &Store, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    let username = required(&document, "username")?;
    let email = required(&document, "email")?;
    let password_field = required(&document, "password")?;
    let profile_image = required(&document, "profile_image")?;

    let hashed = password::hash(&value_text(password_field));
    let params: [&dyn ToSql; 4] = [
        &value_text(username),
        &value_text(email),
        &hashed,
        &value_text(profile_image),
    ];
    if let Err(err) = store.execute(
        "INSERT INTO Users (username, email, password, profile_image) \
         VALUES (?1, ?2, ?3, ?4);",
        &params,
    ) {
        log::error!("{err}");
        return Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred.",
        ));
    }
    log::info!("Inserted user");

    let mut row = object_or_empty(store.query_object(
        "SELECT * FROM Users WHERE username = ?1;",
        &[&value_text(username)],
    ));
    if row.is_empty() {
        row.insert(
            "error".into(),
            Value::String("Failed to create a user.".into()),
        );
        return Err(json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &Value::Object(row),
        ));
    }
    row.remove("password");
    Ok(json_response(StatusCode::OK, &Value::Object(row)))
}

pub fn login(store: &Store, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    let username = required(&document, "username")?;
    let password_field = required(&document, "password")?;

    let account = value_text(username);
    let row = object_or_empty(store.query_object(
        "SELECT * FROM Users WHERE username = ?1 OR email = ?1;",
        &[&account],
    ));
    let verified = row
        .get("password")
        .and_then(Value::as_str)
        .is_some_and(|stored| password::verify(&value_text(password_field), stored));
    if !verified {
        return Err(error(StatusCode::NOT_FOUND, "User not found."));
    }

    let mut row = row;
    row.remove("password");
    Ok(json_response(StatusCode::OK, &Value::Object(row)))
}

/// PATCH `/me`: updates the profile keyed on the `user_id` query, then
/// returns the fresh row.
pub fn patch(store: &Store, query: &QueryParams, body: &str) -> HandlerResult {
    let document = parse_body(body)?;
    let user_id = required_user_id(query)?;
    run_update(
        store,
        &document,
        &["username", "email", "profile_image"],
        "Users",
        "user_id",
        user_id,
    )?;

    let mut row = object_or_empty(
        store.query_object("SELECT * FROM Users WHERE user_id = ?1;", &[&user_id]),
    );
    if row.is_empty() {
        row.insert(
            "error".into(),
            Value::String("Failed to fetch a user.".into()),
        );
        return Err(json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &Value::Object(row),
        ));
    }
    row.remove("password");
    Ok(json_response(StatusCode::OK, &Value::Object(row)))
}
