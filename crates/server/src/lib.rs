//! gamehub: a single-process HTTP CRUD server over a SQLite store of
//! games, users, libraries, reviews and achievements.
//!
//! A connection is handled end to end before the next accept: frame the
//! request, normalize its target, dispatch through the route table, run
//! the handler's SQL against the store, serialize the JSON document and
//! write the response. No keep-alive, no worker pool.

pub mod config;
pub mod handlers;
pub mod password;
pub mod router;
pub mod server;
pub mod store;
