//! SQLite-backed store: schema bootstrap, parameterized statement
//! execution, and the two row sinks handlers consume.
//!
//! The store is the one handle shared across requests. It is only ever
//! accessed sequentially (one connection is handled at a time), so no
//! locking is involved.

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ToSql};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQL execution failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS Users(\
  user_id INTEGER PRIMARY KEY AUTOINCREMENT, \
  username TEXT NOT NULL UNIQUE, \
  email TEXT NOT NULL UNIQUE, \
  password TEXT NOT NULL, \
  profile_image TEXT, \
  created_at DATETIME DEFAULT CURRENT_TIMESTAMP);
CREATE TABLE IF NOT EXISTS Games(\
  game_id INTEGER PRIMARY KEY AUTOINCREMENT, \
  title TEXT NOT NULL, \
  genre TEXT NOT NULL, \
  cover_image TEXT NOT NULL, \
  icon_image TEXT NOT NULL, \
  release_date DATETIME DEFAULT CURRENT_TIMESTAMP, \
  developer TEXT, \
  added_by INTEGER NOT NULL, \
  FOREIGN KEY (added_by) REFERENCES Users(user_id) ON DELETE CASCADE);
CREATE TABLE IF NOT EXISTS Libraries(\
  library_id INTEGER PRIMARY KEY AUTOINCREMENT, \
  user_id INTEGER NOT NULL, \
  game_id INTEGER NOT NULL, \
  purchased_at DATETIME DEFAULT CURRENT_TIMESTAMP, \
  FOREIGN KEY (user_id) REFERENCES Users(user_id) ON DELETE CASCADE, \
  FOREIGN KEY (game_id) REFERENCES Games(game_id) ON DELETE CASCADE, \
  UNIQUE(user_id, game_id));
CREATE TABLE IF NOT EXISTS Reviews(\
  review_id INTEGER PRIMARY KEY AUTOINCREMENT, \
  user_id INTEGER NOT NULL, \
  game_id INTEGER NOT NULL, \
  rating INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 5), \
  review_text TEXT, \
  created_at DATETIME DEFAULT CURRENT_TIMESTAMP, \
  FOREIGN KEY (user_id) REFERENCES Users(user_id) ON DELETE CASCADE, \
  FOREIGN KEY (game_id) REFERENCES Games(game_id) ON DELETE CASCADE);
CREATE TABLE IF NOT EXISTS Achievements(\
  achievement_id INTEGER PRIMARY KEY AUTOINCREMENT, \
  game_id INTEGER NOT NULL, \
  name TEXT NOT NULL, \
  description TEXT NOT NULL, \
  points INTEGER NOT NULL, \
  FOREIGN KEY (game_id) REFERENCES Games(game_id) ON DELETE CASCADE);
CREATE TABLE IF NOT EXISTS User_Achievements(\
  user_achievement_id INTEGER PRIMARY KEY AUTOINCREMENT, \
  user_id INTEGER NOT NULL, \
  achievement_id INTEGER NOT NULL, \
  unlocked_at DATETIME DEFAULT CURRENT_TIMESTAMP, \
  FOREIGN KEY (user_id) REFERENCES Users(user_id) ON DELETE CASCADE, \
  FOREIGN KEY (achievement_id) REFERENCES Achievements(achievement_id) ON DELETE CASCADE);
";

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Creates the six tables if missing. Constraints live here, not in
    /// the handlers: unique usernames/emails and library pairs, rating
    /// 1-5, cascading deletes with either parent.
    pub fn init_tables(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA)?;
        log::info!("database schema ready");
        Ok(())
    }

    /// Runs a statement that returns no rows.
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> Result<usize, StoreError> {
        log::debug!("SQL: {sql}");
        Ok(self.conn.execute(sql, params)?)
    }

    /// Runs a query and feeds each row, as an ordered column-name to
    /// JSON-value map, to the sink. The row sequence is finite and not
    /// restartable.
    fn for_each_row(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        mut sink: impl FnMut(Map<String, Value>),
    ) -> Result<(), StoreError> {
        log::debug!("SQL: {sql}");
        let mut stmt = self.conn.prepare(sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
        let mut rows = stmt.query(params)?;
        while let Some(row) = rows.next()? {
            let mut object = Map::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                object.insert(name.clone(), column_value(row.get_ref(i)?));
            }
            sink(object);
        }
        Ok(())
    }

    /// Object sink: the columns of every matching row merged into one
    /// JSON object. Zero rows leave it empty, which is the not-found
    /// sentinel for by-id lookups.
    pub fn query_object(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<Map<String, Value>, StoreError> {
        let mut object = Map::new();
        self.for_each_row(sql, params, |row| object.extend(row))?;
        Ok(object)
    }

    /// Array sink: one JSON object per row, in result order.
    pub fn query_array(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Value>, StoreError> {
        let mut rows = Vec::new();
        self.for_each_row(sql, params, |row| rows.push(Value::Object(row)))?;
        Ok(rows)
    }
}

/// Columns surface in text mode: SQL NULL stays null, everything else
/// becomes its text form as a JSON string.
fn column_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::String(i.to_string()),
        ValueRef::Real(f) => Value::String(f.to_string()),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
    }
}
