//! Server configuration, read from the environment at startup. There is
//! no CLI surface beyond process start.

use std::net::{Ipv4Addr, SocketAddr};

use gamehub_http::parser::DEFAULT_MAX_REQUEST_SIZE;

#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port, bound on all interfaces. `GAMEHUB_PORT`, default 8080.
    pub port: u16,
    /// SQLite database file. `GAMEHUB_DB`, default `gamehub.db`.
    pub db_path: String,
    /// Cap on a single request, headers plus body. `GAMEHUB_MAX_REQUEST`.
    pub max_request_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: "gamehub.db".to_string(),
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("GAMEHUB_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => log::warn!("ignoring invalid GAMEHUB_PORT {port:?}"),
            }
        }
        if let Ok(path) = std::env::var("GAMEHUB_DB") {
            config.db_path = path;
        }
        if let Ok(max) = std::env::var("GAMEHUB_MAX_REQUEST") {
            match max.parse() {
                Ok(max) => config.max_request_size = max,
                Err(_) => log::warn!("ignoring invalid GAMEHUB_MAX_REQUEST {max:?}"),
            }
        }
        config
    }

    pub fn addr(&self) -> SocketAddr {
        (Ipv4Addr::UNSPECIFIED, self.port).into()
    }
}
