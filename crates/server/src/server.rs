//! The accept loop.
//!
//! Connections are served strictly one at a time: accept, frame, route,
//! respond, close. The loop also selects on ctrl-c so shutdown falls out
//! of the loop instead of going through a signal handler.

use std::net::SocketAddr;

use gamehub_http::parser::RequestParser;
use gamehub_http::request::Request;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpSocket, TcpStream};

use crate::config::Config;
use crate::router;
use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Server {
    config: Config,
    store: Store,
}

impl Server {
    pub fn new(config: Config, store: Store) -> Self {
        Self { config, store }
    }

    pub async fn run(&self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let sock = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };
        sock.set_reuseaddr(true)?;
        sock.bind(addr)?;
        let listener = sock.listen(1024)?;
        log::info!("HTTP server is running on port {}", self.config.port);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = accepted?;
                    log::debug!("accepted connection from {peer}");
                    if let Err(err) = self.handle_connection(stream).await {
                        log::warn!("connection error: {err}");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("shutting down");
                    break;
                }
            }
        }
        Ok(())
    }

    async fn handle_connection(&self, mut stream: TcpStream) -> std::io::Result<()> {
        let (reader, mut writer) = stream.split();
        let parser = RequestParser::with_max_size(reader, self.config.max_request_size);
        let request = match parser.parse().await {
            Ok(request) => request,
            Err(err) => {
                // A request that never framed gets no response.
                log::warn!("failed to parse request: {err}");
                return Ok(());
            }
        };
        log_request(&request);

        let response = router::dispatch(&self.store, &request);
        writer.write_all(&response.to_bytes()).await?;
        writer.shutdown().await
    }
}

fn log_request(request: &Request) {
    log::info!("{} {}", request.method, request.path);
}
