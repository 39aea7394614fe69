//! Incremental framing of a request from an async byte stream.
//!
//! Bytes are read in bounded chunks into one growable buffer. Headers are
//! complete at the first `\r\n\r\n`; if a `Content-Length` header is
//! present, reading continues until at least that many body bytes have
//! arrived. The total request size is capped: exceeding the cap is fatal
//! for the connection, not for the server.

use bytes::BytesMut;
use memchr::{memchr, memmem};
use tokio::io::{AsyncRead, AsyncReadExt};
use unicase::Ascii;

use crate::Version;
use crate::method::Method;
use crate::request::Request;

/// Read granularity for the framing loop.
pub const CHUNK_SIZE: usize = 8192;

/// Default cap on headers plus body.
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 64 * 1024;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unexpected EOF while framing request")]
    UnexpectedEof,
    #[error("request exceeds maximum allowed size ({limit} bytes)")]
    TooLarge { limit: usize },
    #[error("malformed request line")]
    InvalidRequestLine,
    #[error("invalid Content-Length header")]
    InvalidContentLength,
}

/// Frames one request from `R`, then is consumed.
pub struct RequestParser<R: AsyncRead + Unpin> {
    inner: R,
    buf: BytesMut,
    max_size: usize,
}

impl<R> RequestParser<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self::with_max_size(reader, DEFAULT_MAX_REQUEST_SIZE)
    }

    pub fn with_max_size(reader: R, max_size: usize) -> Self {
        Self {
            inner: reader,
            buf: BytesMut::with_capacity(CHUNK_SIZE),
            max_size,
        }
    }

    /// Reads one more chunk into the buffer.
    async fn fill(&mut self) -> Result<(), ParseError> {
        self.buf.reserve(CHUNK_SIZE);
        let n = self.inner.read_buf(&mut self.buf).await?;
        if n == 0 {
            return Err(ParseError::UnexpectedEof);
        }
        if self.buf.len() > self.max_size {
            return Err(ParseError::TooLarge {
                limit: self.max_size,
            });
        }
        log::trace!("read {n} bytes ({} buffered)", self.buf.len());
        Ok(())
    }

    /// Reads until a complete request (headers plus declared body) is
    /// buffered, then decomposes it.
    pub async fn parse(mut self) -> Result<Request, ParseError> {
        let head_end = loop {
            if let Some(pos) = memmem::find(&self.buf, HEAD_TERMINATOR) {
                break pos;
            }
            self.fill().await?;
        };

        let head = &self.buf[..head_end];
        let line_end = memchr(b'\r', head).unwrap_or(head.len());
        let (method, path) = parse_request_line(&head[..line_end])?;
        let content_length = content_length(&head[line_end..])?;

        let body_start = head_end + HEAD_TERMINATOR.len();
        while self.buf.len() - body_start < content_length {
            self.fill().await?;
        }

        let body = String::from_utf8_lossy(&self.buf[body_start..]).into_owned();
        Ok(Request { method, path, body })
    }
}

/// RFC 9112 - 3. Request Line: `method SP request-target SP HTTP-version`.
/// The version is validated and discarded; only HTTP/1.x is spoken here.
fn parse_request_line(line: &[u8]) -> Result<(Method, String), ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidRequestLine)?;
    let mut words = line.split(' ').filter(|w| !w.is_empty());

    let method = words.next().ok_or(ParseError::InvalidRequestLine)?;
    let path = words.next().ok_or(ParseError::InvalidRequestLine)?;
    let version = words.next().ok_or(ParseError::InvalidRequestLine)?;
    version
        .parse::<Version>()
        .map_err(|_| ParseError::InvalidRequestLine)?;
    if words.next().is_some() {
        return Err(ParseError::InvalidRequestLine);
    }

    Ok((Method::from(method), path.to_string()))
}

/// Scans the header block for `Content-Length`, case-insensitively.
/// Absent means no body.
fn content_length(head: &[u8]) -> Result<usize, ParseError> {
    for line in head.split(|b| *b == b'\n') {
        let line = line.trim_ascii();
        let Some(colon) = memchr(b':', line) else {
            continue;
        };
        let Ok(name) = std::str::from_utf8(&line[..colon]) else {
            continue;
        };
        if Ascii::new(name.trim()) != Ascii::new("Content-Length") {
            continue;
        }
        let value =
            std::str::from_utf8(&line[colon + 1..]).map_err(|_| ParseError::InvalidContentLength)?;
        return value
            .trim()
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength);
    }
    Ok(0)
}
