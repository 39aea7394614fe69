//! Response emission with the fixed header set.

use std::fmt::{Display, Write};

use bytes::Bytes;

use crate::Version;

/// The status codes the API can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const OK: Self = Self(200);
    pub const NO_CONTENT: Self = Self(204);
    pub const BAD_REQUEST: Self = Self(400);
    pub const NOT_FOUND: Self = Self(404);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);

    pub const fn canonical_reason(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            204 => "No Content",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "Bad Request",
        }
    }

    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// A response carrying a JSON document.
///
/// The header set is fixed: `Content-Type: application/json`, the CORS
/// triplet, and a `Content-Length` computed from the exact byte length of
/// the body. It is written to the socket exactly once, then the
/// connection closes.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub body: String,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The CORS preflight reply: 204, the CORS triplet, no body and no
    /// `Content-Type`.
    pub fn preflight() -> Self {
        Self::new(StatusCode::NO_CONTENT, "")
    }

    /// Serializes the response to its wire form.
    pub fn to_bytes(&self) -> Bytes {
        let mut out = String::with_capacity(self.body.len() + 256);
        // Infallible: fmt::Write on a String cannot fail.
        let _ = write!(
            out,
            "{} {} {}\r\n",
            Version::HTTP_1_1,
            self.status,
            self.status.canonical_reason()
        );
        if self.status != StatusCode::NO_CONTENT {
            out.push_str("Content-Type: application/json\r\n");
        }
        let _ = write!(out, "Access-Control-Allow-Origin: {ALLOW_ORIGIN}\r\n");
        let _ = write!(out, "Access-Control-Allow-Methods: {ALLOW_METHODS}\r\n");
        let _ = write!(out, "Access-Control-Allow-Headers: {ALLOW_HEADERS}\r\n");
        let _ = write!(out, "Content-Length: {}\r\n\r\n", self.body.len());
        out.push_str(&self.body);
        Bytes::from(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_of_a_json_response() {
        let response = Response::new(StatusCode::OK, r#"{"message": "ok"}"#);
        let wire = response.to_bytes();
        let text = std::str::from_utf8(&wire).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(
            text.contains("Access-Control-Allow-Methods: GET, POST, PATCH, DELETE, OPTIONS\r\n")
        );
        assert!(text.contains("Access-Control-Allow-Headers: Content-Type\r\n"));
        assert!(text.contains("Content-Length: 17\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"message\": \"ok\"}"));
    }

    #[test]
    fn content_length_is_byte_length() {
        let body = r#"{"name": "héllo"}"#;
        let response = Response::new(StatusCode::OK, body);
        let wire = response.to_bytes();
        let text = std::str::from_utf8(&wire).unwrap();
        assert!(text.contains(&format!("Content-Length: {}\r\n", body.len())));
    }

    #[test]
    fn preflight_wire_form() {
        let wire = Response::preflight().to_bytes();
        assert_eq!(
            &wire[..],
            b"HTTP/1.1 204 No Content\r\n\
              Access-Control-Allow-Origin: *\r\n\
              Access-Control-Allow-Methods: GET, POST, PATCH, DELETE, OPTIONS\r\n\
              Access-Control-Allow-Headers: Content-Type\r\n\
              Content-Length: 0\r\n\r\n" as &[u8]
        );
    }

    #[test]
    fn unknown_code_falls_back_to_bad_request() {
        assert_eq!(StatusCode::BAD_REQUEST.canonical_reason(), "Bad Request");
        assert_eq!(StatusCode::NOT_FOUND.canonical_reason(), "Not Found");
    }
}
