//! The HTTP/1.1 subset spoken by the gamehub server.
//!
//! Covers exactly what the API needs: incremental framing of a request
//! (headers plus a `Content-Length` body) from an async byte stream,
//! request-target decomposition into path-base, trailing id and query
//! parameters, and response emission with the fixed JSON/CORS header set.
//! There is no keep-alive and no chunked transfer encoding; one request is
//! framed per connection.

pub mod method;
pub mod parser;
pub mod request;
pub mod response;
pub mod sync;
pub mod target;

mod version;
pub use version::{ParseVersionError, Version};
