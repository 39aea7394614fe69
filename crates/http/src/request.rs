use crate::method::Method;
use crate::target::{self, QueryParams};

/// A fully framed request. One is produced per connection and dropped
/// once the response has been written.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// The raw request target, query string included.
    pub path: String,
    /// Everything after the header terminator. Expected to be JSON for
    /// mutating methods; never inspected here.
    pub body: String,
}

impl Request {
    /// The normalized route key for this request.
    pub fn base(&self) -> String {
        target::path_base(&self.path)
    }

    /// The trailing path segment, if any.
    pub fn id(&self) -> Option<String> {
        target::path_id(&self.path)
    }

    pub fn query(&self) -> QueryParams {
        QueryParams::parse(&self.path)
    }
}
