//! Request-target decomposition.
//!
//! The router keys on a normalized path-base: the path with the query
//! string stripped and every purely-numeric segment removed, so
//! `/games/42` and `/games?x=1` both normalize to `/games`. The numeric
//! trailing segment survives separately as the path id.

/// Normalizes a path to its route key.
///
/// Strips the query string, then rebuilds the path from the non-numeric
/// segments. A path whose only segment is non-numeric comes back
/// unchanged; a path with no surviving segments normalizes to `/`.
pub fn path_base(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);

    let mut base = String::with_capacity(path.len());
    for segment in path.split('/') {
        if segment.is_empty() || is_integer(segment) {
            continue;
        }
        base.push('/');
        base.push_str(segment);
    }
    if base.is_empty() {
        base.push('/');
    }
    base
}

/// The last `/`-delimited segment of the path, with any trailing query
/// string stripped. `None` when the path ends in `/` — an absent id is a
/// sentinel, not an error.
pub fn path_id(path: &str) -> Option<String> {
    let path = path.split('?').next().unwrap_or(path);
    let (_, last) = path.rsplit_once('/')?;
    if last.is_empty() {
        None
    } else {
        Some(last.to_string())
    }
}

/// Strict integer check: the entire trimmed string must be base-10 digits.
/// Rejects empty strings, trailing garbage, fractions and signs.
pub fn is_integer(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// The query parameters of a request target, in wire order.
///
/// Duplicate keys are preserved; handlers only ever consult the first
/// occurrence via [`QueryParams::first`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Splits everything after `?` on `&`, then each pair on the first
    /// `=`. A pair without `=` yields the key with an empty value.
    pub fn parse(path: &str) -> Self {
        let Some((_, query)) = path.split_once('?') else {
            return Self::default();
        };
        if query.is_empty() {
            return Self::default();
        }
        let pairs = query
            .split('&')
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self { pairs }
    }

    /// The value of the first pair with the given key.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
