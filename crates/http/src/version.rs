use std::str::FromStr;

/// HTTP protocol version, as it appears on the request line.
/// RFC 9110 - 2.5. Protocol Version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const HTTP_1_1: Self = Self { major: 1, minor: 1 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseVersionError;

impl std::fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid HTTP version")
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("HTTP/").ok_or(ParseVersionError)?;
        let (major, minor) = rest.split_once('.').ok_or(ParseVersionError)?;
        Ok(Version {
            major: major.parse().map_err(|_| ParseVersionError)?,
            minor: minor.parse().map_err(|_| ParseVersionError)?,
        })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_http_1_1() {
        assert_eq!("HTTP/1.1".parse::<Version>(), Ok(Version::HTTP_1_1));
        assert_eq!(Version::HTTP_1_1.to_string(), "HTTP/1.1");
    }

    #[test]
    fn rejects_malformed_versions() {
        assert!("HTTP/1".parse::<Version>().is_err());
        assert!("HTP/1.1".parse::<Version>().is_err());
        assert!("1.1".parse::<Version>().is_err());
        assert!("HTTP/x.y".parse::<Version>().is_err());
    }
}
