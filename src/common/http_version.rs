use std::{convert::TryFrom, fmt};

use ascii::AsciiStr;

/// HTTP/{version} Request Version
///
/// This server speaks HTTP/1.0 and HTTP/1.1 only; every other
/// well-formed version token is answered with `505`.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum HttpVersion {
    /// HTTP/1.0
    Version1_0,
    /// HTTP/1.1
    Version1_1,
}

impl HttpVersion {
    /// Http version in header format (e.g. HTTP/1.1)
    #[must_use]
    #[inline]
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Version1_0 => "HTTP/1.0",
            Self::Version1_1 => "HTTP/1.1",
        }
    }
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let v = match self {
            Self::Version1_0 => "1.0",
            Self::Version1_1 => "1.1",
        };
        f.write_str(v)
    }
}

impl TryFrom<(u8, u8)> for HttpVersion {
    type Error = HttpVersionError;

    fn try_from(value: (u8, u8)) -> Result<Self, Self::Error> {
        match value {
            (1, 1) => Ok(Self::Version1_1),
            (1, 0) => Ok(Self::Version1_0),
            _ => Err(HttpVersionError(Some(value))),
        }
    }
}

impl TryFrom<&str> for HttpVersion {
    type Error = HttpVersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl TryFrom<&AsciiStr> for HttpVersion {
    type Error = HttpVersionError;

    fn try_from(value: &AsciiStr) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl TryFrom<&[u8]> for HttpVersion {
    type Error = HttpVersionError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let len = value.len();
        let (value, len) = if len == 8 && &value[0..5] == b"HTTP/" {
            // "HTTP/1.0"
            (&value[5..], 3)
        } else {
            (value, len)
        };

        // "1.0"
        if len == 3 && value[1] == b'.' {
            let major = value[0];
            let minor = value[2];
            let range = b'0'..=b'9';
            if range.contains(&major) && range.contains(&minor) {
                return Self::try_from((major - b'0', minor - b'0'));
            }
        }

        Err(HttpVersionError(None))
    }
}

/// Error for unsupported or unparseable [`HttpVersion`]
///
/// Carries the version digits when the token was well-formed but
/// names an unsupported version.
#[derive(Debug)]
pub struct HttpVersionError(Option<(u8, u8)>);

impl HttpVersionError {
    /// `true` when a well-formed but unsupported version was parsed
    #[must_use]
    pub(crate) fn is_unsupported_version(&self) -> bool {
        self.0.is_some()
    }
}

impl std::error::Error for HttpVersionError {}

impl std::fmt::Display for HttpVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((major, minor)) => {
                f.write_fmt(format_args!("unsupported HTTP/{}.{}", major, minor))
            }
            None => f.write_str("malformed HTTP version"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use ascii::AsciiStr;

    use super::HttpVersion;

    #[test]
    fn test_parse_http_version() {
        let table = [
            ("HTTP/1.0", Some(HttpVersion::Version1_0)),
            ("HTTP/1.1", Some(HttpVersion::Version1_1)),
            ("1.0", Some(HttpVersion::Version1_0)),
            ("1.1", Some(HttpVersion::Version1_1)),
            ("HTTP/0.9", None),
            ("HTTP/2.0", None),
            ("HTTP/3.0", None),
            ("HTTP1.1", None),
            ("1", None),
            ("HTTP 1.1", None),
            (" HTTP1.1", None),
            ("111", None),
        ];

        for entry in table {
            let v = HttpVersion::try_from(AsciiStr::from_ascii(entry.0).unwrap());
            if let Some(src_v) = entry.1 {
                assert!(v.is_ok(), "[{}] error: {}", src_v, v.unwrap_err());
                assert_eq!(v.unwrap(), src_v);
            } else {
                assert!(v.is_err());
            }
        }
    }

    #[test]
    fn test_unsupported_version() {
        let err = HttpVersion::try_from("HTTP/2.0").unwrap_err();
        assert!(err.is_unsupported_version());

        let err = HttpVersion::try_from("garbage").unwrap_err();
        assert!(!err.is_unsupported_version());
    }
}
