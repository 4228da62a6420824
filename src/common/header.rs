use std::{
    convert::TryFrom,
    hash::{Hash, Hasher},
    str::FromStr,
};

use ascii::{AsAsciiStrError, AsciiStr, AsciiString};

/// Represents a HTTP header.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Header {
    /// `field` of [`Header`]
    pub field: HeaderField,
    /// `value` for [`HeaderField`]
    pub value: AsciiString,
}

impl Header {
    /// Builds a `Header` from two `Vec<u8>`s or two `&[u8]`s.
    ///
    /// # Errors
    ///
    /// An [`HeaderError`] is caused by content with invalid range of ASCII.
    ///
    /// # Examples
    ///
    /// ```
    /// let header = webserver::Header::from_bytes(b"Content-Type", b"text/plain").unwrap();
    /// ```
    pub fn from_bytes<F, V>(field: &F, value: &V) -> Result<Header, HeaderError>
    where
        F: Into<Vec<u8>> + AsRef<[u8]>,
        V: Into<Vec<u8>> + AsRef<[u8]>,
    {
        let field = HeaderField::from_bytes(field)?;
        let value = AsciiString::from_ascii(value.as_ref())
            .map_err(|err| HeaderError::Ascii(err.ascii_error()))?;

        Ok(Header { field, value })
    }
}

impl FromStr for Header {
    type Err = HeaderError;

    fn from_str(input: &str) -> Result<Header, HeaderError> {
        Self::try_from(input.as_bytes())
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(self.field.as_str())?;
        f.write_str(": ")?;
        f.write_str(self.value.as_str())
    }
}

/// Tries to create `Header` by a header line
impl TryFrom<&[u8]> for Header {
    type Error = HeaderError;

    fn try_from(input: &[u8]) -> Result<Self, Self::Error> {
        let colon_pos = input
            .iter()
            .position(|b| *b == b':')
            .ok_or(HeaderError::Format)?;

        if colon_pos == 0 || colon_pos + 1 >= input.len() {
            return Err(HeaderError::Format);
        }

        let field = HeaderField::try_from(&input[..colon_pos])?;

        let value = &input[(colon_pos + 1)..];
        let value = AsciiString::from_ascii(value)
            .map_err(|err| HeaderError::Ascii(err.ascii_error()))?;
        let value = value.trim().to_owned();

        if value.is_empty() {
            return Err(HeaderError::Format);
        }

        Ok(Header { field, value })
    }
}

impl TryFrom<&AsciiStr> for Header {
    type Error = HeaderError;

    fn try_from(input: &AsciiStr) -> Result<Self, Self::Error> {
        Self::try_from(input.as_bytes())
    }
}

/// Field of an header (eg. `Content-Type`, `Content-Length`, etc.)
///
/// Comparison between two `HeaderField`s ignores case.
#[derive(Debug, Clone, Eq)]
pub struct HeaderField(AsciiString);

impl HeaderField {
    /// Create [`HeaderField`] from `bytes`
    ///
    /// # Errors
    ///
    /// - [`HeaderError`] for `bytes` conversion
    ///
    pub fn from_bytes<B>(bytes: &B) -> Result<HeaderField, HeaderError>
    where
        B: Into<Vec<u8>> + AsRef<[u8]>,
    {
        Self::try_from(bytes.as_ref())
    }

    /// Get [`HeaderField`] as `&[u8]`
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Get [`HeaderField`] as `&str`
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Checks [`HeaderField`] for equivalence ignoring case of letters
    #[must_use]
    pub fn equiv(&self, other: &'static str) -> bool {
        other.eq_ignore_ascii_case(self.as_str())
    }
}

/// Checks `bytes` for the valid byte range of field names as
/// defined in [RFC9110](https://datatracker.ietf.org/doc/html/rfc9110#name-tokens)
#[inline]
fn field_byte_range_check(bytes: &[u8]) -> Result<(), HeaderError> {
    if bytes.is_empty() {
        return Err(HeaderError::Range);
    }
    for &b in bytes {
        if b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b) {
            continue;
        }
        return Err(HeaderError::Range);
    }
    Ok(())
}

impl FromStr for HeaderField {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<HeaderField, HeaderError> {
        Self::try_from(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for HeaderField {
    type Error = HeaderError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        field_byte_range_check(bytes)?;

        Ok(HeaderField(
            AsciiString::from_ascii(bytes).map_err(|err| HeaderError::Ascii(err.ascii_error()))?,
        ))
    }
}

impl std::fmt::Display for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for HeaderField {
    fn eq(&self, other: &HeaderField) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl Hash for HeaderField {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        for b in self.as_str().bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

/// Error for failed [`Header`] and [`HeaderField`] creation
#[derive(Debug)]
pub enum HeaderError {
    /// content contains non-ASCII
    Ascii(AsAsciiStrError),
    /// no `field: value` shape
    Format,
    /// field name outside the RFC9110 token range
    Range,
}

impl std::error::Error for HeaderError {}

impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascii(err) => err.fmt(f),
            Self::Format => f.write_str("malformed header line"),
            Self::Range => f.write_str("header field outside token byte range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::{Header, HeaderField};

    #[test]
    fn test_parse_header() {
        let header = Header::try_from(&b"Content-Type: text/html"[..]).unwrap();
        assert!(header.field.equiv("content-type"));
        assert_eq!(header.value.as_str(), "text/html");

        let header: Header = "Connection:   close  ".parse().unwrap();
        assert_eq!(header.value.as_str(), "close");

        assert!(Header::try_from(&b"no colon here"[..]).is_err());
        assert!(Header::try_from(&b": empty field"[..]).is_err());
        assert!(Header::try_from(&b"Empty-Value:"[..]).is_err());
    }

    #[test]
    fn test_field_equiv() {
        let field: HeaderField = "Content-Length".parse().unwrap();
        assert!(field.equiv("content-length"));
        assert!(!field.equiv("content-type"));

        assert!("space inside".parse::<HeaderField>().is_err());
    }

    #[test]
    fn test_display() {
        let header = Header::from_bytes(b"Allow", b"GET, HEAD").unwrap();
        assert_eq!(header.to_string(), "Allow: GET, HEAD");
    }
}
