//! `response` module
//!
//! See [`Response`]

use std::io::{self, Cursor, Read, Result as IoResult, Write};
use std::time::SystemTime;

use lazy_static::lazy_static;

use crate::common::{Header, HttpVersion, StatusCode};

lazy_static! {
    static ref CONTENT_TYPE_HTML: Header =
        Header::from_bytes(b"Content-Type", b"text/html; charset=utf-8").unwrap();
    static ref CONTENT_TYPE_JSON: Header =
        Header::from_bytes(b"Content-Type", b"application/json; charset=utf-8").unwrap();
    static ref CONTENT_TYPE_PLAIN: Header =
        Header::from_bytes(b"Content-Type", b"text/plain; charset=utf-8").unwrap();
}

/// Object representing an HTTP response whose purpose is to be given to a `Request`.
///
/// The `Connection`, `Content-Length`, `Date` and `Server` headers are
/// written by the response itself and cannot be set: every connection is
/// single-shot, so `Connection: close` is always sent, and the body length
/// is always known.
///
/// `Content-Type` may only be set to one value at a time; setting it again
/// overwrites the existing value.
#[derive(Debug)]
pub struct Response<R> {
    data: Option<R>,
    data_length: Option<usize>,
    headers: Vec<Header>,
    status_code: StatusCode,
}

impl<R> Default for Response<R> {
    fn default() -> Self {
        Self {
            data: None,
            data_length: None,
            headers: Vec::new(),
            status_code: StatusCode(200),
        }
    }
}

impl<R> Response<R>
where
    R: Read,
{
    /// Adds a header to the list.
    ///
    /// Attempts to set `Connection`, `Content-Length`, `Date` or `Server`
    /// are ignored, see the type documentation.
    pub fn add_header<H>(&mut self, header: H)
    where
        H: Into<Header>,
    {
        let header = header.into();

        for fixed in ["Connection", "Content-Length", "Date", "Server"] {
            if header.field.equiv(fixed) {
                return;
            }
        }

        if header.field.equiv("Content-Type") {
            if let Some(existing) = self.headers.iter_mut().find(|h| h.field == header.field) {
                existing.value = header.value;
                return;
            }
        }

        self.headers.push(header);
    }

    /// Returns the same response, but with an additional header.
    #[must_use]
    pub fn with_header<H>(mut self, header: H) -> Self
    where
        H: Into<Header>,
    {
        self.add_header(header);
        self
    }

    /// Returns the same response, but with a different status code.
    #[must_use]
    #[inline]
    pub fn with_status_code<S>(mut self, code: S) -> Self
    where
        S: Into<StatusCode>,
    {
        self.status_code = code.into();
        self
    }

    /// Retrieves the current value of the `Response` status code
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// Retrieves the current value of the `Response` data length
    #[must_use]
    pub fn data_length(&self) -> Option<usize> {
        self.data_length
    }

    /// Retrieves the current list of `Response` headers
    #[must_use]
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Prints the HTTP response to a writer.
    ///
    /// Writes the status line, the default headers (`Server`, `Date`,
    /// `Connection: close`), the response headers, `Content-Length` and
    /// finally the body, unless `head_only` suppresses it.
    ///
    /// Note: does not flush the writer.
    pub(crate) fn print<W>(
        mut self,
        writer: &mut W,
        http_version: HttpVersion,
        head_only: bool,
    ) -> IoResult<()>
    where
        W: Write,
    {
        write!(
            writer,
            "{} {} {}\r\n",
            http_version.header(),
            self.status_code.0,
            self.status_code.default_reason_phrase()
        )?;

        write!(writer, "Server: webserver (Rust)\r\n")?;
        write!(
            writer,
            "Date: {}\r\n",
            httpdate::fmt_http_date(SystemTime::now())
        )?;
        write!(writer, "Connection: close\r\n")?;

        for header in &self.headers {
            write!(writer, "{}: {}\r\n", header.field, header.value)?;
        }

        // status codes 1xx, 204 and 304 MUST NOT include a body
        let body_allowed = !matches!(self.status_code.0, 100..=199 | 204 | 304);

        if body_allowed {
            write!(writer, "Content-Length: {}\r\n", self.data_length.unwrap_or(0))?;
        }

        write!(writer, "\r\n")?;

        if body_allowed && !head_only {
            if let Some(mut data) = self.data.take() {
                let _ = io::copy(&mut data, writer)?;
            }
        }

        Ok(())
    }
}

impl Response<Cursor<Vec<u8>>> {
    /// Create [Response] from heap data without a `Content-Type`
    pub fn from_data<D>(data: D) -> Self
    where
        D: Into<Vec<u8>>,
    {
        let data = data.into();

        Response {
            data_length: Some(data.len()),
            data: Some(Cursor::new(data)),
            ..Response::default()
        }
    }

    /// Create [Response] from kind of string with `text/plain` content type
    pub fn from_string<S>(data: S) -> Self
    where
        S: Into<String>,
    {
        let data: String = data.into();

        Response {
            data_length: Some(data.len()),
            data: Some(Cursor::new(data.into_bytes())),
            headers: vec![CONTENT_TYPE_PLAIN.clone()],
            ..Response::default()
        }
    }

    /// Create a `200` [Response] carrying an HTML document
    pub fn html<S>(body: S) -> Self
    where
        S: Into<String>,
    {
        let body: String = body.into();

        Response {
            data_length: Some(body.len()),
            data: Some(Cursor::new(body.into_bytes())),
            headers: vec![CONTENT_TYPE_HTML.clone()],
            ..Response::default()
        }
    }

    /// Create a `200` [Response] carrying a JSON document
    pub fn json<S>(body: S) -> Self
    where
        S: Into<String>,
    {
        let body: String = body.into();

        Response {
            data_length: Some(body.len()),
            data: Some(Cursor::new(body.into_bytes())),
            headers: vec![CONTENT_TYPE_JSON.clone()],
            ..Response::default()
        }
    }

    /// Create [Response] with an empty body
    #[must_use]
    pub fn empty<S>(status_code: S) -> Self
    where
        S: Into<StatusCode>,
    {
        Response {
            data_length: Some(0),
            data: Some(Cursor::new(Vec::new())),
            status_code: status_code.into(),
            ..Response::default()
        }
    }
}
