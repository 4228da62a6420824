use std::fmt;
use std::io::{Read, Result as IoResult, Write};
use std::net::SocketAddr;

use crate::common::{Header, HttpVersion, Method};
use crate::log;
use crate::Response;

/// Represents an HTTP request made by a client.
///
/// A `Request` object is what is produced by the server, and is what
/// your code must analyse and answer.
///
/// Every connection is single-shot: the response is always sent with
/// `Connection: close` and the connection ends after it. Request bodies
/// are ignored.
///
/// # Automatic cleanup
///
/// If a `Request` object is destroyed without `respond` being called,
/// an empty response with a 500 status code (internal server error) will
/// automatically be sent back to the client, so a handler that panics
/// still answers the peer during unwinding.
pub struct Request {
    headers: Vec<Header>,
    http_version: HttpVersion,
    method: Method,
    remote_addr: Option<SocketAddr>,
    // if this writer is empty, then the request has been answered
    response_writer: Option<Box<dyn Write + Send + 'static>>,
    url: String,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        url: String,
        http_version: HttpVersion,
        headers: Vec<Header>,
        remote_addr: Option<SocketAddr>,
        response_writer: Box<dyn Write + Send + 'static>,
    ) -> Self {
        Self {
            headers,
            http_version,
            method,
            remote_addr,
            response_writer: Some(response_writer),
            url,
        }
    }

    /// Returns the method requested by the client (eg. `GET`, `POST`, etc.).
    #[must_use]
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the resource requested by the client (request-target as sent).
    #[must_use]
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the path component of the request-target.
    ///
    /// Routing dispatches on this value: the query string is not part
    /// of the path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url
            .split_once('?')
            .map_or(self.url.as_str(), |(path, _query)| path)
    }

    /// Returns the HTTP version of the request.
    #[must_use]
    #[inline]
    pub fn http_version(&self) -> HttpVersion {
        self.http_version
    }

    /// Returns a list of all headers sent by the client.
    #[must_use]
    #[inline]
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Get the first header provided with `field`
    ///
    /// If there is no such header `field` available in `Request` `None` is returned.
    #[must_use]
    pub fn header_first(&self, field: &'static str) -> Option<&Header> {
        self.headers.iter().find(|h| h.field.equiv(field))
    }

    /// Returns the address of the client that sent this request.
    ///
    /// `None` when the underlying socket could not tell the peer address.
    #[must_use]
    #[inline]
    pub fn remote_addr(&self) -> Option<&SocketAddr> {
        self.remote_addr.as_ref()
    }

    /// Sends a response to this request and closes the connection.
    ///
    /// A `HEAD` request is answered with the full header set but
    /// without the body.
    ///
    /// # Errors
    ///
    /// `std::io::Error` when the response could not be written
    ///
    pub fn respond<R>(mut self, response: Response<R>) -> IoResult<()>
    where
        R: Read,
    {
        log::info!(
            "response [{}] ({})",
            self.remote_addr_string(),
            response.status_code()
        );

        let head_only = self.method == Method::Head;

        // safe: writer is only taken here and in Drop
        let mut writer = self.response_writer.take().unwrap();
        response.print(&mut writer, self.http_version, head_only)?;
        writer.flush()?;

        Ok(())
    }

    fn remote_addr_string(&self) -> String {
        self.remote_addr
            .as_ref()
            .map_or_else(String::default, ToString::to_string)
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Request({} {} from {})",
            self.method,
            self.url,
            self.remote_addr_string()
        )
    }
}

impl Drop for Request {
    fn drop(&mut self) {
        if let Some(mut writer) = self.response_writer.take() {
            let response = Response::empty(500);
            let _ = response.print(&mut writer, self.http_version, false);
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::Write,
        sync::{Arc, Mutex},
    };

    use super::{HttpVersion, Method, Request, Response};

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn new_request(method: Method, url: &str, sink: SharedSink) -> Request {
        Request::new(
            method,
            url.to_string(),
            HttpVersion::Version1_1,
            Vec::new(),
            None,
            Box::new(sink),
        )
    }

    #[test]
    fn test_path_strips_query() {
        let sink = SharedSink::default();
        let request = new_request(Method::Get, "/api?verbose=1", sink);
        assert_eq!(request.path(), "/api");
        assert_eq!(request.url(), "/api?verbose=1");

        let _ = request;
    }

    #[test]
    fn test_respond_writes_response() {
        let sink = SharedSink::default();
        let request = new_request(Method::Get, "/", sink.clone());

        request.respond(Response::from_string("hello")).unwrap();

        let written = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(written.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(written.ends_with("hello"));
    }

    #[test]
    fn test_drop_answers_with_500() {
        let sink = SharedSink::default();
        let request = new_request(Method::Get, "/", sink.clone());
        drop(request);

        let written = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(written.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
    }
}
