use std::convert::TryFrom;
use std::io::{BufReader, BufWriter, Read, Write};
use std::io::{Error as IoError, ErrorKind as IoErrorKind, Result as IoResult};
use std::net::{SocketAddr, TcpStream};

use ascii::{AsciiChar, AsciiStr, AsciiString};

use crate::common::{Header, HttpVersion, HttpVersionError, Method, StatusCode};
use crate::log;
use crate::util::Registration;
use crate::{Request, Response};

/// The overall header limit is 8K.
const HEADER_TOTAL_LIMIT: usize = 8_192;
/// The limit per header line is 2K.
const HEADER_LINE_LIMIT: usize = 2_048;

/// A `ClientConnection` is an object that stores the socket of a client
/// and produces the one [`Request`] of the connection.
///
/// Connections are single-shot: after the first request is answered the
/// connection is closed, so there is no read-ahead or response ordering
/// machinery here.
pub(crate) struct ClientConnection {
    /// registration to count all open `ClientConnection`
    _registration: Registration,

    /// reader for the request head
    reader: BufReader<TcpStream>,

    /// address of the client
    remote_addr: Option<SocketAddr>,

    /// taken by the [`Request`] on success, otherwise used for error responses
    writer: Option<BufWriter<TcpStream>>,
}

impl ClientConnection {
    /// Creates a new `ClientConnection` that takes ownership of the `TcpStream`.
    ///
    /// # Errors
    ///
    /// `std::io::Error` when the stream could not be cloned for writing
    ///
    pub(crate) fn new(stream: TcpStream, registration: Registration) -> IoResult<Self> {
        let remote_addr = stream.peer_addr().ok();
        let write_stream = stream.try_clone()?;

        log::info!(
            "connection [{}] count [{}]",
            remote_addr.as_ref().map_or(String::default(), ToString::to_string),
            registration.value()
        );

        Ok(ClientConnection {
            _registration: registration,
            reader: BufReader::with_capacity(1024, stream),
            remote_addr,
            writer: Some(BufWriter::with_capacity(1024, write_stream)),
        })
    }

    /// Reads the next line from the stream.
    ///
    /// Reads until `CRLF` is reached. The next read will start
    /// at the first byte of the new line.
    fn read_next_line(&mut self) -> Result<AsciiString, ReadError> {
        let mut buf = Vec::new();
        let mut prev_byte = 0u8;

        loop {
            let byte = self.reader.by_ref().bytes().next();

            let byte = if let Some(byte) = byte {
                byte?
            } else {
                log::debug!("unexpected connection abort");
                return Err(IoError::new(
                    IoErrorKind::ConnectionAborted,
                    "unexpected connection abort",
                )
                .into());
            };

            if byte == b'\n' && prev_byte == b'\r' {
                let _ = buf.pop(); // removing the '\r'
                return AsciiString::from_ascii(buf).map_err(|_| {
                    log::debug!("header no ascii");
                    ReadError::WrongHeader
                });
            }
            prev_byte = byte;

            if buf.len() >= HEADER_LINE_LIMIT {
                return Err(ReadError::HttpProtocol(HttpVersion::Version1_0, 431.into()));
            }

            buf.push(byte);
        }
    }

    /// Reads the request of this connection from the stream.
    /// Blocks until the header has been read.
    pub(crate) fn read_request(&mut self) -> Result<Request, ReadError> {
        let mut header_limit_rest = HEADER_TOTAL_LIMIT;

        // reading the request line
        let (method, path, version) = {
            let line = self.read_next_line().map_err(|err| {
                match err {
                    ReadError::HttpProtocol(v, status) if status == 431 => {
                        // match to 414 URI Too Long for request line
                        ReadError::HttpProtocol(v, 414.into())
                    }
                    _ => err,
                }
            })?;

            header_limit_rest = header_limit_rest
                .checked_sub(line.len())
                .ok_or(ReadError::HttpProtocol(HttpVersion::Version1_0, 431.into()))?;

            parse_request_line(line.trim())?
        };

        // getting all headers
        let headers = {
            let mut headers = Vec::new();
            loop {
                let line = self.read_next_line()?;

                header_limit_rest = header_limit_rest
                    .checked_sub(line.len())
                    .ok_or(ReadError::HttpProtocol(version, 431.into()))?;

                let line = line.trim();

                if line.is_empty() {
                    break;
                }

                headers.push(Header::try_from(line).map_err(|_| ReadError::WrongHeader)?);
            }

            headers
        };

        log::debug!("{} {} {}", method, path, version.header());

        let writer = self.writer.take().ok_or_else(|| {
            ReadError::from(IoError::new(
                IoErrorKind::Other,
                "response writer already consumed",
            ))
        })?;

        Ok(Request::new(
            method,
            path.to_string(),
            version,
            headers,
            self.remote_addr,
            Box::new(writer),
        ))
    }

    /// Answers a failed request with `status` and an empty body.
    ///
    /// Does nothing when the response writer was already handed to a
    /// [`Request`].
    pub(crate) fn send_error(&mut self, status: StatusCode) {
        if let Some(mut writer) = self.writer.take() {
            log::info!(
                "error response [{}] ({})",
                self.remote_addr
                    .as_ref()
                    .map_or(String::default(), ToString::to_string),
                status
            );

            let response = Response::empty(status);
            let _ = response.print(&mut writer, HttpVersion::Version1_0, false);
            let _ = writer.flush();
        }
    }
}

/// Error that can happen when reading a request.
#[derive(Debug)]
pub(crate) enum ReadError {
    /// protocol violation answered with the carried status
    HttpProtocol(HttpVersion, StatusCode),
    /// well-formed request line naming an unsupported HTTP version
    UnsupportedVersion(HttpVersionError),
    WrongRequestLine,
    WrongHeader,
    ReadIoError(IoError),
}

impl ReadError {
    /// Status code to answer with, `None` for plain I/O failures
    /// where the peer is gone anyway.
    pub(crate) fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpProtocol(_, status) => Some(*status),
            Self::UnsupportedVersion(_) => Some(StatusCode(505)),
            Self::WrongRequestLine | Self::WrongHeader => Some(StatusCode(400)),
            Self::ReadIoError(_) => None,
        }
    }
}

impl std::error::Error for ReadError {}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpProtocol(v, status) => write!(
                f,
                "{} {} {}",
                v.header(),
                status.0,
                status.default_reason_phrase()
            ),
            Self::UnsupportedVersion(err) => err.fmt(f),
            Self::WrongRequestLine => f.write_str("no request"),
            Self::WrongHeader => f.write_str("unsupported header"),
            Self::ReadIoError(err) => err.fmt(f),
        }
    }
}

impl From<IoError> for ReadError {
    fn from(err: IoError) -> Self {
        Self::ReadIoError(err)
    }
}

/// Parses the request line of the request.
/// eg. GET / HTTP/1.1
fn parse_request_line(line: &AsciiStr) -> Result<(Method, AsciiString, HttpVersion), ReadError> {
    let mut parts = line.split(AsciiChar::Space);

    let method = parts.next().map(Method::from);
    let path = parts.next().map(ToOwned::to_owned);
    let version = match parts.next() {
        Some(token) => match HttpVersion::try_from(token) {
            Ok(version) => Some(version),
            Err(err) if err.is_unsupported_version() => {
                return Err(ReadError::UnsupportedVersion(err))
            }
            Err(_) => None,
        },
        None => None,
    };

    method
        .and_then(|method| Some((method, path?, version?)))
        .ok_or(ReadError::WrongRequestLine)
}
