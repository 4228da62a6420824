//! # Simple info web server
//!
//! A small HTTP/1.1 server serving two routes:
//!
//! * `GET /` answers with an HTML page describing the server
//! * `GET /api` answers with the same information as JSON
//!
//! Connections are single-shot: each connection carries exactly one
//! request and is closed after the response.
//!
//! # Usage
//!
//! Create a [`Server`] and iterate its requests, answering each with a
//! [`Responder`]:
//!
//! ```no_run
//! use webserver::{Responder, Server, ServerConfig};
//!
//! let config = ServerConfig::default();
//! let server = Server::new(&config).unwrap();
//! let responder = Responder::new(server.server_addr().port());
//!
//! for request in server.incoming_requests() {
//!     if let Err(err) = responder.handle(request) {
//!         eprintln!("failed to answer request: {}", err);
//!     }
//! }
//! ```
//!
//! Requests can also be received one at a time with [`Server::recv`],
//! [`Server::try_recv`] or [`Server::recv_timeout`].

// binary-only dependency
use env_logger as _;

use std::io::{Error as IoError, ErrorKind as IoErrorKind, Result as IoResult};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

mod client;
mod common;
mod handlers;
mod info;
mod log;
mod page;
mod request;
mod response;
mod server_config;
mod util;

pub use crate::common::{
    Header, HeaderError, HeaderField, HttpVersion, HttpVersionError, Method, StatusCode,
};
pub use crate::handlers::Responder;
pub use crate::info::{ApiResponse, FixedPlatform, HostPlatform, PlatformInfo, ServerInfo};
pub use crate::request::Request;
pub use crate::response::Response;
pub use crate::server_config::{ServerConfig, PORT};

use crate::client::ClientConnection;
use crate::util::{Message, MessagesQueue, Registration};

/// The main class of this library.
///
/// Destroying this object will immediately close the listening socket
/// and the reading part of all the client's connections. Requests that
/// have already been returned by the `recv()` function will not close
/// and the responses will be transferred to the client.
#[allow(missing_debug_implementations)]
pub struct Server {
    /// should be false as long as the server exists
    /// when set to true, all the subtasks will close within a few hundreds ms
    close: Arc<AtomicBool>,

    /// address the server is listening on
    listening_addr: SocketAddr,

    /// queue for messages received by child threads
    messages: Arc<MessagesQueue<Message>>,

    /// number of currently open connections
    num_connections: Arc<AtomicUsize>,
}

impl Server {
    /// Builds a new server that listens on the specified address.
    ///
    /// # Errors
    ///
    /// `std::io::Error` when socket binding failed
    ///
    pub fn new(config: &ServerConfig) -> IoResult<Self> {
        let listener = TcpListener::bind(config.addr)?;
        let listening_addr = listener.local_addr()?;

        log::info!("server listening on [{}]", listening_addr);

        let close = Arc::new(AtomicBool::new(false));
        let messages = MessagesQueue::with_capacity(8);
        let num_connections = Arc::new(AtomicUsize::new(0));

        {
            let close = Arc::clone(&close);
            let connection_limit = config.connection_limit;
            let messages = Arc::clone(&messages);
            let num_connections = Arc::clone(&num_connections);

            let _ = thread::spawn(move || {
                log::debug!("running accept thread");

                while !close.load(Ordering::Acquire) {
                    while num_connections.load(Ordering::Acquire) >= connection_limit {
                        if close.load(Ordering::Acquire) {
                            return;
                        }
                        thread::sleep(server_config::CONNECTION_LIMIT_SLEEP_DURATION);
                    }

                    match listener.accept() {
                        Ok((stream, _)) => {
                            if close.load(Ordering::Acquire) {
                                break;
                            }

                            let registration = Registration::new(Arc::clone(&num_connections));
                            let messages = Arc::clone(&messages);

                            let _ = thread::spawn(move || {
                                handle_connection(stream, registration, &messages);
                            });
                        }
                        Err(err) => {
                            // a failed accept never stops the loop, the
                            // listener stays usable for later clients
                            log::error!("error on connection accept [{}]", err);
                            messages.push(err.into());
                        }
                    }
                }

                log::debug!("terminating accept thread");
            });
        }

        Ok(Self {
            close,
            listening_addr,
            messages,
            num_connections,
        })
    }

    /// Shortcut for a server listening on `addr` with the default
    /// connection limit.
    ///
    /// # Errors
    ///
    /// `std::io::Error` when socket binding failed
    ///
    pub fn http<A>(addr: A) -> IoResult<Self>
    where
        A: ToSocketAddrs,
    {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| IoError::new(IoErrorKind::InvalidInput, "no socket address"))?;

        Self::new(&ServerConfig {
            addr,
            ..ServerConfig::default()
        })
    }

    /// Returns an iterator for all the incoming requests.
    ///
    /// The iterator will return `None` if the server socket is shutdown
    /// or `OS Error`s occur.
    pub fn incoming_requests(&self) -> IncomingRequests<'_> {
        IncomingRequests { server: self }
    }

    /// Blocks until an HTTP request has been submitted and returns it.
    ///
    /// # Errors
    ///
    /// `std::io::Error` propagated from the accept loop, or when the
    /// queue has been unblocked
    ///
    pub fn recv(&self) -> IoResult<Request> {
        match self.messages.pop() {
            Some(Message::Error(err)) => Err(err),
            Some(Message::NewRequest(rq)) => Ok(rq),
            None => Err(IoError::new(IoErrorKind::Other, "thread unblocked")),
        }
    }

    /// Same as `recv()` but doesn't block longer than timeout
    ///
    /// # Errors
    ///
    /// `std::io::Error` propagated from the accept loop
    ///
    pub fn recv_timeout(&self, timeout: Duration) -> IoResult<Option<Request>> {
        match self.messages.pop_timeout(timeout) {
            Some(Message::Error(err)) => Err(err),
            Some(Message::NewRequest(rq)) => Ok(Some(rq)),
            None => Ok(None),
        }
    }

    /// Same as `recv()` but doesn't block.
    ///
    /// # Errors
    ///
    /// `std::io::Error` propagated from the accept loop
    ///
    pub fn try_recv(&self) -> IoResult<Option<Request>> {
        match self.messages.try_pop() {
            Some(Message::Error(err)) => Err(err),
            Some(Message::NewRequest(rq)) => Ok(Some(rq)),
            None => Ok(None),
        }
    }

    /// Unblock thread stuck in `recv()` or `incoming_requests()`.
    ///
    /// If there are several such threads, only one is unblocked.
    /// This method allows graceful shutdown of server.
    pub fn unblock(&self) {
        self.messages.unblock();
    }

    /// Returns the address the server is listening on.
    #[must_use]
    pub fn server_addr(&self) -> SocketAddr {
        self.listening_addr
    }

    /// Returns the number of clients currently connected to the server.
    #[must_use]
    pub fn num_connections(&self) -> usize {
        self.num_connections.load(Ordering::Acquire)
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.close.store(true, Ordering::Release);
        // Connect briefly to ourselves to unblock the accept thread
        if let Ok(stream) = TcpStream::connect(self.listening_addr) {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

/// Reads the single request of `stream` and forwards it to the queue.
///
/// A connection that fails before producing a request is answered with
/// a matching error status when possible and then dropped. It is never
/// forwarded as a queue error, so a broken client cannot disturb
/// `recv()` callers.
fn handle_connection(
    stream: TcpStream,
    registration: Registration,
    messages: &MessagesQueue<Message>,
) {
    let mut connection = match ClientConnection::new(stream, registration) {
        Ok(connection) => connection,
        Err(err) => {
            log::debug!("client setup failed [{}]", err);
            return;
        }
    };

    match connection.read_request() {
        Ok(rq) => messages.push(rq.into()),
        Err(err) => {
            log::debug!("invalid request [{}]", err);
            if let Some(status) = err.status() {
                connection.send_error(status);
            }
        }
    }
}

/// Iterator over received [`Request`]s, see [`Server::incoming_requests`].
#[allow(missing_debug_implementations)]
pub struct IncomingRequests<'a> {
    server: &'a Server,
}

impl Iterator for IncomingRequests<'_> {
    type Item = Request;

    fn next(&mut self) -> Option<Request> {
        self.server.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::TcpStream;
    use std::time::Duration;

    use super::Server;

    fn serve() -> Server {
        Server::http("127.0.0.1:0").unwrap()
    }

    #[test]
    fn test_recv_returns_request() {
        let server = serve();

        let mut client = TcpStream::connect(server.server_addr()).unwrap();
        write!(client, "GET /api HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();

        let request = server.recv().unwrap();
        assert_eq!(request.url(), "/api");
    }

    #[test]
    fn test_unblock_releases_recv() {
        let server = serve();
        server.unblock();
        assert!(server.recv().is_err());
    }

    #[test]
    fn test_recv_timeout_empty() {
        let server = serve();
        let request = server.recv_timeout(Duration::from_millis(50)).unwrap();
        assert!(request.is_none());
    }
}
