use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};

use webserver::{FixedPlatform, Responder, Server};

/// Platform strings every test can rely on
pub(crate) const TEST_PLATFORM: &str = "linux";
pub(crate) const TEST_OS: &str = "Test Linux 1.0";

/// How long a spawned server keeps serving before shutting itself down
const SERVE_DURATION: Duration = Duration::from_secs(3);

/// Creates a [`TcpStream`] Client for first `addr`
pub(crate) fn create_client<A>(addr: A, timeout: Option<Duration>) -> TcpStream
where
    A: ToSocketAddrs,
{
    let addr = addr.to_socket_addrs().unwrap().next().unwrap();

    let stream = if let Some(timeout) = timeout {
        TcpStream::connect_timeout(&addr, timeout)
    } else {
        TcpStream::connect(addr)
    }
    .unwrap();

    stream.set_nodelay(true).unwrap();
    if timeout.is_some() {
        stream.set_read_timeout(timeout).unwrap();
        stream.set_write_timeout(timeout).unwrap();
    }

    stream
}

/// Creates a server with a deterministic platform and spawns a thread
/// answering its requests for a few seconds.
///
/// Returns the address the server is listening on.
pub(crate) fn new_info_server() -> SocketAddr {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    let responder = Responder::with_platform(addr.port(), FixedPlatform::new(TEST_PLATFORM, TEST_OS));

    let _ = thread::spawn(move || {
        let deadline = Instant::now() + SERVE_DURATION;

        while Instant::now() < deadline {
            match server.try_recv() {
                Ok(Some(request)) => {
                    let _ = responder.handle(request);
                }
                Ok(None) => thread::sleep(Duration::from_millis(20)),
                Err(_) => {}
            }
        }
    });

    addr
}

/// Writes `request` raw to a fresh connection against `addr` and reads
/// the complete response.
pub(crate) fn exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut client = create_client(addr, Some(Duration::from_secs(2)));
    client.write_all(request).unwrap();
    client.flush().unwrap();

    let mut response = String::new();
    let _ = client.read_to_string(&mut response).unwrap();
    response
}

/// Status line and body of `response`
pub(crate) fn split_response(response: &str) -> (&str, &str) {
    let status_line = response.split("\r\n").next().unwrap();
    let body = response.split("\r\n\r\n").nth(1).unwrap_or("");
    (status_line, body)
}
