use std::{net::SocketAddr, time::Duration};

/// The compiled-in listening port of the info server.
pub const PORT: u16 = 8080;

/// Default connection limit for concurrent connections
pub(crate) const CONNECTION_LIMIT_DEFAULT: usize = 200;

/// Duration of sleep to check for concurrent connections
pub(crate) const CONNECTION_LIMIT_SLEEP_DURATION: Duration = Duration::from_millis(25);

/// Represents the config parameters required to create a server.
///
/// # Example
///
/// ```
/// # use webserver::ServerConfig;
/// let cfg = ServerConfig { connection_limit: 50, ..ServerConfig::default() };
/// ```
///
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to listen to.
    pub addr: SocketAddr,

    /// Connections are limited to `connection_limit`
    pub connection_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], PORT)),
            connection_limit: CONNECTION_LIMIT_DEFAULT,
        }
    }
}
