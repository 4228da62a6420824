//! Routing and request handling.
//!
//! See [`Responder`]

use std::io::Result as IoResult;

use lazy_static::lazy_static;

use crate::common::{Header, Method};
use crate::info::{ApiResponse, HostPlatform, PlatformInfo, ServerInfo};
use crate::log;
use crate::{page, Request, Response};

lazy_static! {
    static ref ALLOW_GET_HEAD: Header = Header::from_bytes(b"Allow", b"GET, HEAD").unwrap();
}

/// Routes requests and produces the matching [`Response`].
///
/// There are two routes:
///
/// * `GET /api` answers with the server metadata as JSON
/// * every other `GET` path answers with the HTML info page
///
/// Requests with a method other than `GET` or `HEAD` are rejected
/// with `405 Method Not Allowed`.
#[allow(missing_debug_implementations)]
pub struct Responder {
    platform: Box<dyn PlatformInfo>,
    port: u16,
}

impl Responder {
    /// Creates a responder reporting `port` and the host platform.
    #[must_use]
    pub fn new(port: u16) -> Self {
        Self::with_platform(port, HostPlatform)
    }

    /// Creates a responder with an explicit [`PlatformInfo`].
    #[must_use]
    pub fn with_platform<P>(port: u16, platform: P) -> Self
    where
        P: PlatformInfo + 'static,
    {
        Self {
            platform: Box::new(platform),
            port,
        }
    }

    /// Answers `request` and closes its connection.
    ///
    /// # Errors
    ///
    /// `std::io::Error` when the response could not be written
    ///
    pub fn handle(&self, request: Request) -> IoResult<()> {
        log::debug!("handle {:?}", request);

        if !matches!(request.method(), Method::Get | Method::Head) {
            return request.respond(Response::empty(405).with_header(ALLOW_GET_HEAD.clone()));
        }

        let info = ServerInfo::capture(self.port, self.platform.as_ref());

        if request.path() == "/api" {
            let response = match serde_json::to_string_pretty(&ApiResponse::new(info)) {
                Ok(body) => Response::json(body),
                Err(err) => {
                    log::error!("serializing api payload: {}", err);
                    Response::empty(500)
                }
            };
            return request.respond(response);
        }

        request.respond(Response::html(page::render(&info)))
    }
}
