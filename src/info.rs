//! The data records served by the API route and the platform lookup
//! behind them.

use std::env::consts;
use std::fs;

use chrono::Local;
use lazy_static::lazy_static;
use serde::Serialize;

/// `status` field constant
pub(crate) const STATUS_RUNNING: &str = "running";

/// `language` field constant identifying this implementation
pub(crate) const LANGUAGE: &str = "rust";

lazy_static! {
    // resolved once, the host does not change while the process runs
    static ref OS_DESCRIPTION: String = describe_os();
}

/// Capability for resolving the current platform.
///
/// Production code uses [`HostPlatform`]; tests inject a
/// [`FixedPlatform`] to get deterministic strings.
pub trait PlatformInfo: Send + Sync {
    /// Short platform identifier, e.g. "linux", "win32", "darwin"
    fn platform(&self) -> String;

    /// Human-readable operating system description
    fn os(&self) -> String;
}

/// [`PlatformInfo`] of the operating system this process runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformInfo for HostPlatform {
    fn platform(&self) -> String {
        match consts::OS {
            "windows" => "win32",
            "macos" => "darwin",
            other => other,
        }
        .to_string()
    }

    fn os(&self) -> String {
        OS_DESCRIPTION.clone()
    }
}

/// [`PlatformInfo`] returning fixed strings, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedPlatform {
    os: String,
    platform: String,
}

impl FixedPlatform {
    /// Creates a platform that always resolves to `platform` and `os`.
    pub fn new<P, O>(platform: P, os: O) -> Self
    where
        P: Into<String>,
        O: Into<String>,
    {
        Self {
            os: os.into(),
            platform: platform.into(),
        }
    }
}

impl PlatformInfo for FixedPlatform {
    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn os(&self) -> String {
        self.os.clone()
    }
}

fn describe_os() -> String {
    match consts::OS {
        "linux" => linux_distribution().unwrap_or_else(|| "Linux".to_string()),
        "macos" => "macOS".to_string(),
        "windows" => "Windows".to_string(),
        other => other.to_string(),
    }
}

/// Attempts to detect the Linux distribution from `/etc/os-release`.
fn linux_distribution() -> Option<String> {
    let content = fs::read_to_string("/etc/os-release").ok()?;

    for line in content.lines() {
        if let Some(name) = line.strip_prefix("PRETTY_NAME=") {
            return Some(name.trim_matches('"').to_string());
        }
    }

    None
}

/// The per-request server metadata served on both routes.
///
/// `datetime` and `timestamp` always derive from the same instant.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// configured listening port
    pub port: u16,
    /// short OS identifier (e.g. "linux", "win32", "darwin")
    pub platform: String,
    /// human-readable OS description
    pub os: String,
    /// compiler version this binary was built with
    pub rust_version: String,
    /// CPU architecture this binary was built for
    pub architecture: String,
    /// local time, format `YYYY-MM-DD HH:MM:SS`
    pub datetime: String,
    /// Unix epoch seconds at response-construction time
    pub timestamp: i64,
    /// constant `"running"`
    pub status: String,
    /// constant `"rust"`
    pub language: String,
}

impl ServerInfo {
    /// Captures the metadata for one response.
    #[must_use]
    pub fn capture(port: u16, platform: &dyn PlatformInfo) -> Self {
        // one instant for both time fields, so they never drift apart
        let now = Local::now();

        Self {
            port,
            platform: platform.platform(),
            os: platform.os(),
            rust_version: env!("WEBSERVER_RUSTC_VERSION").to_string(),
            architecture: consts::ARCH.to_string(),
            datetime: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            timestamp: now.timestamp(),
            status: STATUS_RUNNING.to_string(),
            language: LANGUAGE.to_string(),
        }
    }
}

/// The complete payload of the `/api` route.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    /// the captured metadata
    pub server_info: ServerInfo,
    /// constant `"Server API endpoint"`
    pub message: String,
}

impl ApiResponse {
    /// `message` field constant
    pub const MESSAGE: &'static str = "Server API endpoint";

    /// Wraps `server_info` into the API payload.
    #[must_use]
    pub fn new(server_info: ServerInfo) -> Self {
        Self {
            server_info,
            message: Self::MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::{ApiResponse, FixedPlatform, HostPlatform, PlatformInfo, ServerInfo};

    #[test]
    fn test_capture_with_fixed_platform() {
        let platform = FixedPlatform::new("linux", "Test Linux 1.0");
        let info = ServerInfo::capture(8080, &platform);

        assert_eq!(info.port, 8080);
        assert_eq!(info.platform, "linux");
        assert_eq!(info.os, "Test Linux 1.0");
        assert_eq!(info.status, "running");
        assert_eq!(info.language, "rust");
    }

    #[test]
    fn test_datetime_matches_timestamp() {
        let info = ServerInfo::capture(8080, &FixedPlatform::new("linux", "Linux"));

        let parsed = NaiveDateTime::parse_from_str(&info.datetime, "%Y-%m-%d %H:%M:%S").unwrap();
        let wall = chrono::Local::now().timestamp();

        // same instant for both fields, and close to the current wall clock
        assert_eq!(
            parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
            info.datetime
        );
        assert!((wall - info.timestamp).abs() <= 2);
    }

    #[test]
    fn test_host_platform_identifier() {
        let platform = HostPlatform.platform();
        assert!(["linux", "win32", "darwin"].contains(&platform.as_str()) || !platform.is_empty());
        assert!(!HostPlatform.os().is_empty());
    }

    #[test]
    fn test_api_payload_serializes() {
        let payload = ApiResponse::new(ServerInfo::capture(
            8080,
            &FixedPlatform::new("linux", "Linux"),
        ));
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["message"], "Server API endpoint");
        assert_eq!(json["server_info"]["port"], 8080);
        assert_eq!(json["server_info"]["status"], "running");
    }
}
