pub use header::{Header, HeaderError, HeaderField};
pub use http_version::{HttpVersion, HttpVersionError};
pub use method::Method;
pub use status_code::StatusCode;

mod header;
mod http_version;
mod method;
mod status_code;
