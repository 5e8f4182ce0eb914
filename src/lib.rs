//! HTTP Client Codec
//!
//! The byte and header level plumbing of an asynchronous HTTP client, without the client:
//!
//! - [`body`] aggregates received response fragments into a buffer or a stream
//! - [`cookie`] encodes and decodes Netscape / [RFC2109] cookie headers
//! - [`multipart`] assembles heterogeneous form parts into a multipart entity
//! - [`uri`] validates request and redirect URIs
//!
//! Transport, connection pooling and request dispatch belong to the caller.
//!
//! [RFC2109]: <https://datatracker.ietf.org/doc/html/rfc2109>
#![warn(missing_debug_implementations)]

mod log;

pub mod uri;
pub mod cookie;
pub mod body;
pub mod multipart;
mod agent;

pub use agent::user_agent;
pub use body::Fragment;
pub use cookie::Cookie;
pub use uri::Uri;
