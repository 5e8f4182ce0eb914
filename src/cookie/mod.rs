//! HTTP Cookie header codec.
//!
//! Cookies follow the legacy Netscape and [RFC2109] grammar:
//!
//! - [`parse`] decodes one `Set-Cookie` header value into a [`Cookie`]
//! - [`encode`] encodes cookies into one `Cookie` header value
//!
//! Decoding the `Expires` attribute requires a set of [`DateFormats`], which is an explicit
//! parameter of [`parse_with`].
//!
//! [RFC2109]: <https://datatracker.ietf.org/doc/html/rfc2109>
use std::collections::BTreeSet;

mod quote;
mod date;
mod parse;
mod encode;
mod error;

pub use date::{
    ASCTIME, DateFormat, DateFormats, Item, RFC850, RFC850_OFFSET, RFC1036, RFC1123,
    RFC1123_OFFSET,
};
pub use encode::encode;
pub use error::CookieError;
pub use parse::{parse, parse_with};

/// HTTP Cookie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cookie {
    domain: Option<String>,
    name: String,
    value: Option<String>,
    path: Option<String>,
    max_age: i64,
    secure: bool,
    version: u32,
    ports: BTreeSet<u16>,
}

impl Cookie {
    /// Max age of a session cookie, which has no expiry.
    pub const SESSION: i64 = -1;

    /// Create a session [`Cookie`] without value.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, CookieError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CookieError::EmptyName);
        }
        Ok(Self {
            domain: None,
            name,
            value: None,
            path: None,
            max_age: Self::SESSION,
            secure: false,
            version: 0,
            ports: BTreeSet::new(),
        })
    }

    #[inline]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[inline]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[inline]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set max age in seconds, any negative value makes a session cookie.
    #[inline]
    pub fn with_max_age(mut self, max_age: i64) -> Self {
        self.max_age = max_age.max(Self::SESSION);
        self
    }

    #[inline]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[inline]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    #[inline]
    pub fn with_ports(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.ports.extend(ports);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[inline]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns max age in seconds, or [`Cookie::SESSION`].
    #[inline]
    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    #[inline]
    pub fn is_session(&self) -> bool {
        self.max_age == Self::SESSION
    }

    #[inline]
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[inline]
    pub fn ports(&self) -> &BTreeSet<u16> {
        &self.ports
    }
}

#[cfg(test)]
mod test;
