//! Uniform Resource Identifier ([RFC3986])
//!
//! [RFC3986]: <https://datatracker.ietf.org/doc/html/rfc3986>
//!
//! # Generic Syntax
//!
//! [`Uri`] represents an absolute, scheme independent URI. Relative references are only accepted
//! as input to [`Uri::resolve`].
//!
//! # Validation
//!
//! A request can only target `http`, `https`, `ws` or `wss` URIs, see [`validate_request_uri`]
//! and [`resolve_redirect`].
//!
//! # Percent Encoding
//!
//! All API here does not decode or encode percent encoding.
use std::num::NonZeroU16;
use std::str::FromStr;

mod parser;
mod resolve;
mod validate;
mod error;

use parser::{Reference, split_host_port};

pub use error::UriError;
pub use validate::{
    HTTPS_PORT, HTTP_PORT, authority_with_port, base_url, base_url_of, effective_port, host,
    resolve_redirect, validate_request_uri,
};

/// URI Generic Syntax ([RFC3986])
///
/// [RFC3986]: <https://datatracker.ietf.org/doc/html/rfc3986>
///
/// # Syntax Component
///
/// The following are two example URIs and their component parts:
///
/// ```not_rust
///   foo://example.com:8042/over/there?name=ferret#nose
///   \_/   \______________/\_________/ \_________/ \__/
///    |           |            |            |        |
/// scheme     authority       path        query   fragment
///    |   _____________________|__
///   / \ /                        \
///   urn:example:animal:ferret:nose
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Uri {
    value: String,
    // scheme end, point to `:`
    scheme: u16,
    // auth end
    authority: Option<NonZeroU16>,
    // path start
    path: u16,
    // query start, point to either `?`, `#`, or end of bytes
    query: u16,
    // fragment start, point to either `#` or end of bytes
    fragment: u16,
    port: Option<u16>,
}

impl Uri {
    /// Parse an absolute URI.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid URI, or it is a relative reference.
    #[inline]
    pub fn parse(value: &str) -> Result<Self, UriError> {
        Self::from_string(value.to_owned())
    }

    pub(crate) fn from_string(value: String) -> Result<Self, UriError> {
        const COL_DELIM: usize = "://".len();

        let reference = Reference::parse(&value)?;
        let Some(scheme) = reference.scheme else {
            return Err(UriError::MissingScheme);
        };

        let scheme = scheme.len();
        let (authority, path, port) = match reference.authority {
            Some(authority) => {
                let end = scheme + COL_DELIM + authority.len();
                let (_, port) = split_host_port(authority)?;
                (Some(end), end, port)
            }
            None => (None, scheme + 1, None),
        };
        let query = path + reference.path.len();
        let fragment = query + reference.query.map_or(0, |query| query.len() + 1);

        // `Reference::parse` bounds the length to `u16::MAX`
        Ok(Self {
            scheme: scheme as u16,
            // scheme is non empty, so authority end is non zero
            authority: authority.and_then(|end| NonZeroU16::new(end as u16)),
            path: path as u16,
            query: query as u16,
            fragment: fragment as u16,
            port,
            value,
        })
    }

    /// Returns the scheme, without the trailing `:`.
    #[inline]
    pub fn scheme(&self) -> &str {
        &self.value[..self.scheme as usize]
    }

    #[inline]
    pub fn authority(&self) -> Option<&str> {
        self.authority
            .map(|end| &self.value[self.scheme as usize + 3..end.get() as usize])
    }

    /// Returns the host of the authority, without userinfo and port.
    pub fn host(&self) -> Option<&str> {
        let authority = self.authority()?;
        Some(split_host_port(authority).map_or(authority, |(host, _)| host))
    }

    /// Returns the explicit port, if any.
    #[inline]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.value[self.path as usize..self.query as usize]
    }

    #[inline]
    pub fn query(&self) -> Option<&str> {
        if self.query == self.fragment {
            None
        } else {
            Some(&self.value[self.query as usize + 1..self.fragment as usize])
        }
    }

    #[inline]
    pub fn fragment(&self) -> Option<&str> {
        if self.fragment as usize == self.value.len() {
            None
        } else {
            Some(&self.value[self.fragment as usize + 1..])
        }
    }

    #[inline]
    pub fn path_and_query(&self) -> &str {
        &self.value[self.path as usize..self.fragment as usize]
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub(crate) fn as_reference(&self) -> Reference<'_> {
        Reference {
            scheme: Some(self.scheme()),
            authority: self.authority(),
            path: self.path(),
            query: self.query(),
            fragment: self.fragment(),
        }
    }

    /// Byte offset where the path starts.
    #[inline]
    pub(crate) fn path_offset(&self) -> usize {
        self.path as usize
    }
}

// ===== Traits =====

impl FromStr for Uri {
    type Err = UriError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Debug for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Uri").field(&self.as_str()).finish()
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Uri> for String {
    #[inline]
    fn from(value: Uri) -> Self {
        value.value
    }
}
