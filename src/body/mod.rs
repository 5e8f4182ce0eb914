//! HTTP Response Body aggregation.
//!
//! A response body arrives as an ordered sequence of [`Fragment`]s, which can be:
//!
//! - concatenated into one buffer with [`to_bytes`]
//! - concatenated into a size bounded buffer with [`to_bounded_bytes`]
//! - read sequentially without buffering with [`to_stream`]
//! - decoded into text with [`to_string`]
//!
//! Fragment order is concatenation order.
use std::io;
use bytes::{Buf, Bytes};

mod collect;
mod stream;
mod charset;
mod error;

pub use collect::{to_bounded_bytes, to_bytes};
pub use stream::{BodyStream, to_stream};
pub use charset::{Charset, DEFAULT_CHARSET, parse_charset, to_string};
pub use error::BodyError;

/// "No Content" status, the only status that allows a missing body.
pub const NO_CONTENT: u16 = 204;

/// A received chunk of a response body.
pub trait Fragment {
    /// Reader over this fragment bytes.
    type Reader: io::Read;

    /// Returns the length of this fragment in bytes.
    fn len(&self) -> usize;

    /// Returns `true` if this fragment contains no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bytes of this fragment.
    fn bytes(&self) -> Bytes;

    /// Returns a reader over the bytes of this fragment.
    fn reader(&self) -> Self::Reader;
}

impl Fragment for Bytes {
    type Reader = io::Cursor<Bytes>;

    #[inline]
    fn len(&self) -> usize {
        self.remaining()
    }

    #[inline]
    fn bytes(&self) -> Bytes {
        self.clone()
    }

    #[inline]
    fn reader(&self) -> Self::Reader {
        io::Cursor::new(self.clone())
    }
}

/// Check that a response with `status` carries a body.
///
/// # Errors
///
/// Returns [`BodyError::Empty`] if there is no fragment, unless `status` is [`NO_CONTENT`].
pub fn check_non_empty<F: Fragment>(status: u16, fragments: &[F]) -> Result<(), BodyError> {
    if fragments.is_empty() && status != NO_CONTENT {
        return Err(BodyError::Empty);
    }
    Ok(())
}
