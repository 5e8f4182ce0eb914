/// An error that can occur when creating or decoding a [`Cookie`].
///
/// Malformed `Max-Age` or `Expires` attributes are not errors, they leave a session cookie.
///
/// [`Cookie`]: super::Cookie
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CookieError {
    /// Cookie name is empty.
    #[error("cookie name cannot be empty")]
    EmptyName,
}
