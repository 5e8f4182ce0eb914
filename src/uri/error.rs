/// A possible error value when parsing or validating a URI.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    /// Bytes ends before all components parsed.
    #[error("URI incomplete")]
    Incomplete,
    /// Bytes length is too large.
    #[error("URI too long")]
    TooLong,
    /// Invalid character found.
    #[error("URI contains invalid character `{0}`")]
    Char(char),
    /// Port is not a 16 bit number.
    #[error("URI port out of range")]
    Port,
    /// Relative reference where an absolute URI is required.
    #[error("URI has no scheme")]
    MissingScheme,
    /// Scheme is not one of `http`, `https`, `ws` or `wss`.
    #[error("the URI scheme of `{0}` must be equal (ignoring case) to `http`, `https`, `ws` or `wss`")]
    InvalidScheme(String),
    /// Path is absent, or does not start with `/`.
    #[error("the URI path of `{0}` must be present and start with `/`")]
    InvalidPath(String),
    /// Redirect without a location.
    #[error("URI `{0}` was redirected to null location")]
    NullLocation(String),
}
