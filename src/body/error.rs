/// An error that can occur when aggregating a response body.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BodyError {
    /// Response expected a body, but no fragment was received.
    #[error("response body has not been received")]
    Empty,
    /// Charset is not supported for decoding.
    #[error("unsupported charset `{0}`")]
    UnsupportedCharset(String),
}
