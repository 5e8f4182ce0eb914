/// An error that can occur when assembling a multipart entity.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MultipartError {
    /// Part at `index` is absent.
    #[error("part cannot be null, at index {index}")]
    NullPart { index: usize },
    /// Part at `index` has an empty name.
    #[error("part name cannot be empty, at index {index}")]
    EmptyName { index: usize },
    /// Part is none of the supported shapes.
    #[error("unsupported part type for multipart parameter {name}")]
    UnsupportedPartType { name: String },
}
