use std::path::{Path, PathBuf};
use bytes::Bytes;

/// A part of a multipart entity, in the representation the transport serializes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    name: String,
    body: PartBody,
}

/// Content of a [`FormPart`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartBody {
    /// Text field.
    Text {
        value: String,
        charset: Option<String>,
    },
    /// File upload.
    File {
        source: PartSource,
        content_type: Option<String>,
        charset: Option<String>,
    },
}

/// Where the bytes of a file upload come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartSource {
    /// File on disk, opened and read by the transport.
    Path(PathBuf),
    /// In memory bytes under a file name.
    Bytes {
        file_name: String,
        data: Bytes,
    },
}

impl FormPart {
    /// Create a text part.
    pub fn text(name: impl Into<String>, value: impl Into<String>, charset: Option<String>) -> Self {
        Self {
            name: name.into(),
            body: PartBody::Text {
                value: value.into(),
                charset,
            },
        }
    }

    /// Create a file part.
    pub fn file(
        name: impl Into<String>,
        source: PartSource,
        content_type: Option<String>,
        charset: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            body: PartBody::File {
                source,
                content_type,
                charset,
            },
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn body(&self) -> &PartBody {
        &self.body
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self.body, PartBody::File { .. })
    }
}

impl PartSource {
    /// Returns the file name sent in `Content-Disposition`.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            PartSource::Path(path) => path.file_name().and_then(|name| name.to_str()),
            PartSource::Bytes { file_name, .. } => Some(file_name),
        }
    }

    /// Returns the path of a file source.
    pub fn path(&self) -> Option<&Path> {
        match self {
            PartSource::Path(path) => Some(path),
            PartSource::Bytes { .. } => None,
        }
    }

    /// Returns the length if it is known without I/O.
    pub fn len_hint(&self) -> Option<usize> {
        match self {
            PartSource::Path(_) => None,
            PartSource::Bytes { data, .. } => Some(data.len()),
        }
    }
}
