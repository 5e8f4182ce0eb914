//! Multipart request entity assembly.
//!
//! Callers describe form parts with [`Part`], or with their own types through [`IntoPart`].
//! [`assemble`] maps them into uniform [`FormPart`]s, in order, for the transport to serialize
//! into `multipart/form-data`. Boundary and content length are the transport concern.
use std::collections::BTreeMap;
use std::path::PathBuf;
use bytes::Bytes;

use crate::log::debug;

mod part;
mod error;

pub use part::{FormPart, PartBody, PartSource};
pub use error::MultipartError;

/// Text field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringPart {
    pub name: String,
    pub value: String,
    pub charset: Option<String>,
}

/// File upload from disk, the file is only referenced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    pub name: String,
    pub file: PathBuf,
    pub mime_type: Option<String>,
    pub charset: Option<String>,
}

/// File upload from in memory bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteArrayPart {
    pub name: String,
    pub file_name: String,
    pub data: Bytes,
    pub mime_type: Option<String>,
    pub charset: Option<String>,
}

/// Form part descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    String(StringPart),
    File(FilePart),
    ByteArray(ByteArrayPart),
    /// Already in the transport representation.
    Prebuilt(FormPart),
}

impl StringPart {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            charset: None,
        }
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }
}

impl FilePart {
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            mime_type: None,
            charset: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }
}

impl ByteArrayPart {
    pub fn new(name: impl Into<String>, file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            data: data.into(),
            mime_type: None,
            charset: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }
}

impl Part {
    /// Returns the form field name.
    pub fn name(&self) -> &str {
        match self {
            Part::String(part) => &part.name,
            Part::File(part) => &part.name,
            Part::ByteArray(part) => &part.name,
            Part::Prebuilt(part) => part.name(),
        }
    }

    /// Convert into the transport representation.
    pub fn into_form_part(self) -> FormPart {
        match self {
            Part::Prebuilt(part) => part,
            Part::String(StringPart { name, value, charset }) => FormPart::text(name, value, charset),
            Part::File(FilePart { name, file, mime_type, charset }) => {
                FormPart::file(name, PartSource::Path(file), mime_type, charset)
            }
            Part::ByteArray(ByteArrayPart { name, file_name, data, mime_type, charset }) => {
                FormPart::file(name, PartSource::Bytes { file_name, data }, mime_type, charset)
            }
        }
    }
}

// ===== IntoPart =====

/// Type that may describe a [`Part`].
///
/// Implement this for request builder types that carry more shapes than [`Part`] does, shapes
/// without a [`Part`] counterpart are rejected by [`assemble`].
pub trait IntoPart: Sized {
    /// Returns the declared form field name.
    fn part_name(&self) -> &str;

    /// Convert into a [`Part`], or return `self` back if it is not supported.
    fn into_part(self) -> Result<Part, Self>;
}

impl IntoPart for Part {
    #[inline]
    fn part_name(&self) -> &str {
        self.name()
    }

    #[inline]
    fn into_part(self) -> Result<Part, Self> {
        Ok(self)
    }
}

macro_rules! into_part {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoPart for $ty {
                #[inline]
                fn part_name(&self) -> &str {
                    &self.name
                }

                #[inline]
                fn into_part(self) -> Result<Part, Self> {
                    Ok(Part::$variant(self))
                }
            }

            impl From<$ty> for Part {
                #[inline]
                fn from(value: $ty) -> Self {
                    Part::$variant(value)
                }
            }
        )*
    };
}

into_part! {
    StringPart => String,
    FilePart => File,
    ByteArrayPart => ByteArray,
}

impl IntoPart for FormPart {
    #[inline]
    fn part_name(&self) -> &str {
        self.name()
    }

    #[inline]
    fn into_part(self) -> Result<Part, Self> {
        Ok(Part::Prebuilt(self))
    }
}

impl From<FormPart> for Part {
    #[inline]
    fn from(value: FormPart) -> Self {
        Part::Prebuilt(value)
    }
}

// ===== Entity =====

/// Multipart request entity: ordered parts, plus simple fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartEntity {
    parts: Vec<FormPart>,
    fields: BTreeMap<String, String>,
}

impl MultipartEntity {
    /// Assemble an entity from parts that are all present, see [`assemble`].
    ///
    /// # Errors
    ///
    /// Returns error if any part has an empty name.
    pub fn from_parts(
        parts: Vec<Part>,
        fields: BTreeMap<String, String>,
    ) -> Result<Self, MultipartError> {
        assemble(parts.into_iter().map(Some), fields)
    }

    #[inline]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Simple fields, serialized by the transport alongside the parts.
    #[inline]
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<FormPart>, BTreeMap<String, String>) {
        (self.parts, self.fields)
    }
}

/// Assemble parts into a [`MultipartEntity`].
///
/// Part order is kept. `fields` are carried as is, not merged into the parts. Either every part
/// is converted, or none is.
///
/// # Errors
///
/// Returns [`MultipartError::NullPart`] if a part is `None`, [`MultipartError::EmptyName`] if a
/// part has an empty name, and [`MultipartError::UnsupportedPartType`] if a part cannot be
/// converted into a [`Part`].
pub fn assemble<I, P>(parts: I, fields: BTreeMap<String, String>) -> Result<MultipartEntity, MultipartError>
where
    I: IntoIterator<Item = Option<P>>,
    P: IntoPart,
{
    let parts = parts
        .into_iter()
        .enumerate()
        .map(|(index, part)| {
            let Some(part) = part else {
                return Err(MultipartError::NullPart { index });
            };
            if part.part_name().is_empty() {
                return Err(MultipartError::EmptyName { index });
            }
            match part.into_part() {
                Ok(part) => Ok(part.into_form_part()),
                Err(part) => Err(MultipartError::UnsupportedPartType {
                    name: part.part_name().into(),
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("assembled multipart entity of {} parts, {} fields", parts.len(), fields.len());

    Ok(MultipartEntity { parts, fields })
}
