use super::{BodyError, Fragment, to_bytes};

/// Charset assumed when a response declares none.
pub const DEFAULT_CHARSET: &str = "ISO-8859-1";

/// Charsets supported for body decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Latin1,
    Ascii,
}

impl Charset {
    /// Lookup charset by its label, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        const LABELS: [(&str, Charset); 9] = [
            ("utf-8", Charset::Utf8),
            ("utf8", Charset::Utf8),
            ("iso-8859-1", Charset::Latin1),
            ("iso8859-1", Charset::Latin1),
            ("iso_8859-1", Charset::Latin1),
            ("latin1", Charset::Latin1),
            ("us-ascii", Charset::Ascii),
            ("ascii", Charset::Ascii),
            ("ansi_x3.4-1968", Charset::Ascii),
        ];
        let label = label.trim();
        LABELS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|(_, charset)| *charset)
    }

    /// Decode bytes, malformed sequences are replaced with `U+FFFD`.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            Charset::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        }
    }
}

/// Extract the `charset` parameter of a `Content-Type` header value.
///
/// Quotes around the charset are removed, as many servers send `charset="utf-8"`.
pub fn parse_charset(content_type: &str) -> Option<String> {
    const PARAM: &str = "charset=";

    content_type.split(';').find_map(|param| {
        let param = param.trim();
        let prefix = param.get(..PARAM.len())?;
        if !prefix.eq_ignore_ascii_case(PARAM) {
            return None;
        }
        let charset = param[PARAM.len()..].split('=').next()?.trim();
        if charset.is_empty() {
            return None;
        }
        Some(charset.replace(['"', '\''], ""))
    })
}

/// Concatenate all fragments and decode them with `charset`.
///
/// # Errors
///
/// Returns [`BodyError::UnsupportedCharset`] if `charset` is not one of [`Charset`].
pub fn to_string<F: Fragment>(fragments: &[F], charset: &str) -> Result<String, BodyError> {
    let Some(decoder) = Charset::from_label(charset) else {
        return Err(BodyError::UnsupportedCharset(charset.into()));
    };
    Ok(decoder.decode(&to_bytes(fragments)))
}
