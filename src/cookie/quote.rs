//! Quoted-string handling shared by cookie values and attributes.
use std::borrow::Cow;

/// ```not_rust
/// tspecials = "(" | ")" | "<" | ">" | "@"
///           | "," | ";" | ":" | "\" | <">
///           | "/" | "[" | "]" | "?" | "="
///           | "{" | "}" | SP | HT
/// ```
///
/// [source](https://datatracker.ietf.org/doc/html/rfc2068#section-2.2)
const fn is_tspecial(byte: u8) -> bool {
    matches!(
        byte,
        b'\t' | b' ' | b'"' | b'(' | b')' | b',' | b'/' | b':' | b';' | b'<' | b'=' | b'>' | b'?'
            | b'@' | b'[' | b'\\' | b']' | b'{' | b'}'
    )
}

/// Write `name=value;`, quoting the value if it contains any tspecials.
///
/// An absent value is written as an empty quoted string.
pub(crate) fn write_pair(buf: &mut String, name: &str, value: Option<&str>) {
    buf.push_str(name);
    buf.push('=');
    match value {
        Some(value) if !value.bytes().any(is_tspecial) => buf.push_str(value),
        value => write_quoted(buf, value.unwrap_or_default()),
    }
    buf.push(';');
}

fn write_quoted(buf: &mut String, value: &str) {
    buf.reserve(value.len() + 2);
    buf.push('"');
    for ch in value.chars() {
        if matches!(ch, '\\' | '"') {
            buf.push('\\');
        }
        buf.push(ch);
    }
    buf.push('"');
}

/// Strip one pair of surrounding double quotes, and unescape backslash escapes inside.
pub(crate) fn unquote(value: &str) -> Cow<'_, str> {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
    else {
        return Cow::Borrowed(value);
    };

    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut unescaped = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => unescaped.extend(chars.next()),
            ch => unescaped.push(ch),
        }
    }
    Cow::Owned(unescaped)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_pair() {
        let mut buf = String::new();
        write_pair(&mut buf, "a", Some("plain"));
        write_pair(&mut buf, "b", Some("has space"));
        write_pair(&mut buf, "c", Some(r#"q"uo\te"#));
        write_pair(&mut buf, "d", None);
        write_pair(&mut buf, "e", Some(""));
        assert_eq!(buf, r#"a=plain;b="has space";c="q\"uo\\te";d="";e=;"#);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote(r#""has space""#), "has space");
        assert_eq!(unquote(r#""q\"uo\\te""#), r#"q"uo\te"#);
        assert_eq!(unquote(r#""""#), "");
        assert_eq!(unquote(r#"""#), r#"""#);
        assert!(matches!(unquote(r#""borrowed""#), Cow::Borrowed("borrowed")));
    }
}
