use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

use super::quote::unquote;
use super::{Cookie, CookieError, DateFormats};
use crate::log::debug;

/// Decode a `Set-Cookie` header value, with legacy date formats and the current time.
///
/// See [`parse_with`].
///
/// # Errors
///
/// Returns error if the cookie name is empty.
#[inline]
pub fn parse(value: &str) -> Result<Cookie, CookieError> {
    parse_with(value, &DateFormats::legacy(), SystemTime::now())
}

/// Decode a `Set-Cookie` header value.
///
/// ```not_rust
/// set-cookie  = NAME [ "=" VALUE ] *( ";" *SP attribute )
/// attribute   = "Secure" / "Max-Age=" seconds / "Expires=" date
///             / "Domain=" domain / "Path=" path / "Version=" 1*DIGIT / "Port=" portlist
/// ```
///
/// Attribute names are case insensitive, and may carry the `$` prefix of a `Cookie` request
/// header, which may also lead with `$Version`. Values may be quoted.
///
/// `Max-Age` wins over `Expires`, an `Expires` is ignored once `Max-Age` is seen, and a later
/// `Max-Age` overrides an earlier `Expires`. `Expires` is parsed with `formats` relative to
/// `now`, and a date that fails every format is read as a plain number of seconds instead.
/// Unparseable values leave a session cookie, and negative ages are clamped to zero.
///
/// # Errors
///
/// Returns error if the cookie name is empty.
pub fn parse_with(value: &str, formats: &DateFormats, now: SystemTime) -> Result<Cookie, CookieError> {
    let mut fields = Fields::new(value);
    let mut version = 0;

    let mut pair = fields.next().unwrap_or_default();
    if let Some((key, val)) = pair.split_once('=') {
        if key.trim_end().eq_ignore_ascii_case("$version") {
            version = parse_version(val.trim_start()).unwrap_or_default();
            pair = fields.next().unwrap_or_default();
        }
    }

    let (name, value) = match pair.split_once('=') {
        Some((name, value)) => (name.trim_end(), Some(unquote(value.trim_start()).into_owned())),
        None => (pair, None),
    };

    let mut cookie = Cookie::new(name)?;
    cookie.value = value;
    cookie.version = version;

    let mut max_age_set = false;
    let mut expires_set = false;

    for field in fields {
        if field.eq_ignore_ascii_case("secure") {
            cookie.secure = true;
            continue;
        }

        let Some((key, raw)) = field.split_once('=') else {
            continue;
        };
        let key = key.trim_end();
        let raw = unquote(raw.trim_start());
        if key.is_empty() || raw.is_empty() {
            continue;
        }

        match Attribute::from_key(key) {
            Some(Attribute::MaxAge) if !max_age_set => {
                cookie.max_age = parse_max_age(&raw);
                max_age_set = true;
            }
            Some(Attribute::Expires) if !max_age_set && !expires_set => {
                if let Some(max_age) = parse_expires(&raw, formats, now) {
                    cookie.max_age = max_age;
                }
                expires_set = true;
            }
            Some(Attribute::Domain) => cookie.domain = Some(raw.into_owned()),
            Some(Attribute::Path) => cookie.path = Some(raw.into_owned()),
            Some(Attribute::Version) => {
                if let Some(version) = parse_version(&raw) {
                    cookie.version = version;
                }
            }
            Some(Attribute::Port) => cookie.ports = parse_ports(&raw),
            _ => {}
        }
    }

    Ok(cookie)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Attribute {
    MaxAge,
    Expires,
    Domain,
    Path,
    Version,
    Port,
}

impl Attribute {
    fn from_key(key: &str) -> Option<Self> {
        let key = key.strip_prefix('$').unwrap_or(key);
        const KEYS: [(&str, Attribute); 6] = [
            ("max-age", Attribute::MaxAge),
            ("expires", Attribute::Expires),
            ("domain", Attribute::Domain),
            ("path", Attribute::Path),
            ("version", Attribute::Version),
            ("port", Attribute::Port),
        ];
        KEYS.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, attr)| *attr)
    }
}

fn parse_max_age(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(secs) => secs.max(0),
        Err(_err) => {
            debug!("unparseable cookie max-age {raw:?}: {_err}");
            Cookie::SESSION
        }
    }
}

/// Seconds from `now` until the `Expires` date, clamped to zero.
///
/// A value that matches no date format is read as a number of seconds, as some servers send
/// `Max-Age` semantics under the `Expires` name.
fn parse_expires(raw: &str, formats: &DateFormats, now: SystemTime) -> Option<i64> {
    if let Some(expires) = formats.parse(raw) {
        return Some(expires.saturating_sub(unix_secs(now)).max(0));
    }

    match raw.trim().parse::<i64>() {
        Ok(secs) => {
            debug!("cookie expires {raw:?} read as seconds");
            Some(secs.max(0))
        }
        Err(_) => {
            debug!("unparseable cookie expires {raw:?}");
            None
        }
    }
}

fn parse_version(raw: &str) -> Option<u32> {
    unquote(raw).parse().ok()
}

/// ```not_rust
/// portlist    = 1#portnum
/// ```
///
/// Invalid entries are skipped.
fn parse_ports(raw: &str) -> BTreeSet<u16> {
    raw.split(',')
        .filter_map(|port| port.trim().parse().ok())
        .collect()
}

fn unix_secs(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(dur) => i64::try_from(dur.as_secs()).unwrap_or(i64::MAX),
        Err(err) => i64::try_from(err.duration().as_secs()).map_or(i64::MIN, |secs| -secs),
    }
}

// ===== Fields =====

/// Iterator of `;` separated fields, trimmed.
///
/// A `;` inside a quoted value does not separate.
#[derive(Debug)]
struct Fields<'a> {
    rest: Option<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(value: &'a str) -> Self {
        Self { rest: Some(value) }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;

        let mut quoted = false;
        let mut escaped = false;
        let mut opened = 0;
        // last non whitespace byte
        let mut last = 0u8;

        for (i, byte) in rest.bytes().enumerate() {
            match byte {
                _ if escaped => escaped = false,
                b'\\' if quoted => escaped = true,
                b'"' if quoted => quoted = false,
                b'"' if last == b'=' => {
                    quoted = true;
                    opened = i;
                }
                b';' if !quoted => {
                    self.rest = Some(&rest[i + 1..]);
                    return Some(rest[..i].trim());
                }
                _ => {}
            }
            if !byte.is_ascii_whitespace() {
                last = byte;
            }
        }

        // unterminated quote, `;` separates again from where it opened
        if quoted {
            if let Some(end) = rest[opened..].find(';').map(|n| n + opened) {
                self.rest = Some(&rest[end + 1..]);
                return Some(rest[..end].trim());
            }
        }

        self.rest = None;
        Some(rest.trim())
    }
}

#[cfg(test)]
mod test {
    use super::Fields;

    #[test]
    fn test_fields() {
        let fields: Vec<_> = Fields::new("a=b; Path=/;Secure").collect();
        assert_eq!(fields, ["a=b", "Path=/", "Secure"]);

        let fields: Vec<_> = Fields::new(r#"a="x;y"; b="q\";r";c"#).collect();
        assert_eq!(fields, [r#"a="x;y""#, r#"b="q\";r""#, "c"]);

        let fields: Vec<_> = Fields::new(r#"a=b"c; Secure"#).collect();
        assert_eq!(fields, [r#"a=b"c"#, "Secure"]);

        let fields: Vec<_> = Fields::new(r#"sid="abc; Secure; Max-Age=0"#).collect();
        assert_eq!(fields, [r#"sid="abc"#, "Secure", "Max-Age=0"]);

        let fields: Vec<_> = Fields::new(r#"sid="x\"; Secure; Path=/"#).collect();
        assert_eq!(fields, [r#"sid="x\""#, "Secure", "Path=/"]);

        let fields: Vec<_> = Fields::new(r#"a="ok"; Path="/a; Secure"#).collect();
        assert_eq!(fields, [r#"a="ok""#, r#"Path="/a"#, "Secure"]);

        let fields: Vec<_> = Fields::new("").collect();
        assert_eq!(fields, [""]);
    }
}
