use super::error::UriError;

/// Maximum URI length, offsets are stored as `u16`.
pub(crate) const MAX_URI_LEN: usize = u16::MAX as usize;

/// Borrowed components of a URI reference.
///
/// ```not_rust
/// URI-reference = URI / relative-ref
///
/// URI           = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
/// relative-ref  = relative-part [ "?" query ] [ "#" fragment ]
/// ```
///
/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-4.1)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Reference<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl<'a> Reference<'a> {
    pub(crate) fn parse(value: &'a str) -> Result<Self, UriError> {
        if value.len() > MAX_URI_LEN {
            return Err(UriError::TooLong);
        }

        if let Some(ch) = value.chars().find(|ch| !is_uri_char(*ch)) {
            return Err(UriError::Char(ch));
        }

        let (scheme, rest) = match parse_scheme(value.as_bytes())? {
            Some(end) => (Some(&value[..end]), &value[end + 1..]),
            None => (None, value),
        };

        let (rest, fragment) = match rest.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (rest, None),
        };

        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };

        let (authority, path) = match rest.strip_prefix("//") {
            Some(hier) => {
                let end = hier.find('/').unwrap_or(hier.len());
                let (authority, path) = hier.split_at(end);
                split_host_port(authority)?;
                (Some(authority), path)
            }
            None => (None, rest),
        };

        Ok(Self {
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    /// Write components back into a URI string.
    ///
    /// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-5.3)
    pub(crate) fn recompose(&self) -> String {
        let mut value = String::with_capacity(
            self.scheme.map_or(0, str::len)
                + self.authority.map_or(0, str::len)
                + self.path.len()
                + self.query.map_or(0, str::len)
                + self.fragment.map_or(0, str::len)
                + 6,
        );
        if let Some(scheme) = self.scheme {
            value.push_str(scheme);
            value.push(':');
        }
        if let Some(authority) = self.authority {
            value.push_str("//");
            value.push_str(authority);
        }
        value.push_str(self.path);
        if let Some(query) = self.query {
            value.push('?');
            value.push_str(query);
        }
        if let Some(fragment) = self.fragment {
            value.push('#');
            value.push_str(fragment);
        }
        value
    }
}

/// Characters never allowed anywhere in a URI, unencoded.
const fn is_uri_char(ch: char) -> bool {
    !matches!(
        ch,
        '\0'..=' ' | '\x7f' | '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}'
    )
}

/// ```not_rust
/// scheme      = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
/// ```
///
/// terminated by `:`, returns `None` if a `/`, `?`, `#`, or the end comes first, which means the
/// value is a relative reference.
///
/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-3.1)
fn parse_scheme(buf: &[u8]) -> Result<Option<usize>, UriError> {
    use UriError::*;

    let Some(end) = buf.iter().position(|b| matches!(b, b':' | b'/' | b'?' | b'#')) else {
        return Ok(None);
    };

    if buf[end] != b':' {
        return Ok(None);
    }

    match buf[0] {
        e if e.is_ascii_alphabetic() => {}
        ch => return Err(Char(ch as char)),
    }

    for byte in &buf[1..end] {
        match byte {
            b'+' | b'-' | b'.' => {}
            e if e.is_ascii_alphanumeric() => {}
            ch => return Err(Char(*ch as char)),
        }
    }

    Ok(Some(end))
}

/// ```not_rust
/// authority   = [ userinfo "@" ] host [ ":" port ]
/// port        = *DIGIT
/// ```
///
/// An empty port is treated as absent.
///
/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-3.2)
pub(crate) fn split_host_port(authority: &str) -> Result<(&str, Option<u16>), UriError> {
    let host_port = match authority.rsplit_once('@') {
        Some((_userinfo, host_port)) => host_port,
        None => authority,
    };

    let (host, port) = if host_port.starts_with('[') {
        // IP-literal
        let Some(end) = host_port.find(']') else {
            return Err(UriError::Incomplete);
        };
        let (host, rest) = host_port.split_at(end + 1);
        match rest.strip_prefix(':') {
            Some(port) => (host, Some(port)),
            None => match rest.chars().next() {
                Some(ch) => return Err(UriError::Char(ch)),
                None => (host, None),
            },
        }
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    let port = match port {
        None | Some("") => None,
        Some(port) => {
            if let Some(ch) = port.chars().find(|ch| !ch.is_ascii_digit()) {
                return Err(UriError::Char(ch));
            }
            Some(port.parse().map_err(|_| UriError::Port)?)
        }
    };

    Ok((host, port))
}
