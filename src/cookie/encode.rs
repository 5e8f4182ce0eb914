use super::Cookie;
use super::quote::write_pair;

/// Encode cookies into a `Cookie` request header value.
///
/// ```not_rust
/// cookie      = [ "$Version=1;" ] NAME "=" VALUE ";" [ "$Path=" path ";" ]
///               [ "$Domain=" domain ";" ] [ "$Port=" <"> portlist <"> ";" ]
/// ```
///
/// Values containing separators are quoted, the trailing `;` of the last cookie is removed.
/// Version and port are only written for cookies with version 1 or above.
///
/// [source](https://datatracker.ietf.org/doc/html/rfc2109#section-4.3.4)
pub fn encode<'a, I>(cookies: I) -> String
where
    I: IntoIterator<Item = &'a Cookie>,
{
    let mut buf = String::new();
    let mut itoa = itoa::Buffer::new();

    for cookie in cookies {
        let versioned = cookie.version >= 1;

        if versioned {
            buf.push_str("$Version=1;");
        }

        write_pair(&mut buf, &cookie.name, cookie.value.as_deref());

        if let Some(path) = &cookie.path {
            write_pair(&mut buf, "$Path", Some(path));
        }

        if let Some(domain) = &cookie.domain {
            write_pair(&mut buf, "$Domain", Some(domain));
        }

        if versioned && !cookie.ports.is_empty() {
            buf.push_str("$Port=\"");
            for (i, port) in cookie.ports.iter().enumerate() {
                if i != 0 {
                    buf.push(',');
                }
                buf.push_str(itoa.format(*port));
            }
            buf.push_str("\";");
        }
    }

    buf.pop();
    buf
}
