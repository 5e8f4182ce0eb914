use super::{Uri, UriError};

/// Default port of `http` and `ws`.
pub const HTTP_PORT: u16 = 80;

/// Default port of `https` and `wss`.
pub const HTTPS_PORT: u16 = 443;

const SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

fn is_supported(scheme: &str) -> bool {
    SCHEMES.iter().any(|ok| ok.eq_ignore_ascii_case(scheme))
}

/// Validate a request URI.
///
/// The scheme must be one of `http`, `https`, `ws` or `wss`, ignoring case, and the path must be
/// absolute. An empty path is normalized to `/`.
///
/// # Errors
///
/// Returns [`UriError::InvalidScheme`] for any other scheme, [`UriError::InvalidPath`] if the URI
/// has no hierarchical path, or a syntax error if `raw` is not a URI.
pub fn validate_request_uri(raw: &str) -> Result<Uri, UriError> {
    let uri = match Uri::parse(raw) {
        Ok(ok) => ok,
        Err(UriError::MissingScheme) => return Err(UriError::InvalidScheme(raw.into())),
        Err(err) => return Err(err),
    };

    if !is_supported(uri.scheme()) {
        return Err(UriError::InvalidScheme(raw.into()));
    }

    let path = uri.path();

    // opaque URI, e.g. `http:example.com`, has no hierarchical path, while with an authority the
    // path is either empty or starts with `/`
    if uri.authority().is_none() && !path.starts_with('/') {
        return Err(UriError::InvalidPath(raw.into()));
    }

    if path.is_empty() {
        let offset = uri.path_offset();
        let mut value = String::from(uri);
        value.insert(offset, '/');
        return Uri::from_string(value);
    }

    Ok(uri)
}

/// Resolve a redirect `location` against the request URI.
///
/// # Errors
///
/// Returns [`UriError::NullLocation`] if `location` is `None`, [`UriError::InvalidScheme`] if the
/// resolved URI is not `http`, `https`, `ws` or `wss`, or a syntax error if `location` is not a
/// URI reference.
pub fn resolve_redirect(base: &Uri, location: Option<&str>) -> Result<Uri, UriError> {
    let Some(location) = location else {
        return Err(UriError::NullLocation(base.to_string()));
    };

    let uri = base.resolve(location)?;

    if !is_supported(uri.scheme()) {
        return Err(UriError::InvalidScheme(uri.into()));
    }

    Ok(uri)
}

/// Returns the explicit port, otherwise [`HTTP_PORT`] for `http` and `ws`, and [`HTTPS_PORT`] for
/// everything else.
pub fn effective_port(uri: &Uri) -> u16 {
    match uri.port() {
        Some(port) => port,
        None => {
            let scheme = uri.scheme();
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("ws") {
                HTTP_PORT
            } else {
                HTTPS_PORT
            }
        }
    }
}

/// Returns `scheme://authority`, with the effective port appended when the URI does not specify
/// one.
pub fn base_url(uri: &Uri) -> String {
    let mut url = String::with_capacity(uri.as_str().len() + 6);
    url.push_str(uri.scheme());
    url.push_str("://");
    push_authority(&mut url, uri);
    url
}

/// Validate `raw` as a request URI, then returns its [`base_url`].
///
/// # Errors
///
/// Returns error if `raw` fails [`validate_request_uri`].
pub fn base_url_of(raw: &str) -> Result<String, UriError> {
    validate_request_uri(raw).map(|uri| base_url(&uri))
}

/// Returns the authority, with the effective port appended when the URI does not specify one.
pub fn authority_with_port(uri: &Uri) -> String {
    let mut authority = String::new();
    push_authority(&mut authority, uri);
    authority
}

/// Returns the host, falling back to the whole authority when the host is empty.
pub fn host(uri: &Uri) -> Option<&str> {
    uri.host()
        .filter(|host| !host.is_empty())
        .or_else(|| uri.authority())
}

fn push_authority(buf: &mut String, uri: &Uri) {
    buf.push_str(uri.authority().unwrap_or_default());
    if uri.port().is_none() {
        buf.push(':');
        buf.push_str(itoa::Buffer::new().format(effective_port(uri)));
    }
}
