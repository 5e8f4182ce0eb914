use super::{Uri, UriError, parser::Reference};

impl Uri {
    /// Resolve a URI reference against `self` as the base URI.
    ///
    /// # Errors
    ///
    /// Returns error if `reference` is not a valid URI reference.
    ///
    /// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.2)
    pub fn resolve(&self, reference: &str) -> Result<Uri, UriError> {
        let base = self.as_reference();
        let r = Reference::parse(reference)?;

        let path;
        let target = if r.scheme.is_some() {
            path = remove_dot_segments(r.path);
            Reference { path: &path, ..r }
        } else if r.authority.is_some() {
            path = remove_dot_segments(r.path);
            Reference {
                scheme: base.scheme,
                path: &path,
                ..r
            }
        } else if r.path.is_empty() {
            Reference {
                scheme: base.scheme,
                authority: base.authority,
                path: base.path,
                query: r.query.or(base.query),
                fragment: r.fragment,
            }
        } else {
            path = if r.path.starts_with('/') {
                remove_dot_segments(r.path)
            } else {
                remove_dot_segments(&merge(&base, r.path))
            };
            Reference {
                scheme: base.scheme,
                authority: base.authority,
                path: &path,
                query: r.query,
                fragment: r.fragment,
            }
        };

        Uri::from_string(target.recompose())
    }
}

/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.3)
fn merge(base: &Reference, path: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        return format!("/{path}");
    }
    match base.path.rfind('/') {
        Some(end) => format!("{}{path}", &base.path[..=end]),
        None => path.to_owned(),
    }
}

/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.4)
pub(crate) fn remove_dot_segments(mut input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") || input == "/.." {
            input = if input.len() == 3 { "/" } else { &input[3..] };
            pop_segment(&mut output);
        } else if input == "." || input == ".." {
            input = "";
        } else {
            // move the first path segment, including its leading `/`, to output
            let start = usize::from(input.starts_with('/'));
            let end = input[start..].find('/').map_or(input.len(), |n| n + start);
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }

    output
}

fn pop_segment(output: &mut String) {
    match output.rfind('/') {
        Some(n) => output.truncate(n),
        None => output.clear(),
    }
}

#[cfg(test)]
mod test {
    use super::remove_dot_segments;

    #[test]
    fn test_remove_dot_segments() {
        assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
        assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
        assert_eq!(remove_dot_segments("/../x"), "/x");
        assert_eq!(remove_dot_segments("/a/.."), "/");
        assert_eq!(remove_dot_segments("/a/b/."), "/a/b/");
        assert_eq!(remove_dot_segments(""), "");
    }
}
