//! Lightweight URL handling for browsing events.
//!
//! Not a full URL parser. The domain and path come from stripping the scheme
//! text and splitting on the first slash, and the heuristics are defined over
//! exactly that split.

/// `(domain, first path segment)` for a valid URL, e.g.
/// `https://en.wikipedia.org/wiki/Rust` → `("en.wikipedia.org", "/wiki")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainPath {
    pub domain: String,
    pub base_path: String,
}

/// `^https?://\S+$`, scheme matched case-insensitively.
///
/// A single trailing `\n` is tolerated, as a `$`-anchored regex allows.
pub fn is_valid_url(url: &str) -> bool {
    let rest = match strip_scheme_ci(url) {
        Some(rest) => rest,
        None => return false,
    };
    let rest = rest.strip_suffix('\n').unwrap_or(rest);
    !rest.is_empty() && !rest.chars().any(is_space)
}

fn strip_scheme_ci(url: &str) -> Option<&str> {
    for scheme in ["https://", "http://"] {
        if let Some(prefix) = url.get(..scheme.len()) {
            if prefix.eq_ignore_ascii_case(scheme) {
                return url.get(scheme.len()..);
            }
        }
    }
    None
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Split a URL into `(domain, path)`. The path always starts with `/`.
///
/// Every occurrence of `https://` and then `http://` is removed, not only the
/// leading one.
pub fn parse_domain_and_path(url: &str) -> (String, String) {
    let stripped = url.replace("https://", "").replace("http://", "");
    match stripped.split_once('/') {
        Some((domain, path)) => (domain.to_string(), format!("/{path}")),
        None => (stripped, "/".to_string()),
    }
}

/// First segment of a path: `/wiki/Rust` → `/wiki`, `/` → `/`.
pub fn base_path(path: &str) -> String {
    let first = path.trim_matches('/').split('/').next().unwrap_or("");
    if first.is_empty() {
        "/".to_string()
    } else {
        format!("/{first}")
    }
}

/// Domain and first path segment for a valid URL, `None` otherwise.
pub fn domain_path(url: &str) -> Option<DomainPath> {
    if !is_valid_url(url) {
        return None;
    }
    let (domain, path) = parse_domain_and_path(url);
    Some(DomainPath {
        domain,
        base_path: base_path(&path),
    })
}
