//! URL resolution and origin comparison helpers.

/// Resolves `href` against `base`, returning an absolute URL string.
///
/// Returns `None` when either part cannot be parsed; callers treat an
/// unresolvable link as a non-candidate rather than an error.
#[must_use]
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    let base = reqwest::Url::parse(base).ok()?;
    let joined = base.join(href).ok()?;
    Some(joined.to_string())
}

/// True when both URLs parse and share an origin (scheme + host + port).
#[must_use]
pub fn same_origin(a: &str, b: &str) -> bool {
    match (reqwest::Url::parse(a), reqwest::Url::parse(b)) {
        (Ok(a), Ok(b)) => a.origin() == b.origin(),
        _ => false,
    }
}
