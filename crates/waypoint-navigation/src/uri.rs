//! Base-URI arithmetic

use url::Url;

use crate::error::NavigationError;
use crate::Result;

/// The base URI up to and including its last `/`.
///
/// `https://app.example/sub/index.html` becomes `https://app.example/sub/`.
pub fn base_prefix(base_uri: &str) -> &str {
    match base_uri.rfind('/') {
        Some(idx) => &base_uri[..=idx],
        None => base_uri,
    }
}

/// The part of `uri` that follows the base prefix, if `uri` lies under it.
///
/// The base itself without its trailing slash counts as inside the base,
/// optionally followed by a query or fragment.
pub fn relative_to_base(base_uri: &str, uri: &str) -> Option<String> {
    let prefix = base_prefix(base_uri);
    if let Some(rest) = uri.strip_prefix(prefix) {
        return Some(rest.to_string());
    }

    let bare = prefix.strip_suffix('/')?;
    let rest = uri.strip_prefix(bare)?;
    if rest.is_empty() {
        return Some(String::new());
    }
    if rest.starts_with('?') || rest.starts_with('#') {
        return Some(rest.to_string());
    }

    None
}

/// Resolve `relative` against `base_uri` the way a browser resolves an href.
pub(crate) fn resolve(base_uri: &str, relative: &str) -> Result<Url> {
    let base = Url::parse(base_uri).map_err(|e| NavigationError::InvalidUri {
        uri: base_uri.to_string(),
        reason: e.to_string(),
    })?;

    base.join(relative).map_err(|e| NavigationError::InvalidUri {
        uri: relative.to_string(),
        reason: e.to_string(),
    })
}
