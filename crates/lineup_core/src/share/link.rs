use crate::models::GameMode;

/// Query parameter carrying the share code.
pub const SHARE_PARAM: &str = "d";

/// Fragment prefixes written by older builds (`#f=<code>`, `#formation=<code>`).
pub const LEGACY_FRAGMENT_PREFIXES: [&str; 2] = ["f=", "formation="];

/// `<base>/<mode page>?<param>=<code>`
pub fn build_share_url(base: &str, mode: GameMode, param: &str, code: &str) -> String {
    format!("{}/{}?{}={}", base.trim_end_matches('/'), mode.page(), param, code)
}

/// Pull a share code out of a location string.
///
/// Checks the legacy fragment forms first, then the query parameter. A bare
/// string with no URL structure is taken as the code itself. Returns `None`
/// when the location carries no code.
pub fn extract_share_code(location: &str, param: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }

    let (rest, fragment) = match location.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (location, None),
    };

    if let Some(fragment) = fragment {
        for prefix in LEGACY_FRAGMENT_PREFIXES {
            if let Some(code) = fragment.strip_prefix(prefix) {
                return non_empty(code);
            }
        }
    }

    if let Some((_, query)) = rest.split_once('?') {
        return query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == param)
            .and_then(|(_, value)| non_empty(value));
    }

    let looks_like_url = location.contains("://") || (location.contains('/') && location.contains('.'));
    if looks_like_url || fragment.is_some() {
        return None;
    }
    non_empty(location)
}

fn non_empty(code: &str) -> Option<String> {
    let code = code.trim();
    (!code.is_empty()).then(|| code.to_string())
}
