use reqwest::Url;

use crate::error::UpstreamError;

/// Parses a provider base URL, forcing exactly one trailing slash so that
/// relative paths join underneath it instead of replacing its last segment.
///
/// # Errors
///
/// Returns [`UpstreamError::InvalidBaseUrl`] if the string is not a URL.
pub fn parse_base_url(raw: &str) -> Result<Url, UpstreamError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| UpstreamError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Joins `path` onto `base` and appends `params` as a query string.
///
/// # Errors
///
/// Returns [`UpstreamError::InvalidBaseUrl`] if `path` cannot be joined.
pub fn build_url(base: &Url, path: &str, params: &[(&str, &str)]) -> Result<Url, UpstreamError> {
    let mut url = base.join(path).map_err(|e| UpstreamError::InvalidBaseUrl {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

/// Rounds a coordinate to `places` decimals. Nearby requests collapse onto
/// the same cache entry and the same upstream query.
#[must_use]
pub fn round_coordinate(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
