//! Credentials and endpoint overrides from the environment.

use anyhow::{Context, Result, bail};
use boxscout_api::tmdb::Credential;
use url::Url;

/// v3 API key, sent as a query parameter.
const API_KEY_VAR: &str = "TMDB_API_KEY";
/// v4 read access token, sent as a bearer token.
const API_TOKEN_VAR: &str = "TMDB_API_TOKEN";
/// Base URL override.
const BASE_URL_VAR: &str = "TMDB_BASE_URL";

/// Reads the TMDB credential from `TMDB_API_KEY` or `TMDB_API_TOKEN`.
///
/// The API key wins when both are set.
///
/// # Errors
///
/// Returns an error if neither variable holds a non-empty value.
pub fn credential_from_env() -> Result<Credential> {
    credential_from(
        std::env::var(API_KEY_VAR).ok(),
        std::env::var(API_TOKEN_VAR).ok(),
    )
}

fn credential_from(api_key: Option<String>, api_token: Option<String>) -> Result<Credential> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    if let Some(key) = non_empty(api_key) {
        return Ok(Credential::ApiKey(key));
    }
    if let Some(token) = non_empty(api_token) {
        return Ok(Credential::BearerToken(token));
    }
    bail!("{API_KEY_VAR} (or {API_TOKEN_VAR}) environment variable is required")
}

/// Resolves the API base URL: `TMDB_BASE_URL` first, then the config value.
///
/// Returns `None` when neither is set, leaving the client default in place.
///
/// # Errors
///
/// Returns an error if the chosen value is not a valid URL.
pub fn resolve_base_url(configured: Option<&str>) -> Result<Option<Url>> {
    let from_env = std::env::var(BASE_URL_VAR).ok();
    from_env
        .as_deref()
        .or(configured)
        .filter(|raw| !raw.trim().is_empty())
        .map(parse_base_url)
        .transpose()
}

/// Parses a base URL, appending the trailing slash `Url::join` needs to
/// keep the last path segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        String::from(trimmed)
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).with_context(|| format!("invalid TMDB base URL: {trimmed}"))
}
