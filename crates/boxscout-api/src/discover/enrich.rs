//! Per-movie enrichment from `movie/{id}`.
//!
//! Each lookup issues its own request and degrades to a placeholder on
//! failure instead of returning an error.

use tracing::instrument;

use crate::tmdb::LocalTmdbApi;

/// Genres placeholder used when the details request fails.
pub const UNKNOWN_GENRES: &str = "Unknown";

/// Returns the movie's genre names joined with `", "` in API order.
///
/// Falls back to [`UNKNOWN_GENRES`] when the request fails.
#[instrument(skip(api))]
pub async fn genres_for(api: &(impl LocalTmdbApi + Sync), movie_id: u64) -> String {
    match api.movie_details(movie_id).await {
        Ok(details) => details
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "failed to fetch movie genres");
            String::from(UNKNOWN_GENRES)
        }
    }
}

/// Returns the movie's production country names in API order.
///
/// Falls back to an empty list when the request fails.
#[instrument(skip(api))]
pub async fn production_countries_for(
    api: &(impl LocalTmdbApi + Sync),
    movie_id: u64,
) -> Vec<String> {
    match api.movie_details(movie_id).await {
        Ok(details) => details
            .production_countries
            .into_iter()
            .map(|c| c.name)
            .collect(),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "failed to fetch production countries");
            Vec::new()
        }
    }
}
