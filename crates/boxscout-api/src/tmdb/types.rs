//! TMDB API response types and discover parameters.

use serde::Deserialize;

/// `discover/movie` sort order used for discovery.
const SORT_BY_REVENUE_DESC: &str = "revenue.desc";

// --- Genre List ---

/// Response from `genre/movie/list` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbGenreList {
    /// Genre catalog.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Movie Details ---

/// Response from `movie/{movie_id}` endpoint.
///
/// Only the fields used for enrichment are decoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Genres in API order.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Production countries in API order.
    #[serde(default)]
    pub production_countries: Vec<TmdbProductionCountry>,
}

/// Production country entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbProductionCountry {
    /// ISO 3166-1 code.
    #[serde(default)]
    pub iso_3166_1: String,
    /// English country name (e.g., "United States of America").
    pub name: String,
}

// --- Discover Movie ---

/// Response from `discover/movie` endpoint.
///
/// `results` and `total_pages` stay optional: a body without `results`
/// marks the end of the data rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbDiscoverResponse {
    /// Current page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Candidate movies on this page.
    #[serde(default)]
    pub results: Option<Vec<TmdbDiscoverMovie>>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Total number of results.
    #[serde(default)]
    pub total_results: Option<u32>,
}

/// A single candidate from a discover page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbDiscoverMovie {
    /// TMDB movie ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Release date (YYYY-MM-DD, possibly empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Box office revenue (USD).
    #[serde(default)]
    pub revenue: Option<u64>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

// --- Discover Parameters ---

/// Parameters for `discover/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Sort order (default: "revenue.desc").
    pub sort_by: String,
    /// Lower bound of the primary release date (YYYY-MM-DD).
    pub release_date_gte: Option<String>,
    /// Upper bound of the primary release date (YYYY-MM-DD).
    pub release_date_lte: Option<String>,
    /// Release type filter (e.g., "3|2").
    pub with_release_type: Option<String>,
    /// Genre ID filter.
    pub with_genres: Option<u32>,
    /// Result page (1-based).
    pub page: u32,
}

impl Default for DiscoverMovieParams {
    fn default() -> Self {
        Self {
            sort_by: String::from(SORT_BY_REVENUE_DESC),
            release_date_gte: None,
            release_date_lte: None,
            with_release_type: None,
            with_genres: None,
            page: 1,
        }
    }
}

impl DiscoverMovieParams {
    /// Sets the primary release date window.
    #[must_use]
    pub fn release_dates(mut self, gte: impl Into<String>, lte: impl Into<String>) -> Self {
        self.release_date_gte = Some(gte.into());
        self.release_date_lte = Some(lte.into());
        self
    }

    /// Sets the release type filter.
    #[must_use]
    pub fn with_release_type(mut self, release_type: impl Into<String>) -> Self {
        self.with_release_type = Some(release_type.into());
        self
    }

    /// Sets the genre filter.
    #[must_use]
    pub const fn with_genres(mut self, genre_id: u32) -> Self {
        self.with_genres = Some(genre_id);
        self
    }

    /// Sets the page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Converts the parameters into query pairs.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = vec![("sort_by", self.sort_by.clone())];
        if let Some(ref gte) = self.release_date_gte {
            query.push(("primary_release_date.gte", gte.clone()));
        }
        if let Some(ref lte) = self.release_date_lte {
            query.push(("primary_release_date.lte", lte.clone()));
        }
        if let Some(ref release_type) = self.with_release_type {
            query.push(("with_release_type", release_type.clone()));
        }
        query.push(("page", self.page.to_string()));
        if let Some(genre_id) = self.with_genres {
            query.push(("with_genres", genre_id.to_string()));
        }
        query
    }
}
