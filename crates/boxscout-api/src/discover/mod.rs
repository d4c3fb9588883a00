//! Movie discovery: criteria, genre resolution, filtering and enrichment.
//!
//! [`discover_movies`] drives the whole run against any [`LocalTmdbApi`]
//! implementation and never fails; partial results are returned together
//! with the reason the page loop ended.
//!
//! [`LocalTmdbApi`]: crate::tmdb::LocalTmdbApi

mod countries;
mod criteria;
mod enrich;
mod genre;
#[cfg(test)]
mod mock;
mod pipeline;

pub use countries::{normalize_countries, normalize_country, parse_countries};
pub use criteria::{FilterCriteria, GenreFilter, GrossRange, ReleaseType, YearMonth};
pub use enrich::{UNKNOWN_GENRES, genres_for, production_countries_for};
pub use genre::{GenreResolution, resolve_genre};
pub use pipeline::{
    DiscoveryOutcome, EnrichedMovie, PagePolicy, SkipReason, SkippedCandidate, StopReason,
    discover_movies,
};
