//! TMDB client and movie discovery pipeline for boxscout.
//!
//! The `tmdb` module talks to the TMDB v3 API; the `discover` module drives
//! paginated discovery, per-movie enrichment, filtering and deduplication.

/// Movie discovery pipeline.
pub mod discover;

/// TMDB API client.
pub mod tmdb;
