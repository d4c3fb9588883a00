//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints used for discovery:
//! the movie genre catalog, movie details and `discover/movie`.

mod api;
mod client;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{Credential, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DiscoverMovieParams, TmdbDiscoverMovie, TmdbDiscoverResponse, TmdbGenre, TmdbGenreList,
    TmdbMovieDetails, TmdbProductionCountry,
};
