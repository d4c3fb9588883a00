//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{DiscoverMovieParams, TmdbDiscoverResponse, TmdbGenreList, TmdbMovieDetails};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches the full movie genre catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API answers with a
    /// non-success status, or JSON parsing fails.
    async fn movie_genres(&self) -> Result<TmdbGenreList>;

    /// Fetches details (genres, production countries, ...) of a single movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API answers with a
    /// non-success status, or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails>;

    /// Fetches one page of `discover/movie` results.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API answers with a
    /// non-success status, or JSON parsing fails.
    async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<TmdbDiscoverResponse>;
}
