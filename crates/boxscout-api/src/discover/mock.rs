//! In-memory `LocalTmdbApi` used by the discovery tests.
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{Result, anyhow, bail};

use crate::tmdb::{
    DiscoverMovieParams, LocalTmdbApi, TmdbDiscoverMovie, TmdbDiscoverResponse, TmdbGenre,
    TmdbGenreList, TmdbMovieDetails, TmdbProductionCountry,
};

/// Mock API serving canned genres, pages and movie details.
///
/// `pages[i]` answers page `i + 1`; `None` simulates an HTTP failure.
/// Pages beyond the list fail as well.
pub struct MockTmdbApi {
    pub genres: Option<Vec<TmdbGenre>>,
    pub pages: Vec<Option<TmdbDiscoverResponse>>,
    pub details: HashMap<u64, TmdbMovieDetails>,
    pub genre_calls: AtomicU32,
    pub discover_calls: AtomicU32,
    pub details_calls: AtomicU32,
    pub requested: Mutex<Vec<DiscoverMovieParams>>,
}

impl MockTmdbApi {
    pub fn new() -> Self {
        Self {
            genres: Some(vec![
                genre(28, "Action"),
                genre(35, "Comedy"),
                genre(18, "Drama"),
            ]),
            pages: Vec::new(),
            details: HashMap::new(),
            genre_calls: AtomicU32::new(0),
            discover_calls: AtomicU32::new(0),
            details_calls: AtomicU32::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, results: Vec<TmdbDiscoverMovie>, total_pages: u32) -> Self {
        let page = u32::try_from(self.pages.len()).unwrap() + 1;
        self.pages.push(Some(TmdbDiscoverResponse {
            page: Some(page),
            results: Some(results),
            total_pages: Some(total_pages),
            total_results: None,
        }));
        self
    }

    pub fn with_failed_page(mut self) -> Self {
        self.pages.push(None);
        self
    }

    pub fn with_details(mut self, id: u64, genres: &[&str], countries: &[&str]) -> Self {
        self.details.insert(
            id,
            TmdbMovieDetails {
                id,
                title: None,
                genres: genres
                    .iter()
                    .zip(1..)
                    .map(|(name, gid)| genre(gid, name))
                    .collect(),
                production_countries: countries
                    .iter()
                    .map(|name| TmdbProductionCountry {
                        iso_3166_1: String::new(),
                        name: String::from(*name),
                    })
                    .collect(),
            },
        );
        self
    }

    pub fn discover_count(&self) -> u32 {
        self.discover_calls.load(Ordering::SeqCst)
    }

    pub fn details_count(&self) -> u32 {
        self.details_calls.load(Ordering::SeqCst)
    }

    pub fn genre_count(&self) -> u32 {
        self.genre_calls.load(Ordering::SeqCst)
    }
}

impl LocalTmdbApi for MockTmdbApi {
    async fn movie_genres(&self) -> Result<TmdbGenreList> {
        self.genre_calls.fetch_add(1, Ordering::SeqCst);
        self.genres
            .clone()
            .map(|genres| TmdbGenreList { genres })
            .ok_or_else(|| anyhow!("TMDB API error (HTTP 503 Service Unavailable): down"))
    }

    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        match self.details.get(&movie_id) {
            Some(details) => Ok(details.clone()),
            None => bail!("TMDB API error (HTTP 404 Not Found): movie {movie_id}"),
        }
    }

    async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<TmdbDiscoverResponse> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(params.clone());
        #[allow(clippy::as_conversions)]
        let idx = params.page.saturating_sub(1) as usize;
        match self.pages.get(idx) {
            Some(Some(page)) => Ok(page.clone()),
            _ => bail!("TMDB API error (HTTP 500 Internal Server Error): page {}", params.page),
        }
    }
}

pub fn genre(id: u32, name: &str) -> TmdbGenre {
    TmdbGenre {
        id,
        name: String::from(name),
    }
}

/// Builds a discover candidate.
pub fn candidate(id: u64, title: &str, release_date: &str, revenue: u64) -> TmdbDiscoverMovie {
    TmdbDiscoverMovie {
        id: Some(id),
        title: Some(String::from(title)),
        release_date: Some(String::from(release_date)),
        revenue: Some(revenue),
        vote_average: Some(7.0),
        overview: Some(format!("Overview of {title}")),
    }
}
