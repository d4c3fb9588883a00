//! Paginated discovery with filtering, deduplication and enrichment.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;
use tracing::instrument;

use super::countries::{matches_any_country, normalize_countries};
use super::criteria::{FilterCriteria, ReleaseType};
use super::enrich::{genres_for, production_countries_for};
use super::genre::{GenreResolution, resolve_genre};
use crate::tmdb::{DiscoverMovieParams, LocalTmdbApi, TmdbDiscoverMovie, TmdbDiscoverResponse};

/// Default pause between two page fetches.
const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Default backoff unit between retries of a failed page.
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Leading `YYYY-MM` of a TMDB release date.
#[allow(clippy::expect_used)]
static RELEASE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})").expect("failed to compile release date regex")
});

/// Pacing and retry policy for page fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePolicy {
    /// Pause between two page fetches.
    pub page_delay: Duration,
    /// Retries of a failed page fetch before discovery stops (0 = none).
    pub page_retries: u32,
    /// Backoff unit; retry `n` waits `n * retry_backoff`.
    pub retry_backoff: Duration,
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self {
            page_delay: DEFAULT_PAGE_DELAY,
            page_retries: 0,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

/// A discovered movie, as exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedMovie {
    /// Movie title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year (0 when unknown).
    #[serde(rename = "Release Year")]
    pub release_year: u32,
    /// Release month (0 when unknown).
    #[serde(rename = "Release Month")]
    pub release_month: u32,
    /// Box office revenue (USD).
    #[serde(rename = "Revenue (USD)")]
    pub revenue_usd: u64,
    /// Genre names joined with `", "`.
    #[serde(rename = "Genres")]
    pub genres: String,
    /// TMDB vote average.
    #[serde(rename = "IMDb Rating")]
    pub imdb_rating: Option<f64>,
    /// Overview text.
    #[serde(rename = "Overview")]
    pub overview: Option<String>,
    /// Production country names joined with `", "`.
    #[serde(rename = "Production Countries")]
    pub production_countries: String,
    /// Release type the discovery was filtered by.
    #[serde(rename = "Release Type")]
    pub release_type: ReleaseType,
}

/// Why a candidate was not added to the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Release month outside the requested window.
    OutOfDateRange,
    /// Candidate has no TMDB ID.
    MissingId,
    /// No production country matches the requested countries.
    CountryMismatch,
    /// A movie with the same title and release year was already accepted.
    Duplicate,
    /// Revenue outside the requested bounds.
    GrossOutOfRange,
}

/// A candidate rejected during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCandidate {
    /// Candidate title.
    pub title: String,
    /// Candidate release year (0 when unknown).
    pub release_year: u32,
    /// Rejection reason.
    pub reason: SkipReason,
}

/// Why the page loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last reported page was processed.
    Exhausted {
        /// Page count reported by the API.
        total_pages: u32,
    },
    /// Fetching this page failed; earlier pages were kept.
    PageFailed {
        /// The page that failed.
        page: u32,
    },
    /// The page response had no `results` key.
    NoResults {
        /// The page without results.
        page: u32,
    },
}

/// Result of one discovery run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryOutcome {
    /// Accepted movies in discovery order.
    pub movies: Vec<EnrichedMovie>,
    /// Rejected candidates in discovery order.
    pub skipped: Vec<SkippedCandidate>,
    /// Number of pages fetched successfully.
    pub pages_fetched: u32,
    /// Why the page loop ended.
    pub stop: StopReason,
    /// How the requested genre was resolved.
    pub genre: GenreResolution,
}

/// (title, release year) identity used for deduplication.
type SeenKey = (String, u32);

/// Verdict on one candidate.
enum Verdict {
    Accepted(EnrichedMovie),
    Skipped(SkippedCandidate),
}

/// Runs discovery for `criteria`.
///
/// Resolves the genre once, walks `discover/movie` pages sorted by revenue
/// and keeps candidates inside the release window that were produced in
/// one of the requested countries, have not been seen yet, and fall
/// within the revenue bounds.
///
/// Never fails: a failed page ends discovery with what has been collected
/// so far, and failed enrichment lookups degrade to placeholders.
#[instrument(skip_all)]
pub async fn discover_movies(
    api: &(impl LocalTmdbApi + Sync),
    criteria: &FilterCriteria,
    policy: &PagePolicy,
) -> DiscoveryOutcome {
    let countries = normalize_countries(criteria.countries());
    let genre = resolve_genre(api, criteria.genre()).await;
    let base_params = base_params(criteria, genre);

    let mut movies: Vec<EnrichedMovie> = Vec::new();
    let mut skipped: Vec<SkippedCandidate> = Vec::new();
    let mut seen: HashSet<SeenKey> = HashSet::new();
    let mut pages_fetched: u32 = 0;
    let mut page: u32 = 1;

    let stop = loop {
        tracing::info!(
            page,
            countries = %countries.join(", "),
            release_type = %criteria.release_type(),
            "Fetching discover page"
        );

        let params = base_params.clone().page(page);
        let Some(response) = fetch_page(api, &params, policy).await else {
            break StopReason::PageFailed { page };
        };
        pages_fetched = pages_fetched.saturating_add(1);

        let TmdbDiscoverResponse {
            results,
            total_pages,
            ..
        } = response;
        let Some(results) = results else {
            tracing::info!(page, "page has no results, stopping");
            break StopReason::NoResults { page };
        };

        for candidate in &results {
            match evaluate(api, criteria, &countries, candidate, &mut seen).await {
                Verdict::Accepted(movie) => {
                    tracing::debug!(title = %movie.title, year = movie.release_year, "accepted");
                    movies.push(movie);
                }
                Verdict::Skipped(skip) => {
                    tracing::info!(
                        title = %skip.title,
                        year = skip.release_year,
                        reason = ?skip.reason,
                        "Skipping candidate"
                    );
                    skipped.push(skip);
                }
            }
        }

        tracing::info!(page, collected = movies.len(), "Page processed");

        let total_pages = total_pages.unwrap_or(1);
        if page >= total_pages {
            break StopReason::Exhausted { total_pages };
        }
        let Some(next) = page.checked_add(1) else {
            break StopReason::Exhausted { total_pages };
        };
        page = next;
        tokio::time::sleep(policy.page_delay).await;
    };

    tracing::info!(
        total = movies.len(),
        skipped = skipped.len(),
        pages = pages_fetched,
        stop = ?stop,
        "Discovery completed"
    );

    DiscoveryOutcome {
        movies,
        skipped,
        pages_fetched,
        stop,
        genre,
    }
}

/// Builds the page-independent part of the discover query.
fn base_params(criteria: &FilterCriteria, genre: GenreResolution) -> DiscoverMovieParams {
    let mut params = DiscoverMovieParams::default()
        .release_dates(criteria.start().first_day(), criteria.end().last_day());
    if let Some(release_type) = criteria.release_type().api_filter() {
        params = params.with_release_type(release_type);
    }
    if let Some(genre_id) = genre.genre_id() {
        params = params.with_genres(genre_id);
    }
    params
}

/// Fetches one page, retrying per `policy`. Returns `None` once retries are exhausted.
async fn fetch_page(
    api: &(impl LocalTmdbApi + Sync),
    params: &DiscoverMovieParams,
    policy: &PagePolicy,
) -> Option<TmdbDiscoverResponse> {
    let mut attempt: u32 = 0;
    loop {
        match api.discover_movies(params).await {
            Ok(response) => return Some(response),
            Err(e) if attempt < policy.page_retries => {
                attempt = attempt.saturating_add(1);
                let backoff = policy.retry_backoff.saturating_mul(attempt);
                tracing::warn!(
                    page = params.page,
                    retry = attempt,
                    max_retries = policy.page_retries,
                    backoff_ms = backoff.as_millis(),
                    error = %format!("{e:#}"),
                    "discover page failed, retrying after backoff"
                );
                tokio::time::sleep(backoff).await;
            }
            Err(e) => {
                tracing::warn!(
                    page = params.page,
                    error = %format!("{e:#}"),
                    "discover page failed, stopping with collected results"
                );
                return None;
            }
        }
    }
}

/// Applies every filter to one candidate, enriching it when accepted.
async fn evaluate(
    api: &(impl LocalTmdbApi + Sync),
    criteria: &FilterCriteria,
    countries: &[String],
    candidate: &TmdbDiscoverMovie,
    seen: &mut HashSet<SeenKey>,
) -> Verdict {
    let title = candidate.title.clone().unwrap_or_default();
    let (release_year, release_month) = candidate
        .release_date
        .as_deref()
        .map_or((0, 0), parse_release_month);
    let skip = |reason| {
        Verdict::Skipped(SkippedCandidate {
            title: title.clone(),
            release_year,
            reason,
        })
    };

    if !criteria.covers(release_year, release_month) {
        return skip(SkipReason::OutOfDateRange);
    }
    let Some(movie_id) = candidate.id else {
        return skip(SkipReason::MissingId);
    };

    let production_countries = production_countries_for(api, movie_id).await;
    tracing::debug!(
        title = %title,
        year = release_year,
        month = release_month,
        countries = ?production_countries,
        "candidate production countries"
    );

    if !matches_any_country(countries, &production_countries) {
        return skip(SkipReason::CountryMismatch);
    }
    let key: SeenKey = (title.clone(), release_year);
    if seen.contains(&key) {
        return skip(SkipReason::Duplicate);
    }

    let revenue = candidate.revenue.unwrap_or(0);
    if !criteria.gross().contains(revenue) {
        return skip(SkipReason::GrossOutOfRange);
    }

    let genres = genres_for(api, movie_id).await;
    seen.insert(key);

    Verdict::Accepted(EnrichedMovie {
        title,
        release_year,
        release_month,
        revenue_usd: revenue,
        genres,
        imdb_rating: candidate.vote_average,
        overview: candidate.overview.clone(),
        production_countries: production_countries.join(", "),
        release_type: criteria.release_type(),
    })
}

/// Extracts (year, month) from a `YYYY-MM-DD` date; (0, 0) when absent or malformed.
fn parse_release_month(date: &str) -> (u32, u32) {
    RELEASE_DATE_RE
        .captures(date)
        .and_then(|caps| {
            let year = caps.get(1)?.as_str().parse().ok()?;
            let month = caps.get(2)?.as_str().parse().ok()?;
            Some((year, month))
        })
        .unwrap_or((0, 0))
}
