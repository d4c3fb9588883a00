//! CSV export of discovered movies.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use boxscout_api::discover::{EnrichedMovie, FilterCriteria, GrossRange};
use chrono::{DateTime, Local};

/// Header row, matching the serialized field names of `EnrichedMovie`.
const HEADER: [&str; 9] = [
    "Title",
    "Release Year",
    "Release Month",
    "Revenue (USD)",
    "Genres",
    "IMDb Rating",
    "Overview",
    "Production Countries",
    "Release Type",
];

/// Builds the export file name from the filters and a timestamp.
///
/// `filtered_movie_data_{genre}_{sy}-{sm}_{ey}-{em}_{countries}_{min}-{max}_{YYYYmmdd_HHMMSS}.csv`
///
/// Genre and country labels are reduced to a single path component.
#[must_use]
pub fn output_filename(criteria: &FilterCriteria, now: DateTime<Local>) -> String {
    let start = criteria.start();
    let end = criteria.end();
    let gross = criteria.gross();
    format!(
        "filtered_movie_data_{}_{}-{}_{}-{}_{}_{}-{}_{}.csv",
        path_component(criteria.genre().label()),
        start.year(),
        start.month(),
        end.year(),
        end.month(),
        path_component(&criteria.countries().join("_")),
        GrossRange::bound_label(gross.min),
        GrossRange::bound_label(gross.max),
        now.format("%Y%m%d_%H%M%S"),
    )
}

/// Replaces path separators, characters rejected by common filesystems and
/// control characters with `-`.
fn path_component(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// Writes `movies` as CSV to `path`, header first, in the given order.
///
/// The file must not exist yet.
///
/// # Errors
///
/// Returns an error if the file already exists or cannot be created or written.
pub fn write_movies(movies: &[EnrichedMovie], path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(HEADER)
        .with_context(|| format!("failed to write header to {}", path.display()))?;
    for movie in movies {
        writer
            .serialize(movie)
            .with_context(|| format!("failed to write '{}' to {}", movie.title, path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    tracing::info!("Saved {} movies to {}", movies.len(), path.display());
    Ok(())
}
