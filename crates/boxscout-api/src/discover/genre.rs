//! Genre name resolution.

use tracing::instrument;

use super::criteria::GenreFilter;
use crate::tmdb::LocalTmdbApi;

/// Outcome of resolving the requested genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreResolution {
    /// The user asked for all genres; no lookup was made.
    AllGenres,
    /// The genre name matched this TMDB genre ID.
    Resolved(u32),
    /// The catalog could not be fetched or had no matching name.
    /// Discovery proceeds without a genre filter.
    Unresolved,
}

impl GenreResolution {
    /// Genre ID to filter by, if any.
    #[must_use]
    pub const fn genre_id(self) -> Option<u32> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::AllGenres | Self::Unresolved => None,
        }
    }
}

/// Resolves the requested genre to a TMDB genre ID.
///
/// Makes at most one catalog request. Catalog failures are logged and
/// reported as `Unresolved`, never as an error.
#[instrument(skip_all)]
pub async fn resolve_genre(
    api: &(impl LocalTmdbApi + Sync),
    filter: &GenreFilter,
) -> GenreResolution {
    let GenreFilter::Named(name) = filter else {
        return GenreResolution::AllGenres;
    };

    let catalog = match api.movie_genres().await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(
                genre = %name,
                error = %format!("{e:#}"),
                "failed to fetch genre catalog, continuing without genre filter"
            );
            return GenreResolution::Unresolved;
        }
    };

    let wanted = name.to_lowercase();
    if let Some(found) = catalog
        .genres
        .iter()
        .find(|g| g.name.to_lowercase() == wanted)
    {
        tracing::info!(genre = %found.name, id = found.id, "Resolved genre");
        GenreResolution::Resolved(found.id)
    } else {
        tracing::warn!(
            genre = %name,
            "genre not found in catalog, continuing without genre filter"
        );
        GenreResolution::Unresolved
    }
}
