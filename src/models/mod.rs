use serde::{Deserialize, Serialize};

/// One entry of the catalog artifact
///
/// Entries are index-aligned with the rows and columns of the similarity
/// matrix: the entry at position `i` corresponds to matrix row `i`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Display title, also the user-facing lookup key. Uniqueness is not
    /// guaranteed; lookups take the first match.
    pub title: String,
    /// TMDB identifier used to resolve a poster image
    pub movie_id: u64,
}

/// A single display-ready recommendation returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub name: String,
    pub poster: String,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// The subset of TMDB's movie-details response used for poster resolution
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
