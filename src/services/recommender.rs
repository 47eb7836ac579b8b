/// Similarity-based recommendation engine
///
/// Ranks the catalog against a selected movie using its precomputed
/// similarity row and pairs the top results with resolved poster URLs.
use std::cmp::Ordering;
use std::sync::Arc;

use crate::{
    data::MovieData,
    error::{AppError, AppResult},
    models::Recommendation,
    services::poster::PosterProvider,
};

/// Upper bound on results per request
pub const MAX_RECOMMENDATIONS: usize = 5;

pub struct Recommender {
    data: Arc<MovieData>,
    posters: Arc<dyn PosterProvider>,
}

impl Recommender {
    pub fn new(data: Arc<MovieData>, posters: Arc<dyn PosterProvider>) -> Self {
        Self { data, posters }
    }

    /// Returns up to 5 recommendations for the given title, in rank order
    ///
    /// An unknown title yields `AppError::NotFound`; the HTTP layer decides
    /// whether to coerce that into an empty list.
    pub async fn recommend(&self, title: &str) -> AppResult<Vec<Recommendation>> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Selected movie title cannot be empty".to_string(),
            ));
        }

        let index = self
            .data
            .find_index(title)
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' is not in the catalog", title)))?;

        let row = self
            .data
            .similarity_row(index)
            .ok_or_else(|| AppError::Internal(format!("Similarity row {} missing", index)))?;

        let picks = rank_row(index, row);

        // Posters resolve concurrently; one slow or failing lookup must not
        // hold up or poison the others.
        let mut pending = Vec::with_capacity(picks.len());
        for pick in picks {
            let entry = self
                .data
                .entry_at(pick)
                .ok_or_else(|| AppError::Internal(format!("Catalog entry {} missing", pick)))?;

            let name = entry.title.clone();
            let movie_id = entry.movie_id;
            let posters = Arc::clone(&self.posters);
            let task = tokio::spawn(async move { posters.resolve_poster(movie_id).await });
            pending.push((name, task));
        }

        let mut recommendations = Vec::with_capacity(pending.len());
        for (name, task) in pending {
            let poster = match task.await {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!(error = %e, movie = %name, "Poster task failed");
                    self.posters.fallback_poster()
                }
            };
            recommendations.push(Recommendation { name, poster });
        }

        tracing::info!(
            movie = %title,
            results = recommendations.len(),
            "Recommendations assembled"
        );

        Ok(recommendations)
    }
}

/// Ranks a similarity row and returns the top catalog indices
///
/// Scores sort descending with a stable sort, so equal scores keep their
/// original index order. The selected movie is excluded by matching index
/// rather than by assuming the self-entry sorts first, which stays correct
/// even for a row whose self-similarity is not the maximum.
fn rank_row(self_index: usize, row: &[f64]) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    ranked
        .into_iter()
        .map(|(i, _)| i)
        .filter(|&i| i != self_index)
        .take(MAX_RECOMMENDATIONS)
        .collect()
}
