use axum::{extract::State, Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::Recommendation;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub movie: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "movies": state.data.len(),
        "data_loaded_at": state.data.loaded_at(),
    }))
}

/// Returns the full ordered title list for the client's picker
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.data.titles())
}

/// Returns up to 5 recommendations for the submitted movie
///
/// This is where failure becomes data: an unknown title or an unexpected
/// engine fault is logged and answered with an empty list, so the client
/// renders zero cards instead of an error page.
pub async fn recommend(
    State(state): State<AppState>,
    Form(request): Form<RecommendRequest>,
) -> Json<Vec<Recommendation>> {
    match state.recommender.recommend(&request.movie).await {
        Ok(recommendations) => Json(recommendations),
        Err(AppError::NotFound(_)) => {
            tracing::warn!(movie = %request.movie, "Selected movie not in catalog");
            Json(Vec::new())
        }
        Err(AppError::InvalidInput(msg)) => {
            tracing::warn!(movie = %request.movie, reason = %msg, "Rejected movie selection");
            Json(Vec::new())
        }
        Err(e) => {
            tracing::error!(movie = %request.movie, error = %e, "Recommendation failed");
            Json(Vec::new())
        }
    }
}
