/// TMDB poster resolution
///
/// Poster lookup is best-effort: the resolver always produces a usable URL
/// and never surfaces an error to the recommendation path. Any failure
/// (network, bad status, missing `poster_path`, malformed body) degrades to
/// the configured placeholder image.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::MovieDetails,
};

const TMDB_LANGUAGE: &str = "en-US";

/// Source of poster URLs for catalog entries
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Resolves a display image for the given TMDB id
    ///
    /// Total: always returns a usable URL, falling back to a placeholder
    /// when the lookup fails in any way.
    async fn resolve_poster(&self, movie_id: u64) -> String;

    /// The placeholder returned when resolution is impossible
    fn fallback_poster(&self) -> String;
}

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    placeholder_url: String,
}

impl TmdbPosterProvider {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.poster_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_base_url: config.image_base_url.clone(),
            placeholder_url: config.placeholder_url.clone(),
        })
    }

    /// Fetches the poster path from TMDB; `None` when the movie has no poster
    async fn fetch_poster_path(&self, movie_id: u64) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", TMDB_LANGUAGE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {} for movie {}",
                response.status(),
                movie_id
            )));
        }

        let details: MovieDetails = response.json().await?;
        Ok(details.poster_path)
    }

    fn image_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn resolve_poster(&self, movie_id: u64) -> String {
        match self.fetch_poster_path(movie_id).await {
            Ok(Some(path)) => self.image_url(&path),
            Ok(None) => {
                tracing::debug!(movie_id, "Movie has no poster path");
                self.placeholder_url.clone()
            }
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "Poster lookup failed");
                self.placeholder_url.clone()
            }
        }
    }

    fn fallback_poster(&self) -> String {
        self.placeholder_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    /// Serves the given router on an ephemeral local port
    async fn spawn_stub_api(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn test_provider(api_url: &str) -> TmdbPosterProvider {
        TmdbPosterProvider {
            http_client: HttpClient::builder()
                .timeout(Duration::from_secs(1))
                .build()
                .unwrap(),
            api_key: "test_key".to_string(),
            api_url: api_url.to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            placeholder_url: "https://placehold.co/500x750?text=missing".to_string(),
        }
    }

    #[test]
    fn test_image_url_concatenates_cdn_prefix() {
        let provider = test_provider("http://test.local");
        assert_eq!(
            provider.image_url("/abc123.jpg"),
            "https://image.tmdb.org/t/p/w500/abc123.jpg"
        );
    }

    #[test]
    fn test_fallback_poster_is_placeholder() {
        let provider = test_provider("http://test.local");
        assert_eq!(
            provider.fallback_poster(),
            "https://placehold.co/500x750?text=missing"
        );
    }

    #[tokio::test]
    async fn test_resolve_poster_degrades_to_placeholder_on_network_failure() {
        // Unroutable address: the GET fails immediately.
        let provider = test_provider("http://127.0.0.1:1");
        let url = provider.resolve_poster(42).await;
        assert_eq!(url, provider.fallback_poster());
        assert!(!url.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_poster_degrades_to_placeholder_on_404() {
        // A router with no routes answers every movie lookup with 404.
        let api_url = spawn_stub_api(Router::new()).await;
        let provider = test_provider(&api_url);

        let url = provider.resolve_poster(6).await;
        assert_eq!(url, provider.fallback_poster());
    }

    #[tokio::test]
    async fn test_resolve_poster_degrades_to_placeholder_on_null_poster_path() {
        let router = Router::new().route(
            "/movie/:id",
            get(|| async { Json(json!({ "poster_path": null })) }),
        );
        let api_url = spawn_stub_api(router).await;
        let provider = test_provider(&api_url);

        let url = provider.resolve_poster(6).await;
        assert_eq!(url, provider.fallback_poster());
    }

    #[tokio::test]
    async fn test_resolve_poster_builds_cdn_url_from_poster_path() {
        let router = Router::new().route(
            "/movie/:id",
            get(|| async { Json(json!({ "poster_path": "/abc123.jpg" })) }),
        );
        let api_url = spawn_stub_api(router).await;
        let provider = test_provider(&api_url);

        let url = provider.resolve_poster(6).await;
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/abc123.jpg");
    }
}
