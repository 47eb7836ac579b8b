use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use marquee_api::api::{create_router, AppState};
use marquee_api::config::Config;
use marquee_api::data::{loader, MovieData};
use marquee_api::services::{PosterProvider, TmdbPosterProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Bootstrap the two data artifacts; a failed fetch is fatal because the
    // engine cannot serve without its matrix.
    let artifact_client = reqwest::Client::new();
    loader::ensure_local(
        &artifact_client,
        &config.catalog_url,
        Path::new(&config.catalog_path),
    )
    .await
    .context("catalog artifact unavailable")?;
    loader::ensure_local(
        &artifact_client,
        &config.similarity_url,
        Path::new(&config.similarity_path),
    )
    .await
    .context("similarity matrix artifact unavailable")?;

    let data = Arc::new(
        MovieData::load(&config.catalog_path, &config.similarity_path)
            .await
            .context("failed to load recommendation data")?,
    );
    tracing::info!(movies = data.len(), "Catalog and similarity matrix loaded");

    let posters: Arc<dyn PosterProvider> = Arc::new(TmdbPosterProvider::new(&config)?);
    let state = AppState::new(data, posters);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
