use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// TMDB API key used for poster lookups
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Image CDN prefix that poster paths are appended to
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Fallback image returned when a poster cannot be resolved
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,

    /// Remote source for the catalog artifact
    pub catalog_url: String,

    /// Remote source for the similarity matrix artifact
    pub similarity_url: String,

    /// Local path the catalog artifact is stored at
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Local path the similarity matrix artifact is stored at
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Per-request timeout for poster lookups, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_placeholder_url() -> String {
    "https://placehold.co/500x750/333333/FFFFFF?text=Poster+Not+Found".to_string()
}

fn default_catalog_path() -> String {
    "movie_list.json".to_string()
}

fn default_similarity_path() -> String {
    "similarity.json".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    3
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
