pub mod poster;
pub mod recommender;

pub use poster::{PosterProvider, TmdbPosterProvider};
pub use recommender::Recommender;
