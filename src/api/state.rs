use std::sync::Arc;

use crate::data::MovieData;
use crate::services::{PosterProvider, Recommender};

/// Shared application state
///
/// The data context is immutable after startup, so handlers share it without
/// locking; cloning the state only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<MovieData>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(data: Arc<MovieData>, posters: Arc<dyn PosterProvider>) -> Self {
        let recommender = Arc::new(Recommender::new(Arc::clone(&data), posters));
        Self { data, recommender }
    }
}
