/// In-memory recommendation data
///
/// Holds the catalog and the precomputed similarity matrix, loaded once at
/// startup and shared read-only behind an `Arc` for the process lifetime.
/// Cardinality between the two artifacts is checked at construction time;
/// a mismatch is a startup failure, never a per-request error.
use std::path::Path;

use chrono::{DateTime, Utc};

pub mod loader;

use crate::error::{AppError, AppResult};
use crate::models::CatalogEntry;

#[derive(Debug)]
pub struct MovieData {
    catalog: Vec<CatalogEntry>,
    similarity: Vec<Vec<f64>>,
    loaded_at: DateTime<Utc>,
}

impl MovieData {
    /// Builds the data context, validating that the similarity matrix is
    /// square and index-aligned with the catalog.
    pub fn new(catalog: Vec<CatalogEntry>, similarity: Vec<Vec<f64>>) -> AppResult<Self> {
        if similarity.len() != catalog.len() {
            return Err(AppError::DataLoad(format!(
                "Similarity matrix has {} rows but catalog has {} entries",
                similarity.len(),
                catalog.len()
            )));
        }

        for (i, row) in similarity.iter().enumerate() {
            if row.len() != catalog.len() {
                return Err(AppError::DataLoad(format!(
                    "Similarity row {} has {} columns but catalog has {} entries",
                    i,
                    row.len(),
                    catalog.len()
                )));
            }
        }

        Ok(Self {
            catalog,
            similarity,
            loaded_at: Utc::now(),
        })
    }

    /// Reads and validates both artifacts from local storage
    pub async fn load(
        catalog_path: impl AsRef<Path>,
        similarity_path: impl AsRef<Path>,
    ) -> AppResult<Self> {
        let catalog = read_json::<Vec<CatalogEntry>>(catalog_path.as_ref()).await?;
        let similarity = read_json::<Vec<Vec<f64>>>(similarity_path.as_ref()).await?;
        Self::new(catalog, similarity)
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Ordered list of display titles, for the client's picker
    pub fn titles(&self) -> Vec<String> {
        self.catalog.iter().map(|m| m.title.clone()).collect()
    }

    /// Index of the first catalog entry with the given title
    ///
    /// First match wins when titles are duplicated, so repeated lookups are
    /// deterministic.
    pub fn find_index(&self, title: &str) -> Option<usize> {
        self.catalog.iter().position(|m| m.title == title)
    }

    pub fn entry_at(&self, index: usize) -> Option<&CatalogEntry> {
        self.catalog.get(index)
    }

    pub fn similarity_row(&self, index: usize) -> Option<&[f64]> {
        self.similarity.get(index).map(Vec::as_slice)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::DataLoad(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::DataLoad(format!("Failed to parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, movie_id: u64) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            movie_id,
        }
    }

    #[test]
    fn test_new_accepts_square_matrix() {
        let data = MovieData::new(
            vec![entry("Alpha", 1), entry("Beta", 2)],
            vec![vec![1.0, 0.5], vec![0.5, 1.0]],
        )
        .unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data.titles(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_new_rejects_row_count_mismatch() {
        let result = MovieData::new(
            vec![entry("Alpha", 1), entry("Beta", 2)],
            vec![vec![1.0, 0.5]],
        );

        let err = result.unwrap_err();
        assert!(err.to_string().contains("1 rows"));
        assert!(err.to_string().contains("2 entries"));
    }

    #[test]
    fn test_new_rejects_ragged_matrix() {
        let result = MovieData::new(
            vec![entry("Alpha", 1), entry("Beta", 2)],
            vec![vec![1.0, 0.5], vec![0.5]],
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_find_index_takes_first_match_for_duplicates() {
        let data = MovieData::new(
            vec![entry("Omega", 10), entry("Alpha", 11), entry("Omega", 12)],
            vec![
                vec![1.0, 0.2, 0.3],
                vec![0.2, 1.0, 0.4],
                vec![0.3, 0.4, 1.0],
            ],
        )
        .unwrap();

        assert_eq!(data.find_index("Omega"), Some(0));
    }

    #[test]
    fn test_find_index_missing_title() {
        let data = MovieData::new(vec![entry("Alpha", 1)], vec![vec![1.0]]).unwrap();
        assert_eq!(data.find_index("Unknown"), None);
        assert_eq!(data.find_index(""), None);
    }

    #[tokio::test]
    async fn test_load_from_json_artifacts() {
        let dir = std::env::temp_dir();
        let catalog_path = dir.join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        let similarity_path = dir.join(format!("similarity-{}.json", uuid::Uuid::new_v4()));

        tokio::fs::write(
            &catalog_path,
            r#"[{"title":"Alpha","movie_id":1},{"title":"Beta","movie_id":2}]"#,
        )
        .await
        .unwrap();
        tokio::fs::write(&similarity_path, r#"[[1.0,0.5],[0.5,1.0]]"#)
            .await
            .unwrap();

        let data = MovieData::load(&catalog_path, &similarity_path)
            .await
            .unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.entry_at(1).unwrap().movie_id, 2);
        assert_eq!(data.similarity_row(0), Some(&[1.0, 0.5][..]));

        tokio::fs::remove_file(&catalog_path).await.unwrap();
        tokio::fs::remove_file(&similarity_path).await.unwrap();
    }

    #[test]
    fn test_load_missing_file_is_data_load_error() {
        let missing = std::env::temp_dir().join(format!("nope-{}.json", uuid::Uuid::new_v4()));
        let result = tokio_test::block_on(MovieData::load(&missing, &missing));
        assert!(matches!(result, Err(AppError::DataLoad(_))));
    }
}
