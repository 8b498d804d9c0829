// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::anthology::models::{CatalogMetadata, WorkRecord};
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves the works catalog as a pretty-printed JSON array of `{title, content}`,
    /// plus run metadata beside it (`data.json` -> `data_meta.json`) when given.
    ///
    /// Both documents are serialized and staged before either is moved into
    /// place, so a failure leaves no works file behind.
    pub fn save_catalog(
        &self,
        works_filename: &str,
        works: &[WorkRecord],
        metadata: Option<&CatalogMetadata>,
    ) -> Result<CatalogPaths, StorageError> {
        let works_path = self.base_dir.join(works_filename);
        let mut documents = vec![(works_path.clone(), to_json(works)?)];
        let metadata_path = match metadata {
            Some(metadata) => {
                let path = self.base_dir.join(metadata_filename(works_filename));
                // Metadata goes first so the works file is the last to appear.
                documents.insert(0, (path.clone(), to_json(metadata)?));
                Some(path)
            }
            None => None,
        };

        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();
        for (path, json) in &documents {
            let staging = staging_path(path);
            if let Err(e) = fs::write(&staging, json) {
                discard_staged(&staged);
                let _ = fs::remove_file(&staging);
                return Err(e.into());
            }
            staged.push((staging, path.clone()));
        }

        for (i, (staging, path)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(staging, path) {
                tracing::error!("Failed to move {} into place: {}", path.display(), e);
                discard_staged(&staged[i..]);
                return Err(e.into());
            }
        }

        tracing::debug!("Moved {} staged documents into {}", staged.len(), self.base_dir.display());
        Ok(CatalogPaths { works: works_path, metadata: metadata_path })
    }

    /// Saves a plain-text debugging artifact
    pub fn save_text(&self, filename: &str, text: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);
        fs::write(&file_path, text)?;
        tracing::info!("Saved {} to {}", filename, file_path.display());
        Ok(file_path)
    }
}

/// Where `save_catalog` put its documents.
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    pub works: PathBuf,
    pub metadata: Option<PathBuf>,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string_pretty(value).map_err(|e| StorageError::SerializationError(e.to_string()))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (staging, _) in staged {
        let _ = fs::remove_file(staging);
    }
}

fn metadata_filename(works_filename: &str) -> String {
    let stem = Path::new(works_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(works_filename);
    format!("{}_meta.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_works() -> Vec<WorkRecord> {
        vec![WorkRecord {
            title: "HAMLET".to_string(),
            content: "HAMLET\nTo be.\nor not.".to_string(),
        }]
    }

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("out").join("catalog");
        let storage = StorageManager::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_dir(), nested.as_path());
    }

    fn sample_metadata() -> CatalogMetadata {
        CatalogMetadata {
            source: "completeworks.txt".to_string(),
            title_count: 1,
            work_count: 1,
            titles: vec!["HAMLET".to_string()],
            missing_titles: Vec::new(),
            content_lines: BTreeMap::from([("HAMLET".to_string(), 3)]),
            stopped_at_boundary: true,
            lines_read: 9,
            extraction_timestamp: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_save_works_uses_title_and_content_fields() {
        let temp_dir = tempdir().unwrap();
        let storage = StorageManager::new(temp_dir.path()).unwrap();

        let paths = storage.save_catalog("data.json", &sample_works(), None).unwrap();
        assert!(paths.metadata.is_none());
        assert!(!temp_dir.path().join("data_meta.json").exists());
        let written = fs::read_to_string(&paths.works).unwrap();

        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "title": "HAMLET", "content": "HAMLET\nTo be.\nor not." }])
        );
        // Pretty-printed
        assert!(written.contains("\n  {"));

        let parsed: Vec<WorkRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, sample_works());
    }

    #[test]
    fn test_save_metadata_next_to_works_file() {
        let temp_dir = tempdir().unwrap();
        let storage = StorageManager::new(temp_dir.path()).unwrap();

        let paths = storage
            .save_catalog("works.json", &sample_works(), Some(&sample_metadata()))
            .unwrap();
        assert!(paths.works.exists());
        let path = paths.metadata.unwrap();
        assert_eq!(path.file_name().unwrap(), "works_meta.json");

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["work_count"], 1);
        assert_eq!(value["content_lines"]["HAMLET"], 3);
        assert_eq!(value["stopped_at_boundary"], true);
        assert!(!temp_dir.path().join("works.json.tmp").exists());
        assert!(!temp_dir.path().join("works_meta.json.tmp").exists());
    }

    #[test]
    fn test_failed_metadata_write_leaves_no_works_file() {
        let temp_dir = tempdir().unwrap();
        let storage = StorageManager::new(temp_dir.path()).unwrap();
        // A directory where the metadata file should go makes its write fail.
        fs::create_dir(temp_dir.path().join("data_meta.json")).unwrap();

        let result = storage.save_catalog("data.json", &sample_works(), Some(&sample_metadata()));
        assert!(matches!(result, Err(StorageError::IoError(_))));
        assert!(!temp_dir.path().join("data.json").exists());
        assert!(!temp_dir.path().join("data.json.tmp").exists());
        assert!(!temp_dir.path().join("data_meta.json.tmp").exists());
    }

    #[test]
    fn test_metadata_filename_without_extension() {
        assert_eq!(metadata_filename("catalog"), "catalog_meta.json");
        assert_eq!(metadata_filename("data.json"), "data_meta.json");
    }
}
