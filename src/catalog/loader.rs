//! Dataset loading
//!
//! Locates the JSON item dataset, parses it, and builds the catalog index.
//! Auto-located candidates that fail to read or parse are skipped with a
//! warning; an explicitly given path must load or the error is fatal, as is
//! finding no usable candidate at all. There is no valid mode of operation
//! without a catalog.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use super::{CatalogIndex, Item};

/// File name the auto-location candidates look for.
pub const DATA_FILE_NAME: &str = "fuseforge_item_data.json";

/// The required dataset shape: a single top-level `items` array.
#[derive(Debug, Deserialize)]
pub struct ItemDatabase {
    pub items: Vec<Item>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("dataset not found; searched: {}", format_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
    #[error("failed to read dataset {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A loaded catalog plus where it came from.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub index: CatalogIndex,
    pub source: PathBuf,
}

impl LoadedCatalog {
    /// Short display form of the dataset location.
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// Parse dataset text into items, rejecting anything without the required
/// top-level `items` array.
pub fn parse_items(text: &str) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_str::<ItemDatabase>(text).map(|db| db.items)
}

/// Candidate dataset locations, most specific first.
pub fn candidate_paths(override_path: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = override_path {
        return vec![path.to_path_buf()];
    }

    let mut candidates = Vec::new();
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(DATA_FILE_NAME));
        candidates.push(exe_dir.join("data").join(DATA_FILE_NAME));
    }
    candidates.push(PathBuf::from(DATA_FILE_NAME));
    candidates.push(Path::new("data").join(DATA_FILE_NAME));
    if let Some(dirs) = ProjectDirs::from("", "", "fuseforge") {
        candidates.push(dirs.data_dir().join(DATA_FILE_NAME));
    }
    candidates
}

/// Load the dataset and build the catalog index.
pub fn load_catalog(override_path: Option<&Path>) -> Result<LoadedCatalog, CatalogError> {
    let explicit = override_path.is_some();
    let candidates = candidate_paths(override_path);

    for path in &candidates {
        if !path.is_file() {
            continue;
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) if explicit => {
                return Err(CatalogError::Io {
                    path: path.clone(),
                    source,
                })
            }
            Err(source) => {
                log::warn!("skipping unreadable dataset {}: {}", path.display(), source);
                continue;
            }
        };
        match parse_items(&text) {
            Ok(items) => {
                log::info!("loaded {} items from {}", items.len(), path.display());
                return Ok(LoadedCatalog {
                    index: CatalogIndex::build(items),
                    source: path.clone(),
                });
            }
            Err(source) if explicit => {
                return Err(CatalogError::Parse {
                    path: path.clone(),
                    source,
                })
            }
            Err(source) => {
                log::warn!("skipping malformed dataset {}: {}", path.display(), source);
            }
        }
    }

    Err(CatalogError::NotFound {
        searched: candidates,
    })
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_items_array() {
        assert!(parse_items(r#"{"items": []}"#).unwrap().is_empty());
        assert!(parse_items(r#"{"records": []}"#).is_err());
        assert!(parse_items(r#"[1, 2, 3]"#).is_err());
        assert!(parse_items("not json").is_err());
    }

    #[test]
    fn test_parse_tolerates_sparse_items() {
        // Only the name is truly required; everything else may be absent.
        let items = parse_items(r#"{"items": [{"name": "Ingot", "rank": 1}, {"name": "Husk"}]}"#)
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].rank, 0);
        assert!(items[1].recipes.is_empty());
    }

    #[test]
    fn test_parse_tolerates_malformed_recipe() {
        let items = parse_items(
            r#"{"items": [{
                "name": "Odd Blade",
                "rank": 4,
                "recipes": [{"ingredients": [{"name": "Shard", "rank": 2}]}]
            }]}"#,
        )
        .unwrap();
        assert!(items[0].recipes[0].pair().is_none());
    }

    #[test]
    fn test_candidate_paths_override_is_exclusive() {
        let override_path = Path::new("/tmp/somewhere.json");
        let candidates = candidate_paths(Some(override_path));
        assert_eq!(candidates, vec![override_path.to_path_buf()]);
        assert!(!candidate_paths(None).is_empty());
    }
}
