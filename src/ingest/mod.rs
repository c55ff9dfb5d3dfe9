//! Offline dataset ingestion
//!
//! Converts a scraped fusion-guide document (an HTML export or plain text)
//! into the JSON item dataset the catalog loader consumes. This runs
//! offline via `--rebuild-data`; the shell never touches it.

mod categories;
pub mod guide;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Item, DATA_FILE_NAME};

pub use guide::{extract_text, parse_guide};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read guide {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no items found in {}", .path.display())]
    Empty { path: PathBuf },
    #[error("failed to encode dataset")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write dataset {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one dataset rebuild.
#[derive(Debug)]
pub struct RebuildReport {
    pub item_count: usize,
    pub output: PathBuf,
}

#[derive(Serialize)]
struct DatasetOut<'a> {
    items: &'a [Item],
}

/// Parse a guide document and write the dataset JSON. The output defaults
/// to the standard dataset file name next to the input.
pub fn rebuild_dataset(input: &Path, output: Option<&Path>) -> Result<RebuildReport, IngestError> {
    let document = fs::read_to_string(input).map_err(|source| IngestError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let items = parse_guide(&extract_text(&document));
    if items.is_empty() {
        return Err(IngestError::Empty {
            path: input.to_path_buf(),
        });
    }
    log::info!("parsed {} items from {}", items.len(), input.display());

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_file_name(DATA_FILE_NAME));
    let json = serde_json::to_string_pretty(&DatasetOut { items: &items })?;
    fs::write(&output, json).map_err(|source| IngestError::Write {
        path: output.clone(),
        source,
    })?;

    Ok(RebuildReport {
        item_count: items.len(),
        output,
    })
}
