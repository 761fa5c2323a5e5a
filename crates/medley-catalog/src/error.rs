use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the local template catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("failed to read {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse template {path}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}
