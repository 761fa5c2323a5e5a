use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Structural problems in a single workflow definition document.
#[derive(Debug, Error)]
pub enum DefinitionError {
  #[error("workflow definition is missing a string 'name'")]
  MissingName,

  #[error("workflow definition is missing a numeric 'version'")]
  MissingVersion,

  #[error("workflow definition is missing a 'tasks' array")]
  MissingTasks,

  #[error("malformed step: {0}")]
  Step(#[from] serde_json::Error),
}

/// Errors raised while discovering and parsing definition files.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("no workflow definition files (*.json) found in {0}")]
  NoDefinitions(PathBuf),

  #[error("failed to read {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse {path}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid workflow definition {path}: {source}")]
  Invalid {
    path: PathBuf,
    #[source]
    source: DefinitionError,
  },
}
