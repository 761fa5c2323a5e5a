use std::path::{Path, PathBuf};

use tokio::fs;

use crate::definition::WorkflowDefinition;
use crate::error::LoadError;

/// A workflow definition together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedDefinition {
  pub file: PathBuf,
  pub definition: WorkflowDefinition,
}

/// Load every `*.json` definition in a directory, in filename order.
///
/// A directory with zero matching files is an error; a reconciliation run
/// over nothing is almost always a mistyped path.
pub async fn load_dir(dir: &Path) -> Result<Vec<LoadedDefinition>, LoadError> {
  let mut entries = fs::read_dir(dir).await.map_err(|source| LoadError::Read {
    path: dir.to_path_buf(),
    source,
  })?;

  let mut files = Vec::new();
  while let Some(entry) = entries
    .next_entry()
    .await
    .map_err(|source| LoadError::Read {
      path: dir.to_path_buf(),
      source,
    })?
  {
    let path = entry.path();
    if path.is_file() && has_json_extension(&path) {
      files.push(path);
    }
  }
  files.sort();

  if files.is_empty() {
    return Err(LoadError::NoDefinitions(dir.to_path_buf()));
  }

  let mut definitions = Vec::with_capacity(files.len());
  for file in files {
    definitions.push(load_file(&file).await?);
  }

  Ok(definitions)
}

/// Load a single definition file.
pub async fn load_file(path: &Path) -> Result<LoadedDefinition, LoadError> {
  let raw = fs::read_to_string(path)
    .await
    .map_err(|source| LoadError::Read {
      path: path.to_path_buf(),
      source,
    })?;

  let document: serde_json::Value =
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

  let definition =
    WorkflowDefinition::from_value(document).map_err(|source| LoadError::Invalid {
      path: path.to_path_buf(),
      source,
    })?;

  Ok(LoadedDefinition {
    file: path.to_path_buf(),
    definition,
  })
}

fn has_json_extension(path: &Path) -> bool {
  path
    .extension()
    .and_then(|extension| extension.to_str())
    .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}
