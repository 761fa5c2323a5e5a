use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

use medley_definition::FormTemplateRef;

use crate::error::CatalogError;

/// A local form template document together with its source file.
#[derive(Debug, Clone)]
pub struct FormDocument {
  pub file: PathBuf,
  pub reference: FormTemplateRef,
  pub document: Value,
}

/// Directory-backed template catalog.
///
/// Templates are plain JSON documents exposing at least `name` and an
/// integral `version`; everything else in the document is opaque and
/// forwarded to the registry as-is.
pub struct FsFormCatalog {
  root: PathBuf,
}

impl FsFormCatalog {
  /// Create a catalog rooted at the given directory.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Root directory of the catalog.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Read the catalog directory once and index every well-formed document.
  ///
  /// A missing root directory loads as an empty catalog; unresolved
  /// references surface later with placement guidance. Documents without
  /// a string `name` and integral `version` are skipped, since the
  /// directory may hold drafts that no workflow references yet.
  pub async fn load(&self) -> Result<FormCatalog, CatalogError> {
    let mut entries = match fs::read_dir(&self.root).await {
      Ok(entries) => entries,
      Err(_) => return Ok(FormCatalog::default()),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries
      .next_entry()
      .await
      .map_err(|source| CatalogError::Read {
        path: self.root.clone(),
        source,
      })?
    {
      let path = entry.path();
      if path.is_file() && has_json_extension(&path) {
        files.push(path);
      }
    }
    files.sort();

    let mut documents = HashMap::new();
    for file in files {
      let raw = fs::read_to_string(&file)
        .await
        .map_err(|source| CatalogError::Read {
          path: file.clone(),
          source,
        })?;

      let document: Value =
        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
          path: file.clone(),
          source,
        })?;

      let name = document.get("name").and_then(Value::as_str);
      let version = document.get("version").and_then(Value::as_i64);
      let (Some(name), Some(version)) = (name, version) else {
        tracing::debug!(
          file = %file.display(),
          "skipping template document without name/version"
        );
        continue;
      };

      let reference = FormTemplateRef::new(name, version);
      documents.insert(
        reference.clone(),
        FormDocument {
          file,
          reference,
          document,
        },
      );
    }

    Ok(FormCatalog { documents })
  }
}

/// An indexed snapshot of the catalog for one reconciliation run.
#[derive(Debug, Default)]
pub struct FormCatalog {
  documents: HashMap<FormTemplateRef, FormDocument>,
}

impl FormCatalog {
  /// Resolve a template reference against the snapshot.
  pub fn get(&self, reference: &FormTemplateRef) -> Option<&FormDocument> {
    self.documents.get(reference)
  }

  pub fn len(&self) -> usize {
    self.documents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }
}

fn has_json_extension(path: &Path) -> bool {
  path
    .extension()
    .and_then(|extension| extension.to_str())
    .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}
