use std::path::PathBuf;

use thiserror::Error;

use medley_catalog::CatalogError;
use medley_definition::{FormTemplateRef, LoadError};
use medley_registry::RegistryError;

/// Fatal reconciliation failures. Conflicts never appear here; they are
/// recovered inside the registrar and recorded as outcomes.
#[derive(Debug, Error)]
pub enum ReconcileError {
  #[error(transparent)]
  Load(#[from] LoadError),

  #[error(transparent)]
  Catalog(#[from] CatalogError),

  /// Referenced form templates absent from the local catalog. Raised
  /// before any registry call, in plan and apply mode alike.
  #[error(
    "missing form template(s) {}: add a JSON file under {} with matching \"name\" and \"version\" fields",
    join(.missing),
    .dir.display()
  )]
  MissingTemplates {
    missing: Vec<FormTemplateRef>,
    dir: PathBuf,
  },

  #[error(transparent)]
  Registry(#[from] RegistryError),
}

fn join(references: &[FormTemplateRef]) -> String {
  references
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}
