//! Medley Catalog
//!
//! Directory-backed catalog of human-task form template documents. The
//! reconciler reads it fully once per run and indexes documents by
//! `(name, version)`, so every required reference can be resolved before
//! any remote state is touched.

mod catalog;
mod error;

pub use catalog::{FormCatalog, FormDocument, FsFormCatalog};
pub use error::CatalogError;
