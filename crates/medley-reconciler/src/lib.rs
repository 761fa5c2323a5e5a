//! Medley Reconciler
//!
//! Sequences loader -> walker/extractor -> registrar across all
//! discovered workflow definitions, in plan or apply mode, and produces a
//! run summary. One run is a fresh, self-contained pass: all registry
//! operations are issued sequentially, dependencies strictly before the
//! workflows that reference them, and the first fatal error aborts the
//! pass with no rollback of already-applied registrations.

mod error;
mod reconciler;
mod summary;

pub use error::ReconcileError;
pub use reconciler::{ReconcileOptions, Reconciler, Target};
pub use summary::{Action, Section, Summary, Tally};
