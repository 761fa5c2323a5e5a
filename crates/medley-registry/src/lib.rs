//! Medley Registry
//!
//! Client for the remote orchestration registry plus the conflict-tolerant
//! registrar: idempotent "ensure exists" operations for task definitions,
//! form templates and workflow definitions. A rejection classified as
//! "already exists" is a successful idempotent outcome, not a failure;
//! every other registry error is fatal and propagates.

mod client;
mod conflict;
mod error;
mod http;
mod registrar;
mod task;

pub use client::RegistryClient;
pub use conflict::{ConflictRule, StandardConflictRule};
pub use error::RegistryError;
pub use http::{Credentials, HttpRegistryClient};
pub use registrar::{Mode, Outcome, Registrar};
pub use task::{TaskDefinition, TimeoutPolicy};
