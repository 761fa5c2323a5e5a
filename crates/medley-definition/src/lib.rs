//! Medley Definition
//!
//! Serializable workflow definition types and the filesystem loader.
//! A definition is loaded from a JSON export, sanitized (server-assigned
//! timestamps stripped) and validated for minimal shape. The typed step
//! tree drives dependency analysis; the sanitized raw document is what
//! gets sent back to the registry so vendor fields round-trip untouched.

mod definition;
mod error;
mod loader;
mod step;
mod template;

pub use definition::WorkflowDefinition;
pub use error::{DefinitionError, LoadError};
pub use loader::{LoadedDefinition, load_dir, load_file};
pub use step::{BranchBody, StepNode};
pub use template::FormTemplateRef;
