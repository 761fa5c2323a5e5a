use async_trait::async_trait;
use serde_json::Value;

use crate::error::RegistryError;
use crate::task::TaskDefinition;

/// Operations the reconciler issues against the remote orchestration
/// registry. Implementations must surface a status code and/or message
/// usable for conflict classification.
#[async_trait]
pub trait RegistryClient: Send + Sync {
  /// Register a task definition. May reject when one already exists.
  async fn register_task_definition(
    &self,
    definition: &TaskDefinition,
  ) -> Result<(), RegistryError>;

  /// Register a human-task form template document.
  async fn register_form_template(&self, document: &Value) -> Result<(), RegistryError>;

  /// Register a workflow definition, replacing an existing definition
  /// with the same `(name, version)` when `overwrite` is set.
  async fn register_workflow_definition(
    &self,
    document: &Value,
    overwrite: bool,
  ) -> Result<(), RegistryError>;
}
