use serde_json::Value;

use crate::error::DefinitionError;
use crate::step::StepNode;

/// A workflow definition as loaded from disk.
///
/// Identity is `(name, version)`. The typed `tasks` tree drives dependency
/// analysis; `document` is the sanitized raw JSON sent on registration, so
/// fields the typed model does not know about round-trip untouched.
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct WorkflowDefinition {
  name: String,
  version: i64,
  tasks: Vec<Option<StepNode>>,
  document: Value,
}

impl WorkflowDefinition {
  /// Validate and build a definition from a raw document.
  ///
  /// Strips server-assigned `createTime`/`updateTime` first, so an
  /// exported document can be re-registered without the registry
  /// rejecting its foreign metadata.
  pub fn from_value(mut document: Value) -> Result<Self, DefinitionError> {
    if let Some(object) = document.as_object_mut() {
      object.remove("createTime");
      object.remove("updateTime");
    }

    let name = document
      .get("name")
      .and_then(Value::as_str)
      .ok_or(DefinitionError::MissingName)?
      .to_string();

    let version = document
      .get("version")
      .and_then(Value::as_i64)
      .ok_or(DefinitionError::MissingVersion)?;

    let raw_tasks = document
      .get("tasks")
      .and_then(Value::as_array)
      .ok_or(DefinitionError::MissingTasks)?;

    // Entries may be null; they parse to None and the walker skips them.
    let tasks: Vec<Option<StepNode>> =
      serde_json::from_value(Value::Array(raw_tasks.clone()))?;

    Ok(Self {
      name,
      version,
      tasks,
      document,
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn version(&self) -> i64 {
    self.version
  }

  pub fn tasks(&self) -> &[Option<StepNode>] {
    &self.tasks
  }

  /// The sanitized raw document, as sent to the registry.
  pub fn document(&self) -> &Value {
    &self.document
  }

  /// Identity key rendered `name:version`.
  pub fn id(&self) -> String {
    format!("{}:{}", self.name, self.version)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_from_value_strips_server_timestamps() {
    let definition = WorkflowDefinition::from_value(json!({
      "name": "wf",
      "version": 1,
      "tasks": [],
      "createTime": 1700000000000u64,
      "updateTime": 1700000000001u64
    }))
    .unwrap();

    assert_eq!(definition.id(), "wf:1");
    assert!(definition.document().get("createTime").is_none());
    assert!(definition.document().get("updateTime").is_none());
    assert_eq!(definition.document().get("name"), Some(&json!("wf")));
  }

  #[test]
  fn test_from_value_missing_name() {
    let result = WorkflowDefinition::from_value(json!({ "version": 1, "tasks": [] }));
    assert!(matches!(result, Err(DefinitionError::MissingName)));
  }

  #[test]
  fn test_from_value_non_string_name() {
    let result = WorkflowDefinition::from_value(json!({ "name": 7, "version": 1, "tasks": [] }));
    assert!(matches!(result, Err(DefinitionError::MissingName)));
  }

  #[test]
  fn test_from_value_missing_version() {
    let result = WorkflowDefinition::from_value(json!({ "name": "wf", "tasks": [] }));
    assert!(matches!(result, Err(DefinitionError::MissingVersion)));
  }

  #[test]
  fn test_from_value_non_numeric_version() {
    let result =
      WorkflowDefinition::from_value(json!({ "name": "wf", "version": "1", "tasks": [] }));
    assert!(matches!(result, Err(DefinitionError::MissingVersion)));
  }

  #[test]
  fn test_from_value_missing_tasks() {
    let result = WorkflowDefinition::from_value(json!({ "name": "wf", "version": 1 }));
    assert!(matches!(result, Err(DefinitionError::MissingTasks)));
  }

  #[test]
  fn test_from_value_null_task_entries_parse_to_none() {
    let definition = WorkflowDefinition::from_value(json!({
      "name": "wf",
      "version": 1,
      "tasks": [null, { "type": "SIMPLE", "name": "a" }]
    }))
    .unwrap();

    assert_eq!(definition.tasks().len(), 2);
    assert!(definition.tasks()[0].is_none());
    assert!(definition.tasks()[1].is_some());
  }

  #[test]
  fn test_vendor_fields_survive_in_document() {
    let definition = WorkflowDefinition::from_value(json!({
      "name": "wf",
      "version": 2,
      "tasks": [{ "type": "SIMPLE", "name": "a", "taskReferenceName": "a_ref" }],
      "ownerEmail": "ops@example.com",
      "schemaVersion": 2
    }))
    .unwrap();

    assert_eq!(
      definition.document().get("ownerEmail"),
      Some(&json!("ops@example.com"))
    );
    assert_eq!(
      definition.document()["tasks"][0]["taskReferenceName"],
      json!("a_ref")
    );
  }
}
