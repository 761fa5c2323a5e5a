use std::fmt;

use serde_json::Value;

use crate::client::RegistryClient;
use crate::conflict::ConflictRule;
use crate::error::RegistryError;
use crate::task::TaskDefinition;

/// Whether a run reports intended actions or performs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Dry run: compute and report, never call the registry.
  Plan,
  /// Perform registrations.
  Apply,
}

/// Outcome of one ensure operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Registered,
  AlreadyExists,
  WouldRegister,
}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Outcome::Registered => "registered",
      Outcome::AlreadyExists => "already-exists",
      Outcome::WouldRegister => "would-register",
    };
    f.write_str(label)
  }
}

/// Idempotent "ensure exists" operations against the registry.
///
/// A rejection the conflict rule classifies as "already exists" is
/// recovered locally and reported as an outcome; every other error
/// propagates as fatal. No local state is written; side effects are
/// confined to the client's outbound calls.
pub struct Registrar<C> {
  client: C,
  conflict: Box<dyn ConflictRule>,
  mode: Mode,
}

impl<C: RegistryClient> Registrar<C> {
  pub fn new(client: C, conflict: Box<dyn ConflictRule>, mode: Mode) -> Self {
    Self {
      client,
      conflict,
      mode,
    }
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  /// Ensure a task definition exists for a SIMPLE step name, built from
  /// the fixed defaults.
  pub async fn ensure_task_definition(&self, name: &str) -> Result<Outcome, RegistryError> {
    if self.mode == Mode::Plan {
      return Ok(Outcome::WouldRegister);
    }

    let definition = TaskDefinition::with_defaults(name);
    match self.client.register_task_definition(&definition).await {
      Ok(()) => Ok(Outcome::Registered),
      Err(error) if self.conflict.is_conflict(&error) => {
        tracing::debug!(name, "task definition already exists");
        Ok(Outcome::AlreadyExists)
      }
      Err(error) => Err(error),
    }
  }

  /// Ensure a form template exists. The caller has already resolved the
  /// document against the local catalog.
  pub async fn ensure_form_template(&self, document: &Value) -> Result<Outcome, RegistryError> {
    if self.mode == Mode::Plan {
      return Ok(Outcome::WouldRegister);
    }

    match self.client.register_form_template(document).await {
      Ok(()) => Ok(Outcome::Registered),
      Err(error) if self.conflict.is_conflict(&error) => Ok(Outcome::AlreadyExists),
      Err(error) => Err(error),
    }
  }

  /// Ensure a workflow definition exists. Overwrite is an explicit caller
  /// choice, so conflicts are not swallowed here.
  pub async fn ensure_workflow_definition(
    &self,
    document: &Value,
    overwrite: bool,
  ) -> Result<Outcome, RegistryError> {
    if self.mode == Mode::Plan {
      return Ok(Outcome::WouldRegister);
    }

    self
      .client
      .register_workflow_definition(document, overwrite)
      .await?;
    Ok(Outcome::Registered)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::conflict::StandardConflictRule;
  use async_trait::async_trait;
  use serde_json::json;
  use std::sync::{Arc, Mutex};

  /// Scripted registry that records calls and replays one canned result
  /// per operation kind.
  #[derive(Default)]
  struct ScriptedRegistry {
    calls: Arc<Mutex<Vec<String>>>,
    task_result: Option<(u16, String)>,
    template_result: Option<(u16, String)>,
    workflow_result: Option<(u16, String)>,
  }

  impl ScriptedRegistry {
    fn replay(result: &Option<(u16, String)>) -> Result<(), RegistryError> {
      match result {
        Some((status, message)) => Err(RegistryError::Rejected {
          status: *status,
          message: message.clone(),
        }),
        None => Ok(()),
      }
    }
  }

  #[async_trait]
  impl RegistryClient for ScriptedRegistry {
    async fn register_task_definition(
      &self,
      definition: &TaskDefinition,
    ) -> Result<(), RegistryError> {
      self
        .calls
        .lock()
        .unwrap()
        .push(format!("taskdef:{}", definition.name));
      Self::replay(&self.task_result)
    }

    async fn register_form_template(&self, document: &Value) -> Result<(), RegistryError> {
      self
        .calls
        .lock()
        .unwrap()
        .push(format!("template:{}", document["name"]));
      Self::replay(&self.template_result)
    }

    async fn register_workflow_definition(
      &self,
      document: &Value,
      overwrite: bool,
    ) -> Result<(), RegistryError> {
      self
        .calls
        .lock()
        .unwrap()
        .push(format!("workflow:{}:{}", document["name"], overwrite));
      Self::replay(&self.workflow_result)
    }
  }

  fn registrar(client: ScriptedRegistry, mode: Mode) -> Registrar<ScriptedRegistry> {
    Registrar::new(client, Box::new(StandardConflictRule), mode)
  }

  #[tokio::test]
  async fn test_plan_mode_never_calls_the_client() {
    let client = ScriptedRegistry::default();
    let calls = client.calls.clone();
    let registrar = registrar(client, Mode::Plan);

    let outcome = registrar.ensure_task_definition("send_email").await.unwrap();
    assert_eq!(outcome, Outcome::WouldRegister);

    let outcome = registrar.ensure_form_template(&json!({ "name": "intake" })).await.unwrap();
    assert_eq!(outcome, Outcome::WouldRegister);

    let outcome = registrar
      .ensure_workflow_definition(&json!({ "name": "wf" }), true)
      .await
      .unwrap();
    assert_eq!(outcome, Outcome::WouldRegister);

    assert!(calls.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_apply_registers_task_definition() {
    let client = ScriptedRegistry::default();
    let calls = client.calls.clone();
    let registrar = registrar(client, Mode::Apply);

    let outcome = registrar.ensure_task_definition("send_email").await.unwrap();
    assert_eq!(outcome, Outcome::Registered);
    assert_eq!(calls.lock().unwrap().as_slice(), ["taskdef:send_email"]);
  }

  #[tokio::test]
  async fn test_apply_conflict_is_already_exists() {
    let client = ScriptedRegistry {
      task_result: Some((409, "Task send_email already exists".to_string())),
      ..Default::default()
    };
    let registrar = registrar(client, Mode::Apply);

    let outcome = registrar.ensure_task_definition("send_email").await.unwrap();
    assert_eq!(outcome, Outcome::AlreadyExists);
  }

  #[tokio::test]
  async fn test_apply_other_rejection_propagates() {
    let client = ScriptedRegistry {
      task_result: Some((500, "internal error".to_string())),
      ..Default::default()
    };
    let registrar = registrar(client, Mode::Apply);

    let result = registrar.ensure_task_definition("send_email").await;
    assert!(matches!(
      result,
      Err(RegistryError::Rejected { status: 500, .. })
    ));
  }

  #[tokio::test]
  async fn test_template_conflict_is_already_exists() {
    let client = ScriptedRegistry {
      template_result: Some((400, "duplicate template".to_string())),
      ..Default::default()
    };
    let registrar = registrar(client, Mode::Apply);

    let outcome = registrar
      .ensure_form_template(&json!({ "name": "intake", "version": 1 }))
      .await
      .unwrap();
    assert_eq!(outcome, Outcome::AlreadyExists);
  }

  #[tokio::test]
  async fn test_workflow_conflict_is_not_swallowed() {
    let client = ScriptedRegistry {
      workflow_result: Some((409, "Workflow wf already exists".to_string())),
      ..Default::default()
    };
    let registrar = registrar(client, Mode::Apply);

    let result = registrar
      .ensure_workflow_definition(&json!({ "name": "wf", "version": 1 }), false)
      .await;
    assert!(matches!(
      result,
      Err(RegistryError::Rejected { status: 409, .. })
    ));
  }

  #[tokio::test]
  async fn test_workflow_apply_passes_overwrite_through() {
    let client = ScriptedRegistry::default();
    let calls = client.calls.clone();
    let registrar = registrar(client, Mode::Apply);

    registrar
      .ensure_workflow_definition(&json!({ "name": "wf" }), false)
      .await
      .unwrap();
    assert_eq!(
      calls.lock().unwrap().as_slice(),
      [r#"workflow:"wf":false"#]
    );
  }
}
