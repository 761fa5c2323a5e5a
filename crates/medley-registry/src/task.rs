use serde::Serialize;

/// Timeout policy attached to auto-created task definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeoutPolicy {
  AlertOnly,
  TimeOutWf,
  Retry,
}

/// The registry-side contract a SIMPLE step depends on to execute.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
  pub name: String,
  pub retry_count: u32,
  pub timeout_seconds: u64,
  pub timeout_policy: TimeoutPolicy,
}

impl TaskDefinition {
  /// Build a definition from a discovered step name and the fixed
  /// defaults. Per-task overrides are an extension point, not modeled.
  pub fn with_defaults(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      retry_count: 3,
      timeout_seconds: 4000,
      timeout_policy: TimeoutPolicy::AlertOnly,
    }
  }
}
