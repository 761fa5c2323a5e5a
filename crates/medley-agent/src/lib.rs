//! Medley Agent
//!
//! Boundary contract for the conversational agents that registry task
//! workers dispatch queries to. The reasoning loop and the worker poll
//! loop live outside this workspace; workers depend only on this seam.
//! Agents are constructed explicitly and injected with run-scoped
//! lifetime; there are no module-level singletons.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Final answer an agent produced for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReply {
  /// Final prose answer.
  pub response: String,
  /// Names of the tools invoked while answering, in invocation order.
  #[serde(rename = "toolsUsed")]
  pub tools_used: Vec<String>,
  /// Total messages exchanged in the reasoning loop.
  #[serde(rename = "messageCount")]
  pub message_count: usize,
}

/// Terminal agent failure, surfaced to the dispatching worker as-is.
#[derive(Debug, Error)]
pub enum AgentError {
  #[error("agent failed: {message}")]
  Terminal { message: String },
}

/// A conversational agent: turns a natural-language query into tool calls
/// and a prose answer.
#[async_trait]
pub trait Agent: Send + Sync {
  async fn invoke(&self, query: &str) -> Result<AgentReply, AgentError>;
}
