use thiserror::Error;

/// Errors from the remote orchestration registry.
#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("invalid registry url: {0}")]
  InvalidUrl(#[from] url::ParseError),

  /// Connection-level failure before a response was produced.
  #[error("registry request failed: {0}")]
  Transport(#[from] reqwest::Error),

  /// The registry produced a non-success response. The message is taken
  /// from the body's `message` field when the body is JSON, otherwise the
  /// raw body text.
  #[error("registry rejected request ({status}): {message}")]
  Rejected { status: u16, message: String },

  /// Token exchange failed.
  #[error("registry authentication failed: {message}")]
  Auth { message: String },
}

impl RegistryError {
  /// HTTP status of a rejection, when one exists.
  pub fn status(&self) -> Option<u16> {
    match self {
      RegistryError::Rejected { status, .. } => Some(*status),
      _ => None,
    }
  }
}
