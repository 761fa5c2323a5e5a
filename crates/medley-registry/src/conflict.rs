use crate::error::RegistryError;

/// Classifies a registry rejection as "already exists".
///
/// Registries differ in how they signal conflicts, so the matcher is a
/// pluggable predicate rather than a hard-coded rule.
pub trait ConflictRule: Send + Sync {
  fn is_conflict(&self, error: &RegistryError) -> bool;
}

/// Default classification: HTTP 409, or a rejection message carrying an
/// already-exists/duplicate marker. Some registries return 400 with a
/// descriptive message, hence the text check.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardConflictRule;

impl ConflictRule for StandardConflictRule {
  fn is_conflict(&self, error: &RegistryError) -> bool {
    if error.status() == Some(409) {
      return true;
    }

    let message = error.to_string().to_lowercase();
    message.contains("already exists") || message.contains("duplicate")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rejected(status: u16, message: &str) -> RegistryError {
    RegistryError::Rejected {
      status,
      message: message.to_string(),
    }
  }

  #[test]
  fn test_conflict_on_409() {
    assert!(StandardConflictRule.is_conflict(&rejected(409, "conflict")));
  }

  #[test]
  fn test_conflict_on_already_exists_message() {
    assert!(StandardConflictRule.is_conflict(&rejected(400, "Task already EXISTS: send_email")));
  }

  #[test]
  fn test_conflict_on_duplicate_message() {
    assert!(StandardConflictRule.is_conflict(&rejected(400, "Duplicate task definition")));
  }

  #[test]
  fn test_no_conflict_on_other_rejections() {
    assert!(!StandardConflictRule.is_conflict(&rejected(500, "internal error")));
    assert!(!StandardConflictRule.is_conflict(&rejected(400, "invalid payload")));
  }
}
