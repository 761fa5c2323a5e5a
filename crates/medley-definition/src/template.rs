use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a human-interaction form template, keyed `(name, version)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormTemplateRef {
  pub name: String,
  pub version: i64,
}

impl FormTemplateRef {
  pub fn new(name: impl Into<String>, version: i64) -> Self {
    Self {
      name: name.into(),
      version,
    }
  }
}

impl fmt::Display for FormTemplateRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.name, self.version)
  }
}
