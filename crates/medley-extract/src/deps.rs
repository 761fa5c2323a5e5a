use std::collections::{BTreeSet, HashSet};

use medley_definition::{FormTemplateRef, WorkflowDefinition};

use crate::walk::walk;

/// The downstream resources a set of workflow definitions depends on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dependencies {
  /// Distinct SIMPLE task-definition names, sorted ascending.
  pub task_names: Vec<String>,
  /// Distinct form template references, in discovery order.
  pub form_templates: Vec<FormTemplateRef>,
}

impl Dependencies {
  /// Union the dependencies of every definition.
  ///
  /// Steps without the expected shape (a SIMPLE step with a blank name, a
  /// HUMAN step without a template reference) contribute nothing; absence
  /// of optional metadata is a valid state.
  pub fn collect<'a>(definitions: impl IntoIterator<Item = &'a WorkflowDefinition>) -> Self {
    let mut names = BTreeSet::new();
    let mut seen = HashSet::new();
    let mut form_templates = Vec::new();

    for definition in definitions {
      for step in walk(definition.tasks()) {
        if let Some(name) = step.simple_name() {
          names.insert(name.to_string());
        }
        if let Some(reference) = step.form_template()
          && seen.insert(reference.clone())
        {
          form_templates.push(reference);
        }
      }
    }

    Self {
      task_names: names.into_iter().collect(),
      form_templates,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.task_names.is_empty() && self.form_templates.is_empty()
  }
}
