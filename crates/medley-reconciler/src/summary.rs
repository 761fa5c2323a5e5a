use std::fmt;

use medley_registry::Outcome;

/// Per-resource-kind tally of ensure outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
  pub registered: usize,
  pub already_exists: usize,
  pub would_register: usize,
}

impl Tally {
  pub fn record(&mut self, outcome: Outcome) {
    match outcome {
      Outcome::Registered => self.registered += 1,
      Outcome::AlreadyExists => self.already_exists += 1,
      Outcome::WouldRegister => self.would_register += 1,
    }
  }

  pub fn total(&self) -> usize {
    self.registered + self.already_exists + self.would_register
  }
}

impl fmt::Display for Tally {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.total() == 0 {
      return f.write_str("none");
    }

    let mut first = true;
    for (count, label) in [
      (self.registered, "registered"),
      (self.already_exists, "already-exists"),
      (self.would_register, "would-register"),
    ] {
      if count == 0 {
        continue;
      }
      if !first {
        f.write_str(", ")?;
      }
      write!(f, "{count} {label}")?;
      first = false;
    }
    Ok(())
  }
}

/// One ensure call and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
  pub name: String,
  pub outcome: Outcome,
}

/// Every ensure call made for one resource kind, in execution order.
#[derive(Debug, Clone, Default)]
pub struct Section {
  pub actions: Vec<Action>,
}

impl Section {
  pub fn record(&mut self, name: impl Into<String>, outcome: Outcome) {
    self.actions.push(Action {
      name: name.into(),
      outcome,
    });
  }

  pub fn tally(&self) -> Tally {
    let mut tally = Tally::default();
    for action in &self.actions {
      tally.record(action.outcome);
    }
    tally
  }
}

/// The report of one reconciliation run: the dependency lists it
/// discovered, every action taken (or planned), and the closing totals.
/// Created fresh per run and printed whole; the report is the run's
/// output, not diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Summary {
  /// Number of workflow definitions processed.
  pub definitions: usize,
  /// Distinct SIMPLE task names discovered, sorted ascending.
  pub required_tasks: Vec<String>,
  /// Form template keys (`name:version`) discovered, in discovery order.
  pub required_templates: Vec<String>,
  pub task_definitions: Section,
  pub form_templates: Section,
  pub workflows: Section,
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
      f,
      "SIMPLE task types discovered ({}):",
      self.required_tasks.len()
    )?;
    if self.required_tasks.is_empty() {
      writeln!(f, "  (none)")?;
    }
    for name in &self.required_tasks {
      writeln!(f, "  - {name}")?;
    }
    writeln!(f)?;

    if self.required_templates.is_empty() {
      writeln!(f, "No form templates referenced.")?;
    } else {
      writeln!(
        f,
        "Form templates required ({}):",
        self.required_templates.len()
      )?;
      for key in &self.required_templates {
        writeln!(f, "  - {key}")?;
      }
    }
    writeln!(f)?;

    for (label, section) in [
      ("taskdef", &self.task_definitions),
      ("form template", &self.form_templates),
      ("workflow", &self.workflows),
    ] {
      for action in &section.actions {
        writeln!(f, "-> {label} {} ... {}", action.name, action.outcome)?;
      }
    }

    writeln!(f, "\nSummary")?;
    writeln!(f, "- Task defs: {}", self.task_definitions.tally())?;
    writeln!(f, "- Form templates: {}", self.form_templates.tally())?;
    write!(
      f,
      "- Workflows: {} ({} definition(s) processed)",
      self.workflows.tally(),
      self.definitions
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tally_display_skips_zero_counts() {
    let mut tally = Tally::default();
    tally.record(Outcome::Registered);
    tally.record(Outcome::AlreadyExists);
    tally.record(Outcome::Registered);

    assert_eq!(tally.to_string(), "2 registered, 1 already-exists");
  }

  #[test]
  fn test_empty_tally_displays_none() {
    assert_eq!(Tally::default().to_string(), "none");
  }

  #[test]
  fn test_section_tallies_recorded_actions() {
    let mut section = Section::default();
    section.record("send_email", Outcome::Registered);
    section.record("notify", Outcome::AlreadyExists);

    let tally = section.tally();
    assert_eq!(tally.registered, 1);
    assert_eq!(tally.already_exists, 1);
    assert_eq!(section.actions[0].name, "send_email");
  }

  #[test]
  fn test_report_lists_discoveries_actions_and_totals() {
    let mut summary = Summary {
      definitions: 1,
      required_tasks: vec!["send_email".to_string()],
      required_templates: vec!["intake:1".to_string()],
      ..Summary::default()
    };
    summary
      .task_definitions
      .record("send_email", Outcome::Registered);
    summary
      .form_templates
      .record("intake:1", Outcome::AlreadyExists);
    summary.workflows.record("email_flow:1", Outcome::Registered);

    let report = summary.to_string();
    assert!(report.contains("SIMPLE task types discovered (1):"));
    assert!(report.contains("  - send_email"));
    assert!(report.contains("Form templates required (1):"));
    assert!(report.contains("  - intake:1"));
    assert!(report.contains("-> taskdef send_email ... registered"));
    assert!(report.contains("-> form template intake:1 ... already-exists"));
    assert!(report.contains("-> workflow email_flow:1 ... registered"));
    assert!(report.contains("- Task defs: 1 registered"));
    assert!(report.contains("- Form templates: 1 already-exists"));
    assert!(report.contains("- Workflows: 1 registered (1 definition(s) processed)"));
  }

  #[test]
  fn test_empty_report_shows_none_markers() {
    let report = Summary::default().to_string();
    assert!(report.contains("SIMPLE task types discovered (0):"));
    assert!(report.contains("  (none)"));
    assert!(report.contains("No form templates referenced."));
    assert!(report.contains("- Task defs: none"));
  }
}
