use std::path::PathBuf;

use medley_catalog::FsFormCatalog;
use medley_definition::{LoadedDefinition, load_dir, load_file};
use medley_extract::Dependencies;
use medley_registry::{ConflictRule, Mode, Registrar, RegistryClient};

use crate::error::ReconcileError;
use crate::summary::Summary;

/// Run options shared by every ensure call in a pass.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileOptions {
  pub mode: Mode,
  /// Replace an existing workflow with the same `(name, version)`.
  pub overwrite: bool,
}

impl Default for ReconcileOptions {
  fn default() -> Self {
    Self {
      mode: Mode::Apply,
      overwrite: true,
    }
  }
}

/// What to reconcile: a directory of definition files or a single file.
#[derive(Debug, Clone)]
pub enum Target {
  Directory(PathBuf),
  File(PathBuf),
}

/// Sequences loader -> extractor -> registrar across all discovered
/// definitions. One run is a self-contained pass with no carry-over
/// between invocations.
pub struct Reconciler<C> {
  registrar: Registrar<C>,
  catalog: FsFormCatalog,
  overwrite: bool,
}

impl<C: RegistryClient> Reconciler<C> {
  pub fn new(
    client: C,
    conflict: Box<dyn ConflictRule>,
    forms_dir: impl Into<PathBuf>,
    options: ReconcileOptions,
  ) -> Self {
    Self {
      registrar: Registrar::new(client, conflict, options.mode),
      catalog: FsFormCatalog::new(forms_dir),
      overwrite: options.overwrite,
    }
  }

  /// Run one reconciliation pass.
  ///
  /// Registration order is fixed: task definitions, then form templates,
  /// then the workflows that reference them, so nothing on the remote
  /// side ever references an undefined dependency. The first non-conflict
  /// error aborts the pass; already-applied registrations are not rolled
  /// back. Identical `(name, version)` workflows appearing in multiple
  /// input files are sent once each, not deduplicated.
  pub async fn run(&self, target: &Target) -> Result<Summary, ReconcileError> {
    let definitions = self.discover(target).await?;
    tracing::info!(count = definitions.len(), "loaded workflow definitions");

    let dependencies = Dependencies::collect(definitions.iter().map(|loaded| &loaded.definition));
    tracing::info!(
      task_names = dependencies.task_names.len(),
      form_templates = dependencies.form_templates.len(),
      "extracted dependencies"
    );

    // Resolve every required template before the first registry call so a
    // partial catalog cannot leave remote state half-mutated. This runs in
    // plan mode too.
    let catalog = self.catalog.load().await?;
    let mut resolved = Vec::with_capacity(dependencies.form_templates.len());
    let mut missing = Vec::new();
    for reference in &dependencies.form_templates {
      match catalog.get(reference) {
        Some(document) => resolved.push(document),
        None => missing.push(reference.clone()),
      }
    }
    if !missing.is_empty() {
      return Err(ReconcileError::MissingTemplates {
        missing,
        dir: self.catalog.root().to_path_buf(),
      });
    }

    let mut summary = Summary {
      definitions: definitions.len(),
      required_tasks: dependencies.task_names.clone(),
      required_templates: dependencies
        .form_templates
        .iter()
        .map(ToString::to_string)
        .collect(),
      ..Summary::default()
    };

    for name in &dependencies.task_names {
      let outcome = self.registrar.ensure_task_definition(name).await?;
      tracing::info!(name = %name, outcome = %outcome, "task definition");
      summary.task_definitions.record(name, outcome);
    }

    for form in &resolved {
      let outcome = self.registrar.ensure_form_template(&form.document).await?;
      tracing::info!(
        template = %form.reference,
        file = %form.file.display(),
        outcome = %outcome,
        "form template"
      );
      summary
        .form_templates
        .record(form.reference.to_string(), outcome);
    }

    for loaded in &definitions {
      let outcome = self
        .registrar
        .ensure_workflow_definition(loaded.definition.document(), self.overwrite)
        .await?;
      tracing::info!(
        workflow = %loaded.definition.id(),
        file = %loaded.file.display(),
        outcome = %outcome,
        "workflow definition"
      );
      summary.workflows.record(loaded.definition.id(), outcome);
    }

    Ok(summary)
  }

  async fn discover(&self, target: &Target) -> Result<Vec<LoadedDefinition>, ReconcileError> {
    let definitions = match target {
      Target::Directory(dir) => load_dir(dir).await?,
      Target::File(file) => vec![load_file(file).await?],
    };
    Ok(definitions)
  }
}
