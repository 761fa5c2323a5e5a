use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use medley_reconciler::{ReconcileOptions, Reconciler, Target};
use medley_registry::{Credentials, HttpRegistryClient, Mode, StandardConflictRule};

/// Medley - reconciles workflow definitions and their dependencies
/// against an orchestration registry
#[derive(Parser)]
#[command(name = "medley")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Registry base URL (default: $MEDLEY_REGISTRY_URL)
  #[arg(long, global = true)]
  registry_url: Option<String>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Synchronize workflow definitions, task definitions and form templates
  Sync {
    /// Report intended actions without mutating the registry
    #[arg(long, alias = "dry-run")]
    plan: bool,

    /// Keep an existing workflow with the same name and version
    #[arg(long)]
    no_overwrite: bool,

    /// Directory of workflow definition files (JSON)
    #[arg(long, default_value = "./workflows")]
    workflows_dir: PathBuf,

    /// Directory of local form template documents
    #[arg(long, default_value = "./forms")]
    forms_dir: PathBuf,

    /// Single workflow definition file (overrides --workflows-dir)
    file: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Sync {
      plan,
      no_overwrite,
      workflows_dir,
      forms_dir,
      file,
    }) => {
      let registry_url = cli
        .registry_url
        .or_else(|| env::var("MEDLEY_REGISTRY_URL").ok())
        .context("registry url required: pass --registry-url or set MEDLEY_REGISTRY_URL")?;

      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(sync(
        registry_url,
        plan,
        no_overwrite,
        workflows_dir,
        forms_dir,
        file,
      ))?;
    }
    None => {
      println!("medley - use --help to see available commands");
    }
  }

  Ok(())
}

async fn sync(
  registry_url: String,
  plan: bool,
  no_overwrite: bool,
  workflows_dir: PathBuf,
  forms_dir: PathBuf,
  file: Option<PathBuf>,
) -> Result<()> {
  let credentials = load_credentials()?;
  let client = HttpRegistryClient::connect(&registry_url, credentials)
    .await
    .context("failed to connect to registry")?;

  let mode = if plan { Mode::Plan } else { Mode::Apply };
  let options = ReconcileOptions {
    mode,
    overwrite: !no_overwrite,
  };

  println!("Mode: {}", if plan { "PLAN (no changes)" } else { "APPLY" });
  println!(
    "Overwrite workflows: {}",
    if options.overwrite { "YES" } else { "NO" }
  );

  let target = match file {
    Some(file) => Target::File(file),
    None => Target::Directory(workflows_dir),
  };

  let reconciler = Reconciler::new(client, Box::new(StandardConflictRule), forms_dir, options);
  let summary = reconciler
    .run(&target)
    .await
    .context("reconciliation failed")?;

  println!("\n{summary}");
  Ok(())
}

/// Key/secret must be set together; a lone half is a misconfiguration
/// worth failing on rather than silently running anonymous.
fn load_credentials() -> Result<Option<Credentials>> {
  let key_id = env::var("MEDLEY_AUTH_KEY").ok();
  let key_secret = env::var("MEDLEY_AUTH_SECRET").ok();

  match (key_id, key_secret) {
    (Some(key_id), Some(key_secret)) => Ok(Some(Credentials { key_id, key_secret })),
    (None, None) => Ok(None),
    _ => bail!("MEDLEY_AUTH_KEY and MEDLEY_AUTH_SECRET must be set together"),
  }
}
