//! Thin CLI entrypoint, in the teacher's style
//! (`examples/iepathos-debtmap/src/main.rs`): initialize tracing, parse
//! args, delegate to the library, print, and map errors to exit codes.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use claimaudit::cli::{Cli, Commands};
use claimaudit::engine::{self, EngineOptions};
use claimaudit::format;
use claimaudit::model::ClaimData;
use claimaudit::redact::Redactor;

fn main() -> Result<()> {
    claimaudit::observability::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Audit { file, format: output_format, redact, config } => {
            let options = match config.or_else(default_config_path) {
                Some(path) => claimaudit::config::load(&path)?,
                None => EngineOptions::default(),
            };

            let claim = load_claim(&file)?;
            let mut engine = engine::AuditEngine::new(options);
            let scorecard = engine.audit(&claim, Some(redact));
            println!("{}", format::render(&scorecard, output_format));
        }
        Commands::Redact { file } => {
            let value = load_claim_value(&file)?;
            let mut redactor = Redactor::new();
            let redacted = redactor.redact_claim_value(value)?;
            println!("{}", serde_json::to_string_pretty(&redacted)?);
        }
    }

    Ok(())
}

/// Falls back to `<config dir>/claimaudit/claimaudit.toml` when `--config`
/// is not given, mirroring how most CLI tools pick up user-level defaults.
fn default_config_path() -> Option<std::path::PathBuf> {
    let path = dirs::config_dir()?.join("claimaudit").join("claimaudit.toml");
    path.exists().then_some(path)
}

fn load_claim_value(path: &std::path::Path) -> Result<serde_json::Value> {
    let contents = fs::read_to_string(path).with_context(|| format!("reading claim file {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing claim file {} as JSON", path.display()))
}

fn load_claim(path: &std::path::Path) -> Result<ClaimData> {
    let value = load_claim_value(path)?;
    ClaimData::from_value(value).map_err(anyhow::Error::from)
}
