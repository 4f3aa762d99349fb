//! Command-line surface, in the teacher's clap-derive style
//! (`examples/iepathos-debtmap/src/cli.rs`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::format::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "claimaudit", version, about = "Rule-based audit engine for property-insurance claim estimates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the audit engine over a claim file and print a scorecard.
    Audit {
        /// Path to a claim JSON file.
        file: PathBuf,

        /// Output format.
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Redact PII in the scorecard before printing it.
        #[arg(long)]
        redact: bool,

        /// Path to a claimaudit.toml config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Redact PII from a claim file and print the result as JSON.
    Redact {
        /// Path to a claim JSON file.
        file: PathBuf,
    },
}

impl clap::ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[OutputFormat::Text, OutputFormat::Json, OutputFormat::Html]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            OutputFormat::Text => clap::builder::PossibleValue::new("text"),
            OutputFormat::Json => clap::builder::PossibleValue::new("json"),
            OutputFormat::Html => clap::builder::PossibleValue::new("html"),
        })
    }
}
