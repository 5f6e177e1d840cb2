//! CLI for the MSV modlinks verifier.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use msv_core::config;
use std::path::Path;

use commands::{run_checksum, run_verify};

/// Top-level CLI for the MSV modlinks verifier.
#[derive(Debug, Parser)]
#[command(name = "msv")]
#[command(about = "MSV: verify mod catalog links against their SHA-256", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Verify every new or changed manifest in an incoming catalog.
    Verify {
        /// Path to the known-good baseline catalog.
        baseline: String,
        /// Path to the incoming catalog under review.
        incoming: String,
        /// Emit GitHub Actions error annotations for failed checks.
        #[arg(long)]
        annotate: bool,
    },

    /// Compute SHA-256 of a file (e.g. before adding it to a catalog).
    Checksum {
        /// Path to the file.
        path: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Verify {
                baseline,
                incoming,
                annotate,
            } => {
                run_verify(Path::new(&baseline), Path::new(&incoming), &cfg, annotate).await?;
            }
            CliCommand::Checksum { path } => run_checksum(Path::new(&path)).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
