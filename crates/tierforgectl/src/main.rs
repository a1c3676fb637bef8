//! Tierforge Control - CLI client for the tierforge daemon.
//!
//! Submits a lesson topic and year group, segments the returned blob into
//! the three tiers and renders them as cards, with optional clipboard
//! export.

mod client;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::str::FromStr;
use tierforge_common::{segment_tasks, Tier, YearGroup};

use crate::client::{DaemonClient, GenerateOutcome};

#[derive(Parser)]
#[command(name = "tierforgectl")]
#[command(about = "Differentiated GCSE English task generator", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon base URL
    #[arg(long, default_value = "http://127.0.0.1:7433")]
    daemon: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate support/core/challenge tasks for a lesson topic
    Generate {
        /// Lesson topic, e.g. "How does Shakespeare present ambition?"
        #[arg(long)]
        topic: String,

        /// Year group (7-11)
        #[arg(long, default_value = "10")]
        year_group: YearGroup,

        /// Copy one tier (support/core/challenge) or all tiers to the clipboard
        #[arg(long, value_name = "TIER")]
        copy: Option<CopyTarget>,
    },

    /// Show daemon health and remaining free generations
    Health,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum CopyTarget {
    Tier(Tier),
    All,
}

impl FromStr for CopyTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "support" => Ok(CopyTarget::Tier(Tier::Support)),
            "core" => Ok(CopyTarget::Tier(Tier::Core)),
            "challenge" => Ok(CopyTarget::Tier(Tier::Challenge)),
            "all" => Ok(CopyTarget::All),
            _ => Err(format!(
                "unknown copy target '{}' (expected support, core, challenge or all)",
                s
            )),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = DaemonClient::new(&cli.daemon);

    match cli.command {
        Commands::Generate {
            topic,
            year_group,
            copy,
        } => {
            match client.generate(&topic, year_group).await? {
                GenerateOutcome::Tasks(blob) => {
                    let tasks = segment_tasks(&blob);
                    output::render_cards(&topic, year_group, &tasks);

                    if let Some(target) = copy {
                        let text = match target {
                            CopyTarget::Tier(tier) => tasks.get(tier).to_string(),
                            CopyTarget::All => tasks.export_all(),
                        };
                        copy_to_clipboard(&text)?;
                        output::render_copied(target);
                    }
                }
                GenerateOutcome::Locked(message) => {
                    output::render_locked(&message);
                }
            }
        }
        Commands::Health => {
            let health = client.health().await?;
            output::render_health(&health);
        }
    }

    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| anyhow::anyhow!("failed to open clipboard: {}", e))?;
    clipboard
        .set_text(text)
        .map_err(|e| anyhow::anyhow!("failed to write clipboard: {}", e))?;
    Ok(())
}
