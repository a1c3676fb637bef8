//! Terminal rendering for generation results - ASCII only.

use owo_colors::OwoColorize;
use tierforge_common::{HealthResponse, SegmentedTasks, Tier, YearGroup};

const SEPARATOR: &str = "----------------------------------------";

/// Render the three tier cards for a generation result.
pub fn render_cards(topic: &str, year_group: YearGroup, tasks: &SegmentedTasks) {
    println!();
    println!("{}  {}", topic.bold(), format!("({})", year_group).dimmed());
    println!();

    for tier in Tier::ALL {
        let header = match tier {
            Tier::Support => "[SUPPORT]".green().to_string(),
            Tier::Core => "[CORE]".cyan().to_string(),
            Tier::Challenge => "[CHALLENGE]".magenta().to_string(),
        };
        println!("{}", header);

        let text = tasks.get(tier);
        if text.is_empty() {
            println!("{}", "  (no task in model output)".dimmed());
        } else {
            for line in text.lines() {
                println!("  {}", line);
            }
        }
        println!("{}", SEPARATOR.dimmed());
    }

    if !tasks.is_complete() {
        let missing: Vec<String> = tasks
            .missing_markers()
            .iter()
            .map(|t| t.to_string())
            .collect();
        println!(
            "{}",
            format!("[NOTE] model output had no {} section", missing.join(", ")).yellow()
        );
        println!();
    }
}

/// Render the lock state shown once the free preview is used up.
pub fn render_locked(message: &str) {
    println!();
    println!("{}", "[LOCKED] Free preview used".bold().red());
    println!("{}", message);
    println!("Join early access to unlock unlimited generation.");
    println!();
}

pub fn render_copied(target: crate::CopyTarget) {
    let what = match target {
        crate::CopyTarget::Tier(tier) => tier.to_string(),
        crate::CopyTarget::All => "all tiers".to_string(),
    };
    println!("{}", format!("[OK] copied {} to clipboard", what).green());
}

pub fn render_health(health: &HealthResponse) {
    println!("status: {}", health.status);
    println!("version: {}", health.version);
    println!("uptime: {}s", health.uptime_seconds);
    println!("free generations remaining: {}", health.requests_remaining);
}
