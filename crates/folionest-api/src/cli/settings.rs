//! Platform settings CLI commands.

use anyhow::Result;
use clap::Subcommand;
use console::style;

use folionest_core::repository::settings::SettingsRepository;
use folionest_types::plan::PricingMode;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings document.
    Show,

    /// Switch the platform pricing mode ("free" or "freemium").
    PricingMode {
        /// The mode to switch to.
        mode: String,
    },
}

pub async fn run(state: &AppState, command: SettingsCommand, json: bool) -> Result<()> {
    match command {
        SettingsCommand::Show => show(state, json).await,
        SettingsCommand::PricingMode { mode } => set_pricing_mode(state, &mode, json).await,
    }
}

async fn show(state: &AppState, json: bool) -> Result<()> {
    let settings = state
        .settings
        .get()
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    println!();
    println!(
        "  {}  {}",
        style("Pricing mode:").bold(),
        style(settings.pricing_mode.to_string()).cyan()
    );
    println!();
    println!("  {}", style("── Free plan ──").dim());
    print_limits(&settings.limits.free);
    println!();
    println!("  {}", style("── Pro plan ──").dim());
    print_limits(&settings.limits.pro);
    println!();

    Ok(())
}

fn print_limits(limits: &folionest_types::plan::PlanLimits) {
    println!("  Portfolios: {}", limits.portfolios);
    println!("  Projects:   {}", limits.projects);
    println!("  Images:     {}", limits.images);
    println!("  Dark mode:  {}", if limits.dark_mode { "yes" } else { "no" });
    println!("  Watermark:  {}", if limits.watermark { "yes" } else { "no" });
}

async fn set_pricing_mode(state: &AppState, mode: &str, json: bool) -> Result<()> {
    let mode = mode.parse::<PricingMode>().map_err(|e| anyhow::anyhow!(e))?;

    let mut settings = state
        .settings
        .get()
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .unwrap_or_default();
    settings.pricing_mode = mode;

    let saved = state
        .settings
        .update(&settings)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    if json {
        println!(
            "{}",
            serde_json::json!({"pricing_mode": saved.pricing_mode.to_string()})
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Pricing mode set to {}",
        style("✓").green().bold(),
        style(saved.pricing_mode.to_string()).bold()
    );
    println!();

    Ok(())
}
