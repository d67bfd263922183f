//! Portfolio CLI commands: list, show, delete.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use folionest_core::repository::portfolio::PortfolioFilter;
use folionest_core::repository::user::UserRepository;
use folionest_types::portfolio::{PortfolioId, PortfolioStatus};
use folionest_types::user::User;

use crate::state::AppState;

async fn owner_by_email(state: &AppState, email: &str) -> Result<User> {
    state
        .users
        .get_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .ok_or_else(|| anyhow::anyhow!("no account with email '{email}'"))
}

/// List a user's portfolios as a table.
pub async fn list_portfolios(
    state: &AppState,
    owner_email: &str,
    status: Option<String>,
    json: bool,
) -> Result<()> {
    let owner = owner_by_email(state, owner_email).await?;

    let status = status
        .as_deref()
        .map(str::parse::<PortfolioStatus>)
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let portfolios = state
        .publish_service
        .list_owned(
            &owner,
            Some(PortfolioFilter {
                status,
                ..PortfolioFilter::default()
            }),
        )
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&portfolios)?);
        return Ok(());
    }

    if portfolios.is_empty() {
        println!();
        println!("  No portfolios for {}", style(owner_email).cyan());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Slug", "Status", "Template", "Views", "Updated"]);

    for p in &portfolios {
        let status_cell = match p.status {
            PortfolioStatus::Published => Cell::new("published").fg(Color::Green),
            PortfolioStatus::Draft => Cell::new("draft").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(&p.slug),
            status_cell,
            Cell::new(p.template.as_str()),
            Cell::new(p.view_count),
            Cell::new(p.updated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

/// Show a published portfolio by slug.
pub async fn show_portfolio(state: &AppState, slug: &str, json: bool) -> Result<()> {
    let portfolio = state.publish_service.resolve_public(slug).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&portfolio)?);
        return Ok(());
    }

    let personal = &portfolio.data.personal;
    println!();
    println!(
        "  {} {}",
        style(&personal.name).cyan().bold(),
        style(format!("(/u/{})", portfolio.slug)).dim()
    );
    println!("  {}", personal.headline);
    println!();
    println!("  {}  {}", style("Template:").bold(), portfolio.template);
    println!("  {}  {}", style("Views:").bold(), portfolio.view_count);
    println!(
        "  {}  {}",
        style("Projects:").bold(),
        portfolio.data.projects.len()
    );
    println!(
        "  {}  {}",
        style("Skills:").bold(),
        portfolio.data.skills.len()
    );
    if let Some(published_at) = portfolio.published_at {
        println!(
            "  {}  {}",
            style("Published:").bold(),
            published_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!();

    Ok(())
}

/// Delete a portfolio after confirmation. Ownership is enforced through the
/// publish service.
pub async fn delete_portfolio(
    state: &AppState,
    id: &str,
    owner_email: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    let id: PortfolioId = id.parse().map_err(|_| anyhow::anyhow!("invalid portfolio id"))?;
    let owner = owner_by_email(state, owner_email).await?;

    let portfolio = state.publish_service.get_owned(&owner, &id).await?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete '/u/{}'? This cannot be undone",
                portfolio.slug
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Aborted.");
            return Ok(());
        }
    }

    state.publish_service.delete(&owner, &id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": true, "slug": portfolio.slug})
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Deleted '/u/{}'",
        style("✓").green().bold(),
        portfolio.slug
    );
    println!();

    Ok(())
}
