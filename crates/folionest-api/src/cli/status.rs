//! System status dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display system status: account and portfolio counts, total views,
/// pending builder sessions.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let (published,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM portfolios WHERE status = 'published'")
            .fetch_one(&state.db_pool.reader)
            .await?;
    let (drafts,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM portfolios WHERE status = 'draft'")
            .fetch_one(&state.db_pool.reader)
            .await?;
    let (total_views,): (Option<i64>,) =
        sqlx::query_as("SELECT SUM(view_count) FROM portfolios")
            .fetch_one(&state.db_pool.reader)
            .await?;
    let (sessions,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM builder_drafts")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let total_views = total_views.unwrap_or(0);

    if json {
        let out = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "users": users,
            "portfolios": {
                "published": published,
                "drafts": drafts,
            },
            "total_views": total_views,
            "builder_sessions": sessions,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Folionest v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("  {}", style("── Accounts ──").dim());
    println!("  Users:     {}", style(users).bold());
    println!();
    println!("  {}", style("── Portfolios ──").dim());
    println!("  Published: {}", style(published).green());
    println!("  Drafts:    {}", style(drafts).yellow());
    println!("  Views:     {}", style(total_views).bold());
    if sessions > 0 {
        println!();
        println!("  Builder sessions in progress: {}", style(sessions).cyan());
    }
    println!();
    println!(
        "  Data dir: {}",
        style(state.data_dir.display().to_string()).dim()
    );
    println!();

    Ok(())
}
