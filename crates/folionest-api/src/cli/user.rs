//! Account CLI commands: provisioning and plan changes.

use anyhow::Result;
use chrono::Utc;
use console::style;

use folionest_core::repository::user::UserRepository;
use folionest_types::plan::Plan;
use folionest_types::user::{User, UserId};

use crate::http::extractors::auth::{generate_api_key, hash_api_key};
use crate::state::AppState;

/// Provision a user account and print its API key (shown exactly once).
pub async fn create_user(
    state: &AppState,
    email: String,
    name: Option<String>,
    plan: Option<String>,
    json: bool,
) -> Result<()> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        anyhow::bail!("'{email}' is not a valid email address");
    }

    let plan = match plan {
        Some(p) => p.parse::<Plan>().map_err(|e| anyhow::anyhow!(e))?,
        None => Plan::Free,
    };
    let display_name = name.unwrap_or_else(|| {
        email.split('@').next().unwrap_or(&email).to_string()
    });

    let api_key = generate_api_key();
    let now = Utc::now();
    let user = User {
        id: UserId::new(),
        email: email.clone(),
        display_name,
        plan,
        grandfathered: false,
        grandfathered_features: None,
        api_key_hash: Some(hash_api_key(&api_key)),
        created_at: now,
        updated_at: now,
    };

    let user = state
        .users
        .create(&user)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    if json {
        let out = serde_json::json!({
            "id": user.id.to_string(),
            "email": user.email,
            "plan": user.plan.to_string(),
            "api_key": api_key,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} User created!", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Email:").bold(), style(&user.email).cyan());
    println!("  {}  {}", style("Plan:").bold(), user.plan);
    println!("  {}  {}", style("ID:").bold(), style(user.id.to_string()).dim());
    println!();
    println!(
        "  {} API key (save this -- it won't be shown again):",
        style("🔑").bold()
    );
    println!();
    println!("  {}", style(&api_key).yellow().bold());
    println!();

    Ok(())
}

/// Change an account's plan tier.
pub async fn set_plan(state: &AppState, email: &str, plan: &str, json: bool) -> Result<()> {
    let plan = plan.parse::<Plan>().map_err(|e| anyhow::anyhow!(e))?;

    let mut user = state
        .users
        .get_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .ok_or_else(|| anyhow::anyhow!("no account with email '{email}'"))?;

    user.plan = plan;
    user.updated_at = Utc::now();
    let user = state
        .users
        .update(&user)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    if json {
        let out = serde_json::json!({
            "email": user.email,
            "plan": user.plan.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} is now on the {} plan",
        style("✓").green().bold(),
        style(&user.email).cyan(),
        style(user.plan.to_string()).bold(),
    );
    println!();

    Ok(())
}
