//! CLI command definitions and dispatch for the `fnest` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `fnest create user`, `fnest list portfolios`).

pub mod portfolio;
pub mod settings;
pub mod status;
pub mod user;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Run and administer the Folionest portfolio platform.
#[derive(Parser)]
#[command(name = "fnest", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show a published portfolio by slug.
    Show {
        /// Portfolio slug to display.
        slug: String,
    },

    /// Delete a resource.
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Set account or platform values.
    Set {
        #[command(subcommand)]
        resource: SetResource,
    },

    /// Platform settings management.
    Settings {
        #[command(subcommand)]
        action: settings::SettingsCommand,
    },

    /// System status dashboard.
    Status,

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Export spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Provision a user account and print its API key once.
    User {
        /// Account email (unique).
        #[arg(long)]
        email: String,

        /// Display name; defaults to the email's local part.
        #[arg(long)]
        name: Option<String>,

        /// Plan tier ("free" or "pro").
        #[arg(long)]
        plan: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List a user's portfolios.
    Portfolios {
        /// Owner account email.
        #[arg(long)]
        owner: String,

        /// Filter by status ("draft" or "published").
        #[arg(long)]
        status: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DeleteResource {
    /// Permanently delete a portfolio.
    Portfolio {
        /// Portfolio id.
        id: String,

        /// Owner account email (ownership is enforced).
        #[arg(long)]
        owner: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SetResource {
    /// Change an account's plan tier.
    Plan {
        /// Account email.
        #[arg(long)]
        email: String,

        /// New plan ("free" or "pro").
        plan: String,
    },
}
