//! Folionest CLI and REST API entry point.
//!
//! Binary name: `fnest`
//!
//! Parses CLI arguments, initializes database and services, then dispatches
//! to the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, CreateResource, DeleteResource, ListResource, SetResource};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,folionest_api=debug,folionest_core=debug,folionest_infra=debug",
        _ => "trace",
    };
    let enable_otel = matches!(&cli.command, Commands::Serve { otel: true, .. });
    folionest_observe::tracing_setup::init_tracing(filter, enable_otel)
        .map_err(|e| anyhow::anyhow!("tracing init: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "fnest", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (DB, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Create { resource } => match resource {
            CreateResource::User { email, name, plan } => {
                cli::user::create_user(&state, email, name, plan, cli.json).await?;
            }
        },

        Commands::List { resource } => match resource {
            ListResource::Portfolios { owner, status } => {
                cli::portfolio::list_portfolios(&state, &owner, status, cli.json).await?;
            }
        },

        Commands::Show { slug } => {
            cli::portfolio::show_portfolio(&state, &slug, cli.json).await?;
        }

        Commands::Delete { resource } => match resource {
            DeleteResource::Portfolio { id, owner, force } => {
                cli::portfolio::delete_portfolio(&state, &id, &owner, force, cli.json).await?;
            }
        },

        Commands::Set { resource } => match resource {
            SetResource::Plan { email, plan } => {
                cli::user::set_plan(&state, &email, &plan, cli.json).await?;
            }
        },

        Commands::Settings { action } => {
            cli::settings::run(&state, action, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Serve { port, host, .. } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Folionest API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            folionest_observe::tracing_setup::shutdown_tracing();
            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
