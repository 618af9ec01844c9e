//! ExpenseFlow CLI - Expense tracker with spending analytics
//!
//! Usage:
//!   expenseflow serve --port 5000         Start web server
//!   expenseflow generate --seed 7         Print a synthetic past month
//!   expenseflow analyze --file data.json  Analyze an expense list
//!   expenseflow categories                List categories

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
            no_demo,
            secure_cookies,
        } => {
            commands::cmd_serve(
                &host,
                port,
                static_dir.as_deref(),
                no_demo,
                secure_cookies,
            )
            .await
        }
        Commands::Generate {
            user,
            seed,
            as_of,
            format,
            output,
        } => commands::cmd_generate(
            &user,
            seed,
            as_of.as_deref(),
            &format,
            output.as_deref(),
        ),
        Commands::Analyze { file, budget } => commands::cmd_analyze(&file, budget),
        Commands::Categories => commands::cmd_categories(),
    }
}
