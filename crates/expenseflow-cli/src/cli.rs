//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ExpenseFlow - Track expenses and find savings
#[derive(Parser)]
#[command(name = "expenseflow")]
#[command(about = "Expense tracker with past-month analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Do not create the demo account
        #[arg(long)]
        no_demo: bool,

        /// Mark session cookies Secure (serve behind HTTPS)
        #[arg(long)]
        secure_cookies: bool,
    },

    /// Generate a synthetic month of expenses
    Generate {
        /// User id recorded in the logs
        #[arg(short, long, default_value = "cli_user")]
        user: String,

        /// RNG seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Reference date (YYYY-MM-DD); data covers the 30 days before it
        #[arg(long)]
        as_of: Option<String>,

        /// Output format: json, csv
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze a JSON list of expenses
    Analyze {
        /// JSON file containing an array of expenses
        #[arg(short, long)]
        file: PathBuf,

        /// Monthly budget to measure spending against
        #[arg(short, long)]
        budget: Option<f64>,
    },

    /// List categories with generator weights and amount ranges
    Categories,
}
