//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use expenseflow_core::accounts::{DEFAULT_MONTHLY_BUDGET, DEMO_EMAIL, DEMO_PASSWORD};
use expenseflow_core::{MemoryStore, Store};
use expenseflow_server::ServerConfig;

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a default budget override
pub fn parse_budget(input: &str) -> Result<f64> {
    let budget: f64 = input
        .trim()
        .parse()
        .with_context(|| format!("Invalid budget: {}", input))?;
    if !budget.is_finite() || budget <= 0.0 {
        anyhow::bail!("Budget must be greater than 0: {}", input);
    }
    Ok(budget)
}

/// Build the server configuration from flags and environment variables
pub fn server_config(no_demo: bool, secure_cookies: bool) -> Result<ServerConfig> {
    let allowed_origins = parse_origins(
        &std::env::var("EXPENSEFLOW_ALLOWED_ORIGINS").unwrap_or_default(),
    );

    let default_budget = match std::env::var("EXPENSEFLOW_DEFAULT_BUDGET") {
        Ok(value) if !value.trim().is_empty() => {
            parse_budget(&value).context("EXPENSEFLOW_DEFAULT_BUDGET")?
        }
        _ => DEFAULT_MONTHLY_BUDGET,
    };

    Ok(ServerConfig {
        allowed_origins,
        secure_cookies,
        seed_demo_user: !no_demo,
        default_budget,
    })
}

pub async fn cmd_serve(
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    no_demo: bool,
    secure_cookies: bool,
) -> Result<()> {
    let config = server_config(no_demo, secure_cookies)?;

    println!("🚀 Starting ExpenseFlow web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} (EXPENSEFLOW_ALLOWED_ORIGINS)",
            config.allowed_origins.join(", ")
        );
    }
    println!("   💰 Default budget: {:.2}", config.default_budget);
    if config.seed_demo_user {
        println!("   👤 Demo account: {} / {}", DEMO_EMAIL, DEMO_PASSWORD);
    }
    if !secure_cookies {
        println!("   ⚠️  Session cookies not marked Secure (use --secure-cookies behind HTTPS)");
    }
    println!();
    println!("   Data is kept in memory and lost on shutdown.");
    println!("   Press Ctrl+C to stop");

    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let static_dir = static_dir.map(|p| p.to_string_lossy().to_string());

    expenseflow_server::serve_with_config(store, host, port, static_dir.as_deref(), config)
        .await
        .context("Server failed")
}
