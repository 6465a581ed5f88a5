//! CLI administration tool for the shortener store.
//!
//! Talks to the same store as the HTTP service, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Check store connection
//! cargo run --bin admin -- ping
//!
//! # Show the mapping behind a code
//! cargo run --bin admin -- inspect Xb3_k9Qa
//!
//! # Create a mapping
//! cargo run --bin admin -- create https://example.com/some/long/path
//! ```
//!
//! # Environment Variables
//!
//! Same as the service: `REDIS_URL` or `REDIS_ADDRESS` (+ credentials),
//! `BASE_URL`, `LINK_TTL_SECONDS`, `MAX_ATTEMPTS`, `STORE_TIMEOUT_MS`, `KEY_PREFIX`.

use redis_url_shortener::application::services::LinkService;
use redis_url_shortener::config::{self, Config, StoreBackend};
use redis_url_shortener::domain::entities::ShortCode;
use redis_url_shortener::infrastructure::store;
use redis_url_shortener::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing the shortener store.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Check store connection
    Ping,

    /// Show the long URL and remaining TTL for a code
    Inspect {
        /// Short code (the part after the base URL)
        code: String,
    },

    /// Create a short link
    Create {
        /// URL to shorten
        long_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  STORE_BACKEND=memory: this process sees only its own mappings".yellow()
        );
    }

    let service = connect(&config).await?;

    match cli.command {
        Commands::Ping => ping(&service).await?,
        Commands::Inspect { code } => inspect(&service, code).await?,
        Commands::Create { long_url } => create(&service, &long_url, &config).await?,
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<LinkService> {
    let store = store::connect_from_config(config)
        .await
        .context("Failed to connect to store")?;

    Ok(LinkService::new(
        store,
        Arc::new(RandomCodeGenerator::new()),
        config.link_policy(),
    ))
}

/// Pings the store and reports the result.
async fn ping(service: &LinkService) -> Result<()> {
    println!("{}", "🔍 Checking store connection...".bright_blue());

    if service.store_healthy().await {
        println!("{}", "✅ Store is reachable".green().bold());
        Ok(())
    } else {
        println!("{}", "❌ Store did not answer PING".red().bold());
        anyhow::bail!("store unreachable")
    }
}

/// Prints the mapping stored under a code.
///
/// # Output Format
///
/// ```text
/// 🔎 Xb3_k9Qa
///
///   Long URL: https://example.com/some/long/path
///   Expires:  in 23h 59m 12s
/// ```
async fn inspect(service: &LinkService, code: String) -> Result<()> {
    let code = ShortCode::new(code);

    println!("{}", format!("🔎 {}", code).bright_blue().bold());
    println!();

    let found = service
        .lookup(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read mapping: {}", e))?;

    match found {
        Some((long_url, ttl)) => {
            println!("  {} {}", "Long URL:".bright_white(), long_url.cyan());
            let expires = match ttl {
                Some(ttl) => format!("in {}", format_duration(ttl)),
                None => "never".to_string(),
            };
            println!("  {}  {}", "Expires:".bright_white(), expires.bright_black());
        }
        None => {
            println!("{}", "  No live mapping for this code".yellow());
        }
    }
    println!();

    Ok(())
}

/// Creates a mapping through the same path as `POST /api/shorten`.
async fn create(service: &LinkService, long_url: &str, config: &Config) -> Result<()> {
    let link = service
        .create_short_link(long_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short link: {}", e))?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!("  {}  {}", "Short URL:".bright_white(), link.short_url.bright_yellow().bold());
    println!("  {}   {}", "Long URL:".bright_white(), link.long_url.cyan());
    println!(
        "  {}    {}",
        "Expires:".bright_white(),
        format!("in {}", format_duration(config.link_ttl())).bright_black()
    );
    if link.attempts > 1 {
        println!(
            "  {}",
            format!("({} attempts, collisions on the first codes)", link.attempts).bright_black()
        );
    }
    println!();

    Ok(())
}

fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
