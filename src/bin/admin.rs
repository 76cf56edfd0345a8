//! Operator CLI for snaplink.
//!
//! Talks to the database directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Allocate a short code
//! cargo run --bin admin -- shorten https://example.com/a
//!
//! # Look up a code (no visit is recorded)
//! cargo run --bin admin -- resolve aB3dE5gH9k
//!
//! # List mappings, newest first
//! cargo run --bin admin -- list --limit 20
//!
//! # Show counts and check database connection
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use snaplink::api::dto::shorten::ShortenRequest;
use snaplink::application::metrics::RedirectMetrics;
use snaplink::application::services::Allocator;
use snaplink::domain::repositories::{UrlRepository, VisitRepository};
use snaplink::infrastructure::cache::NullCache;
use snaplink::infrastructure::metrics::MetricsRecorder;
use snaplink::infrastructure::persistence::{PgUrlRepository, PgVisitRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing snaplink.
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
    /// Allocate a short code for a URL
    Shorten {
        /// Absolute URL to shorten
        url: String,
    },

    /// Look up the original URL for a short code
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// List stored mappings, newest first
    List {
        /// Maximum number of rows to print
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },

    /// Show mapping and visit counts
    Stats {
        /// Only count visits for this short code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);
    let urls: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(pool.clone()));

    match cli.command {
        Commands::Shorten { url } => handle_shorten(urls, &url).await?,
        Commands::Resolve { code } => handle_resolve(urls.as_ref(), &code).await?,
        Commands::List { limit } => handle_list(urls.as_ref(), limit).await?,
        Commands::Stats { code } => {
            let visits = PgVisitRepository::new(pool.clone());
            handle_stats(urls.as_ref(), &visits, code.as_deref()).await?
        }
        Commands::Db { action } => handle_db_action(action, urls.as_ref()).await?,
    }

    Ok(())
}

/// Allocates a code through the same path as `POST /shorten`.
///
/// The cache is bypassed; the first redirect populates it.
async fn handle_shorten(urls: Arc<dyn UrlRepository>, url: &str) -> Result<()> {
    ShortenRequest {
        url: url.to_string(),
    }
    .validate()
    .with_context(|| format!("'{}' is not an absolute URL", url))?;

    let metrics: Arc<dyn RedirectMetrics> = Arc::new(MetricsRecorder::new());
    let allocator = Allocator::new(urls, Arc::new(NullCache::new()), metrics);

    let code = allocator.shorten(url).await?;

    println!("{}", "Short code allocated".green().bold());
    println!("  Code: {}", code.bright_white().bold());
    println!("  URL:  {}", url);

    Ok(())
}

async fn handle_resolve(urls: &dyn UrlRepository, code: &str) -> Result<()> {
    match urls.find_original_url(code).await? {
        Some(original_url) => println!("{} -> {}", code.bright_white(), original_url.green()),
        None => println!("{}", format!("Short code '{}' not found", code).yellow()),
    }

    Ok(())
}

async fn handle_list(urls: &dyn UrlRepository, limit: usize) -> Result<()> {
    let all = urls.list_all().await?;

    if all.is_empty() {
        println!("{}", "No short codes yet".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("{:<12} {:<27} {}", "CODE", "CREATED", "URL").bold()
    );
    for url in all.iter().take(limit) {
        println!(
            "{:<12} {:<27} {}",
            url.short_code.bright_white(),
            url.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            url.original_url
        );
    }

    if all.len() > limit {
        println!("{}", format!("... {} more", all.len() - limit).dimmed());
    }

    Ok(())
}

async fn handle_stats(
    urls: &dyn UrlRepository,
    visits: &dyn VisitRepository,
    code: Option<&str>,
) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    match code {
        Some(code) => {
            let count = visits.count_for_code(code).await?;
            println!(
                "  Visits for {}: {}",
                code.bright_white(),
                count.to_string().bright_green().bold()
            );
        }
        None => {
            let total = urls.list_all().await?.len();
            println!(
                "  Short codes: {}",
                total.to_string().bright_green().bold()
            );
        }
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, urls: &dyn UrlRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            urls.ping().await?;

            println!("{}", "Database connection OK".green().bold());
        }
    }

    Ok(())
}
