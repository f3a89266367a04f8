//! CLI administration tool for dynamic-links.
//!
//! Manages link records, shows statistics and checks the database without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link interactively
//! cargo run --bin admin -- link create
//!
//! # Create a link non-interactively
//! cargo run --bin admin -- link create --universal-link "https://trii.co/app/product?id=987" -y
//!
//! # List all links
//! cargo run --bin admin -- link list
//!
//! # Show one link with its short URL and deep link
//! cargo run --bin admin -- link show a3f09c
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)
//! - `BASE_URL`, `APP_SCHEME`, `DEEP_LINK_PATH_MARKER`, store URLs: same as the server

use dynamic_links::application::services::{CreateLink, LinkService};
use dynamic_links::config::{Config, LinkSettings};
use dynamic_links::domain::entities::Link;
use dynamic_links::infrastructure::persistence::PgLinkRepository;
use dynamic_links::server::migrate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing dynamic-links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage link records
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a new link record
    Create {
        /// HTTPS link opening the app when installed
        #[arg(short, long)]
        universal_link: Option<String>,

        /// Custom-scheme link or in-app path
        #[arg(short, long)]
        deep_link: Option<String>,

        /// App Store URL (configured default if omitted)
        #[arg(long)]
        ios_store: Option<String>,

        /// Play Store URL (configured default if omitted)
        #[arg(long)]
        android_store: Option<String>,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Skip prompts and confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all links, newest first
    List,

    /// Show a single link
    Show {
        /// Short code
        id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

type Service = LinkService<PgLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?
        .context("DATABASE_URL (or DB_HOST/DB_USER/DB_PASSWORD/DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let settings = LinkSettings::from_env();
    settings.validate()?;

    match cli.command {
        Commands::Link { action } => {
            let service = LinkService::new(
                Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))),
                settings,
            );
            handle_link_action(action, &service).await?
        }
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &Service) -> Result<()> {
    match action {
        LinkAction::Create {
            universal_link,
            deep_link,
            ios_store,
            android_store,
            title,
            description,
            yes,
        } => {
            let input = CreateLink {
                universal_link,
                deep_link,
                ios_store,
                android_store,
                title,
                description,
            };
            create_link(service, input, yes).await?;
        }
        LinkAction::List => list_links(service).await?,
        LinkAction::Show { id } => show_link(service, &id).await?,
    }

    Ok(())
}

/// Creates a link with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the universal link and deep link unless given (or `--yes`)
/// 2. Display the record to be created
/// 3. Confirm creation (unless `--yes`)
/// 4. Store through the link service, which validates and assigns the code
async fn create_link(service: &Service, mut input: CreateLink, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    if !skip_confirm && input.universal_link.is_none() && input.deep_link.is_none() {
        input.universal_link = prompt_optional("Universal link (https://..., empty to skip)")?;
        input.deep_link = prompt_optional("Deep link (myapp://... or path, empty to skip)")?;
        input.title = prompt_optional("Title (optional)")?;
    }

    println!();
    println!("{}", "Link details:".bright_white().bold());
    print_field("Universal link", input.universal_link.as_deref());
    print_field("Deep link", input.deep_link.as_deref());
    print_field(
        "iOS store",
        Some(
            input
                .ios_store
                .as_deref()
                .unwrap_or(&service.settings().ios_store_url),
        ),
    );
    print_field(
        "Android store",
        Some(
            input
                .android_store
                .as_deref()
                .unwrap_or(&service.settings().android_store_url),
        ),
    );
    print_field("Title", input.title.as_deref());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let link = service
        .create_link(input)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!();
    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!(
        "  Short URL: {}",
        service.short_url(&link.id).bright_yellow().bold()
    );
    println!("  Deep link: {}", service.deep_link_for(&link).cyan());
    println!();

    Ok(())
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   ID      Title                          Created              Clicks
///   ──────────────────────────────────────────────────────────────────
///   a3f09c  Spring promo                   2025-01-15 10:30     42
/// ```
async fn list_links(service: &Service) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin link create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<7} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Title".bright_white().bold(),
        "Created".bright_white().bold(),
        "Clicks".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for link in &links {
        println!(
            "  {:<7} {:<30} {:<20} {}",
            link.id.cyan(),
            link.title.as_deref().unwrap_or("-"),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.click_count.to_string().bright_green()
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Shows every field of one link plus its short URL and deep link.
async fn show_link(service: &Service, id: &str) -> Result<()> {
    let link: Link = service
        .get_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", format!("🔎 Link {}", link.id).bright_blue().bold());
    println!();
    print_field("Short URL", Some(&service.short_url(&link.id)));
    print_field("Deep link (resolved)", Some(&service.deep_link_for(&link)));
    print_field("Universal link", link.universal_link.as_deref());
    print_field("Deep link", link.deep_link.as_deref());
    print_field("iOS store", Some(&link.ios_store));
    print_field("Android store", Some(&link.android_store));
    print_field("Title", link.title.as_deref());
    print_field("Description", link.description.as_deref());
    print_field(
        "Created",
        Some(&link.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
    );
    print_field("Clicks", Some(&link.click_count.to_string()));
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links
/// - Total number of clicks
/// - The most clicked link
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(click_count), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    let top: Option<(String, i64)> =
        sqlx::query_as("SELECT id, click_count FROM links ORDER BY click_count DESC, id LIMIT 1")
            .fetch_optional(pool)
            .await?;

    println!(
        "  Links:      {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:     {}",
        clicks_count.to_string().bright_green().bold()
    );
    if let Some((id, clicks)) = top {
        println!("  Top link:   {} ({} clicks)", id.cyan(), clicks);
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            migrate(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    Ok(Some(value).filter(|v| !v.trim().is_empty()))
}

fn print_field(name: &str, value: Option<&str>) {
    println!(
        "  {:<22} {}",
        format!("{name}:"),
        value.map_or_else(|| "-".bright_black(), |v| v.cyan())
    );
}
