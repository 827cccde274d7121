//! CLI administration tool for scoped-shortener.
//!
//! Works directly against the configured PostgreSQL database, going through
//! the same shortening service as the HTTP server so ownership rules apply
//! unchanged.
//!
//! # Usage
//!
//! ```bash
//! # List the redirects of an owner
//! cargo run --bin admin -- redirects list --owner 4f0c...
//!
//! # Shorten a URL on behalf of an owner
//! cargo run --bin admin -- redirects shorten --owner 4f0c... --url https://example.com
//!
//! # Delete a redirect (asks for confirmation unless -y)
//! cargo run --bin admin -- redirects delete --owner 4f0c... --short 0ofhov
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*`): PostgreSQL connection settings
//! - `BASE_URL`, `FORWARDED_PREFIX`: used to print full short URLs

use scoped_shortener::api::dto::redirect::ShortenRequest;
use scoped_shortener::application::services::ShortenerService;
use scoped_shortener::config::{Config, StorageBackend};
use scoped_shortener::domain::entities::Redirect;
use scoped_shortener::domain::repositories::UserRepository;
use scoped_shortener::infrastructure::persistence::{PgRedirectRepository, PgUserRepository};
use scoped_shortener::server::connect_pool;
use scoped_shortener::utils::code_generator::FnvCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

type PgShortener = ShortenerService<FnvCodeGenerator, PgRedirectRepository>;

/// CLI tool for managing scoped-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage redirects on behalf of an owner
    Redirects {
        #[command(subcommand)]
        action: RedirectAction,
    },

    /// Inspect users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum RedirectAction {
    /// List all redirects of an owner
    List {
        /// Owner (user) id
        #[arg(short, long)]
        owner: String,
    },

    /// Shorten a URL for an owner
    Shorten {
        #[arg(short, long)]
        owner: String,

        /// Destination URL
        #[arg(short, long)]
        url: String,
    },

    /// Show a single redirect
    Show {
        #[arg(short, long)]
        owner: String,

        /// Short code
        #[arg(short, long)]
        short: String,
    },

    /// Delete a redirect
    Delete {
        #[arg(short, long)]
        owner: String,

        #[arg(short, long)]
        short: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Show a user by id
    Show {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("admin requires STORAGE_BACKEND=postgres");
    }

    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Redirects { action } => handle_redirect_action(action, &pool, &config).await?,
        Commands::Users { action } => handle_user_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches redirect management commands.
async fn handle_redirect_action(
    action: RedirectAction,
    pool: &PgPool,
    config: &Config,
) -> Result<()> {
    let repository = Arc::new(PgRedirectRepository::new(Arc::new(pool.clone())));
    let service = ShortenerService::new(Arc::new(FnvCodeGenerator::new()), repository)
        .with_store_timeout(config.store_timeout());

    match action {
        RedirectAction::List { owner } => list_redirects(&service, &owner).await?,
        RedirectAction::Shorten { owner, url } => {
            shorten(&service, config, &owner, &url).await?;
        }
        RedirectAction::Show { owner, short } => {
            let redirect = service
                .get_redirect_by_short(&short, &owner)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load redirect: {}", e))?;
            print_redirect(&redirect, config);
        }
        RedirectAction::Delete { owner, short, yes } => {
            delete_redirect(&service, config, &owner, &short, yes).await?;
        }
    }

    Ok(())
}

/// Lists an owner's redirects in creation order.
///
/// # Output Format
///
/// ```text
/// 🔗 Redirects of 4f0c...
///
///   Short   Created              URL
///   ──────────────────────────────────────────────────────────────
///   0ofhov  2024-01-15 10:30     https://example.com
/// ```
async fn list_redirects(service: &PgShortener, owner: &str) -> Result<()> {
    println!("{} {}", "🔗 Redirects of".bright_blue().bold(), owner.cyan());
    println!();

    let redirects = service
        .list(owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list redirects: {}", e))?;

    if redirects.is_empty() {
        println!("{}", "  No redirects found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- redirects shorten --owner {} --url <URL>",
            "cargo run --bin".bright_cyan(),
            owner
        );
        return Ok(());
    }

    println!(
        "  {:<7} {:<20} {}",
        "Short".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for redirect in &redirects {
        println!(
            "  {:<7} {:<20} {}",
            redirect.short.bright_yellow(),
            redirect
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            redirect.url.cyan()
        );
    }

    println!();
    println!(
        "  Total: {}",
        redirects.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn shorten(service: &PgShortener, config: &Config, owner: &str, url: &str) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    ShortenRequest {
        url: url.to_string(),
    }
    .validate()
    .with_context(|| format!("Invalid URL '{url}'"))?;

    let redirect = service
        .shorten_url(url, owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "✅ Redirect stored".green().bold());
    println!();
    print_redirect(&redirect, config);

    Ok(())
}

/// Deletes a redirect after confirmation (default: No).
async fn delete_redirect(
    service: &PgShortener,
    config: &Config,
    owner: &str,
    short: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete Redirect".bright_blue().bold());
    println!();

    let redirect = service
        .get_redirect_by_short(short, owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load redirect: {}", e))?;

    print_redirect(&redirect, config);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this redirect?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_short_url(short, owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete redirect: {}", e))?;

    println!();
    println!("{}", "✅ Redirect deleted".green().bold());
    println!();

    Ok(())
}

fn print_redirect(redirect: &Redirect, config: &Config) {
    println!("  Short:     {}", redirect.short.bright_yellow().bold());
    println!("  URL:       {}", redirect.url.cyan());
    println!("  Owner:     {}", redirect.owner_id.bright_black());
    println!(
        "  Created:   {}",
        redirect
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Short URL: {}",
        config.short_url(&redirect.short).bright_white()
    );
    println!();
}

/// Dispatches user inspection commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::Show { id } => {
            println!("{}", "👤 User".bright_blue().bold());
            println!();

            let user = repo
                .get(&id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load user: {}", e))?;

            let redirects: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM redirects WHERE user_id = $1")
                    .bind(&user.id)
                    .fetch_one(pool)
                    .await
                    .context("Failed to count redirects")?;

            println!("  ID:        {}", user.id.cyan());
            println!("  Provider:  {}", user.provider_id.bright_white());
            println!("  Email:     {}", user.email.bright_white());
            println!(
                "  Redirects: {}",
                redirects.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
