//! CLI administration tool for bing-index.
//!
//! Provides commands for managing API tokens, running health sweeps,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a new API token for a user
//! cargo run --bin admin -- token create --user 6f1c0a52-8f0e-4f1e-9a57-2b7f3c1d9e10
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Production API"
//!
//! # Probe every registered domain once (for cron)
//! cargo run --bin admin -- health sweep
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
//! Same as the server: `DATABASE_URL` (or `DB_*`) and `TOKEN_SIGNING_SECRET`
//! are required; probe settings apply to `health sweep`.

use bing_index::application::services::hash_token;
use bing_index::config::{self, Config};
use bing_index::domain::repositories::TokenRepository;
use bing_index::infrastructure::persistence::PgTokenRepository;
use bing_index::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing bing-index.
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
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Health probes
    Health {
        #[command(subcommand)]
        action: HealthAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Production API", "CI")
        #[arg(short, long)]
        name: Option<String>,

        /// Owner of the token; every request made with it acts as this user
        #[arg(short, long)]
        user: Option<Uuid>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Health subcommands.
#[derive(Subcommand)]
enum HealthAction {
    /// Probe every registered domain once and record the results
    Sweep,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;

    if matches!(cli.command, Commands::Health { .. }) {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
            .init();
    }

    let pool = server::connect_pool(&config).await?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &config, &pool).await?,
        Commands::Health { action } => handle_health_action(action, &config, pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            name,
            user,
            token,
            yes,
        } => {
            create_token(repo, &config.token_signing_secret, name, user, token, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for token name and owner (or use provided)
/// 2. Generate random token or use provided value
/// 3. Display token details with warning
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Hash token with HMAC-SHA256 keyed by `TOKEN_SIGNING_SECRET`
/// 6. Store in database
///
/// The raw token is displayed once and cannot be retrieved later.
async fn create_token(
    repo: Arc<PgTokenRepository>,
    signing_secret: &str,
    name: Option<String>,
    user: Option<Uuid>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Production API")
            .interact_text()?,
    };

    let user_id = match user {
        Some(u) => u,
        None => {
            let raw: String = Input::new()
                .with_prompt("Owner user id (UUID)")
                .interact_text()?;
            raw.trim().parse().context("Owner must be a UUID")?
        }
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Name:  {}", token_name.cyan());
    println!("  User:  {}", user_id.to_string().cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(signing_secret, &token_value);

    repo.create_token(user_id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/domains",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<24} {:<36} {:<17} {:<17} {:<8}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "User".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(110).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<24} {:<36} {:<17} {:<17} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.user_id.to_string(),
            token.created_at.format("%Y-%m-%d %H:%M").to_string(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Numeric input is looked up by ID, anything else by exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  User:  {}", token.user_id.to_string().cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Dispatches health commands.
async fn handle_health_action(action: HealthAction, config: &Config, pool: PgPool) -> Result<()> {
    match action {
        HealthAction::Sweep => {
            println!("{}", "🩺 Health sweep".bright_blue().bold());
            println!();

            let state = server::build_state(config, pool)?;
            let report = state
                .health_service
                .sweep()
                .await
                .map_err(|e| anyhow::anyhow!("Health sweep failed: {}", e))?;

            println!(
                "  Checked:   {}",
                report.checked.to_string().bright_white().bold()
            );
            println!(
                "  Healthy:   {}",
                report.healthy.to_string().bright_green().bold()
            );
            println!(
                "  Unhealthy: {}",
                report.unhealthy.to_string().bright_red().bold()
            );

            if report.failed > 0 {
                println!(
                    "  Failed:    {}",
                    report.failed.to_string().red().bold()
                );
                println!();
                anyhow::bail!("{} health checks could not be recorded", report.failed);
            }

            println!();
        }
    }

    Ok(())
}

/// Displays system statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (domains, verified, unhealthy): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COUNT(*) FILTER (WHERE verification_status = 'verified'),
               COUNT(*) FILTER (WHERE NOT is_healthy)
        FROM domains
        "#,
    )
    .fetch_one(pool)
    .await?;

    let logs_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM domain_health_logs")
        .fetch_one(pool)
        .await?;

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Domains:       {}",
        domains.to_string().bright_green().bold()
    );
    println!(
        "  Verified:      {}",
        verified.to_string().bright_green().bold()
    );
    println!(
        "  Unhealthy:     {}",
        unhealthy.to_string().bright_red().bold()
    );
    println!(
        "  Health logs:   {}",
        logs_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
    );
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
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// 48 characters from `[A-Za-z0-9]` (~286 bits of entropy).
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
