mod days;
mod export;
mod revenue;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "smsdash-cli")]
#[command(about = "SMS campaign revenue dashboard command line interface")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Record a day's totals and messages from a JSON file
    Add {
        /// Path to a JSON file shaped like the create-day request body
        #[arg(long)]
        file: PathBuf,
    },
    /// List recent days, newest first
    List {
        /// Number of trailing days to include
        #[arg(long, default_value = "30")]
        days: i64,
    },
    /// Attribute a day's ad revenue to its SMS campaigns
    Analyze {
        /// Daily metric id
        id: i64,
    },
    /// Fetch the ad revenue report for a date
    Revenue {
        /// Report date (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Export daily summaries as CSV
    Export {
        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("smsdash-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = smsdash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Logs go to stderr so CSV on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = smsdash_db::PoolConfig::from_app_config(&config);
    let pool = smsdash_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Migrate => {
            let applied = smsdash_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Add { file } => days::run_add(&pool, &file).await?,
        Commands::List { days } => days::run_list(&pool, days).await?,
        Commands::Analyze { id } => {
            let reporter = smsdash_adsense::RevenueReporter::from_app_config(&config);
            revenue::run_analyze(&pool, &reporter, id).await?;
        }
        Commands::Revenue { date } => {
            let reporter = smsdash_adsense::RevenueReporter::from_app_config(&config);
            revenue::run_revenue(&reporter, date).await;
        }
        Commands::Export { start, end, out } => {
            export::run_export(&pool, start, end, out.as_deref()).await?;
        }
    }

    Ok(())
}

/// Render a fraction as a whole-number-ish percentage, e.g. `0.1234` -> `12.3%`.
fn fmt_percent(fraction: rust_decimal::Decimal) -> String {
    let percent = (fraction * rust_decimal::Decimal::ONE_HUNDRED).round_dp(1);
    format!("{percent}%")
}

/// Shorten `text` to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_owned()
    }
}
