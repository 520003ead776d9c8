//! Maintenance commands for the tour catalog.
//!
//! ```text
//! tnt-admin randomize-prices
//! tnt-admin reset-departures [--date 2025-12-01]
//! ```

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tnt_store::{PostgresConfig, Store};

#[derive(Parser)]
#[command(name = "tnt-admin", about = "Toss & Trips catalog maintenance")]
struct Cli {
    /// Database URL; falls back to DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set every tour to a random price (10–50000, 2 dp) and a random
    /// 10–50% discount.
    RandomizePrices,
    /// Set every tour's departure date.
    ResetDepartures {
        /// Target date; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut postgres = PostgresConfig::default();
    if let Some(url) = cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
    {
        postgres.url = url;
    }

    let store = Store::connect(&postgres)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Command::RandomizePrices => {
            let updated = store.randomize_tour_prices().await?;
            println!("Successfully updated {updated} tours with random prices and discounts.");
        }
        Command::ResetDepartures { date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let updated = store.reset_departure_dates(date).await?;
            println!("Successfully updated {updated} tours with departure date {date}.");
        }
    }

    Ok(())
}
