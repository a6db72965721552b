use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use collabpay::application::engine::AttributionEngine;
use collabpay::domain::attribution::{is_within_window_at, window_end};
use collabpay::domain::payout::CompensationRule;
use collabpay::domain::ports::{ClickStoreBox, ClockRef, OfferStoreBox};
use collabpay::infrastructure::clock::{ManualClock, SystemClock};
use collabpay::infrastructure::in_memory::{InMemoryClickStore, InMemoryOfferStore};
use collabpay::interfaces::csv::booking_reader::BookingReader;
use collabpay::interfaces::csv::click_reader::ClickReader;
use collabpay::interfaces::csv::offer_reader::OfferReader;
use collabpay::interfaces::csv::payout_writer::{PayoutRecord, PayoutWriter};
use collabpay::interfaces::csv::sweep_writer::SweepWriter;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the host/creator/platform split for every booking in a CSV file
    Payouts {
        /// Input bookings CSV file
        input: PathBuf,
    },
    /// Check whether a single click is still inside its attribution window
    Attribution {
        /// When the click happened (RFC 3339)
        #[arg(long)]
        clicked_at: DateTime<FixedOffset>,
        /// Days the click stays attributable
        #[arg(long, allow_hyphen_values = true)]
        window_days: i64,
        /// Evaluate at this instant instead of the current time (RFC 3339)
        #[arg(long)]
        now: Option<DateTime<FixedOffset>>,
    },
    /// Expire every active click and pending offer whose deadline has passed
    Sweep {
        /// Input clicks CSV file
        clicks: PathBuf,
        /// Collaboration offers CSV file to load alongside the clicks
        #[arg(long)]
        offers: Option<PathBuf>,
        #[command(flatten)]
        env: RunEnv,
    },
    /// Accept a pending collaboration offer and print it
    AcceptOffer {
        /// Input offers CSV file
        offers: PathBuf,
        #[arg(long)]
        offer: u32,
        #[command(flatten)]
        env: RunEnv,
    },
    /// Credit a booking to a click and print the resulting payout
    Attribute {
        /// Input clicks CSV file
        clicks: PathBuf,
        #[arg(long)]
        click: u32,
        #[arg(long)]
        booking: u32,
        /// Booking amount in major currency units
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
        #[arg(long, allow_hyphen_values = true)]
        percent_rate: Option<Decimal>,
        #[arg(long, allow_hyphen_values = true)]
        flat_amount: Option<Decimal>,
        #[arg(long, allow_hyphen_values = true)]
        max_payout: Option<Decimal>,
        #[command(flatten)]
        env: RunEnv,
    },
}

#[derive(clap::Args)]
struct RunEnv {
    /// Evaluate at this instant instead of the current time (RFC 3339)
    #[arg(long)]
    now: Option<DateTime<FixedOffset>>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

impl RunEnv {
    fn clock(&self) -> ClockRef {
        match self.now {
            Some(now) => Arc::new(ManualClock::new(now.with_timezone(&Utc))),
            None => Arc::new(SystemClock),
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<PathBuf>) -> Result<(ClickStoreBox, OfferStoreBox)> {
    use collabpay::infrastructure::rocksdb::RocksDBStore;

    if let Some(db_path) = db_path {
        tracing::info!(path = %db_path.display(), "using persistent storage");
        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        return Ok((Box::new(store.clone()), Box::new(store)));
    }
    Ok(in_memory_stores())
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<PathBuf>) -> Result<(ClickStoreBox, OfferStoreBox)> {
    if db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(in_memory_stores())
}

fn in_memory_stores() -> (ClickStoreBox, OfferStoreBox) {
    (
        Box::new(InMemoryClickStore::new()),
        Box::new(InMemoryOfferStore::new()),
    )
}

fn open_engine(env: RunEnv) -> Result<AttributionEngine> {
    let clock = env.clock();
    let (clicks, offers) = open_stores(env.db_path)?;
    Ok(AttributionEngine::new(clicks, offers, clock))
}

/// Loads every readable click from `path`. Clicks already in the store keep
/// their stored state.
async fn import_clicks(engine: &AttributionEngine, path: PathBuf) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let mut imported = 0_usize;
    for click in ClickReader::new(file).clicks() {
        match click {
            Ok(click) => {
                if engine.import_click(click).await.into_diagnostic()? {
                    imported += 1;
                }
            }
            Err(e) => eprintln!("Error reading click: {}", e),
        }
    }
    tracing::info!(imported, "clicks loaded");
    Ok(())
}

/// Loads every readable offer from `path`. Offers already in the store keep
/// their stored state.
async fn import_offers(engine: &AttributionEngine, path: PathBuf) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let mut imported = 0_usize;
    for offer in OfferReader::new(file).offers() {
        match offer {
            Ok(offer) => {
                if engine.import_offer(offer).await.into_diagnostic()? {
                    imported += 1;
                }
            }
            Err(e) => eprintln!("Error reading offer: {}", e),
        }
    }
    tracing::info!(imported, "offers loaded");
    Ok(())
}

fn run_payouts(input: PathBuf) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let reader = BookingReader::new(file);

    let stdout = io::stdout();
    let mut writer = PayoutWriter::new(stdout.lock());
    let mut processed = 0_usize;
    for booking in reader.bookings() {
        match booking {
            Ok(booking) => {
                let record = PayoutRecord::new(booking.booking_id, booking.payout());
                writer.write(&record).into_diagnostic()?;
                processed += 1;
            }
            Err(e) => {
                eprintln!("Error reading booking: {}", e);
            }
        }
    }
    writer.flush().into_diagnostic()?;

    tracing::info!(processed, "payouts written");
    Ok(())
}

fn run_attribution(
    clicked_at: DateTime<FixedOffset>,
    window_days: i64,
    now: Option<DateTime<FixedOffset>>,
) -> Result<()> {
    let now = now.map_or_else(Utc::now, |now| now.with_timezone(&Utc));
    let output = serde_json::json!({
        "clicked_at": clicked_at.to_rfc3339(),
        "window_end": window_end(&clicked_at, window_days).map(|end| end.to_rfc3339()),
        "within_window": is_within_window_at(&clicked_at, window_days, now),
    });
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Payouts { input } => run_payouts(input)?,
        Command::Attribution {
            clicked_at,
            window_days,
            now,
        } => run_attribution(clicked_at, window_days, now)?,
        Command::Sweep {
            clicks,
            offers,
            env,
        } => {
            let engine = open_engine(env)?;
            import_clicks(&engine, clicks).await?;
            if let Some(offers) = offers {
                import_offers(&engine, offers).await?;
            }
            let report = engine.sweep().await.into_diagnostic()?;

            let stdout = io::stdout();
            let mut writer = SweepWriter::new(stdout.lock());
            writer.write_report(&report).into_diagnostic()?;
        }
        Command::AcceptOffer { offers, offer, env } => {
            let engine = open_engine(env)?;
            import_offers(&engine, offers).await?;
            let accepted = engine.accept_offer(offer).await.into_diagnostic()?;
            println!("{}", serde_json::to_string(&accepted).into_diagnostic()?);
        }
        Command::Attribute {
            clicks,
            click,
            booking,
            amount,
            percent_rate,
            flat_amount,
            max_payout,
            env,
        } => {
            let engine = open_engine(env)?;
            import_clicks(&engine, clicks).await?;
            let rule = CompensationRule {
                percent_rate,
                flat_amount,
                max_payout,
            };
            let attribution = engine
                .attribute_booking(click, booking, amount, rule)
                .await
                .into_diagnostic()?;
            println!(
                "{}",
                serde_json::to_string(&attribution).into_diagnostic()?
            );
        }
    }

    Ok(())
}
