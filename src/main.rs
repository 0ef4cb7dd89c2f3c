use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use order_book_engine::{driver, OrderBook};

/// Replays a line-delimited limit-order event feed through the matching
/// engine and prints every resulting trade.
#[derive(Parser)]
#[command(name = "order-book-engine")]
#[command(author, version, about = "A continuous-auction limit order book matching engine")]
struct Cli {
    /// Path to the input file of `action,id,side,qty,price` events.
    input: PathBuf,
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: tracing subscriber was already set");
    }

    let cli = Cli::parse();

    if !cli.input.exists() {
        eprintln!("File does not exist: {}", cli.input.display());
        return ExitCode::FAILURE;
    }

    match run(&cli.input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &PathBuf) -> anyhow::Result<()> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let reader = BufReader::new(file);

    let mut book = OrderBook::new();
    book.set_trade_observer(|trade| {
        tracing::info!(
            initiator_id = trade.initiator_id,
            resting_id = trade.resting_id,
            qty = trade.qty,
            price = trade.price,
            "trade"
        );
        println!(
            "TRADE initiator={} resting={} qty={} price={}",
            trade.initiator_id, trade.resting_id, trade.qty, trade.price
        );
    });

    driver::run(reader, &mut book).context("processing input events")?;

    println!("--- final book ---");
    println!("bids (best first):");
    for order in book.bids() {
        println!("  id={} price={} qty={}", order.id, order.price, order.qty);
    }
    println!("asks (best first):");
    for order in book.asks() {
        println!("  id={} price={} qty={}", order.id, order.price, order.qty);
    }

    Ok(())
}
