//! # order-cli
//!
//! JSON boundary binary for the Shield Order Normalizer.
//!
//! ## Usage
//! ```text
//! order-cli orders.json      # read the batch from a file
//! order-cli < orders.json    # or from stdin
//! ```
//!
//! Reads a JSON array of platform order records, runs the normalization
//! pipeline, and writes the canonical line items as a JSON array to stdout.
//! Logging goes to stderr and honors `RUST_LOG` (default `info`).

mod error;

use std::env;
use std::fs;
use std::io::Read;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shield_core::{CleanedOrder, InputOrder, OrderTransformer};

use crate::error::CliError;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let input_path = env::args().nth(1);
    let input_orders = read_input_orders(input_path.as_deref())
        .context("could not load the input order batch")?;
    info!(lines = input_orders.len(), "input batch decoded");

    let transformer = OrderTransformer::new();
    let cleaned_orders: Vec<CleanedOrder> = transformer.process(&input_orders);
    info!(
        items = cleaned_orders.len(),
        complementary = cleaned_orders
            .iter()
            .filter(|o| o.is_complementary())
            .count(),
        "batch normalized"
    );

    let output_json =
        serde_json::to_string_pretty(&cleaned_orders).context("failed to encode output orders")?;
    println!("{output_json}");

    Ok(())
}

/// Reads and decodes the input batch from a file path, or stdin when no
/// path was given.
fn read_input_orders(path: Option<&str>) -> Result<Vec<InputOrder>, CliError> {
    let raw = match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            source_name: path.to_string(),
            source,
        })?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|source| CliError::Read {
                    source_name: "stdin".to_string(),
                    source,
                })?;
            raw
        }
    };

    Ok(serde_json::from_str(&raw)?)
}
