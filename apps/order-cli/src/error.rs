//! Boundary error types for the CLI.
//!
//! The core transform is total and produces no errors of its own; everything
//! that can fail lives at this boundary (reading the batch, decoding it).

use thiserror::Error;

/// Errors raised while getting a batch into or out of the process.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file or stream could not be read.
    #[error("failed to read input from {source_name}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// Input was not a valid JSON array of order records.
    #[error("failed to decode input orders: {0}")]
    Decode(#[from] serde_json::Error),
}

// =============================================================================
// Unit Tests
// =============================================================================
