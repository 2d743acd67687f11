//! # shield-core: Pure Business Logic for the Shield Order Normalizer
//!
//! This crate is the **heart** of the order normalizer. It turns noisy
//! platform order lines into a canonical catalog representation as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Shield Order Normalizer Architecture                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Platform Order Feed (JSON)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    order-cli (JSON boundary)                    │   │
//! │  │         decode input array ──► process ──► encode output        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shield-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  parser   │  │ transform │  │  catalog  │  │   │
//! │  │   │InputOrder │  │ Product   │  │  Order    │  │ Cleaner   │  │   │
//! │  │   │ Cleaned   │  │ Parser    │  │Transformer│  │ Catalog   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Boundary and domain types (InputOrder, CleanedOrder, ...)
//! - [`parser`] - Canonical product code extraction from platform ids
//! - [`transform`] - Bundle expansion, price allocation, complementary items
//! - [`catalog`] - The texture → cleaner product lookup table
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: a batch transform is deterministic over its input
//!    plus the injected catalog - same input = same output
//! 2. **No I/O**: database, network and file system access are FORBIDDEN here
//! 3. **Total Contract**: the transform never fails; malformed identifiers
//!    are dropped silently and bad multiplier suffixes fall back to 1
//! 4. **Own Numbering**: output sequence numbers are reissued at emission,
//!    strictly increasing across the whole batch
//!
//! ## Example Usage
//!
//! ```rust
//! use shield_core::{InputOrder, OrderTransformer};
//!
//! let transformer = OrderTransformer::new();
//! let batch = vec![InputOrder {
//!     no: 1,
//!     platform_product_id: "FG0A-CLEAR-IPHONE16PROMAX".to_string(),
//!     qty: 2,
//!     unit_price: 50.0,
//!     total_price: 100.0,
//! }];
//!
//! let output = transformer.process(&batch);
//!
//! // One product line plus the wiping cloth and the CLEAR cleaner.
//! assert_eq!(output.len(), 3);
//! assert_eq!(output[0].material_id, "FG0A-CLEAR");
//! assert_eq!(output[1].product_id, "WIPING-CLOTH");
//! assert_eq!(output[2].product_id, "CLEAR-CLEANNER");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod parser;
pub mod transform;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shield_core::OrderTransformer` instead of
// `use shield_core::transform::OrderTransformer`

pub use catalog::CleanerCatalog;
pub use parser::ProductParser;
pub use transform::OrderTransformer;
pub use types::{CleanedOrder, InputOrder, ParsedProduct};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Product code of the complementary wiping cloth.
///
/// Every unit of every normalized product earns one cloth; the aggregated
/// cloth line is appended after all product lines (and omitted entirely for
/// a batch that produced no products).
pub const WIPING_CLOTH_PRODUCT_ID: &str = "WIPING-CLOTH";
