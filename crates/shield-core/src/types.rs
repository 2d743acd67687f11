//! # Domain Types
//!
//! Boundary and domain types for the order normalization pipeline.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Type Flow                                       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   InputOrder    │   │  ParsedProduct  │   │  CleanedOrder   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  no             │──►│  product_id     │──►│  no (reissued)  │       │
//! │  │  platform id    │   │  material_id    │   │  product_id     │       │
//! │  │  qty            │   │  model_id       │   │  material_id    │       │
//! │  │  unit_price     │   │  qty (×factor)  │   │  model_id       │       │
//! │  │  total_price    │   │                 │   │  qty            │       │
//! │  └─────────────────┘   └─────────────────┘   │  unit_price     │       │
//! │                                              │  total_price    │       │
//! │   raw platform line     one per code in      └─────────────────┘       │
//! │   (JSON boundary)       the identifier        canonical output         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Contract
//! Field names on the wire are camelCase (`platformProductId`, `unitPrice`,
//! ...). The two output price fields round to two decimals at serialization;
//! in-memory values stay exact f64 so allocation arithmetic is not disturbed.

use serde::{Deserialize, Serialize, Serializer};

// =============================================================================
// Input Record
// =============================================================================

/// A raw order line as received from an e-commerce platform.
///
/// `no` and `total_price` are informational only: the pipeline reissues its
/// own sequence numbers and recomputes totals, so neither field is validated
/// or re-checked against the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputOrder {
    /// Platform-assigned line number (informational).
    pub no: i64,

    /// The noisy platform identifier string. May encode a bundle of several
    /// product codes separated by `/`, with garbage around each code and an
    /// optional `*<n>` quantity suffix per code.
    pub platform_product_id: String,

    /// Ordered quantity for this line (positive).
    pub qty: i64,

    /// Unit price for the line as sold on the platform.
    pub unit_price: f64,

    /// Line total as reported by the platform (informational).
    pub total_price: f64,
}

// =============================================================================
// Parser Output
// =============================================================================

/// A single canonical product extracted from a platform identifier.
///
/// Ephemeral: produced fresh per identifier string, consumed by the
/// transformer, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProduct {
    /// Canonical product code, e.g. `FG0A-CLEAR-IPHONE16PROMAX`.
    pub product_id: String,

    /// First two hyphen tokens of the code, e.g. `FG0A-CLEAR`.
    pub material_id: String,

    /// Remaining hyphen tokens of the code, e.g. `IPHONE16PROMAX`.
    pub model_id: String,

    /// Quantity multiplier from a `*<n>` suffix. Always >= 1; segments
    /// without a suffix (or with an unusable one) default to 1.
    pub qty: i64,
}

// =============================================================================
// Output Record
// =============================================================================

/// A normalized order line in the canonical catalog representation.
///
/// Sequence numbers are 1-based and strictly increasing across the whole
/// output batch, assigned at emission time. Complementary items (wiping
/// cloth, cleaners) carry empty material/model ids, which are omitted from
/// the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedOrder {
    /// Output sequence number (1-based, unique across the batch).
    pub no: i64,

    /// Canonical product code.
    pub product_id: String,

    /// Material id (empty and omitted for complementary items).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub material_id: String,

    /// Model id (empty and omitted for complementary items).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model_id: String,

    /// Expanded quantity: multiplier × ordered quantity. Never zero.
    pub qty: i64,

    /// Allocated unit price. Zero for complementary items.
    #[serde(serialize_with = "two_decimals")]
    pub unit_price: f64,

    /// unit_price × qty.
    #[serde(serialize_with = "two_decimals")]
    pub total_price: f64,
}

impl CleanedOrder {
    /// Builds a complementary line (wiping cloth or cleaner): no material or
    /// model id, unit and total price fixed at zero.
    pub fn complementary(no: i64, product_id: impl Into<String>, qty: i64) -> Self {
        CleanedOrder {
            no,
            product_id: product_id.into(),
            material_id: String::new(),
            model_id: String::new(),
            qty,
            unit_price: 0.0,
            total_price: 0.0,
        }
    }

    /// True for lines appended by aggregation rather than parsed from input.
    #[inline]
    pub fn is_complementary(&self) -> bool {
        self.material_id.is_empty() && self.model_id.is_empty()
    }
}

// =============================================================================
// Price Serialization
// =============================================================================

/// Serializes a price rounded to two decimals.
///
/// The display convention for price fields is two-decimal fixed. JSON
/// numbers cannot carry trailing zeros, so the closest faithful encoding is
/// the value rounded to cents; internal arithmetic keeps the exact f64.
fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

// =============================================================================
// Unit Tests
// =============================================================================
