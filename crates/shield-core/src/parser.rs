//! # Identifier Parser
//!
//! Extracts canonical product codes from noisy platform identifier strings.
//!
//! ## What a Platform Identifier Looks Like
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "--FG0A-CLEAR-OPPOA3*2/%20xFG0A-MATTE-OPPOA3"                          │
//! │    ──┬─────────────────┬──┬──┬──────────────────                        │
//! │      │                 │  │  └─ second bundle member (noise prefix)     │
//! │      │                 │  └─ bundle delimiter                           │
//! │      │                 └─ quantity multiplier suffix                    │
//! │      └─ canonical code: family token - texture - model tokens           │
//! │                                                                         │
//! │  Yields:  FG0A-CLEAR-OPPOA3  (material FG0A-CLEAR, model OPPOA3, ×2)   │
//! │           FG0A-MATTE-OPPOA3  (material FG0A-MATTE, model OPPOA3, ×1)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Policy
//! Segments that contain no valid code contribute nothing; this is a silent
//! drop, never an error. A segment with several candidate codes uses only
//! the first match. Unusable `*<n>` suffixes fall back to multiplier 1.

use regex::Regex;
use tracing::debug;

use crate::types::ParsedProduct;

// =============================================================================
// Product Parser
// =============================================================================

/// Parses platform-specific product identifiers into canonical products.
///
/// Holds the compiled code pattern, so construct once and reuse:
///
/// ```rust
/// use shield_core::parser::ProductParser;
///
/// let parser = ProductParser::new();
/// let products = parser.parse("x2-3&FG0A-CLEAR-IPHONE16PROMAX");
/// assert_eq!(products[0].product_id, "FG0A-CLEAR-IPHONE16PROMAX");
/// assert_eq!(products[0].material_id, "FG0A-CLEAR");
/// assert_eq!(products[0].model_id, "IPHONE16PROMAX");
/// assert_eq!(products[0].qty, 1);
/// ```
#[derive(Debug)]
pub struct ProductParser {
    /// Canonical code pattern: family token (`FG0` + one letter/digit),
    /// hyphen, uppercase texture token, hyphen, alphanumeric model tokens,
    /// optionally followed by a `*<digits>` multiplier.
    code_pattern: Regex,
}

impl ProductParser {
    /// Compiles the code pattern and returns a ready parser.
    pub fn new() -> Self {
        ProductParser {
            // The grammar is fixed; the pattern is a compile-time constant
            // and cannot fail to build.
            code_pattern: Regex::new(r"(FG0[0-9A-Z]-[A-Z]+-[A-Z0-9\-]+)(?:\*(\d+))?")
                .expect("valid product code pattern"),
        }
    }

    /// Parses one platform identifier into zero or more canonical products.
    ///
    /// The identifier is split on `/` into bundle segments, order preserved.
    /// Each segment is scanned for the first code match; surrounding noise
    /// (URL-encoded fragments, stray prefixes) is ignored. Segments without
    /// a match, and matched codes with fewer than three hyphen tokens, are
    /// skipped. An empty result means the caller should drop the whole line.
    pub fn parse(&self, platform_product_id: &str) -> Vec<ParsedProduct> {
        let mut products = Vec::new();

        for segment in platform_product_id.split('/') {
            let Some(captures) = self.code_pattern.captures(segment) else {
                debug!(segment, "no product code in segment, skipping");
                continue;
            };

            // Capture 1 is the code without any `*<n>` suffix.
            let product_id = &captures[1];
            let parts: Vec<&str> = product_id.split('-').collect();
            if parts.len() < 3 {
                debug!(segment, product_id, "malformed product code, skipping");
                continue;
            }

            let material_id = format!("{}-{}", parts[0], parts[1]);
            let model_id = parts[2..].join("-");

            // Capture 2 is the multiplier digits, when present. Anything
            // unusable (unparseable, zero) falls back to 1.
            let qty = captures
                .get(2)
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(1);

            products.push(ParsedProduct {
                product_id: product_id.to_string(),
                material_id,
                model_id,
                qty,
            });
        }

        products
    }
}

impl Default for ProductParser {
    fn default() -> Self {
        ProductParser::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
