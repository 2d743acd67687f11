//! # Order Transformer
//!
//! Turns a batch of raw platform order lines into canonical line items and
//! appends the complementary items earned by the batch.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One process() Invocation                          │
//! │                                                                         │
//! │  InputOrder ──► ProductParser ──► bundle weight W = Σ multipliers       │
//! │       │                                   │                             │
//! │       │          unit price / W ◄─────────┘                             │
//! │       │                │                                                │
//! │       ▼                ▼                                                │
//! │  CleanedOrder per parsed product (qty = multiplier × order qty)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  accumulate: wiping cloth total, per-cleaner totals (first-seen order)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ... all lines ... then append WIPING-CLOTH + cleaner lines at price 0  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Conservation
//! The value of a raw line is conserved across its bundle: every member
//! gets unit price `raw / W`, so the emitted totals sum back to the raw
//! unit price × raw quantity × W, up to f64 rounding. Nothing is conserved
//! per member, only per raw line.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::CleanerCatalog;
use crate::parser::ProductParser;
use crate::types::{CleanedOrder, InputOrder};
use crate::WIPING_CLOTH_PRODUCT_ID;

// =============================================================================
// Order Transformer
// =============================================================================

/// Transforms raw platform order lines into canonical line items.
///
/// Holds only immutable collaborators (the parser and the cleaner catalog);
/// every [`process`](OrderTransformer::process) call owns its own
/// accumulators, so one transformer can serve any number of batches.
#[derive(Debug, Default)]
pub struct OrderTransformer {
    parser: ProductParser,
    catalog: CleanerCatalog,
}

impl OrderTransformer {
    /// Transformer with the standard cleaner catalog.
    pub fn new() -> Self {
        OrderTransformer::with_catalog(CleanerCatalog::standard())
    }

    /// Transformer with an injected cleaner catalog (test substitution).
    pub fn with_catalog(catalog: CleanerCatalog) -> Self {
        OrderTransformer {
            parser: ProductParser::new(),
            catalog,
        }
    }

    /// Normalizes a batch of raw order lines.
    ///
    /// Lines whose identifier yields no product are dropped whole, with no
    /// complementary contribution. The returned sequence carries its own
    /// 1-based strictly increasing numbering; input `no` values are ignored.
    /// Complementary lines come last: the wiping cloth (omitted when the
    /// batch produced nothing), then one line per cleaner product in the
    /// order its texture was first seen.
    pub fn process(&self, input_orders: &[InputOrder]) -> Vec<CleanedOrder> {
        let mut cleaned_orders = Vec::new();
        let mut next_no: i64 = 1;
        let mut accumulator = ComplementaryAccumulator::default();

        for input_order in input_orders {
            let products = self.parser.parse(&input_order.platform_product_id);
            if products.is_empty() {
                debug!(
                    platform_product_id = %input_order.platform_product_id,
                    "no parseable product in line, dropping"
                );
                continue;
            }

            // Allocate the raw unit price across the bundle by multiplier
            // weight. W >= 1 always: there is at least one product and every
            // multiplier defaults to at least 1.
            let weight: i64 = products.iter().map(|p| p.qty).sum();
            let unit_price = input_order.unit_price / weight as f64;

            for product in &products {
                let qty = product.qty * input_order.qty;

                cleaned_orders.push(CleanedOrder {
                    no: next_no,
                    product_id: product.product_id.clone(),
                    material_id: product.material_id.clone(),
                    model_id: product.model_id.clone(),
                    qty,
                    unit_price,
                    total_price: unit_price * qty as f64,
                });
                next_no += 1;

                accumulator.record(&product.material_id, qty, &self.catalog);
            }
        }

        if accumulator.wiping_cloth_qty > 0 {
            cleaned_orders.push(CleanedOrder::complementary(
                next_no,
                WIPING_CLOTH_PRODUCT_ID,
                accumulator.wiping_cloth_qty,
            ));
            next_no += 1;
        }

        for cleaner_product_id in &accumulator.cleaner_order {
            let qty = accumulator.cleaner_quantities[cleaner_product_id];
            if qty > 0 {
                cleaned_orders.push(CleanedOrder::complementary(
                    next_no,
                    cleaner_product_id.clone(),
                    qty,
                ));
                next_no += 1;
            }
        }

        cleaned_orders
    }
}

// =============================================================================
// Complementary Accumulator
// =============================================================================

/// Running totals for the complementary lines of one batch.
///
/// Cleaner codes are tracked in first-seen order beside the quantity map so
/// the appended cleaner lines come out in a stable, reproducible order.
#[derive(Debug, Default)]
struct ComplementaryAccumulator {
    wiping_cloth_qty: i64,
    cleaner_quantities: HashMap<String, i64>,
    cleaner_order: Vec<String>,
}

impl ComplementaryAccumulator {
    /// Records one emitted product line: every unit earns a cloth, and
    /// units of a texture with a configured cleaner earn that cleaner.
    fn record(&mut self, material_id: &str, qty: i64, catalog: &CleanerCatalog) {
        self.wiping_cloth_qty += qty;

        // Texture is the second hyphen token of the material id.
        let Some(texture_id) = material_id.split('-').nth(1) else {
            return;
        };
        let Some(cleaner_product_id) = catalog.cleaner_for(texture_id) else {
            return;
        };

        match self.cleaner_quantities.get_mut(cleaner_product_id) {
            Some(total) => *total += qty,
            None => {
                self.cleaner_quantities
                    .insert(cleaner_product_id.to_string(), qty);
                self.cleaner_order.push(cleaner_product_id.to_string());
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn process(input_json: &str) -> Vec<CleanedOrder> {
        let input: Vec<InputOrder> = serde_json::from_str(input_json).unwrap();
        OrderTransformer::new().process(&input)
    }

    /// Runs a batch through the transformer and checks the output against
    /// an expected JSON array.
    fn assert_case(input_json: &str, expected_json: &str) {
        let expected: Vec<CleanedOrder> = serde_json::from_str(expected_json).unwrap();
        assert_eq!(process(input_json), expected);
    }

    #[test]
    fn test_single_product_passes_through() {
        assert_case(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "FG0A-CLEAR-IPHONE16PROMAX",
                    "qty": 2,
                    "unitPrice": 50,
                    "totalPrice": 100
                }
            ]"#,
            r#"[
                {
                    "no": 1,
                    "productId": "FG0A-CLEAR-IPHONE16PROMAX",
                    "materialId": "FG0A-CLEAR",
                    "modelId": "IPHONE16PROMAX",
                    "qty": 2,
                    "unitPrice": 50.00,
                    "totalPrice": 100.00
                },
                {
                    "no": 2,
                    "productId": "WIPING-CLOTH",
                    "qty": 2,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                },
                {
                    "no": 3,
                    "productId": "CLEAR-CLEANNER",
                    "qty": 2,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                }
            ]"#,
        );
    }

    #[test]
    fn test_noise_prefix_does_not_change_output() {
        assert_case(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "x2-3&FG0A-CLEAR-IPHONE16PROMAX",
                    "qty": 2,
                    "unitPrice": 50,
                    "totalPrice": 100
                }
            ]"#,
            r#"[
                {
                    "no": 1,
                    "productId": "FG0A-CLEAR-IPHONE16PROMAX",
                    "materialId": "FG0A-CLEAR",
                    "modelId": "IPHONE16PROMAX",
                    "qty": 2,
                    "unitPrice": 50.00,
                    "totalPrice": 100.00
                },
                {
                    "no": 2,
                    "productId": "WIPING-CLOTH",
                    "qty": 2,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                },
                {
                    "no": 3,
                    "productId": "CLEAR-CLEANNER",
                    "qty": 2,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                }
            ]"#,
        );
    }

    #[test]
    fn test_multiplier_expands_quantity_and_splits_price() {
        assert_case(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "x2-3&FG0A-MATTE-IPHONE16PROMAX*3",
                    "qty": 1,
                    "unitPrice": 90,
                    "totalPrice": 90
                }
            ]"#,
            r#"[
                {
                    "no": 1,
                    "productId": "FG0A-MATTE-IPHONE16PROMAX",
                    "materialId": "FG0A-MATTE",
                    "modelId": "IPHONE16PROMAX",
                    "qty": 3,
                    "unitPrice": 30.00,
                    "totalPrice": 90.00
                },
                {
                    "no": 2,
                    "productId": "WIPING-CLOTH",
                    "qty": 3,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                },
                {
                    "no": 3,
                    "productId": "MATTE-CLEANNER",
                    "qty": 3,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                }
            ]"#,
        );
    }

    #[test]
    fn test_two_segment_bundle_with_noise() {
        assert_case(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "FG0A-CLEAR-OPPOA3/%20xFG0A-CLEAR-OPPOA3-B",
                    "qty": 1,
                    "unitPrice": 80,
                    "totalPrice": 80
                }
            ]"#,
            r#"[
                {
                    "no": 1,
                    "productId": "FG0A-CLEAR-OPPOA3",
                    "materialId": "FG0A-CLEAR",
                    "modelId": "OPPOA3",
                    "qty": 1,
                    "unitPrice": 40.00,
                    "totalPrice": 40.00
                },
                {
                    "no": 2,
                    "productId": "FG0A-CLEAR-OPPOA3-B",
                    "materialId": "FG0A-CLEAR",
                    "modelId": "OPPOA3-B",
                    "qty": 1,
                    "unitPrice": 40.00,
                    "totalPrice": 40.00
                },
                {
                    "no": 3,
                    "productId": "WIPING-CLOTH",
                    "qty": 2,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                },
                {
                    "no": 4,
                    "productId": "CLEAR-CLEANNER",
                    "qty": 2,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                }
            ]"#,
        );
    }

    #[test]
    fn test_bundle_with_multiplier_allocates_by_weight() {
        assert_case(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "--FG0A-CLEAR-OPPOA3*2/FG0A-MATTE-OPPOA3",
                    "qty": 1,
                    "unitPrice": 120,
                    "totalPrice": 120
                }
            ]"#,
            r#"[
                {
                    "no": 1,
                    "productId": "FG0A-CLEAR-OPPOA3",
                    "materialId": "FG0A-CLEAR",
                    "modelId": "OPPOA3",
                    "qty": 2,
                    "unitPrice": 40.00,
                    "totalPrice": 80.00
                },
                {
                    "no": 2,
                    "productId": "FG0A-MATTE-OPPOA3",
                    "materialId": "FG0A-MATTE",
                    "modelId": "OPPOA3",
                    "qty": 1,
                    "unitPrice": 40.00,
                    "totalPrice": 40.00
                },
                {
                    "no": 3,
                    "productId": "WIPING-CLOTH",
                    "qty": 3,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                },
                {
                    "no": 4,
                    "productId": "CLEAR-CLEANNER",
                    "qty": 2,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                },
                {
                    "no": 5,
                    "productId": "MATTE-CLEANNER",
                    "qty": 1,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                }
            ]"#,
        );
    }

    #[test]
    fn test_mixed_batch_numbers_globally_and_orders_cleaners_first_seen() {
        assert_case(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "--FG0A-CLEAR-OPPOA3*2/FG0A-MATTE-OPPOA3*2",
                    "qty": 1,
                    "unitPrice": 160,
                    "totalPrice": 160
                },
                {
                    "no": 2,
                    "platformProductId": "FG0A-PRIVACY-IPHONE16PROMAX",
                    "qty": 1,
                    "unitPrice": 50,
                    "totalPrice": 50
                }
            ]"#,
            r#"[
                {
                    "no": 1,
                    "productId": "FG0A-CLEAR-OPPOA3",
                    "materialId": "FG0A-CLEAR",
                    "modelId": "OPPOA3",
                    "qty": 2,
                    "unitPrice": 40.00,
                    "totalPrice": 80.00
                },
                {
                    "no": 2,
                    "productId": "FG0A-MATTE-OPPOA3",
                    "materialId": "FG0A-MATTE",
                    "modelId": "OPPOA3",
                    "qty": 2,
                    "unitPrice": 40.00,
                    "totalPrice": 80.00
                },
                {
                    "no": 3,
                    "productId": "FG0A-PRIVACY-IPHONE16PROMAX",
                    "materialId": "FG0A-PRIVACY",
                    "modelId": "IPHONE16PROMAX",
                    "qty": 1,
                    "unitPrice": 50.00,
                    "totalPrice": 50.00
                },
                {
                    "no": 4,
                    "productId": "WIPING-CLOTH",
                    "qty": 5,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                },
                {
                    "no": 5,
                    "productId": "CLEAR-CLEANNER",
                    "qty": 2,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                },
                {
                    "no": 6,
                    "productId": "MATTE-CLEANNER",
                    "qty": 2,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                },
                {
                    "no": 7,
                    "productId": "PRIVACY-CLEANNER",
                    "qty": 1,
                    "unitPrice": 0.00,
                    "totalPrice": 0.00
                }
            ]"#,
        );
    }

    #[test]
    fn test_unparseable_line_contributes_nothing() {
        let output = process(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "NOT-A-CODE-AT-ALL",
                    "qty": 5,
                    "unitPrice": 10,
                    "totalPrice": 50
                }
            ]"#,
        );
        assert!(output.is_empty());
    }

    #[test]
    fn test_unparseable_line_in_a_batch_is_skipped() {
        let output = process(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "garbage",
                    "qty": 5,
                    "unitPrice": 10,
                    "totalPrice": 50
                },
                {
                    "no": 2,
                    "platformProductId": "FG0A-CLEAR-OPPOA3",
                    "qty": 1,
                    "unitPrice": 40,
                    "totalPrice": 40
                }
            ]"#,
        );
        // The garbage line leaves no trace, not even in the cloth total.
        assert_eq!(output.len(), 3);
        assert_eq!(output[0].product_id, "FG0A-CLEAR-OPPOA3");
        assert_eq!(output[0].no, 1);
        assert_eq!(output[1].product_id, "WIPING-CLOTH");
        assert_eq!(output[1].qty, 1);
        assert_eq!(output[2].product_id, "CLEAR-CLEANNER");
    }

    #[test]
    fn test_empty_batch_yields_empty_output() {
        let transformer = OrderTransformer::new();
        assert!(transformer.process(&[]).is_empty());
    }

    #[test]
    fn test_cloth_total_equals_sum_of_expanded_quantities() {
        let output = process(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "FG0A-CLEAR-OPPOA3*2/FG05-MATTE-A1-B2",
                    "qty": 3,
                    "unitPrice": 30,
                    "totalPrice": 90
                }
            ]"#,
        );
        let product_qty: i64 = output
            .iter()
            .filter(|o| !o.is_complementary())
            .map(|o| o.qty)
            .sum();
        let cloth = output
            .iter()
            .find(|o| o.product_id == WIPING_CLOTH_PRODUCT_ID)
            .unwrap();
        assert_eq!(cloth.qty, product_qty);
        assert_eq!(cloth.qty, 9); // (2 + 1) × 3
    }

    #[test]
    fn test_line_value_is_conserved_across_a_bundle() {
        let output = process(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "FG0A-CLEAR-OPPOA3*3/FG0A-MATTE-OPPOA3*2/FG0A-PRIVACY-OPPOA3",
                    "qty": 2,
                    "unitPrice": 100,
                    "totalPrice": 200
                }
            ]"#,
        );
        // W = 6, so every member gets 100/6 and the emitted totals add back
        // to raw unit price × raw qty × W = 100 × 2 × 6 / 6 per unit weight,
        // i.e. the full 200 of line value.
        let emitted: f64 = output
            .iter()
            .filter(|o| !o.is_complementary())
            .map(|o| o.total_price)
            .sum();
        assert!((emitted - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_texture_earns_cloth_but_no_cleaner() {
        let output = process(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "FG0A-GLOSSY-OPPOA3",
                    "qty": 2,
                    "unitPrice": 50,
                    "totalPrice": 100
                }
            ]"#,
        );
        assert_eq!(output.len(), 2);
        assert_eq!(output[1].product_id, "WIPING-CLOTH");
        assert_eq!(output[1].qty, 2);
    }

    #[test]
    fn test_injected_catalog_substitutes_the_mapping() {
        let transformer =
            OrderTransformer::with_catalog(CleanerCatalog::new([("GLOSSY", "GLOSSY-CLEANNER")]));
        let input: Vec<InputOrder> = serde_json::from_str(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "FG0A-GLOSSY-OPPOA3/FG0A-CLEAR-OPPOA3",
                    "qty": 1,
                    "unitPrice": 80,
                    "totalPrice": 80
                }
            ]"#,
        )
        .unwrap();
        let output = transformer.process(&input);
        // CLEAR has no entry in the substituted catalog; GLOSSY does.
        assert_eq!(output.len(), 4);
        assert_eq!(output[3].product_id, "GLOSSY-CLEANNER");
        assert_eq!(output[3].qty, 1);
    }

    #[test]
    fn test_transformer_is_reusable_across_batches() {
        let transformer = OrderTransformer::new();
        let input: Vec<InputOrder> = serde_json::from_str(
            r#"[
                {
                    "no": 1,
                    "platformProductId": "FG0A-CLEAR-OPPOA3",
                    "qty": 1,
                    "unitPrice": 40,
                    "totalPrice": 40
                }
            ]"#,
        )
        .unwrap();
        let first = transformer.process(&input);
        let second = transformer.process(&input);
        // No state leaks between invocations: numbering and totals restart.
        assert_eq!(first, second);
        assert_eq!(second[0].no, 1);
    }
}
