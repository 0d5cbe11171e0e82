//! Built-in sample dataset
//!
//! A small fixed population used when the server starts with
//! `--seed-sample-data`. The set deliberately includes score ties, a zero
//! score, and negative scores so a freshly seeded board exercises the
//! tie-break ordering and the registry/index split.

use crate::types::CustomerId;
use rust_decimal::Decimal;

/// Sample scores as (customer id, score units with two fractional digits)
const SAMPLE_SCORES: &[(CustomerId, i64)] = &[
    (1001, 125_050), // 1250.50
    (1002, 98_725),  // 987.25
    (1003, 98_725),  // 987.25, ties with 1002
    (1004, 75_000),  // 750.00
    (1005, 64_210),  // 642.10
    (1006, 50_000),  // 500.00
    (1007, 43_375),  // 433.75
    (1008, 30_000),  // 300.00
    (1009, 30_000),  // 300.00, ties with 1008
    (1010, 21_580),  // 215.80
    (1011, 15_000),  // 150.00
    (1012, 9_925),   // 99.25
    (1013, 5_000),   // 50.00
    (1014, 1_275),   // 12.75
    (1015, 25),      // 0.25
    (1016, 0),       // registry only
    (1017, -4_250),  // registry only
    (1018, -10_000), // registry only
];

/// The sample dataset as decimal seed pairs
pub fn sample_customers() -> Vec<(CustomerId, Decimal)> {
    SAMPLE_SCORES
        .iter()
        .map(|&(customer, units)| (customer, Decimal::new(units, 2)))
        .collect()
}
