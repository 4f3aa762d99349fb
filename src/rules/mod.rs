//! Validator modules C4-C7. Each exposes a `register(&mut RuleRegistry)`
//! constructor that adds its rules in spec order; `crate::engine` calls
//! them in the fixed C4→C5→C6→C7 sequence.

pub mod financial;
pub mod flooring;
pub mod general;
pub mod water;

use crate::model::LineItem;
use crate::money::Money;

pub(crate) fn sum_totals<'a>(items: impl Iterator<Item = &'a LineItem>) -> Money {
    items.map(|i| i.total()).sum()
}

pub(crate) fn description_contains_any(text: &str, needles: &[&str]) -> bool {
    let lower = text.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}
