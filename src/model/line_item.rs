use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::money::{Money, Quantity};

/// A single billed line item, keyed by an industry trade code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub code: String,
    pub description: String,
    quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    unit_price: Money,
    #[serde(default)]
    total: Option<Money>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    /// Set only for rental equipment.
    #[serde(default)]
    pub days: Option<u32>,
}

fn default_unit() -> String {
    "EA".to_string()
}

impl LineItem {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        quantity: f64,
        unit_price: Money,
    ) -> Result<Self, AuditError> {
        if quantity < 0.0 {
            return Err(AuditError::invalid_claim(
                "line_item.quantity",
                format!("must be >= 0, got {quantity}"),
            ));
        }
        if unit_price.is_negative() {
            return Err(AuditError::invalid_claim(
                "line_item.unit_price",
                format!("must be >= 0, got {unit_price}"),
            ));
        }
        Ok(LineItem {
            code: code.into(),
            description: description.into(),
            quantity,
            unit: default_unit(),
            unit_price,
            total: None,
            category: None,
            room: None,
            days: None,
        })
    }

    pub fn with_total(mut self, total: Money) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn quantity(&self) -> Quantity {
        Quantity::new(self.quantity)
    }

    /// The stored value if present, otherwise `quantity * unit_price`
    /// (`spec.md` §3 invariant).
    pub fn total(&self) -> Money {
        self.total.unwrap_or(self.unit_price * self.quantity)
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Days the equipment was billed for if set, otherwise the quantity —
    /// the "days if set else quantity" rule used across WTR-003/WTR-005.
    pub fn days_or_quantity(&self) -> f64 {
        self.days.map(|d| d as f64).unwrap_or(self.quantity)
    }

    /// `code + " " + description`, the text the classifier and validators
    /// match patterns against.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.code, self.description)
    }

    /// The 3-letter leading token of the code, upper-cased.
    pub fn code_prefix(&self) -> String {
        self.code.chars().take(3).collect::<String>().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_total_from_quantity_and_price() {
        let item = LineItem::new("WTR_AIRF", "Air Mover", 3.0, Money::from_dollars(35.0)).unwrap();
        assert_eq!(item.total(), Money::from_dollars(105.0));
    }

    #[test]
    fn explicit_total_wins_over_derived() {
        let item = LineItem::new("WTR_AIRF", "Air Mover", 3.0, Money::from_dollars(35.0))
            .unwrap()
            .with_total(Money::from_dollars(999.0));
        assert_eq!(item.total(), Money::from_dollars(999.0));
    }

    #[test]
    fn rejects_negative_quantity() {
        assert!(LineItem::new("GEN", "x", -1.0, Money::ZERO).is_err());
    }

    #[test]
    fn code_prefix_is_first_three_chars_uppercased() {
        let item = LineItem::new("wtr_airf", "Air Mover", 1.0, Money::ZERO).unwrap();
        assert_eq!(item.code_prefix(), "WTR");
    }
}
