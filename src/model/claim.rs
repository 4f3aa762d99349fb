use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::line_item::LineItem;
use super::policy::PolicyCoverage;
use super::property::PropertyDetails;
use crate::error::AuditError;
use crate::money::Money;

/// Complete claim data submitted for audit. Constructed once and never
/// mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimData {
    pub claim_id: String,
    #[serde(default)]
    pub claim_date: Option<DateTime<Utc>>,
    pub policy: PolicyCoverage,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub property_details: PropertyDetails,
    #[serde(default)]
    gross_claim: Option<Money>,
    #[serde(default)]
    net_claim: Option<Money>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl ClaimData {
    pub fn new(claim_id: impl Into<String>, policy: PolicyCoverage) -> Result<Self, AuditError> {
        let claim_id = claim_id.into();
        if claim_id.trim().is_empty() {
            return Err(AuditError::invalid_claim("claim_id", "must not be empty"));
        }
        Ok(ClaimData {
            claim_id,
            claim_date: None,
            policy,
            line_items: Vec::new(),
            property_details: PropertyDetails::default(),
            gross_claim: None,
            net_claim: None,
            metadata: HashMap::new(),
        })
    }

    pub fn with_line_items(mut self, line_items: Vec<LineItem>) -> Self {
        self.line_items = line_items;
        self
    }

    pub fn with_property_details(mut self, property_details: PropertyDetails) -> Self {
        self.property_details = property_details;
        self
    }

    pub fn with_claim_date(mut self, date: DateTime<Utc>) -> Self {
        self.claim_date = Some(date);
        self
    }

    pub fn with_gross_claim(mut self, gross_claim: Money) -> Self {
        self.gross_claim = Some(gross_claim);
        self
    }

    pub fn with_net_claim(mut self, net_claim: Money) -> Self {
        self.net_claim = Some(net_claim);
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Stored value if present, otherwise `Σ line_items.total`.
    pub fn gross_claim(&self) -> Money {
        self.gross_claim
            .unwrap_or_else(|| self.line_items.iter().map(|i| i.total()).sum())
    }

    /// Stored value if present, otherwise `max(0, gross_claim - deductible)`.
    pub fn net_claim(&self) -> Money {
        self.net_claim
            .unwrap_or_else(|| self.gross_claim().saturating_sub(self.policy.deductible))
    }

    /// The explicitly stored gross claim, if the caller set one (as opposed
    /// to the value `gross_claim()` derives). FIN-007 only fires when both
    /// this and `net_claim_stored` were explicitly supplied.
    pub fn gross_claim_stored(&self) -> Option<Money> {
        self.gross_claim
    }

    pub fn net_claim_stored(&self) -> Option<Money> {
        self.net_claim
    }

    /// Decode and validate a JSON/map value into canonical `ClaimData`.
    /// All field names are snake_case; the invariants above apply once
    /// decoded, same as any constructed value.
    pub fn from_value(value: Value) -> Result<Self, AuditError> {
        let claim: ClaimData = serde_json::from_value(value)
            .map_err(|e| AuditError::invalid_claim("claim", e.to_string()))?;
        if claim.claim_id.trim().is_empty() {
            return Err(AuditError::invalid_claim("claim_id", "must not be empty"));
        }
        Ok(claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::room::Room;

    fn policy(deductible: f64) -> PolicyCoverage {
        PolicyCoverage::new(
            Money::from_dollars(deductible),
            Money::from_dollars(100_000.0),
            Money::from_dollars(10_000.0),
            Money::from_dollars(50_000.0),
        )
        .unwrap()
    }

    #[test]
    fn derives_gross_and_net_claim() {
        let item = LineItem::new("GEN_X", "Repair", 1.0, Money::from_dollars(2000.0)).unwrap();
        let claim = ClaimData::new("CLM-1", policy(500.0))
            .unwrap()
            .with_line_items(vec![item]);

        assert_eq!(claim.gross_claim(), Money::from_dollars(2000.0));
        assert_eq!(claim.net_claim(), Money::from_dollars(1500.0));
    }

    #[test]
    fn net_claim_floors_at_zero() {
        let item = LineItem::new("GEN_X", "Repair", 1.0, Money::from_dollars(100.0)).unwrap();
        let claim = ClaimData::new("CLM-1", policy(5000.0))
            .unwrap()
            .with_line_items(vec![item]);
        assert_eq!(claim.net_claim(), Money::ZERO);
    }

    #[test]
    fn rejects_empty_claim_id() {
        assert!(ClaimData::new("", policy(0.0)).is_err());
    }

    #[test]
    fn total_affected_sqft_round_trips_through_rooms() {
        let rooms = vec![Room::new("Kitchen", 200.0).unwrap()];
        let claim = ClaimData::new("CLM-1", policy(0.0))
            .unwrap()
            .with_property_details(crate::model::property::PropertyDetails::new(rooms));
        assert_eq!(claim.property_details.total_affected_sqft(), 200.0);
    }
}
