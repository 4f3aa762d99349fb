use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::money::Money;

/// Insurance policy coverage terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyCoverage {
    pub deductible: Money,
    pub coverage_a: Money,
    pub coverage_b: Money,
    pub coverage_c: Money,
    #[serde(default)]
    pub coverage_d: Option<Money>,
    #[serde(default)]
    pub water_damage_limit: Option<Money>,
    #[serde(default)]
    pub mold_limit: Option<Money>,
    #[serde(default)]
    pub contents_limit: Option<Money>,
}

impl PolicyCoverage {
    pub fn new(
        deductible: Money,
        coverage_a: Money,
        coverage_b: Money,
        coverage_c: Money,
    ) -> Result<Self, AuditError> {
        for (field, value) in [
            ("deductible", deductible),
            ("coverage_a", coverage_a),
            ("coverage_b", coverage_b),
            ("coverage_c", coverage_c),
        ] {
            if value.is_negative() {
                return Err(AuditError::invalid_claim(
                    field,
                    format!("must be non-negative, got {value}"),
                ));
            }
        }
        Ok(PolicyCoverage {
            deductible,
            coverage_a,
            coverage_b,
            coverage_c,
            coverage_d: None,
            water_damage_limit: None,
            mold_limit: None,
            contents_limit: None,
        })
    }

    pub fn with_water_damage_limit(mut self, limit: Money) -> Self {
        self.water_damage_limit = Some(limit);
        self
    }

    pub fn with_mold_limit(mut self, limit: Money) -> Self {
        self.mold_limit = Some(limit);
        self
    }

    pub fn with_contents_limit(mut self, limit: Money) -> Self {
        self.contents_limit = Some(limit);
        self
    }

    pub fn with_coverage_d(mut self, coverage_d: Money) -> Self {
        self.coverage_d = Some(coverage_d);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_deductible() {
        let result = PolicyCoverage::new(
            Money::from_dollars(-1.0),
            Money::ZERO,
            Money::ZERO,
            Money::ZERO,
        );
        assert!(result.is_err());
    }
}
