//! JSON formatter. The scorecard already derives `Serialize` with the
//! field names and enum representations `spec.md` §6 requires (monetary
//! values as numbers via `Money`'s `into = "f64"`, timestamps as
//! ISO-8601 via `chrono`'s serde feature, enums as snake_case strings).

use crate::model::AuditScorecard;

pub fn render(scorecard: &AuditScorecard) -> String {
    serde_json::to_string_pretty(scorecard).unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::ScorecardBuilder;
    use crate::model::{Category, FindingBuilder, PolicyCoverage, Severity};
    use crate::money::Money;

    #[test]
    fn serializes_money_as_number_and_severity_as_snake_case() {
        let claim = crate::model::ClaimData::new(
            "CLM-JSON",
            PolicyCoverage::new(Money::ZERO, Money::ZERO, Money::ZERO, Money::ZERO).unwrap(),
        )
        .unwrap();
        let mut builder = ScorecardBuilder::new(&claim);
        builder.add_finding(
            FindingBuilder::new("FND-000001", Category::Financial, Severity::Critical, "rule", "Title", "Desc")
                .impact(Money::from_dollars(42.5))
                .build(),
        );
        let json = render(&builder.build());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["findings"][0]["severity"], "critical");
        assert_eq!(value["findings"][0]["potential_impact"], 42.5);
        assert_eq!(value["claim_id"], "CLM-JSON");
    }
}
