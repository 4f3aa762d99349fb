//! Water remediation validator (C5): five rules over drying equipment and
//! contamination category. Grounded on
//! `examples/original_source/src/claim_engine/modules/water_remediation.py`.

use crate::model::{AuditFinding, Category, ClaimData, FindingBuilder, Severity, WaterCategory};
use crate::registry::{Context, RuleDescriptor, RuleRegistry};

use super::sum_totals;

pub fn register(registry: &mut RuleRegistry) {
    registry.add(RuleDescriptor::new(
        "WTR-001",
        "Air Mover Count",
        "Air mover quantity out of the expected range for affected square footage.",
        Category::Leakage,
        Severity::Warning,
        wtr_001,
    ));
    registry.add(RuleDescriptor::new(
        "WTR-002",
        "Dehumidifier Count",
        "Dehumidifier quantity exceeding twice the expected count.",
        Category::Leakage,
        Severity::Warning,
        wtr_002,
    ));
    registry.add(RuleDescriptor::new(
        "WTR-003",
        "Monitoring Labor",
        "Daily monitoring labor inconsistent with equipment days on site.",
        Category::Leakage,
        Severity::Error,
        wtr_003,
    ));
    registry.add(RuleDescriptor::new(
        "WTR-004",
        "Category Mismatch",
        "PPE or antimicrobial work billed against a Category 1 (clean water) loss.",
        Category::Leakage,
        Severity::Error,
        wtr_004,
    ));
    registry.add(RuleDescriptor::new(
        "WTR-005",
        "Equipment Days Consistency",
        "Equipment types billed for inconsistent numbers of days.",
        Category::Leakage,
        Severity::Info,
        wtr_005,
    ));
}

fn wtr_001(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let s = claim.property_details.total_affected_sqft();
    let a: f64 = claim
        .line_items
        .iter()
        .filter(|i| ctx.classifier.parse(&i.code, &i.description).is_air_mover)
        .map(|i| i.quantity().value())
        .sum();

    if a == 0.0 || s <= 0.0 {
        return Vec::new();
    }

    if a > 1.2 * (s / 50.0) {
        let expected_floor = (s / 50.0).floor();
        let impact = crate::money::Money::from_dollars((a - expected_floor) * 35.0);
        return vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Leakage,
            Severity::Warning,
            "Air Mover Count",
            "Air mover count exceeds expected range",
            format!(
                "{a} air movers billed for {s} affected sqft; expected range is [{:.2}, {:.2}].",
                s / 70.0,
                s / 50.0
            ),
        )
        .impact(impact)
        .build()];
    }

    if a < 0.5 * (s / 70.0) {
        return vec![FindingBuilder::new(
            "FND-PENDING",
            Category::SupplementRisk,
            Severity::Info,
            "Air Mover Count",
            "Air mover count below expected range",
            format!(
                "{a} air movers billed for {s} affected sqft, below the expected minimum of {:.2}; drying may be under-covered.",
                s / 70.0
            ),
        )
        .build()];
    }

    Vec::new()
}

fn wtr_002(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let s = claim.property_details.total_affected_sqft();
    let d: f64 = claim
        .line_items
        .iter()
        .filter(|i| ctx.classifier.parse(&i.code, &i.description).is_dehumidifier)
        .map(|i| i.quantity().value())
        .sum();

    if d == 0.0 || s <= 0.0 {
        return Vec::new();
    }

    let expected = (s / 1000.0).max(1.0);
    if d > 2.0 * expected {
        return vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Leakage,
            Severity::Warning,
            "Dehumidifier Count",
            "Dehumidifier count exceeds expected range",
            format!("{d} dehumidifiers billed against an expected count of {expected:.2} for {s} affected sqft."),
        )
        .build()];
    }

    Vec::new()
}

fn wtr_003(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let m: f64 = claim
        .line_items
        .iter()
        .filter(|i| ctx.classifier.parse(&i.code, &i.description).is_daily_monitor)
        .map(|i| i.quantity().value())
        .sum();

    let e = claim
        .line_items
        .iter()
        .filter(|i| {
            let parsed = ctx.classifier.parse(&i.code, &i.description);
            parsed.is_air_mover || parsed.is_dehumidifier || parsed.is_air_scrubber
        })
        .map(|i| i.days_or_quantity())
        .fold(0.0_f64, f64::max);

    if m > 0.0 && e == 0.0 {
        let impact = crate::money::Money::from_dollars(m * 75.0);
        return vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Leakage,
            Severity::Error,
            "Monitoring Labor",
            "Monitoring labor billed with no equipment days on site",
            format!("{m} monitoring visits billed with zero equipment days recorded on the claim."),
        )
        .impact(impact)
        .build()];
    }

    if m > e + 2.0 {
        let impact = crate::money::Money::from_dollars((m - e) * 75.0);
        return vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Leakage,
            Severity::Warning,
            "Monitoring Labor",
            "Monitoring labor exceeds equipment days on site",
            format!("{m} monitoring visits billed against {e} equipment days on site."),
        )
        .impact(impact)
        .build()];
    }

    Vec::new()
}

fn wtr_004(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    if claim.property_details.water_category != Some(WaterCategory::Category1) {
        return Vec::new();
    }

    let flagged: Vec<&crate::model::LineItem> = claim
        .line_items
        .iter()
        .filter(|i| {
            let parsed = ctx.classifier.parse(&i.code, &i.description);
            parsed.is_ppe_hazmat || parsed.is_antimicrobial
        })
        .collect();

    if flagged.is_empty() {
        return Vec::new();
    }

    let impact = sum_totals(flagged.iter().copied());
    vec![FindingBuilder::new(
        "FND-PENDING",
        Category::Leakage,
        Severity::Error,
        "Category Mismatch",
        "PPE/antimicrobial work billed against a Category 1 loss",
        "Water category is 1 (clean water), which does not require PPE or antimicrobial treatment.",
    )
    .affected_items(flagged.iter().map(|i| i.code.clone()))
    .impact(impact)
    .build()]
}

fn wtr_005(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let mut air_mover_max = 0.0_f64;
    let mut air_mover_seen = false;
    let mut dehum_max = 0.0_f64;
    let mut dehum_seen = false;
    let mut scrubber_max = 0.0_f64;
    let mut scrubber_seen = false;

    for item in &claim.line_items {
        let parsed = ctx.classifier.parse(&item.code, &item.description);
        let days = item.days_or_quantity();
        if parsed.is_air_mover {
            air_mover_seen = true;
            air_mover_max = air_mover_max.max(days);
        }
        if parsed.is_dehumidifier {
            dehum_seen = true;
            dehum_max = dehum_max.max(days);
        }
        if parsed.is_air_scrubber {
            scrubber_seen = true;
            scrubber_max = scrubber_max.max(days);
        }
    }

    let mut present = Vec::new();
    if air_mover_seen {
        present.push(air_mover_max);
    }
    if dehum_seen {
        present.push(dehum_max);
    }
    if scrubber_seen {
        present.push(scrubber_max);
    }

    if present.len() < 2 {
        return Vec::new();
    }

    let max = present.iter().cloned().fold(f64::MIN, f64::max);
    let min = present.iter().cloned().fold(f64::MAX, f64::min);

    if max - min > 2.0 {
        return vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Leakage,
            Severity::Info,
            "Equipment Days Consistency",
            "Equipment types billed for inconsistent days",
            format!("Equipment day counts range from {min} to {max} across equipment types, a spread of more than 2 days."),
        )
        .build()];
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::model::{LineItem, PolicyCoverage, PropertyDetails, Room};
    use crate::money::Money;

    fn ctx(classifier: &Classifier) -> Context<'_> {
        Context { classifier }
    }

    fn base_policy() -> PolicyCoverage {
        PolicyCoverage::new(
            Money::from_dollars(500.0),
            Money::from_dollars(100_000.0),
            Money::from_dollars(10_000.0),
            Money::from_dollars(50_000.0),
        )
        .unwrap()
    }

    #[test]
    fn air_mover_leakage_matches_scenario_3() {
        let rooms = vec![
            Room::new("Living Room", 100.0).unwrap(),
            Room::new("Hallway", 50.0).unwrap(),
        ];
        let item = LineItem::new("WTR_AIRF", "Air Mover Rental", 12.0, Money::from_dollars(35.0)).unwrap();
        let claim = ClaimData::new("CLM-3", base_policy())
            .unwrap()
            .with_property_details(PropertyDetails::new(rooms))
            .with_line_items(vec![item]);

        let classifier = Classifier::new();
        let findings = wtr_001(&claim, &ctx(&classifier));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].potential_impact, Some(Money::from_dollars(315.0)));
    }

    #[test]
    fn category_mismatch_matches_scenario_4() {
        let item = LineItem::new("WTR_PPE", "PPE Respirator Kit", 1.0, Money::from_dollars(450.0)).unwrap();
        let claim = ClaimData::new("CLM-4", base_policy())
            .unwrap()
            .with_property_details(PropertyDetails::default().with_water_category(WaterCategory::Category1))
            .with_line_items(vec![item]);

        let classifier = Classifier::new();
        let findings = wtr_004(&claim, &ctx(&classifier));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].potential_impact, Some(Money::from_dollars(450.0)));
    }

    #[test]
    fn skips_air_mover_rule_when_sqft_zero() {
        let item = LineItem::new("WTR_AIRF", "Air Mover", 5.0, Money::from_dollars(35.0)).unwrap();
        let claim = ClaimData::new("CLM-5", base_policy())
            .unwrap()
            .with_line_items(vec![item]);
        let classifier = Classifier::new();
        assert!(wtr_001(&claim, &ctx(&classifier)).is_empty());
    }
}
