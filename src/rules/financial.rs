//! Financial validator (C4): seven coverage and arithmetic rules, all
//! category `financial`. Grounded on
//! `examples/original_source/src/claim_engine/modules/financial.py`, with
//! FIN-001 kept at `warning` severity per `spec.md` §4.3 (the Python
//! original fires it as `error`; the spec's table is authoritative).

use crate::model::{AuditFinding, Category, ClaimData, FindingBuilder, Severity};
use crate::registry::{Context, RuleDescriptor, RuleRegistry};

use super::{description_contains_any, sum_totals};

const COVERAGE_A_PREFIXES: [&str; 7] = ["DRY", "PNT", "DEM", "WTR", "FCC", "FNC", "GEN"];
const COVERAGE_B_NEEDLES: [&str; 5] = ["detached", "garage", "fence", "shed", "outbuilding"];
const MOLD_NEEDLES: [&str; 3] = ["mold", "fungus", "microbial"];

pub fn register(registry: &mut RuleRegistry) {
    registry.add(RuleDescriptor::new(
        "FIN-001",
        "Deductible Application",
        "Flags claims with a non-positive deductible.",
        Category::Financial,
        Severity::Warning,
        fin_001,
    ));
    registry.add(RuleDescriptor::new(
        "FIN-002",
        "Coverage A Limit",
        "Dwelling-trade totals exceeding Coverage A.",
        Category::Financial,
        Severity::Critical,
        fin_002,
    ));
    registry.add(RuleDescriptor::new(
        "FIN-003",
        "Coverage B Limit",
        "Other-structures totals exceeding Coverage B.",
        Category::Financial,
        Severity::Error,
        fin_003,
    ));
    registry.add(RuleDescriptor::new(
        "FIN-004",
        "Coverage C Limit",
        "Contents totals exceeding Coverage C.",
        Category::Financial,
        Severity::Error,
        fin_004,
    ));
    registry.add(RuleDescriptor::new(
        "FIN-005",
        "Water Sub-limit",
        "Water-trade totals exceeding the policy's water damage sub-limit.",
        Category::Financial,
        Severity::Warning,
        fin_005,
    ));
    registry.add(RuleDescriptor::new(
        "FIN-006",
        "Mold Sub-limit",
        "Mold-remediation totals exceeding the policy's mold sub-limit.",
        Category::Financial,
        Severity::Warning,
        fin_006,
    ));
    registry.add(RuleDescriptor::new(
        "FIN-007",
        "Net Claim Calculation",
        "Stored net claim disagrees with gross minus deductible.",
        Category::Financial,
        Severity::Error,
        fin_007,
    ));
}

fn fin_001(claim: &ClaimData, _ctx: &Context<'_>) -> Vec<AuditFinding> {
    if claim.policy.deductible.is_negative() || claim.policy.deductible.is_zero() {
        vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Financial,
            Severity::Warning,
            "Deductible Application",
            "Policy deductible is not positive",
            format!(
                "The policy deductible is {}, which means no deductible is being applied to this claim.",
                claim.policy.deductible
            ),
        )
        .build()]
    } else {
        Vec::new()
    }
}

fn fin_002(claim: &ClaimData, _ctx: &Context<'_>) -> Vec<AuditFinding> {
    let total = sum_totals(
        claim
            .line_items
            .iter()
            .filter(|i| COVERAGE_A_PREFIXES.contains(&i.code_prefix().as_str())),
    );
    if total > claim.policy.coverage_a {
        let overage = total.saturating_sub(claim.policy.coverage_a);
        vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Financial,
            Severity::Critical,
            "Coverage A Limit",
            "Dwelling coverage limit exceeded",
            format!(
                "Dwelling-trade line items total {total}, exceeding Coverage A of {}.",
                claim.policy.coverage_a
            ),
        )
        .impact(overage)
        .build()]
    } else {
        Vec::new()
    }
}

fn fin_003(claim: &ClaimData, _ctx: &Context<'_>) -> Vec<AuditFinding> {
    let total = sum_totals(
        claim
            .line_items
            .iter()
            .filter(|i| description_contains_any(&i.description, &COVERAGE_B_NEEDLES)),
    );
    if total > claim.policy.coverage_b {
        let overage = total.saturating_sub(claim.policy.coverage_b);
        vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Financial,
            Severity::Error,
            "Coverage B Limit",
            "Other structures coverage limit exceeded",
            format!(
                "Other-structures line items total {total}, exceeding Coverage B of {}.",
                claim.policy.coverage_b
            ),
        )
        .impact(overage)
        .build()]
    } else {
        Vec::new()
    }
}

fn fin_004(claim: &ClaimData, _ctx: &Context<'_>) -> Vec<AuditFinding> {
    let total = sum_totals(
        claim
            .line_items
            .iter()
            .filter(|i| i.code_prefix() == "CNT"),
    );
    if total > claim.policy.coverage_c {
        let overage = total.saturating_sub(claim.policy.coverage_c);
        vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Financial,
            Severity::Error,
            "Coverage C Limit",
            "Contents coverage limit exceeded",
            format!(
                "Contents line items total {total}, exceeding Coverage C of {}.",
                claim.policy.coverage_c
            ),
        )
        .impact(overage)
        .build()]
    } else {
        Vec::new()
    }
}

fn fin_005(claim: &ClaimData, _ctx: &Context<'_>) -> Vec<AuditFinding> {
    let Some(limit) = claim.policy.water_damage_limit else {
        return Vec::new();
    };
    let total = sum_totals(
        claim
            .line_items
            .iter()
            .filter(|i| i.code_prefix() == "WTR"),
    );
    if total > limit {
        let overage = total.saturating_sub(limit);
        vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Financial,
            Severity::Warning,
            "Water Sub-limit",
            "Water damage sub-limit exceeded",
            format!("Water-trade line items total {total}, exceeding the water damage sub-limit of {limit}."),
        )
        .impact(overage)
        .build()]
    } else {
        Vec::new()
    }
}

fn fin_006(claim: &ClaimData, _ctx: &Context<'_>) -> Vec<AuditFinding> {
    let Some(limit) = claim.policy.mold_limit else {
        return Vec::new();
    };
    let total = sum_totals(
        claim
            .line_items
            .iter()
            .filter(|i| description_contains_any(&i.description, &MOLD_NEEDLES)),
    );
    if total > limit {
        let overage = total.saturating_sub(limit);
        vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Financial,
            Severity::Warning,
            "Mold Sub-limit",
            "Mold remediation sub-limit exceeded",
            format!("Mold-remediation line items total {total}, exceeding the mold sub-limit of {limit}."),
        )
        .impact(overage)
        .build()]
    } else {
        Vec::new()
    }
}

fn fin_007(claim: &ClaimData, _ctx: &Context<'_>) -> Vec<AuditFinding> {
    let (Some(gross), Some(net)) = (claim.gross_claim_stored(), claim.net_claim_stored()) else {
        return Vec::new();
    };
    let expected_net = gross.saturating_sub(claim.policy.deductible);
    let diff = net.saturating_sub(expected_net).abs() + expected_net.saturating_sub(net).abs();
    if diff.as_dollars() > 0.01 {
        vec![FindingBuilder::new(
            "FND-PENDING",
            Category::Financial,
            Severity::Error,
            "Net Claim Calculation",
            "Stored net claim does not match gross minus deductible",
            format!(
                "Stored net claim {net} does not match gross {gross} minus deductible {}: expected {expected_net}.",
                claim.policy.deductible
            ),
        )
        .build()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::model::{LineItem, PolicyCoverage};
    use crate::money::Money;

    fn ctx(classifier: &Classifier) -> Context<'_> {
        Context { classifier }
    }

    #[test]
    fn coverage_c_breach_matches_scenario_2() {
        let item = LineItem::new("CNT_TV", "Television", 1.0, Money::from_dollars(130_000.0)).unwrap();
        let policy = PolicyCoverage::new(
            Money::from_dollars(500.0),
            Money::from_dollars(200_000.0),
            Money::from_dollars(50_000.0),
            Money::from_dollars(125_000.0),
        )
        .unwrap();
        let claim = ClaimData::new("CLM-2", policy).unwrap().with_line_items(vec![item]);
        let classifier = Classifier::new();
        let findings = fin_004(&claim, &ctx(&classifier));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].potential_impact, Some(Money::from_dollars(5_000.0)));
    }

    #[test]
    fn deductible_arithmetic_matches_scenario_1() {
        let item = LineItem::new("GEN_X", "Repair", 1.0, Money::from_dollars(2000.0)).unwrap();
        let policy = PolicyCoverage::new(
            Money::from_dollars(500.0),
            Money::from_dollars(100_000.0),
            Money::from_dollars(10_000.0),
            Money::from_dollars(50_000.0),
        )
        .unwrap();
        let claim = ClaimData::new("CLM-1", policy).unwrap().with_line_items(vec![item]);
        let classifier = Classifier::new();
        assert!(fin_001(&claim, &ctx(&classifier)).is_empty());
        assert!(fin_007(&claim, &ctx(&classifier)).is_empty());
        assert_eq!(claim.gross_claim(), Money::from_dollars(2000.0));
        assert_eq!(claim.net_claim(), Money::from_dollars(1500.0));
    }

    #[test]
    fn zero_deductible_fires_fin_001() {
        let policy = PolicyCoverage::new(Money::ZERO, Money::ZERO, Money::ZERO, Money::ZERO).unwrap();
        let claim = ClaimData::new("CLM-3", policy).unwrap();
        let classifier = Classifier::new();
        assert_eq!(fin_001(&claim, &ctx(&classifier)).len(), 1);
    }
}
