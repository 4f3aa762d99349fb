//! Flooring validator (C6): waste, tear-out overlap, floor prep, and
//! material-matching checks over flooring line items.

use std::collections::HashSet;

use crate::model::{AuditFinding, Category, ClaimData, FindingBuilder, LineItem, Severity};
use crate::money::Money;
use crate::registry::{Context, RuleDescriptor, RuleRegistry};

use super::sum_totals;

pub fn register(registry: &mut RuleRegistry) {
    registry.add(RuleDescriptor::new(
        "FLR-001",
        "Waste Audit",
        "Flooring waste billed in excess of the trade's typical allowance.",
        Category::Leakage,
        Severity::Warning,
        flr_001,
    ));
    registry.add(RuleDescriptor::new(
        "FLR-002",
        "Carpet/Pad Tear-out Overlap",
        "Separate carpet and pad tear-out line items billed for the same removal.",
        Category::Leakage,
        Severity::Warning,
        flr_002,
    ));
    registry.add(RuleDescriptor::new(
        "FLR-003",
        "Floor Prep Missing",
        "Hardwood or tile install billed with no floor leveling/prep line item.",
        Category::SupplementRisk,
        Severity::Info,
        flr_003,
    ));
    registry.add(RuleDescriptor::new(
        "FLR-004",
        "Material Matching",
        "Flooring installed across multiple rooms with no transition line item.",
        Category::SupplementRisk,
        Severity::Info,
        flr_004,
    ));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FlooringType {
    Carpet,
    Hardwood,
    Tile,
    VinylOrLaminate,
}

impl FlooringType {
    fn threshold(self) -> f64 {
        match self {
            FlooringType::Carpet => 0.10,
            FlooringType::Hardwood => 0.15,
            FlooringType::Tile => 0.15,
            FlooringType::VinylOrLaminate => 0.10,
        }
    }

    fn label(self) -> &'static str {
        match self {
            FlooringType::Carpet => "carpet",
            FlooringType::Hardwood => "hardwood",
            FlooringType::Tile => "tile",
            FlooringType::VinylOrLaminate => "vinyl/laminate",
        }
    }
}

fn flr_001(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    for flooring_type in [
        FlooringType::Carpet,
        FlooringType::Hardwood,
        FlooringType::Tile,
        FlooringType::VinylOrLaminate,
    ] {
        let items: Vec<&LineItem> = claim
            .line_items
            .iter()
            .filter(|i| flooring_type_of(ctx, i) == Some(flooring_type))
            .collect();
        if items.is_empty() {
            continue;
        }

        let material = sum_totals(
            items
                .iter()
                .copied()
                .filter(|i| ctx.classifier.parse(&i.code, &i.description).is_install),
        );
        let waste = sum_totals(
            items
                .iter()
                .copied()
                .filter(|i| ctx.classifier.parse(&i.code, &i.description).is_waste),
        );

        if material.is_zero() {
            continue;
        }

        let ratio = waste.as_dollars() / material.as_dollars();
        let threshold = flooring_type.threshold();
        if ratio > threshold {
            let impact = waste.saturating_sub(material * threshold);
            findings.push(
                FindingBuilder::new(
                    "FND-PENDING",
                    Category::Leakage,
                    Severity::Warning,
                    "Waste Audit",
                    format!("{} waste exceeds typical allowance", flooring_type.label()),
                    format!(
                        "{} waste is {waste} against {material} of material ({:.1}%), above the {:.0}% allowance.",
                        flooring_type.label(),
                        ratio * 100.0,
                        threshold * 100.0
                    ),
                )
                .impact(impact)
                .build(),
            );
        }
    }

    findings
}

fn flooring_type_of(ctx: &Context<'_>, item: &LineItem) -> Option<FlooringType> {
    let parsed = ctx.classifier.parse(&item.code, &item.description);
    if parsed.is_carpet {
        Some(FlooringType::Carpet)
    } else if parsed.is_hardwood {
        Some(FlooringType::Hardwood)
    } else if parsed.is_tile {
        Some(FlooringType::Tile)
    } else if parsed.is_laminate || parsed.is_vinyl {
        Some(FlooringType::VinylOrLaminate)
    } else {
        None
    }
}

fn flr_002(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let tear_out: Vec<&LineItem> = claim
        .line_items
        .iter()
        .filter(|i| ctx.classifier.parse(&i.code, &i.description).is_tear_out)
        .collect();

    let carpet_only: Vec<&LineItem> = tear_out
        .iter()
        .copied()
        .filter(|i| {
            let parsed = ctx.classifier.parse(&i.code, &i.description);
            parsed.is_carpet && !parsed.is_pad
        })
        .collect();
    let pad_only: Vec<&LineItem> = tear_out
        .iter()
        .copied()
        .filter(|i| {
            let parsed = ctx.classifier.parse(&i.code, &i.description);
            parsed.is_pad && !parsed.is_carpet
        })
        .collect();

    if carpet_only.is_empty() || pad_only.is_empty() {
        return Vec::new();
    }

    let impact = sum_totals(pad_only.iter().copied());
    let affected: Vec<String> = carpet_only
        .iter()
        .chain(pad_only.iter())
        .map(|i| i.code.clone())
        .collect();

    vec![FindingBuilder::new(
        "FND-PENDING",
        Category::Leakage,
        Severity::Warning,
        "Carpet/Pad Tear-out Overlap",
        "Carpet and pad tear-out billed separately",
        "Carpet tear-out and pad tear-out are billed as separate line items for the same removal.",
    )
    .affected_items(affected)
    .impact(impact)
    .build()]
}

fn flr_003(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let mut findings = Vec::new();
    let has_leveling = claim
        .line_items
        .iter()
        .any(|i| ctx.classifier.parse(&i.code, &i.description).is_leveling);

    if !has_leveling {
        let hardwood_install = claim.line_items.iter().any(|i| {
            let parsed = ctx.classifier.parse(&i.code, &i.description);
            parsed.is_hardwood && parsed.is_install
        });
        if hardwood_install {
            findings.push(
                FindingBuilder::new(
                    "FND-PENDING",
                    Category::SupplementRisk,
                    Severity::Info,
                    "Floor Prep Missing",
                    "Hardwood install with no floor prep line item",
                    "Hardwood install/replace is billed with no leveling or subfloor prep line item; prep is likely to be supplemented later.",
                )
                .build(),
            );
        }

        let tile_install = claim.line_items.iter().any(|i| {
            let parsed = ctx.classifier.parse(&i.code, &i.description);
            parsed.is_tile && parsed.is_install
        });
        if tile_install {
            findings.push(
                FindingBuilder::new(
                    "FND-PENDING",
                    Category::SupplementRisk,
                    Severity::Info,
                    "Floor Prep Missing",
                    "Tile install with no floor prep line item",
                    "Tile install/replace is billed with no leveling or subfloor prep line item; prep is likely to be supplemented later.",
                )
                .build(),
            );
        }
    }

    findings
}

fn flr_004(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let install_rooms: HashSet<String> = claim
        .line_items
        .iter()
        .filter(|i| {
            let parsed = ctx.classifier.parse(&i.code, &i.description);
            parsed.is_install
                && (parsed.is_carpet || parsed.is_hardwood || parsed.is_tile || parsed.is_laminate || parsed.is_vinyl)
        })
        .filter_map(|i| i.room.clone())
        .collect();

    if install_rooms.len() < 2 {
        return Vec::new();
    }

    let has_transition = claim
        .line_items
        .iter()
        .any(|i| ctx.classifier.parse(&i.code, &i.description).is_transition);

    if has_transition {
        return Vec::new();
    }

    vec![FindingBuilder::new(
        "FND-PENDING",
        Category::SupplementRisk,
        Severity::Info,
        "Material Matching",
        "Flooring spans multiple rooms with no transition line item",
        format!(
            "Flooring is installed across {} rooms with no transition/T-mold/reducer/threshold line item; one is likely to be supplemented later.",
            install_rooms.len()
        ),
    )
    .build()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::model::PolicyCoverage;

    fn ctx(classifier: &Classifier) -> Context<'_> {
        Context { classifier }
    }

    fn base_policy() -> PolicyCoverage {
        PolicyCoverage::new(Money::ZERO, Money::from_dollars(100_000.0), Money::ZERO, Money::ZERO).unwrap()
    }

    #[test]
    fn carpet_pad_overlap_matches_scenario_5() {
        let carpet = LineItem::new("FCC_CPTREM", "Carpet Tear-out", 1.0, Money::from_dollars(50.0)).unwrap();
        let pad = LineItem::new("FCC_PADREM", "Pad Tear-out", 1.0, Money::from_dollars(105.0)).unwrap();
        let claim = ClaimData::new("CLM-5", base_policy())
            .unwrap()
            .with_line_items(vec![carpet, pad]);

        let classifier = Classifier::new();
        let findings = flr_002(&claim, &ctx(&classifier));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].potential_impact, Some(Money::from_dollars(105.0)));
        assert!(findings[0].affected_items.contains(&"FCC_CPTREM".to_string()));
    }

    #[test]
    fn no_overlap_when_only_carpet_present() {
        let carpet = LineItem::new("FCC_CPTREM", "Carpet Tear-out", 1.0, Money::from_dollars(50.0)).unwrap();
        let claim = ClaimData::new("CLM-6", base_policy())
            .unwrap()
            .with_line_items(vec![carpet]);
        let classifier = Classifier::new();
        assert!(flr_002(&claim, &ctx(&classifier)).is_empty());
    }
}
