//! General repair validator (C7): double-dipping, content protection,
//! labor minimums, and service-call consolidation checks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classifier::double_dip_groups;
use crate::model::{AuditFinding, Category, ClaimData, FindingBuilder, LineItem, Severity};
use crate::registry::{Context, RuleDescriptor, RuleRegistry};

use super::sum_totals;

pub fn register(registry: &mut RuleRegistry) {
    registry.add(RuleDescriptor::new(
        "GEN-001",
        "Double-Dip",
        "Two or more line items billing for work already included in one of them.",
        Category::Leakage,
        Severity::Warning,
        gen_001,
    ));
    registry.add(RuleDescriptor::new(
        "GEN-002",
        "Content Protection",
        "Flooring work billed with no content-manipulation or blocking/padding line item.",
        Category::SupplementRisk,
        Severity::Info,
        gen_002,
    ));
    registry.add(RuleDescriptor::new(
        "GEN-003",
        "Labor Minimums",
        "Multiple trade-minimum charges billed for the same trade.",
        Category::Leakage,
        Severity::Warning,
        gen_003,
    ));
    registry.add(RuleDescriptor::new(
        "GEN-004",
        "Service-Call Consolidation",
        "More than two service calls billed that could have been consolidated.",
        Category::Leakage,
        Severity::Info,
        gen_004,
    ));
}

fn gen_001(claim: &ClaimData, _ctx: &Context<'_>) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    for group in double_dip_groups() {
        let mut matched_any_pattern = 0;
        let mut affected: Vec<&LineItem> = Vec::new();
        let mut overlap_items: Vec<&LineItem> = Vec::new();

        for (pattern_name, matches_text) in &group.patterns {
            let matches: Vec<&LineItem> = claim
                .line_items
                .iter()
                .filter(|i| matches_text(&i.searchable_text()))
                .collect();
            if !matches.is_empty() {
                matched_any_pattern += 1;
                for item in &matches {
                    if !affected.iter().any(|a| a.code == item.code) {
                        affected.push(item);
                    }
                }
                if group.overlap == Some(*pattern_name) {
                    overlap_items = matches;
                }
            }
        }

        if matched_any_pattern >= 2 {
            let mut builder = FindingBuilder::new(
                "FND-PENDING",
                Category::Leakage,
                Severity::Warning,
                "Double-Dip",
                format!("Possible double-dip: {}", group.name),
                format!(
                    "Line items match {} related billing patterns in the `{}` group, which may bill for overlapping work.",
                    matched_any_pattern, group.name
                ),
            )
            .affected_items(affected.iter().map(|i| i.code.clone()));

            if group.overlap.is_some() {
                builder = builder.impact(sum_totals(overlap_items.into_iter()));
            }

            findings.push(builder.build());
        }
    }

    findings
}

static CONTENT_MANIPULATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(CONTENT\s*MANIPULATION|MOVE\s*CONTENTS|PACK\s*OUT|FURNITURE\s*MOVE|MOVE\s*OUT)").unwrap());
// Requires a protection word to co-occur with content/furniture/appliance,
// not just any mention of "block"/"protect" (carpentry blocking, a door
// protector, etc. are not content protection).
static BLOCKING_PADDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(BLOCK|PAD|PROTECT|COVER|MASK).*?(CONTENT|FURNITURE|APPLIANCE)").unwrap());

fn gen_002(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let has_flooring_work = claim.line_items.iter().any(|i| {
        let parsed = ctx.classifier.parse(&i.code, &i.description);
        parsed.is_carpet || parsed.is_hardwood || parsed.is_tile || parsed.is_laminate || parsed.is_vinyl
    });
    if !has_flooring_work {
        return Vec::new();
    }

    let has_protection = claim.line_items.iter().any(|i| {
        let text = i.searchable_text();
        CONTENT_MANIPULATION.is_match(&text) || BLOCKING_PADDING.is_match(&text)
    });
    if has_protection {
        return Vec::new();
    }

    vec![FindingBuilder::new(
        "FND-PENDING",
        Category::SupplementRisk,
        Severity::Info,
        "Content Protection",
        "Flooring work with no content protection line item",
        "Flooring work is billed with no content-manipulation or blocking/padding line item to protect contents during the work.",
    )
    .build()]
}

static PLUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(PLUMB(ER)?|PLMB)").unwrap());
static ELECTRICIAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(ELECTRIC(IAN)?|\bELEC\b)").unwrap());
static HVAC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(HVAC|FURNACE|\bAC\b)").unwrap());
static GENERAL_TRADE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(GENERAL\s*CONTRACTOR|\bGC\b)").unwrap());
static MINIMUM_CHARGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(MINIMUM|MIN\s*CHARGE)").unwrap());

const TRADES: [(&str, &Lazy<Regex>); 4] = [
    ("plumber", &PLUMBER),
    ("electrician", &ELECTRICIAN),
    ("hvac", &HVAC),
    ("general", &GENERAL_TRADE),
];

fn gen_003(claim: &ClaimData, _ctx: &Context<'_>) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    for (trade, regex) in TRADES {
        let matches: Vec<&LineItem> = claim
            .line_items
            .iter()
            .filter(|i| {
                let text = i.searchable_text();
                regex.is_match(&text) && MINIMUM_CHARGE.is_match(&text)
            })
            .collect();

        if matches.len() >= 2 {
            let total = sum_totals(matches.iter().copied());
            let impact = total.saturating_sub(matches[0].total());
            findings.push(
                FindingBuilder::new(
                    "FND-PENDING",
                    Category::Leakage,
                    Severity::Warning,
                    "Labor Minimums",
                    format!("Multiple {trade} minimum charges billed"),
                    format!("{} separate {trade} trade-minimum charges were billed on this claim.", matches.len()),
                )
                .affected_items(matches.iter().map(|i| i.code.clone()))
                .impact(impact)
                .build(),
            );
        }
    }

    findings
}

fn gen_004(claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
    let matches: Vec<&LineItem> = claim
        .line_items
        .iter()
        .filter(|i| ctx.classifier.parse(&i.code, &i.description).is_service_call)
        .collect();

    if matches.len() <= 2 {
        return Vec::new();
    }

    let total = sum_totals(matches.iter().copied());
    let impact = total * 0.25;

    vec![FindingBuilder::new(
        "FND-PENDING",
        Category::Leakage,
        Severity::Info,
        "Service-Call Consolidation",
        "Multiple service calls could be consolidated",
        format!("{} service-call line items were billed separately; these are typically consolidated into one trip.", matches.len()),
    )
    .affected_items(matches.iter().map(|i| i.code.clone()))
    .impact(impact)
    .build()]
}
