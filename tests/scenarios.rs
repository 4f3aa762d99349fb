//! End-to-end scenarios from `spec.md` §8, run through the full engine
//! rather than individual rule functions.

use claimaudit::model::{LineItem, PolicyCoverage, PropertyDetails, Room, WaterCategory};
use claimaudit::money::Money;
use claimaudit::{audit_claim, ClaimData};

fn policy(deductible: f64, a: f64, b: f64, c: f64) -> PolicyCoverage {
    PolicyCoverage::new(
        Money::from_dollars(deductible),
        Money::from_dollars(a),
        Money::from_dollars(b),
        Money::from_dollars(c),
    )
    .unwrap()
}

#[test]
fn deductible_arithmetic() {
    let item = LineItem::new("GEN_REPAIR", "General Repair", 1.0, Money::from_dollars(2000.0)).unwrap();
    let claim = ClaimData::new("CLM-SCN-1", policy(500.0, 100_000.0, 10_000.0, 50_000.0))
        .unwrap()
        .with_line_items(vec![item]);

    assert_eq!(claim.gross_claim(), Money::from_dollars(2000.0));
    assert_eq!(claim.net_claim(), Money::from_dollars(1500.0));

    let scorecard = audit_claim(&claim, false);
    assert!(!scorecard
        .findings
        .iter()
        .any(|f| f.rule_name == "Net Claim Calculation"));
    assert!(!scorecard
        .findings
        .iter()
        .any(|f| f.rule_name == "Deductible Application"));
}

#[test]
fn coverage_c_breach() {
    let item = LineItem::new("CNT_TV", "Television", 1.0, Money::from_dollars(130_000.0)).unwrap();
    let claim = ClaimData::new("CLM-SCN-2", policy(500.0, 200_000.0, 50_000.0, 125_000.0))
        .unwrap()
        .with_line_items(vec![item]);

    let scorecard = audit_claim(&claim, false);
    let findings: Vec<_> = scorecard
        .findings
        .iter()
        .filter(|f| f.rule_name == "Coverage C Limit")
        .collect();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity.as_str(), "error");
    assert_eq!(findings[0].potential_impact, Some(Money::from_dollars(5_000.0)));
}

#[test]
fn air_mover_leakage() {
    let rooms = vec![
        Room::new("Living Room", 100.0).unwrap(),
        Room::new("Hallway", 50.0).unwrap(),
    ];
    let item = LineItem::new("WTR_AIRF", "Air Mover Rental", 12.0, Money::from_dollars(35.0)).unwrap();
    let claim = ClaimData::new("CLM-SCN-3", policy(500.0, 100_000.0, 10_000.0, 50_000.0))
        .unwrap()
        .with_property_details(PropertyDetails::new(rooms))
        .with_line_items(vec![item]);

    let scorecard = audit_claim(&claim, false);
    let finding = scorecard
        .findings
        .iter()
        .find(|f| f.rule_name == "Air Mover Count")
        .expect("expected an Air Mover Count finding");
    assert_eq!(finding.severity.as_str(), "warning");
    assert_eq!(finding.potential_impact, Some(Money::from_dollars(315.0)));
}

#[test]
fn category_mismatch() {
    let item = LineItem::new("WTR_PPE", "PPE Respirator Kit", 1.0, Money::from_dollars(450.0)).unwrap();
    let claim = ClaimData::new("CLM-SCN-4", policy(500.0, 100_000.0, 10_000.0, 50_000.0))
        .unwrap()
        .with_property_details(PropertyDetails::default().with_water_category(WaterCategory::Category1))
        .with_line_items(vec![item]);

    let scorecard = audit_claim(&claim, false);
    let finding = scorecard
        .findings
        .iter()
        .find(|f| f.rule_name == "Category Mismatch")
        .expect("expected a Category Mismatch finding");
    assert_eq!(finding.severity.as_str(), "error");
    assert_eq!(finding.potential_impact, Some(Money::from_dollars(450.0)));
}

#[test]
fn carpet_pad_overlap() {
    let carpet = LineItem::new("FCC_CPTREM", "Carpet Tear-out", 1.0, Money::from_dollars(50.0)).unwrap();
    let pad = LineItem::new("FCC_PADREM", "Pad Tear-out", 1.0, Money::from_dollars(105.0)).unwrap();
    let claim = ClaimData::new("CLM-SCN-5", policy(500.0, 100_000.0, 10_000.0, 50_000.0))
        .unwrap()
        .with_line_items(vec![carpet, pad]);

    let scorecard = audit_claim(&claim, false);
    let finding = scorecard
        .findings
        .iter()
        .find(|f| f.rule_name == "Carpet/Pad Tear-out Overlap")
        .expect("expected a Carpet/Pad Tear-out Overlap finding");
    assert_eq!(finding.potential_impact, Some(Money::from_dollars(105.0)));
    assert!(finding.affected_items.contains(&"FCC_CPTREM".to_string()));
}

#[test]
fn double_dip_door_hardware() {
    let door = LineItem::new("GEN_DOOR", "Pre-hung Interior Door", 1.0, Money::from_dollars(250.0)).unwrap();
    let hinge = LineItem::new("GEN_HINGE", "Door Hinges", 1.0, Money::from_dollars(51.0)).unwrap();
    let claim = ClaimData::new("CLM-SCN-6", policy(500.0, 100_000.0, 10_000.0, 50_000.0))
        .unwrap()
        .with_line_items(vec![door, hinge]);

    let scorecard = audit_claim(&claim, false);
    let finding = scorecard
        .findings
        .iter()
        .find(|f| f.rule_name == "Double-Dip" && f.title.contains("pre_hung_door_hardware"))
        .expect("expected a pre_hung_door_hardware Double-Dip finding");
    assert_eq!(finding.severity.as_str(), "warning");
    assert_eq!(finding.potential_impact, Some(Money::from_dollars(51.0)));
}
