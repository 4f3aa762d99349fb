//! Scorecard aggregator (C8): accumulates findings into counters and
//! totals, then computes the risk score. Grounded on
//! `examples/original_source/src/claim_engine/core/models.py`
//! (`AuditScorecard.calculate_risk_score`) and the teacher's builder-style
//! result accumulation in `src/debt/mod.rs`.

use crate::model::{AuditFinding, AuditScorecard, AuditSummary, Category, ClaimData, ClaimSummary};

/// Accumulates findings and executed module names for one claim, then
/// produces the final, immutable scorecard.
pub struct ScorecardBuilder {
    claim_id: String,
    claim_summary: ClaimSummary,
    findings: Vec<AuditFinding>,
    summary: AuditSummary,
    modules_executed: Vec<String>,
}

impl ScorecardBuilder {
    pub fn new(claim: &ClaimData) -> Self {
        ScorecardBuilder {
            claim_id: claim.claim_id.clone(),
            claim_summary: ClaimSummary::from_claim(claim),
            findings: Vec::new(),
            summary: AuditSummary::default(),
            modules_executed: Vec::new(),
        }
    }

    pub fn add_finding(&mut self, finding: AuditFinding) {
        self.summary.total_findings += 1;
        match finding.category {
            Category::Financial => self.summary.financial_findings += 1,
            Category::Leakage => self.summary.leakage_findings += 1,
            Category::SupplementRisk => self.summary.supplement_risk_findings += 1,
        }
        if let Some(impact) = finding.potential_impact {
            match finding.category {
                Category::Leakage => self.summary.total_potential_leakage = self.summary.total_potential_leakage + impact,
                Category::SupplementRisk => self.summary.total_supplement_risk = self.summary.total_supplement_risk + impact,
                Category::Financial => {}
            }
        }
        self.findings.push(finding);
    }

    pub fn add_findings(&mut self, findings: impl IntoIterator<Item = AuditFinding>) {
        for finding in findings {
            self.add_finding(finding);
        }
    }

    pub fn add_module(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.modules_executed.contains(&name) {
            self.modules_executed.push(name);
        }
    }

    /// `risk_score = min(100, Σ w(severity_i))`, per `spec.md` §4.7.
    fn calculate_risk_score(&self) -> f64 {
        let total: u32 = self.findings.iter().map(|f| f.severity.weight()).sum();
        total.min(100) as f64
    }

    pub fn build(mut self) -> AuditScorecard {
        self.summary.risk_score = self.calculate_risk_score();
        AuditScorecard {
            claim_id: self.claim_id,
            audit_timestamp: chrono::Utc::now(),
            claim_summary: self.claim_summary,
            findings: self.findings,
            summary: self.summary,
            modules_executed: self.modules_executed,
            redacted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FindingBuilder, PolicyCoverage, Severity};
    use crate::money::Money;

    fn claim() -> ClaimData {
        ClaimData::new(
            "CLM-1",
            PolicyCoverage::new(Money::ZERO, Money::ZERO, Money::ZERO, Money::ZERO).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn risk_score_caps_at_100() {
        let mut builder = ScorecardBuilder::new(&claim());
        for _ in 0..3 {
            builder.add_finding(
                FindingBuilder::new("FND-000001", Category::Leakage, Severity::Critical, "x", "t", "d").build(),
            );
        }
        let scorecard = builder.build();
        assert_eq!(scorecard.summary.risk_score, 100.0);
    }

    #[test]
    fn no_findings_yields_zero_score() {
        let scorecard = ScorecardBuilder::new(&claim()).build();
        assert_eq!(scorecard.summary.risk_score, 0.0);
        assert_eq!(scorecard.summary.total_findings, 0);
    }

    #[test]
    fn counters_match_category_totals() {
        let mut builder = ScorecardBuilder::new(&claim());
        builder.add_finding(
            FindingBuilder::new("FND-000001", Category::Leakage, Severity::Warning, "x", "t", "d")
                .impact(Money::from_dollars(100.0))
                .build(),
        );
        builder.add_finding(
            FindingBuilder::new("FND-000002", Category::SupplementRisk, Severity::Info, "y", "t", "d").build(),
        );
        let scorecard = builder.build();
        assert_eq!(scorecard.summary.total_findings, 2);
        assert_eq!(
            scorecard.summary.financial_findings
                + scorecard.summary.leakage_findings
                + scorecard.summary.supplement_risk_findings,
            scorecard.summary.total_findings
        );
        assert_eq!(scorecard.summary.total_potential_leakage, Money::from_dollars(100.0));
    }
}
