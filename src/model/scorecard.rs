use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::claim::ClaimData;
use super::finding::{AuditFinding, Category};
use crate::money::Money;

/// Summary metadata echoed from the claim at the top of the scorecard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub gross_claim: Money,
    pub net_claim: Money,
    pub line_item_count: usize,
    pub deductible: Money,
}

impl ClaimSummary {
    pub fn from_claim(claim: &ClaimData) -> Self {
        ClaimSummary {
            gross_claim: claim.gross_claim(),
            net_claim: claim.net_claim(),
            line_item_count: claim.line_items.len(),
            deductible: claim.policy.deductible,
        }
    }
}

/// Category counters and aggregate monetary totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_findings: usize,
    pub financial_findings: usize,
    pub leakage_findings: usize,
    pub supplement_risk_findings: usize,
    pub total_potential_leakage: Money,
    pub total_supplement_risk: Money,
    pub risk_score: f64,
}

/// The complete, immutable result of one audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditScorecard {
    pub claim_id: String,
    pub audit_timestamp: DateTime<Utc>,
    pub claim_summary: ClaimSummary,
    pub findings: Vec<AuditFinding>,
    pub summary: AuditSummary,
    pub modules_executed: Vec<String>,
    pub redacted: bool,
}

impl AuditScorecard {
    pub fn category_findings(&self, category: Category) -> impl Iterator<Item = &AuditFinding> {
        self.findings.iter().filter(move |f| f.category == category)
    }
}
