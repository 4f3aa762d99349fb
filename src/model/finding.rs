use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::money::Money;

/// The three finding categories a rule can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Financial,
    Leakage,
    SupplementRisk,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Financial => "financial",
            Category::Leakage => "leakage",
            Category::SupplementRisk => "supplement_risk",
        }
    }
}

/// Severity of a finding, ordered low to high for risk-score weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Risk-score contribution per `spec.md` §4.7.
    pub fn weight(self) -> u32 {
        match self {
            Severity::Info => 5,
            Severity::Warning => 15,
            Severity::Error => 30,
            Severity::Critical => 50,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

/// A single audit finding produced by a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditFinding {
    pub finding_id: String,
    pub category: Category,
    pub severity: Severity,
    pub rule_name: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub affected_items: Vec<String>,
    #[serde(default)]
    pub potential_impact: Option<Money>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub evidence: HashMap<String, Value>,
}

/// Builds a finding with a fixed id/category/severity/rule_name, filling
/// in the remaining fields fluently. Used by validators so each only
/// states what varies per finding.
pub struct FindingBuilder {
    finding_id: String,
    category: Category,
    severity: Severity,
    rule_name: String,
    title: String,
    description: String,
    affected_items: Vec<String>,
    potential_impact: Option<Money>,
    recommendation: Option<String>,
    evidence: HashMap<String, Value>,
}

impl FindingBuilder {
    pub fn new(
        finding_id: impl Into<String>,
        category: Category,
        severity: Severity,
        rule_name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        FindingBuilder {
            finding_id: finding_id.into(),
            category,
            severity,
            rule_name: rule_name.into(),
            title: title.into(),
            description: description.into(),
            affected_items: Vec::new(),
            potential_impact: None,
            recommendation: None,
            evidence: HashMap::new(),
        }
    }

    pub fn affected_items(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.affected_items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn impact(mut self, impact: Money) -> Self {
        self.potential_impact = Some(impact);
        self
    }

    pub fn recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    pub fn evidence(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.evidence.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> AuditFinding {
        AuditFinding {
            finding_id: self.finding_id,
            category: self.category,
            severity: self.severity,
            rule_name: self.rule_name,
            title: self.title,
            description: self.description,
            affected_items: self.affected_items,
            potential_impact: self.potential_impact,
            recommendation: self.recommendation,
            evidence: self.evidence,
        }
    }
}
