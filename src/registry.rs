//! Rule registry (C3): holds rule descriptors, indexes them by category,
//! mints monotonic finding ids, and runs validators under fault isolation.
//!
//! Grounded on `examples/original_source/src/claim_engine/core/rule_engine.py`
//! (`AuditRule`/`RuleEngine`), generalized to the Rust trait-object shape the
//! teacher uses for its own rule collections in `src/debt/rules.rs`.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::model::{AuditFinding, Category, FindingBuilder, Severity};
use crate::model::ClaimData;

/// Per-audit context threaded through every rule. Currently holds only the
/// classifier, but lives as its own type so the signature is stable if the
/// context grows (e.g. a shared redaction log).
pub struct Context<'a> {
    pub classifier: &'a crate::classifier::Classifier,
}

/// A rule's executable body: given the claim and context, return zero or
/// more findings. Boxed so descriptors can be stored homogeneously.
pub type Validator = dyn Fn(&ClaimData, &Context<'_>) -> Vec<AuditFinding> + Send + Sync;

/// A registered rule: identity, classification, and its validator body.
pub struct RuleDescriptor {
    pub rule_id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub severity: Severity,
    pub enabled: bool,
    validator: Box<Validator>,
}

impl std::fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("rule_id", &self.rule_id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl RuleDescriptor {
    pub fn new(
        rule_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        severity: Severity,
        validator: impl Fn(&ClaimData, &Context<'_>) -> Vec<AuditFinding> + Send + Sync + 'static,
    ) -> Self {
        RuleDescriptor {
            rule_id: rule_id.into(),
            name: name.into(),
            description: description.into(),
            category,
            severity,
            enabled: true,
            validator: Box::new(validator),
        }
    }
}

/// Holds registered rules, category index, and the monotonic finding-id
/// counter. One registry per engine instance; never shared mutably across
/// threads (see `spec.md` §5).
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<RuleDescriptor>,
    index_by_id: HashMap<String, usize>,
    finding_counter: AtomicU32,
}

impl RuleRegistry {
    pub fn new() -> Self {
        RuleRegistry::default()
    }

    pub fn add(&mut self, rule: RuleDescriptor) {
        let idx = self.rules.len();
        self.index_by_id.insert(rule.rule_id.clone(), idx);
        self.rules.push(rule);
    }

    pub fn remove(&mut self, rule_id: &str) {
        if let Some(idx) = self.index_by_id.remove(rule_id) {
            self.rules.remove(idx);
            self.reindex();
        }
    }

    pub fn enable(&mut self, rule_id: &str) {
        if let Some(rule) = self.get_mut(rule_id) {
            rule.enabled = true;
        }
    }

    pub fn disable(&mut self, rule_id: &str) {
        if let Some(rule) = self.get_mut(rule_id) {
            rule.enabled = false;
        }
    }

    pub fn get(&self, rule_id: &str) -> Option<&RuleDescriptor> {
        self.index_by_id.get(rule_id).map(|&idx| &self.rules[idx])
    }

    fn get_mut(&mut self, rule_id: &str) -> Option<&mut RuleDescriptor> {
        if let Some(&idx) = self.index_by_id.get(rule_id) {
            self.rules.get_mut(idx)
        } else {
            None
        }
    }

    fn reindex(&mut self) {
        self.index_by_id.clear();
        for (idx, rule) in self.rules.iter().enumerate() {
            self.index_by_id.insert(rule.rule_id.clone(), idx);
        }
    }

    /// Enabled rules for a category, insertion order.
    pub fn rules_by_category(&self, category: Category) -> Vec<&RuleDescriptor> {
        self.rules
            .iter()
            .filter(|r| r.enabled && r.category == category)
            .collect()
    }

    /// `FND-<6-digit zero-padded monotonic>`.
    pub fn new_finding_id(&self) -> String {
        let n = self.finding_counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("FND-{n:06}")
    }

    /// Run one rule guarded: a panicking validator yields exactly one
    /// synthetic finding instead of aborting the audit.
    pub fn execute(&self, rule: &RuleDescriptor, claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
        if !rule.enabled {
            return Vec::new();
        }
        let result = panic::catch_unwind(AssertUnwindSafe(|| (rule.validator)(claim, ctx)));
        match result {
            Ok(mut findings) => {
                for finding in &mut findings {
                    finding.finding_id = self.new_finding_id();
                }
                findings
            }
            Err(payload) => {
                let message = panic_message(&payload);
                tracing::warn!(rule_id = %rule.rule_id, error = %message, "rule execution failed");
                vec![FindingBuilder::new(
                    self.new_finding_id(),
                    rule.category,
                    rule.severity,
                    rule.name.clone(),
                    format!("Rule Execution Error: {}", rule.name),
                    format!("Rule `{}` failed during execution and was skipped.", rule.rule_id),
                )
                .evidence("error", message)
                .evidence("error_type", "panic")
                .build()]
            }
        }
    }

    pub fn execute_all(&self, claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
        self.rules
            .iter()
            .flat_map(|rule| self.execute(rule, claim, ctx))
            .collect()
    }

    pub fn execute_category(&self, category: Category, claim: &ClaimData, ctx: &Context<'_>) -> Vec<AuditFinding> {
        self.rules_by_category(category)
            .into_iter()
            .flat_map(|rule| self.execute(rule, claim, ctx))
            .collect()
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::model::PolicyCoverage;

    fn claim() -> ClaimData {
        ClaimData::new(
            "CLM-1",
            PolicyCoverage::new(Money::ZERO, Money::ZERO, Money::ZERO, Money::ZERO).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn finding_ids_are_monotonic_and_formatted() {
        let registry = RuleRegistry::new();
        let a = registry.new_finding_id();
        let b = registry.new_finding_id();
        assert_eq!(a, "FND-000001");
        assert_eq!(b, "FND-000002");
    }

    #[test]
    fn disabled_rule_yields_no_findings() {
        let mut registry = RuleRegistry::new();
        registry.add(RuleDescriptor::new(
            "TEST-001",
            "Test",
            "desc",
            Category::Leakage,
            Severity::Info,
            |_claim, _ctx| {
                vec![FindingBuilder::new("FND-000001", Category::Leakage, Severity::Info, "Test", "t", "d").build()]
            },
        ));
        registry.disable("TEST-001");
        let classifier = crate::classifier::Classifier::new();
        let ctx = Context { classifier: &classifier };
        let findings = registry.execute_all(&claim(), &ctx);
        assert!(findings.is_empty());
    }

    #[test]
    fn panicking_rule_yields_single_synthetic_finding() {
        let mut registry = RuleRegistry::new();
        registry.add(RuleDescriptor::new(
            "TEST-002",
            "Boom",
            "desc",
            Category::Financial,
            Severity::Error,
            |_claim, _ctx| panic!("boom"),
        ));
        let classifier = crate::classifier::Classifier::new();
        let ctx = Context { classifier: &classifier };
        let findings = registry.execute_all(&claim(), &ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].title.starts_with("Rule Execution Error"));
    }
}
