//! Rule-based audit engine for property-insurance claim estimates.
//!
//! Detects billing leakage (amounts a payer should not have paid) and
//! supplement risk (scope likely to be added back later) in Xactimate-style
//! line-item estimates, and reports findings plus a bounded risk score.

pub mod aggregator;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod model;
pub mod money;
pub mod observability;
pub mod redact;
pub mod registry;
pub mod rules;

pub use engine::{audit_claim, audit_many, new_engine, AuditEngine, EngineOptions};
pub use error::{AuditError, AuditResult};
pub use model::{AuditFinding, AuditScorecard, Category, ClaimData, LineItem, Severity};
pub use money::{Money, Quantity};
