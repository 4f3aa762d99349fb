//! PII redactor (C9): composes regex pattern redaction over string values
//! with known-field-name redaction over map keys, and logs every
//! substitution. Grounded on
//! `examples/original_source/src/claim_engine/utils/pii_redaction.py`
//! (`PIIRedactor`); the `bank_account` pattern and the `base_cap_molding`
//! double-dip group are the two spots `spec.md` §9 explicitly preserves
//! rather than tightens.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::AuditError;
use crate::model::AuditScorecard;

struct NamedPattern {
    kind: &'static str,
    regex: Regex,
}

static PATTERNS: Lazy<Vec<NamedPattern>> = Lazy::new(|| {
    vec![
        NamedPattern { kind: "ssn", regex: Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap() },
        NamedPattern {
            kind: "phone",
            regex: Regex::new(r"\b(\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]\d{3}[-.\s]\d{4}\b").unwrap(),
        },
        NamedPattern {
            kind: "email",
            regex: Regex::new(r"\b[\w.+-]+@[\w-]+\.[A-Za-z]{2,}\b").unwrap(),
        },
        NamedPattern {
            kind: "credit_card",
            regex: Regex::new(r"\b(?:\d[ -]?){13,16}\b").unwrap(),
        },
        // Intentionally broad per spec.md §9: over-redacts policy numbers,
        // ZIP+4, order ids. Preserved as-is, not tightened.
        NamedPattern { kind: "bank_account", regex: Regex::new(r"\b\d{8,17}\b").unwrap() },
        NamedPattern {
            kind: "drivers_license",
            regex: Regex::new(r"(?i)\b[A-Z]{1,2}\d{6,8}\b").unwrap(),
        },
        NamedPattern {
            kind: "dob",
            regex: Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").unwrap(),
        },
        NamedPattern { kind: "zip", regex: Regex::new(r"\b\d{5}(-\d{4})?\b").unwrap() },
        NamedPattern {
            kind: "address",
            regex: Regex::new(r"(?i)\b\d+\s+[\w\s]+?\s+(street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct|way|place|pl)\b\.?").unwrap(),
        },
        NamedPattern {
            kind: "titled_name",
            regex: Regex::new(r"\b(Mr|Mrs|Ms|Dr)\.\s+[A-Z][a-z]+(\s+[A-Z][a-z]+)?\b").unwrap(),
        },
    ]
});

const PII_FIELDS: &[&str] = &[
    "name", "phone", "email", "address", "ssn", "dob", "account_number", "bank_account",
    "drivers_license", "license_number", "insured_name", "policyholder", "birth_date",
    "credit_card", "card_number", "street", "zip", "zip_code",
];

fn field_name_is_pii(field: &str) -> bool {
    let lower = field.to_lowercase();
    PII_FIELDS.iter().any(|pii| lower.contains(pii))
}

/// One applied substitution, recorded with a dotted/indexed field path.
#[derive(Debug, Clone)]
pub struct RedactionLogEntry {
    pub original: String,
    pub replacement: String,
    pub kind: String,
    pub field_path: String,
}

pub const PLACEHOLDER: &str = "[REDACTED]";

/// Walks nested JSON-like structures, replacing PII by field name or by
/// regex pattern, and keeps a log of every substitution made.
#[derive(Default)]
pub struct Redactor {
    log: Vec<RedactionLogEntry>,
}

impl Redactor {
    pub fn new() -> Self {
        Redactor::default()
    }

    pub fn log(&self) -> &[RedactionLogEntry] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Redacts a single string by pattern only (no field-name context).
    pub fn redact_string(&mut self, text: &str) -> String {
        self.redact_string_at(text, "")
    }

    fn redact_string_at(&mut self, text: &str, field_path: &str) -> String {
        let mut result = text.to_string();
        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(&result) {
                let matched: Vec<String> = pattern
                    .regex
                    .find_iter(&result)
                    .map(|m| m.as_str().to_string())
                    .collect();
                for original in matched {
                    self.log.push(RedactionLogEntry {
                        original,
                        replacement: PLACEHOLDER.to_string(),
                        kind: pattern.kind.to_string(),
                        field_path: field_path.to_string(),
                    });
                }
                result = pattern.regex.replace_all(&result, PLACEHOLDER).into_owned();
            }
        }
        result
    }

    /// Redacts an arbitrary JSON value, applying the field-name branch at
    /// map keys (which always wins, replacing the whole value) and the
    /// pattern branch at scalar string leaves otherwise.
    pub fn redact_value(&mut self, value: &Value, field_path: &str) -> Value {
        match value {
            Value::Object(map) => {
                let mut out = serde_json::Map::new();
                for (key, val) in map {
                    let child_path = if field_path.is_empty() {
                        key.clone()
                    } else {
                        format!("{field_path}.{key}")
                    };
                    if field_name_is_pii(key) {
                        if let Value::String(original) = val {
                            self.log.push(RedactionLogEntry {
                                original: original.clone(),
                                replacement: PLACEHOLDER.to_string(),
                                kind: "field_name".to_string(),
                                field_path: child_path.clone(),
                            });
                        }
                        out.insert(key.clone(), Value::String(PLACEHOLDER.to_string()));
                    } else {
                        out.insert(key.clone(), self.redact_value(val, &child_path));
                    }
                }
                Value::Object(out)
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| self.redact_value(item, &format!("{field_path}[{idx}]")))
                    .collect(),
            ),
            Value::String(s) => Value::String(self.redact_string_at(s, field_path)),
            other => other.clone(),
        }
    }

    /// Redacts a claim represented as JSON, with the claim_id special-cased
    /// to `CLM-[REDACTED]` (structure preserved) when it matches any
    /// pattern.
    pub fn redact_claim_value(&mut self, claim: Value) -> Result<Value, AuditError> {
        let mut redacted = self.redact_value(&claim, "");
        if let Value::Object(ref mut map) = redacted {
            let matches_pii = match map.get("claim_id") {
                Some(Value::String(claim_id)) => PATTERNS.iter().any(|p| p.regex.is_match(claim_id)),
                _ => false,
            };
            if matches_pii {
                map.insert("claim_id".to_string(), Value::String("CLM-[REDACTED]".to_string()));
            }
        }
        Ok(redacted)
    }

    /// Redacts a scorecard by walking its entire serialized tree (same walk
    /// `redact_claim_value` runs over a claim) rather than picking individual
    /// fields, so nothing new added to `AuditScorecard` or `AuditFinding` can
    /// silently skip redaction. Sets `redacted = true`.
    pub fn redact_scorecard(&mut self, scorecard: AuditScorecard) -> AuditScorecard {
        let value = serde_json::to_value(&scorecard).expect("AuditScorecard always serializes");
        let redacted = self.redact_value(&value, "");
        let mut scorecard: AuditScorecard =
            serde_json::from_value(redacted).expect("a redacted scorecard always deserializes back");
        scorecard.redacted = true;
        scorecard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_name_branch_wins_over_non_matching_value() {
        let mut redactor = Redactor::new();
        let value = json!({"insured_name": "John Smith"});
        let redacted = redactor.redact_value(&value, "");
        assert_eq!(redacted["insured_name"], "[REDACTED]");
    }

    #[test]
    fn pattern_branch_redacts_ssn_in_unnamed_field() {
        let mut redactor = Redactor::new();
        let value = json!({"notes": "SSN is 123-45-6789 on file"});
        let redacted = redactor.redact_value(&value, "");
        assert!(redacted["notes"].as_str().unwrap().contains("[REDACTED]"));
        assert!(!redacted["notes"].as_str().unwrap().contains("123-45-6789"));
    }

    #[test]
    fn redaction_is_idempotent() {
        let mut redactor = Redactor::new();
        let once = redactor.redact_string("Contact Dr. Smith at 555-123-4567");
        let twice = redactor.redact_string(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn claim_id_with_pii_is_replaced_with_placeholder_form() {
        let mut redactor = Redactor::new();
        let claim = json!({"claim_id": "CLM-123-45-6789", "policy": {}});
        let redacted = redactor.redact_claim_value(claim).unwrap();
        assert_eq!(redacted["claim_id"], "CLM-[REDACTED]");
    }

    #[test]
    fn log_records_field_paths() {
        let mut redactor = Redactor::new();
        let value = json!({"contacts": [{"email": "a@example.com"}]});
        let _ = redactor.redact_value(&value, "");
        assert!(redactor.log().iter().any(|e| e.field_path == "contacts[0].email"));
    }
}
