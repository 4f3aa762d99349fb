//! Fixed-width text formatter. Grounded on the 70-column section layout in
//! `examples/original_source/src/claim_engine/reporting/scorecard.py`
//! (`ScorecardFormatter.to_text`), with ASCII severity markers in place of
//! the original's emoji so the layout survives a plain-text redirect.

use std::fmt::Write as _;

use colored::Colorize;

use crate::model::{AuditScorecard, Category, Severity};

const WIDTH: usize = 70;

fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(WIDTH).collect()
}

/// ASCII bracketed marker, colored when writing to a real terminal and
/// plain otherwise — degrades cleanly on a file redirect or in this
/// formatter's own string-returning tests.
fn severity_marker(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Info => "[info]".blue(),
        Severity::Warning => "[warn]".yellow(),
        Severity::Error => "[ERROR]".red(),
        Severity::Critical => "[CRIT]".bright_red().bold(),
    }
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Financial => "Financial",
        Category::Leakage => "Leakage",
        Category::SupplementRisk => "Supplement Risk",
    }
}

pub fn render(scorecard: &AuditScorecard) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "CLAIM AUDIT SCORECARD");
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "Claim ID:        {}", scorecard.claim_id);
    let _ = writeln!(out, "Audit Timestamp: {}", scorecard.audit_timestamp.to_rfc3339());
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", rule('-'));
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{}", rule('-'));
    let _ = writeln!(out, "Gross Claim:       {}", scorecard.claim_summary.gross_claim);
    let _ = writeln!(out, "Net Claim:         {}", scorecard.claim_summary.net_claim);
    let _ = writeln!(out, "Line Items:        {}", scorecard.claim_summary.line_item_count);
    let _ = writeln!(out, "Deductible:        {}", scorecard.claim_summary.deductible);
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Findings:          {}", scorecard.summary.total_findings);
    let _ = writeln!(out, "  Financial:             {}", scorecard.summary.financial_findings);
    let _ = writeln!(out, "  Leakage:               {}", scorecard.summary.leakage_findings);
    let _ = writeln!(out, "  Supplement Risk:       {}", scorecard.summary.supplement_risk_findings);
    let _ = writeln!(out, "Total Potential Leakage: {}", scorecard.summary.total_potential_leakage);
    let _ = writeln!(out, "Total Supplement Risk:   {}", scorecard.summary.total_supplement_risk);
    let _ = writeln!(out, "Risk Score:              {:.0}/100", scorecard.summary.risk_score);
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", rule('-'));
    let _ = writeln!(out, "MODULES EXECUTED");
    let _ = writeln!(out, "{}", rule('-'));
    if scorecard.modules_executed.is_empty() {
        let _ = writeln!(out, "(none)");
    } else {
        for module in &scorecard.modules_executed {
            let _ = writeln!(out, "- {module}");
        }
    }
    let _ = writeln!(out);

    for category in [Category::Financial, Category::Leakage, Category::SupplementRisk] {
        let findings: Vec<_> = scorecard.category_findings(category).collect();
        if findings.is_empty() {
            continue;
        }

        let _ = writeln!(out, "{}", rule('-'));
        let _ = writeln!(out, "{}", category_label(category).to_uppercase());
        let _ = writeln!(out, "{}", rule('-'));

        for finding in findings {
            let _ = writeln!(out, "{} {} [{}]", severity_marker(finding.severity), finding.title, finding.rule_name);
            let _ = writeln!(out, "  {}", finding.description);
            if let Some(impact) = finding.potential_impact {
                let _ = writeln!(out, "  Impact: {impact}");
            }
            if !finding.affected_items.is_empty() {
                let shown: Vec<&str> = finding.affected_items.iter().take(5).map(String::as_str).collect();
                let remaining = finding.affected_items.len().saturating_sub(5);
                let mut line = format!("  Affected items: {}", shown.join(", "));
                if remaining > 0 {
                    let _ = write!(line, " ...and {remaining} more");
                }
                let _ = writeln!(out, "{line}");
            }
            if let Some(recommendation) = &finding.recommendation {
                let _ = writeln!(out, "  Recommendation: {recommendation}");
            }
            let _ = writeln!(out);
        }
    }

    out
}
