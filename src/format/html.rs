//! HTML formatter: a single `<div class="audit-scorecard">` with inline
//! styles, per `spec.md` §6. Entities are escaped by hand (four-entity
//! table) rather than pulling in an escaping crate for one call site.

use std::fmt::Write as _;

use crate::model::{AuditScorecard, Category, Severity};

fn escape(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut acc, c| {
        match c {
            '&' => acc.push_str("&amp;"),
            '<' => acc.push_str("&lt;"),
            '>' => acc.push_str("&gt;"),
            '"' => acc.push_str("&quot;"),
            other => acc.push(other),
        }
        acc
    })
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "#3b82f6",
        Severity::Warning => "#eab308",
        Severity::Error => "#f97316",
        Severity::Critical => "#dc2626",
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

    let _ = write!(
        out,
        r#"<div class="audit-scorecard" style="font-family: sans-serif; max-width: 800px;">"#
    );
    let _ = write!(
        out,
        r#"<h1 style="margin-bottom: 0;">Claim Audit Scorecard</h1><p style="color: #666;">Claim {} &middot; {}</p>"#,
        escape(&scorecard.claim_id),
        scorecard.audit_timestamp.to_rfc3339()
    );

    let _ = write!(
        out,
        r#"<div class="summary" style="display: flex; gap: 1.5rem; margin: 1rem 0;">
<div>Gross Claim<br><strong>{}</strong></div>
<div>Net Claim<br><strong>{}</strong></div>
<div>Total Findings<br><strong>{}</strong></div>
<div>Risk Score<br><strong>{:.0}/100</strong></div>
</div>"#,
        scorecard.claim_summary.gross_claim,
        scorecard.claim_summary.net_claim,
        scorecard.summary.total_findings,
        scorecard.summary.risk_score
    );

    let _ = write!(out, r#"<div class="modules-executed"><h2>Modules Executed</h2><ul>"#);
    for module in &scorecard.modules_executed {
        let _ = write!(out, "<li>{}</li>", escape(module));
    }
    let _ = write!(out, "</ul></div>");

    for category in [Category::Financial, Category::Leakage, Category::SupplementRisk] {
        let findings: Vec<_> = scorecard.category_findings(category).collect();
        if findings.is_empty() {
            continue;
        }

        let _ = write!(out, "<div class=\"category-section\"><h2>{}</h2>", category_label(category));
        for finding in findings {
            let _ = write!(
                out,
                r#"<div class="finding-card" style="border-left: 4px solid {}; padding-left: 0.75rem; margin-bottom: 0.75rem;">"#,
                severity_color(finding.severity)
            );
            let _ = write!(out, "<strong>{}</strong> <em>({})</em>", escape(&finding.title), escape(finding.rule_name.as_str()));
            let _ = write!(out, "<p>{}</p>", escape(&finding.description));
            if let Some(impact) = finding.potential_impact {
                let _ = write!(out, "<p>Impact: {impact}</p>");
            }
            if let Some(recommendation) = &finding.recommendation {
                let _ = write!(out, "<p>Recommendation: {}</p>", escape(recommendation));
            }
            let _ = write!(out, "</div>");
        }
        let _ = write!(out, "</div>");
    }

    let _ = write!(out, "</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::ScorecardBuilder;
    use crate::model::{FindingBuilder, PolicyCoverage};
    use crate::money::Money;

    #[test]
    fn escapes_html_in_finding_title() {
        let claim = crate::model::ClaimData::new(
            "CLM-HTML",
            PolicyCoverage::new(Money::ZERO, Money::ZERO, Money::ZERO, Money::ZERO).unwrap(),
        )
        .unwrap();
        let mut builder = ScorecardBuilder::new(&claim);
        builder.add_finding(
            FindingBuilder::new(
                "FND-000001",
                Category::Leakage,
                Severity::Warning,
                "rule",
                "<script>alert(1)</script>",
                "Desc",
            )
            .build(),
        );
        let html = render(&builder.build());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("audit-scorecard"));
    }
}
