//! Plain-text analysis report for the export endpoint

use std::fmt::{self, Write};

use chrono::{DateTime, Utc};
use shared_types::{LegalDocument, RiskLevel};

pub const REPORT_FILENAME: &str = "legislens-report.txt";

/// Render `document` as a human-readable report
pub fn render_report(document: &LegalDocument, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, document, generated_at);
    out
}

fn write_report(
    out: &mut String,
    document: &LegalDocument,
    generated_at: DateTime<Utc>,
) -> fmt::Result {
    let uploaded = DateTime::<Utc>::from_timestamp(document.created_at as i64, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| document.created_at.to_string());

    writeln!(out, "LegisLens Analysis Report")?;
    writeln!(out, "=========================")?;
    writeln!(
        out,
        "Document:  {}",
        document.filename.as_deref().unwrap_or("(untitled)")
    )?;
    writeln!(out, "ID:        {}", document.id)?;
    writeln!(out, "SHA-256:   {}", document.content_hash)?;
    writeln!(out, "Uploaded:  {}", uploaded)?;
    writeln!(out, "Generated: {}", generated_at.to_rfc3339())?;
    writeln!(out)?;

    writeln!(out, "Summary")?;
    writeln!(out, "-------")?;
    writeln!(out, "{}", document.summary.trim())?;
    writeln!(out)?;

    if document.clauses.is_empty() {
        return writeln!(out, "No clauses detected.");
    }

    writeln!(out, "Risk overview")?;
    writeln!(out, "-------------")?;
    for level in [
        RiskLevel::High,
        RiskLevel::Medium,
        RiskLevel::Low,
        RiskLevel::Unknown,
    ] {
        let count = document.clauses.iter().filter(|c| c.risk == level).count();
        writeln!(out, "{:<8} {}", level.as_str(), count)?;
    }
    writeln!(out)?;

    writeln!(out, "Clauses ({})", document.clauses.len())?;
    writeln!(out, "-----------")?;
    for clause in &document.clauses {
        writeln!(out)?;
        writeln!(out, "[{}] {}", clause.id, clause.title)?;
        writeln!(out, "Risk: {}", clause.risk)?;
        if clause.summary.is_empty() {
            writeln!(out, "Summary: (not analyzed)")?;
        } else {
            writeln!(out, "Summary: {}", clause.summary.trim())?;
        }
        writeln!(out)?;
        for line in clause.content.lines() {
            writeln!(out, "    {}", line)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Clause, ClauseAnalysis};

    fn sample() -> LegalDocument {
        let mut document = LegalDocument::new("full text", Some("lease.pdf".into()));
        document.summary = "A residential lease.".into();

        let mut rent = Clause::new(0, "Rent", "Tenant pays $1,500.\nDue on the 1st.");
        rent.apply_analysis(ClauseAnalysis {
            summary: "Monthly rent.".into(),
            risk: RiskLevel::High,
        });
        let term = Clause::new(4, "Term", "Twelve months.");

        document.clauses = vec![rent, term];
        document
    }

    #[test]
    fn test_report_lists_clauses_and_risks() {
        let report = render_report(&sample(), Utc::now());

        assert!(report.starts_with("LegisLens Analysis Report\n"));
        assert!(report.contains("Document:  lease.pdf"));
        assert!(report.contains("A residential lease."));
        assert!(report.contains("high     1"));
        assert!(report.contains("unknown  1"));
        assert!(report.contains("[0] Rent\nRisk: high\nSummary: Monthly rent."));
        assert!(report.contains("[4] Term\nRisk: unknown\nSummary: (not analyzed)"));
        assert!(report.contains("    Due on the 1st.\n"));
    }

    #[test]
    fn test_report_without_clauses() {
        let document = LegalDocument::new("text", None);
        let report = render_report(&document, Utc::now());

        assert!(report.contains("Document:  (untitled)"));
        assert!(report.ends_with("No clauses detected.\n"));
    }
}
