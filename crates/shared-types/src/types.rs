use std::fmt;

/// Number of characters of clause content shown in a preview
pub const PREVIEW_CHARS: usize = 150;

/// Coarse risk rating assigned to a clause by the analysis provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Not yet analyzed, or the analysis response could not be parsed
    #[default]
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provision of a legal document, as produced by the segmenter
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Clause {
    pub id: usize,
    pub title: String,
    pub content: String,
    pub preview: String,
    /// Plain-language summary, empty until analyzed
    pub summary: String,
    pub risk: RiskLevel,
}

impl Clause {
    /// Create an unanalyzed clause; the preview is derived from `content`
    pub fn new(id: usize, title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let preview = make_preview(&content);
        Self {
            id,
            title: title.into(),
            content,
            preview,
            summary: String::new(),
            risk: RiskLevel::Unknown,
        }
    }

    pub fn is_analyzed(&self) -> bool {
        !self.summary.is_empty() && self.risk != RiskLevel::Unknown
    }

    /// Overwrite summary and risk with a fresh analysis result
    pub fn apply_analysis(&mut self, analysis: ClauseAnalysis) {
        self.summary = analysis.summary;
        self.risk = analysis.risk;
    }
}

/// Result of analyzing a single clause
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClauseAnalysis {
    pub summary: String,
    pub risk: RiskLevel,
}

impl ClauseAnalysis {
    /// Placeholder recorded when the analysis call itself failed
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self {
            summary: format!("Analysis failed: {}", reason),
            risk: RiskLevel::Unknown,
        }
    }
}

/// First 150 characters of `content` with newlines flattened, plus "..." if cut
pub fn make_preview(content: &str) -> String {
    let flattened: String = content
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    if content.chars().count() > PREVIEW_CHARS {
        format!("{}...", flattened)
    } else {
        flattened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_content_preview_is_flattened_verbatim() {
        let preview = make_preview("Tenant shall pay rent.\nLate fees apply.");
        assert_eq!(preview, "Tenant shall pay rent. Late fees apply.");
    }

    #[test]
    fn test_long_content_preview_is_truncated() {
        let content = "a".repeat(200);
        let preview = make_preview(&content);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_exact_limit_is_not_truncated() {
        let content = "b".repeat(PREVIEW_CHARS);
        assert_eq!(make_preview(&content), content);
    }

    #[test]
    fn test_new_clause_is_unanalyzed() {
        let clause = Clause::new(0, "PAYMENT", "Tenant shall pay monthly.");
        assert_eq!(clause.risk, RiskLevel::Unknown);
        assert!(clause.summary.is_empty());
        assert!(!clause.is_analyzed());
    }

    #[test]
    fn test_apply_analysis_overwrites() {
        let mut clause = Clause::new(3, "TERM", "The term is twelve months.");
        clause.apply_analysis(ClauseAnalysis {
            summary: "First".to_string(),
            risk: RiskLevel::High,
        });
        clause.apply_analysis(ClauseAnalysis {
            summary: "Second".to_string(),
            risk: RiskLevel::Low,
        });
        assert_eq!(clause.summary, "Second");
        assert_eq!(clause.risk, RiskLevel::Low);
        assert!(clause.is_analyzed());
    }

    #[test]
    fn test_failed_analysis_keeps_unknown_risk() {
        let analysis = ClauseAnalysis::failed("timed out");
        assert_eq!(analysis.summary, "Analysis failed: timed out");
        assert_eq!(analysis.risk, RiskLevel::Unknown);
    }

    #[test]
    fn test_risk_serializes_lowercase() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: RiskLevel = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(parsed, RiskLevel::Unknown);
    }
}
