//! Prompt construction and response parsing for LLM-backed providers

use shared_types::{ClauseAnalysis, RiskLevel};

/// Input limits, in characters, applied before text is sent to a model
pub const SUMMARY_INPUT_CHARS: usize = 10_000;
pub const CLAUSE_INPUT_CHARS: usize = 2_000;
pub const QUESTION_CONTEXT_CHARS: usize = 8_000;

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn summary_prompt(text: &str) -> String {
    format!(
        "Please provide a concise, plain-English summary of this legal document.\n\
         Focus on the overall purpose, main obligations of each party, and key terms.\n\
         Keep it under 150 words.\n\n\
         Document text:\n{}",
        truncate_chars(text, SUMMARY_INPUT_CHARS)
    )
}

pub fn clause_prompt(clause_text: &str) -> String {
    format!(
        "You are a legal expert explaining complex documents to everyday people.\n\n\
         Please analyze this legal clause and provide:\n\
         1. A very simple 1-2 sentence plain English summary.\n\
         2. A risk assessment: \"low\", \"medium\", or \"high\".\n   \
         Consider it \"high\" if it contains unusual terms, heavily favors one party,\n   \
         or removes standard protections.\n\n\
         Clause: {}\n\n\
         Respond in this exact format:\n\
         SUMMARY: [your summary here]\n\
         RISK: [low/medium/high]",
        truncate_chars(clause_text, CLAUSE_INPUT_CHARS)
    )
}

pub fn question_prompt(question: &str, document_text: &str) -> String {
    format!(
        "Based on the following legal document, please answer the user's question.\n\
         Provide a clear, concise response in plain English.\n\
         If the answer cannot be found in the document, say so.\n\n\
         Legal document:\n{}\n\n\
         User's question: {}\n\n\
         Answer:",
        truncate_chars(document_text, QUESTION_CONTEXT_CHARS),
        question
    )
}

pub fn translation_prompt(text: &str, target_language: &str) -> String {
    format!(
        "Translate the following text into the language with code or name \"{}\".\n\
         Reply with the translation only, preserving line breaks.\n\n{}",
        target_language, text
    )
}

/// Parse a "SUMMARY: ... RISK: ..." reply.
///
/// Replies missing either marker yield an empty summary and unknown risk.
pub fn parse_clause_response(response: &str) -> ClauseAnalysis {
    let unparsed = ClauseAnalysis {
        summary: String::new(),
        risk: RiskLevel::Unknown,
    };

    if !response.contains("SUMMARY:") || !response.contains("RISK:") {
        return unparsed;
    }

    let mut parts = response.split("RISK:");
    let summary_part = parts.next().unwrap_or_default();
    let risk_part = parts.next().unwrap_or_default().trim().to_lowercase();

    let risk = if risk_part.contains("low") {
        RiskLevel::Low
    } else if risk_part.contains("medium") {
        RiskLevel::Medium
    } else if risk_part.contains("high") {
        RiskLevel::High
    } else {
        RiskLevel::Unknown
    };

    ClauseAnalysis {
        summary: summary_part.replace("SUMMARY:", "").trim().to_string(),
        risk,
    }
}
