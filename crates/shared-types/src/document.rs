//! The aggregate produced by one upload: extracted text, summary and clauses

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::types::Clause;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalDocument {
    pub id: String,
    pub filename: Option<String>,
    /// Hex SHA-256 of `full_text`
    pub content_hash: String,
    pub created_at: u64,
    pub full_text: String,
    /// Document-level synopsis, empty until analyzed
    pub summary: String,
    /// Clauses in order of first appearance in `full_text`
    pub clauses: Vec<Clause>,
}

impl LegalDocument {
    /// Create an unanalyzed document with no clauses
    pub fn new(full_text: impl Into<String>, filename: Option<String>) -> Self {
        let full_text = full_text.into();
        Self {
            id: Uuid::new_v4().to_string(),
            filename,
            content_hash: hash_text(&full_text),
            created_at: chrono::Utc::now().timestamp() as u64,
            full_text,
            summary: String::new(),
            clauses: Vec::new(),
        }
    }

    /// Find a clause by its `id`, which is not necessarily its position
    pub fn clause(&self, id: usize) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.id == id)
    }

    pub fn clause_mut(&mut self, id: usize) -> Option<&mut Clause> {
        self.clauses.iter_mut().find(|c| c.id == id)
    }

    pub fn has_clauses(&self) -> bool {
        !self.clauses.is_empty()
    }
}

fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
