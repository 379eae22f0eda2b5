//! Shared application state for the LegisLens server

use std::sync::Arc;

use shared_types::{Clause, LegalDocument};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::pipeline::DocumentPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The currently loaded document
    pub documents: DocumentSlot,
    /// Summary, segmentation and analysis
    pub pipeline: Arc<DocumentPipeline>,
}

impl AppState {
    pub fn new(pipeline: DocumentPipeline) -> Self {
        Self {
            documents: DocumentSlot::default(),
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Write-back target no longer matches the loaded document
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Document {0} was replaced by a newer upload")]
pub struct DocumentReplaced(pub String);

/// Holder for the single "current" document.
///
/// Readers get an `Arc` snapshot, so an upload that lands mid-request never
/// exposes a partially built document. Uploads swap the whole value.
#[derive(Clone, Default)]
pub struct DocumentSlot {
    inner: Arc<RwLock<Option<Arc<LegalDocument>>>>,
}

impl DocumentSlot {
    pub async fn snapshot(&self) -> Option<Arc<LegalDocument>> {
        self.inner.read().await.clone()
    }

    pub async fn replace(&self, document: LegalDocument) -> Arc<LegalDocument> {
        let document = Arc::new(document);
        *self.inner.write().await = Some(Arc::clone(&document));
        document
    }

    /// Store a re-analyzed clause into document `document_id`.
    ///
    /// Fails when that document is no longer the loaded one.
    pub async fn update_clause(
        &self,
        document_id: &str,
        clause: Clause,
    ) -> Result<(), DocumentReplaced> {
        let mut guard = self.inner.write().await;

        let current = match guard.as_mut() {
            Some(current) if current.id == document_id => current,
            _ => return Err(DocumentReplaced(document_id.to_string())),
        };

        if let Some(slot) = Arc::make_mut(current).clause_mut(clause.id) {
            *slot = clause;
        }

        Ok(())
    }
}
