//! Per-document working state
//!
//! One `DocumentState` holds everything the engine needs for a single document:
//! its identifier, the extracted text spans are measured against, and the working
//! document that redactions mutate. Callers own the mapping from id to state and
//! serialize access to each state.

use crate::{Document, Result};

#[derive(Debug, Clone)]
pub struct DocumentState<D> {
    pub id: String,
    /// Extracted text at load time, updated by span redactions
    pub text: String,
    pub document: D,
}

impl<D: Document> DocumentState<D> {
    pub fn new(id: impl Into<String>, document: D) -> Self {
        let text = document.extract_text();
        Self {
            id: id.into(),
            text,
            document,
        }
    }

    /// Serialized form of the working document
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.document.to_bytes()
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }
}
