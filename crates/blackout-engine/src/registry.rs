//! Document handles keyed by id
//!
//! Each document lives behind its own mutex. Holding the lock is what serializes
//! blackout calls and geometry lookups on the same document; different documents
//! proceed in parallel.

use std::sync::{Arc, Mutex};

use blackout_core::{Document, DocumentState};
use dashmap::DashMap;

pub type DocumentHandle<D> = Arc<Mutex<DocumentState<D>>>;

pub struct DocumentRegistry<D> {
    documents: DashMap<String, DocumentHandle<D>>,
}

impl<D: Document> DocumentRegistry<D> {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Register a document under a fresh id
    pub fn open(&self, document: D) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.insert(DocumentState::new(id.clone(), document));
        id
    }

    /// Register a state under its own id, replacing any previous holder
    pub fn insert(&self, state: DocumentState<D>) -> DocumentHandle<D> {
        let id = state.id.clone();
        let handle = Arc::new(Mutex::new(state));
        self.documents.insert(id, Arc::clone(&handle));
        handle
    }

    pub fn get(&self, id: &str) -> Option<DocumentHandle<D>> {
        self.documents.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn close(&self, id: &str) -> Option<DocumentHandle<D>> {
        self.documents.remove(id).map(|(_, handle)| handle)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<D: Document> Default for DocumentRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}
