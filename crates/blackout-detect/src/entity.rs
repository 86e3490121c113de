//! Entity-recognition detector
//!
//! The recognizer's internals live outside this crate. `EntityModel` is the seam:
//! anything that turns text into labeled spans. `GazetteerModel` is a dictionary
//! model loaded from JSON, useful before a statistical model has been trained.

use std::path::Path;

use blackout_core::{Error, Result, SENSITIVE_LABEL, Span};
use serde::{Deserialize, Serialize};

use crate::SpanSource;

pub trait EntityModel: Send + Sync {
    fn entities(&self, text: &str) -> anyhow::Result<Vec<Span>>;
}

/// Detector backed by an optional entity model.
///
/// A detector without a model is valid but unavailable: every call fails with
/// `DetectorUnavailable` so aggregation can fall back to other sources.
pub struct EntityDetector {
    model: Option<Box<dyn EntityModel>>,
}

impl EntityDetector {
    pub fn new(model: impl EntityModel + 'static) -> Self {
        Self {
            model: Some(Box::new(model)),
        }
    }

    pub fn unloaded() -> Self {
        Self { model: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }
}

impl SpanSource for EntityDetector {
    fn name(&self) -> &str {
        "entities"
    }

    fn detect(&self, text: &str) -> Result<Vec<Span>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| Error::detector_unavailable(self.name(), "model not loaded"))?;

        let spans = model
            .entities(text)
            .map_err(|e| Error::detector_unavailable(self.name(), e))?;

        Ok(spans
            .into_iter()
            .map(|mut span| {
                if span.label.is_empty() {
                    span.label = SENSITIVE_LABEL.to_string();
                }
                span
            })
            .collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconTerm {
    pub text: String,
    #[serde(default)]
    pub label: String,
}

/// Dictionary model: every literal occurrence of a known term is an entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazetteerModel {
    pub terms: Vec<LexiconTerm>,
}

impl GazetteerModel {
    pub fn new(terms: Vec<LexiconTerm>) -> Self {
        Self { terms }
    }

    /// Load a lexicon file shaped like `{"terms": [{"text": "...", "label": "..."}]}`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl EntityModel for GazetteerModel {
    fn entities(&self, text: &str) -> anyhow::Result<Vec<Span>> {
        let mut spans = Vec::new();

        for term in self.terms.iter().filter(|t| !t.text.is_empty()) {
            for (start, matched) in text.match_indices(term.text.as_str()) {
                spans.push(Span::new(
                    matched,
                    start,
                    start + matched.len(),
                    term.label.as_str(),
                ));
            }
        }

        Ok(spans)
    }
}
