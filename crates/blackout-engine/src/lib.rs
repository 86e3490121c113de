//! Redaction span engine
//!
//! - `aggregate`: merge detector output into one detected-span set
//! - `geometry`: map spans to a page and a normalized rectangle
//! - `blackout`: cover and commit every occurrence of literal terms
//! - `redact`: single-span and region redaction
//! - `registry`: per-document handles for callers that serve many documents

pub mod aggregate;
pub mod blackout;
pub mod geometry;
pub mod redact;
pub mod registry;
pub mod suggest;

pub use aggregate::{aggregate, collect_spans, merge};
pub use blackout::{BlackoutOptions, apply_redactions, blackout_term, collect_terms};
pub use geometry::{locate, locate_all};
pub use redact::{RegionRedaction, SpanRedaction, redact_region, redact_span};
pub use registry::{DocumentHandle, DocumentRegistry};
pub use suggest::{SuggestionReport, suggest};

use std::sync::Arc;

use blackout_core::{
    Document, DocumentState, NormalizedRect, RedactionItem, RedactionResult, RedactionStatus,
    Result, Span,
};
use blackout_detect::{EntityDetector, PatternDetector, SpanSource};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of a blackout call plus the serialized document it produced
#[derive(Debug, Clone)]
pub struct BlackoutOutput {
    pub result: RedactionResult,
    pub bytes: Vec<u8>,
}

/// Outcome of redacting every suggestion for a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoRedaction {
    pub doc_id: String,
    /// Covered occurrences
    pub applied: usize,
    pub total_suggestions: usize,
    pub status: RedactionStatus,
}

/// Detectors and options bundled for one application
pub struct RedactionEngine {
    patterns: Arc<PatternDetector>,
    entities: Arc<EntityDetector>,
    options: BlackoutOptions,
}

impl RedactionEngine {
    pub fn new(patterns: PatternDetector, entities: EntityDetector) -> Self {
        Self {
            patterns: Arc::new(patterns),
            entities: Arc::new(entities),
            options: BlackoutOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BlackoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Entity spans first, so pattern spans win exact-offset ties
    fn sources(&self) -> [&dyn SpanSource; 2] {
        [self.entities.as_ref(), self.patterns.as_ref()]
    }

    pub fn detect(&self, text: &str) -> Vec<Span> {
        collect_spans(text, &self.sources())
    }

    pub fn suggest<D: Document>(&self, state: &DocumentState<D>) -> Result<SuggestionReport> {
        suggest(state, &self.sources())
    }

    pub fn redact_terms<D: Document>(
        &self,
        state: &mut DocumentState<D>,
        items: &[RedactionItem],
    ) -> Result<BlackoutOutput> {
        let result = apply_redactions(&mut state.document, items, self.options)?;
        Ok(BlackoutOutput {
            result,
            bytes: state.to_bytes()?,
        })
    }

    /// Suggest, then black out the text of every suggestion.
    pub fn auto_redact<D: Document>(&self, state: &mut DocumentState<D>) -> Result<AutoRedaction> {
        let report = self.suggest(state)?;
        let total_suggestions = report.total;

        if report.suggestions.is_empty() {
            info!(doc_id = %state.id, "No suggestions to apply");
            return Ok(AutoRedaction {
                doc_id: report.doc_id,
                applied: 0,
                total_suggestions,
                status: RedactionStatus::NoSuggestions,
            });
        }

        let items: Vec<RedactionItem> = report
            .suggestions
            .into_iter()
            .map(|s| RedactionItem::from(s.span))
            .collect();
        let result = apply_redactions(&mut state.document, &items, self.options)?;

        Ok(AutoRedaction {
            doc_id: report.doc_id,
            applied: result.total_hits,
            total_suggestions,
            status: result.status,
        })
    }

    pub fn redact_span<D: Document>(
        &self,
        state: &mut DocumentState<D>,
        start: usize,
        end: usize,
    ) -> Result<SpanRedaction> {
        redact_span(state, start, end)
    }

    pub fn redact_region<D: Document>(
        &self,
        state: &mut DocumentState<D>,
        page: usize,
        area: NormalizedRect,
    ) -> Result<RegionRedaction> {
        redact_region(&mut state.document, page, area)
    }
}

impl Default for RedactionEngine {
    fn default() -> Self {
        Self::new(PatternDetector::new(), EntityDetector::unloaded())
    }
}
