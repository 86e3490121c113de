use blackout_core::{Document, DocumentState, Error, GeometrySpan, Result};
use blackout_detect::SpanSource;
use serde::{Deserialize, Serialize};

use crate::{aggregate::collect_spans, geometry::locate_all};

/// Detected spans with page positions, ready to show a reviewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionReport {
    pub doc_id: String,
    pub suggestions: Vec<GeometrySpan>,
    pub total: usize,
}

pub fn suggest<D: Document>(
    state: &DocumentState<D>,
    sources: &[&dyn SpanSource],
) -> Result<SuggestionReport> {
    if state.text.trim().is_empty() {
        return Err(Error::InvalidInput(format!(
            "document {} has no extracted text",
            state.id
        )));
    }

    let spans = collect_spans(&state.text, sources);
    let suggestions = locate_all(spans, state.document.pages());

    Ok(SuggestionReport {
        doc_id: state.id.clone(),
        total: suggestions.len(),
        suggestions,
    })
}
