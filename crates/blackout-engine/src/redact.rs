//! Single-span and region redaction

use blackout_core::{
    Document, DocumentState, Error, NormalizedRect, Page, Rect, Result, span::in_bounds,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blackout::blackout_term;

/// Replacement char written over redacted text in the working text
pub const MASK_CHAR: char = '█';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRedaction {
    pub doc_id: String,
    pub start: usize,
    pub end: usize,
    pub hits: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRedaction {
    /// 1-based page number
    pub page: usize,
    /// Covered area in absolute page coordinates
    pub rect: Rect,
}

/// Black out the text at `start..end` of the state's extracted text.
///
/// The slice is masked in the working text (one mask char per char, so later
/// offsets shift when the slice held multi-byte chars) and every occurrence of the
/// literal is covered on every page.
pub fn redact_span<D: Document>(
    state: &mut DocumentState<D>,
    start: usize,
    end: usize,
) -> Result<SpanRedaction> {
    if !in_bounds(&state.text, start, end) {
        return Err(Error::InvalidSpan {
            start,
            end,
            len: state.text.len(),
        });
    }

    let target = state.text[start..end].to_string();
    if target.trim().is_empty() {
        return Err(Error::InvalidInput("span covers only whitespace".to_string()));
    }

    let mask: String = target.chars().map(|_| MASK_CHAR).collect();
    state.text.replace_range(start..end, &mask);

    let hits = blackout_term(&mut state.document, &target);
    debug!(doc_id = %state.id, hits, "Span redacted");

    Ok(SpanRedaction {
        doc_id: state.id.clone(),
        start,
        end,
        hits,
    })
}

/// Cover a normalized rectangle on a 1-based page and commit it immediately.
pub fn redact_region<D: Document>(
    doc: &mut D,
    page: usize,
    area: NormalizedRect,
) -> Result<RegionRedaction> {
    let count = doc.page_count();
    if page == 0 || page > count {
        return Err(Error::PageOutOfRange { page, count });
    }
    if !area.is_valid() {
        return Err(Error::InvalidInput(format!(
            "region must lie within [0, 1], got {:?}",
            area
        )));
    }

    let target = &mut doc.pages_mut()[page - 1];
    let rect = area.to_absolute(&target.bounds());
    target.add_opaque_cover(rect);
    target.commit();

    Ok(RegionRedaction { page, rect })
}
