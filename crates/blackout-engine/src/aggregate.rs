//! Span aggregation across detectors

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use blackout_core::Span;
use blackout_detect::SpanSource;
use tracing::{debug, warn};

/// Merge pattern and entity spans into one detected-span set.
///
/// Inputs are concatenated in argument order, so an entity span replaces a pattern
/// span with identical offsets.
pub fn aggregate(pattern_spans: Vec<Span>, entity_spans: Vec<Span>) -> Vec<Span> {
    merge(pattern_spans.into_iter().chain(entity_spans))
}

/// Deduplicate by `(start, end)` and sort by `start`.
///
/// A later duplicate replaces the earlier one but keeps its slot, so ties on `start`
/// stay in first-seen order. Overlapping spans with different offsets all survive.
pub fn merge(spans: impl IntoIterator<Item = Span>) -> Vec<Span> {
    let mut slots: HashMap<(usize, usize), usize> = HashMap::new();
    let mut unique: Vec<Span> = Vec::new();

    for span in spans {
        match slots.entry(span.key()) {
            Entry::Occupied(slot) => unique[*slot.get()] = span,
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(span);
            }
        }
    }

    unique.sort_by_key(|span| span.start);
    unique
}

/// Run every source over `text` and merge the results.
///
/// A failing source contributes nothing; the others still count.
pub fn collect_spans(text: &str, sources: &[&dyn SpanSource]) -> Vec<Span> {
    let mut all = Vec::new();

    for source in sources {
        match source.detect(text) {
            Ok(spans) => {
                debug!(detector = source.name(), count = spans.len(), "Detector finished");
                all.extend(spans);
            }
            Err(e) => {
                warn!(detector = source.name(), error = %e, "Detector failed, skipping its spans");
            }
        }
    }

    merge(all)
}
