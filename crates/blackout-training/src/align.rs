//! Span cleaning, token alignment and overlap resolution

use std::collections::BTreeSet;

use blackout_core::{Span, span::in_bounds};
use blackout_tokens::{AlignmentMode, Tokenizer, align};
use serde::{Deserialize, Serialize};

/// Unvalidated offsets, possibly missing an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpan {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl RawSpan {
    pub fn new(start: Option<usize>, end: Option<usize>) -> Self {
        Self { start, end }
    }
}

impl From<(usize, usize)> for RawSpan {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(Some(start), Some(end))
    }
}

/// Turn noisy raw offsets into non-overlapping, token-aligned spans labeled `label`.
///
/// Spans that are out of bounds, blank, or impossible to align are dropped.
pub fn clean_and_align(
    text: &str,
    raw_spans: &[RawSpan],
    tokenizer: &dyn Tokenizer,
    label: &str,
) -> Vec<Span> {
    let cleaned: Vec<(usize, usize)> = raw_spans
        .iter()
        .filter_map(|raw| Some((raw.start?, raw.end?)))
        .filter(|&(start, end)| in_bounds(text, start, end))
        .filter(|&(start, end)| !text[start..end].trim().is_empty())
        .collect();

    if cleaned.is_empty() {
        return Vec::new();
    }

    let tokens = tokenizer.tokenize(text);
    let aligned: BTreeSet<(usize, usize)> = cleaned
        .into_iter()
        .filter_map(|(start, end)| {
            align(&tokens, start, end, AlignmentMode::Contract)
                .or_else(|| align(&tokens, start, end, AlignmentMode::Expand))
        })
        .collect();

    resolve_overlaps(aligned)
        .into_iter()
        .map(|(start, end)| Span::new(&text[start..end], start, end, label))
        .collect()
}

/// Greedy left-to-right overlap removal over spans sorted by `(start, end)`.
///
/// A span overlapping the most recently kept one replaces it only when strictly
/// longer. Spans kept earlier are never revisited.
pub fn resolve_overlaps(sorted: impl IntoIterator<Item = (usize, usize)>) -> Vec<(usize, usize)> {
    let mut kept: Vec<(usize, usize)> = Vec::new();

    for (start, end) in sorted {
        match kept.last_mut() {
            Some(last) if start < last.1 => {
                if end - start > last.1 - last.0 {
                    *last = (start, end);
                }
            }
            _ => kept.push((start, end)),
        }
    }

    kept
}
