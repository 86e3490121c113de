use serde::{Deserialize, Serialize};

use crate::Span;

/// Outcome of one blackout call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionResult {
    pub total_terms: usize,
    pub total_hits: usize,
    pub status: RedactionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionStatus {
    Success,
    NoHits,
    /// Auto-redaction found nothing to redact, so nothing was applied
    NoSuggestions,
}

/// A requested redaction: a bare term or a span-like record carrying its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RedactionItem {
    Term(String),
    Span(SpanRecord),
}

/// Loosely-shaped span as supplied by callers; only `text` matters for blackout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
    #[serde(default)]
    pub label: Option<String>,
}

impl RedactionItem {
    pub fn term(&self) -> Option<&str> {
        match self {
            RedactionItem::Term(term) => Some(term),
            RedactionItem::Span(record) => record.text.as_deref(),
        }
    }
}

impl From<&str> for RedactionItem {
    fn from(term: &str) -> Self {
        RedactionItem::Term(term.to_string())
    }
}

impl From<String> for RedactionItem {
    fn from(term: String) -> Self {
        RedactionItem::Term(term)
    }
}

impl From<Span> for RedactionItem {
    fn from(span: Span) -> Self {
        RedactionItem::Span(SpanRecord {
            text: Some(span.text),
            start: Some(span.start),
            end: Some(span.end),
            label: Some(span.label),
        })
    }
}
