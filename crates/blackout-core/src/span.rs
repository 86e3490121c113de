//! Span value objects

use serde::{Deserialize, Serialize};

use crate::{Error, NormalizedRect, Result};

/// Generic label for content with no more specific classification
pub const SENSITIVE_LABEL: &str = "SENSITIVE";

/// A labeled byte range over a document's extracted text.
///
/// Spans have no identity beyond `(start, end)`: two spans with equal offsets are
/// duplicates regardless of label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl Span {
    pub fn new(text: impl Into<String>, start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            label: label.into(),
        }
    }

    /// Build a span whose text is sliced out of `source`, checking bounds first.
    pub fn from_source(
        source: &str,
        start: usize,
        end: usize,
        label: impl Into<String>,
    ) -> Result<Self> {
        if !in_bounds(source, start, end) {
            return Err(Error::InvalidSpan {
                start,
                end,
                len: source.len(),
            });
        }
        Ok(Self::new(&source[start..end], start, end, label))
    }

    pub fn key(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the offsets are in range for `source` and `text` matches the slice.
    ///
    /// Spans synthesized by text diffing must pass this before they are used.
    pub fn is_valid_for(&self, source: &str) -> bool {
        in_bounds(source, self.start, self.end) && source[self.start..self.end] == self.text
    }
}

/// `start < end <= len` with both offsets on char boundaries
pub fn in_bounds(source: &str, start: usize, end: usize) -> bool {
    start < end
        && end <= source.len()
        && source.is_char_boundary(start)
        && source.is_char_boundary(end)
}

/// A span plus the page and normalized rectangle where its text was first found.
///
/// All geometry fields are `None` when the text could not be located on any page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySpan {
    #[serde(flatten)]
    pub span: Span,
    /// 1-based page number
    pub page: Option<usize>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl GeometrySpan {
    pub fn unlocated(span: Span) -> Self {
        Self {
            span,
            page: None,
            x: None,
            y: None,
            w: None,
            h: None,
        }
    }

    pub fn located(span: Span, page: usize, rect: NormalizedRect) -> Self {
        Self {
            span,
            page: Some(page),
            x: Some(rect.x),
            y: Some(rect.y),
            w: Some(rect.w),
            h: Some(rect.h),
        }
    }

    pub fn is_located(&self) -> bool {
        self.page.is_some()
    }
}
