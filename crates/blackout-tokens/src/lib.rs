//! Tokenization and char-to-token alignment

pub mod rules;

pub use rules::RuleTokenizer;

use serde::{Deserialize, Serialize};

/// Byte range of one token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// How a char range is snapped onto token boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMode {
    /// Keep only tokens wholly inside the range
    Contract,
    /// Keep every token the range touches
    Expand,
}

pub trait Tokenizer: Send + Sync {
    /// Ordered, non-overlapping token boundaries of `text`
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Snap `start..end` of `text` to token boundaries
    fn char_span(
        &self,
        text: &str,
        start: usize,
        end: usize,
        mode: AlignmentMode,
    ) -> Option<(usize, usize)> {
        align(&self.tokenize(text), start, end, mode)
    }
}

/// Snap `start..end` onto `tokens`, or `None` when no token qualifies.
pub fn align(
    tokens: &[Token],
    start: usize,
    end: usize,
    mode: AlignmentMode,
) -> Option<(usize, usize)> {
    if start >= end {
        return None;
    }

    let qualifies = |t: &&Token| match mode {
        AlignmentMode::Contract => t.start >= start && t.end <= end,
        AlignmentMode::Expand => t.start < end && t.end > start,
    };

    let mut selected = tokens.iter().filter(qualifies);
    let first = selected.next()?;
    let last = selected.last().unwrap_or(first);
    Some((first.start, last.end))
}
