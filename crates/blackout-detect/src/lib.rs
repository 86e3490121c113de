//! Span detectors for blackout
//!
//! Every detector is a `SpanSource`: a pure function from text to labeled spans.
//! - `PatternDetector`: regular expressions for a fixed PII label set
//! - `EntityDetector`: spans from a statistical or dictionary entity model

pub mod entity;
pub mod patterns;

pub use entity::{EntityDetector, EntityModel, GazetteerModel, LexiconTerm};
pub use patterns::{BUILTIN_LABELS, PatternDetector};

use blackout_core::{Result, Span};

/// A detector that proposes sensitive spans over a document's text
pub trait SpanSource: Send + Sync {
    /// Name used in logs when the detector fails
    fn name(&self) -> &str;

    fn detect(&self, text: &str) -> Result<Vec<Span>>;
}
