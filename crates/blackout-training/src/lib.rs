//! Training span synthesis
//!
//! Offline pipeline that turns pairs of (original, redacted) documents into labeled
//! spans for an entity model:
//! 1. `diff`: infer which ranges of the original were removed
//! 2. `align`: validate, snap to tokens, and resolve overlaps
//! 3. `dataset`: pair documents on disk and write examples as JSON Lines

pub mod align;
pub mod dataset;
pub mod diff;

pub use align::{RawSpan, clean_and_align, resolve_overlaps};
pub use dataset::{
    DocumentPair, ExampleBuilder, TrainingExample, build_example, load_text, pair_documents,
    write_jsonl,
};
pub use diff::{DEFAULT_FIELD_KEYWORDS, find_removed_segments};
