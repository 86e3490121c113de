//! Core domain models for blackout
//!
//! This crate contains:
//! - Span value objects (Span, GeometrySpan)
//! - Page geometry (Rect, NormalizedRect)
//! - The rendering collaborator traits (Page, Document) and an in-memory text layer
//! - Per-document working state and the error taxonomy

pub mod document;
pub mod error;
pub mod geometry;
pub mod page;
pub mod redaction;
pub mod span;
pub mod text_layer;

pub use document::DocumentState;
pub use error::{Error, Result};
pub use geometry::{NormalizedRect, Rect};
pub use page::{Document, Page};
pub use redaction::{RedactionItem, RedactionResult, RedactionStatus, SpanRecord};
pub use span::{GeometrySpan, SENSITIVE_LABEL, Span};
pub use text_layer::{Glyph, TextLayerDocument, TextLayerPage, TextLine};
