//! Rendering collaborator capabilities
//!
//! The engine never renders or lays out text itself. It only needs a page to search
//! for literal text, accept opaque covers, and flatten them into its content.

use crate::{Rect, Result};

pub trait Page {
    /// Page rectangle in its own coordinate space
    fn bounds(&self) -> Rect;

    fn width(&self) -> f64 {
        self.bounds().width()
    }

    fn height(&self) -> f64 {
        self.bounds().height()
    }

    /// Bounding boxes of every occurrence of `literal`, in reading order
    fn search_text(&self, literal: &str) -> Vec<Rect>;

    /// Register an opaque cover. It takes effect on `commit`.
    fn add_opaque_cover(&mut self, area: Rect);

    /// Flatten pending covers: content beneath them is physically removed.
    fn commit(&mut self);
}

pub trait Document {
    type Page: Page;

    fn pages(&self) -> &[Self::Page];

    fn pages_mut(&mut self) -> &mut [Self::Page];

    fn page_count(&self) -> usize {
        self.pages().len()
    }

    /// Plain text of every page, joined with newlines
    fn extract_text(&self) -> String;

    /// Serialized byte form of the current content
    fn to_bytes(&self) -> Result<Vec<u8>>;
}
