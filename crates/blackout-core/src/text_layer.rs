//! In-memory text layer document
//!
//! Pages are lists of lines of positioned glyphs. This is the reference rendering
//! collaborator used by the CLI and tests; a PDF backend implements the same traits.

use serde::{Deserialize, Serialize};

use crate::{Document, Page, Rect, Result};

/// Horizontal advance of a monospace glyph, as a fraction of the font size
const MONOSPACE_ADVANCE: f64 = 0.5;

const DEFAULT_MARGIN: f64 = 72.0;
const DEFAULT_FONT_SIZE: f64 = 12.0;
const DEFAULT_LEADING: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub ch: char,
    pub bbox: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub glyphs: Vec<Glyph>,
}

impl TextLine {
    /// Lay out `text` left to right from `(x, y)` with a fixed advance per char.
    pub fn monospace(text: &str, x: f64, y: f64, font_size: f64) -> Self {
        let advance = font_size * MONOSPACE_ADVANCE;
        let glyphs = text
            .chars()
            .enumerate()
            .map(|(i, ch)| Glyph {
                ch,
                bbox: Rect::from_size(x + i as f64 * advance, y, advance, font_size),
            })
            .collect();
        Self { glyphs }
    }

    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }

    fn find_all(&self, literal: &str) -> Vec<Rect> {
        let text = self.text();
        // Byte offset at which each glyph starts
        let starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();

        text.match_indices(literal)
            .filter_map(|(offset, matched)| {
                let first = starts.binary_search(&offset).ok()?;
                let last = starts.binary_search(&(offset + matched.len())).unwrap_or(starts.len());
                self.glyphs[first..last]
                    .iter()
                    .map(|g| g.bbox)
                    .reduce(|acc, b| acc.union(&b))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayerPage {
    pub bounds: Rect,
    #[serde(default)]
    pub lines: Vec<TextLine>,
    /// Black rectangles already flattened into the page
    #[serde(default)]
    pub covers: Vec<Rect>,
    #[serde(skip)]
    pending: Vec<Rect>,
}

impl TextLayerPage {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_bounds(Rect::new(0.0, 0.0, width, height))
    }

    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            bounds,
            lines: Vec::new(),
            covers: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Page with one monospace line per line of `text`, starting at the top margin.
    pub fn from_text(width: f64, height: f64, text: &str) -> Self {
        let mut page = Self::new(width, height);
        let line_height = DEFAULT_FONT_SIZE * DEFAULT_LEADING;
        for (i, line) in text.lines().enumerate() {
            page.lines.push(TextLine::monospace(
                line,
                DEFAULT_MARGIN,
                DEFAULT_MARGIN + i as f64 * line_height,
                DEFAULT_FONT_SIZE,
            ));
        }
        page
    }

    pub fn push_line(mut self, line: TextLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn pending_covers(&self) -> usize {
        self.pending.len()
    }
}

impl Page for TextLayerPage {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn search_text(&self, literal: &str) -> Vec<Rect> {
        if literal.is_empty() {
            return Vec::new();
        }
        self.lines
            .iter()
            .flat_map(|line| line.find_all(literal))
            .collect()
    }

    fn add_opaque_cover(&mut self, area: Rect) {
        self.pending.push(area);
    }

    fn commit(&mut self) {
        for cover in self.pending.drain(..) {
            for line in &mut self.lines {
                line.glyphs.retain(|g| !g.bbox.intersects(&cover));
            }
            self.covers.push(cover);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLayerDocument {
    pub pages: Vec<TextLayerPage>,
}

impl TextLayerDocument {
    pub fn new(pages: Vec<TextLayerPage>) -> Self {
        Self { pages }
    }

    /// US Letter pages, one per entry of `pages`
    pub fn from_page_texts<S: AsRef<str>>(pages: &[S]) -> Self {
        Self::new(
            pages
                .iter()
                .map(|text| TextLayerPage::from_text(612.0, 792.0, text.as_ref()))
                .collect(),
        )
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl Document for TextLayerDocument {
    type Page = TextLayerPage;

    fn pages(&self) -> &[TextLayerPage] {
        &self.pages
    }

    fn pages_mut(&mut self) -> &mut [TextLayerPage] {
        &mut self.pages
    }

    fn extract_text(&self) -> String {
        self.pages
            .iter()
            .map(TextLayerPage::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_returns_union_box() {
        let page = TextLayerPage::new(100.0, 100.0).push_line(TextLine::monospace(
            "Hi Alice",
            10.0,
            20.0,
            10.0,
        ));

        let hits = page.search_text("Alice");
        assert_eq!(hits, vec![Rect::new(25.0, 20.0, 50.0, 30.0)]);
    }

    #[test]
    fn test_search_does_not_cross_lines() {
        let page = TextLayerPage::from_text(612.0, 792.0, "Jane\nDoe");
        assert!(page.search_text("Jane\nDoe").is_empty());
        assert!(page.search_text("Jane Doe").is_empty());
        assert_eq!(page.search_text("Doe").len(), 1);
    }

    #[test]
    fn test_search_handles_multibyte_text() {
        let page = TextLayerPage::from_text(612.0, 792.0, "Café Zoë, Zoë");
        assert_eq!(page.search_text("Zoë").len(), 2);
    }

    #[test]
    fn test_commit_removes_covered_glyphs() {
        let mut page = TextLayerPage::from_text(612.0, 792.0, "Call Bob now");
        let hit = page.search_text("Bob")[0];
        page.add_opaque_cover(hit);

        // Covers take effect only on commit
        assert_eq!(page.text(), "Call Bob now");
        assert_eq!(page.pending_covers(), 1);

        page.commit();
        assert_eq!(page.text(), "Call  now");
        assert_eq!(page.covers, vec![hit]);
        assert!(page.search_text("Bob").is_empty());
    }

    #[test]
    fn test_document_bytes_roundtrip_content() {
        let doc = TextLayerDocument::from_page_texts(&["one", "two"]);
        let parsed = TextLayerDocument::from_bytes(&doc.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed.extract_text(), "one\ntwo");
        assert_eq!(parsed.page_count(), 2);
    }
}
