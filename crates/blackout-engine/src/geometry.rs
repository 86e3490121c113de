//! Geometry mapping: text spans to page positions

use blackout_core::{GeometrySpan, Page, Span};

/// Locate the first occurrence of the span's text, scanning pages in order.
///
/// The first page with any occurrence wins and its first occurrence is used. Text
/// that is not found anywhere yields null geometry rather than an error.
pub fn locate<P: Page>(span: Span, pages: &[P]) -> GeometrySpan {
    if span.text.is_empty() {
        return GeometrySpan::unlocated(span);
    }

    for (index, page) in pages.iter().enumerate() {
        if let Some(hit) = page.search_text(&span.text).first().copied() {
            let rect = hit.normalize_in(&page.bounds());
            return GeometrySpan::located(span, index + 1, rect);
        }
    }

    GeometrySpan::unlocated(span)
}

pub fn locate_all<P: Page>(spans: Vec<Span>, pages: &[P]) -> Vec<GeometrySpan> {
    spans.into_iter().map(|span| locate(span, pages)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackout_core::{Rect, TextLayerPage, TextLine};

    fn pages() -> Vec<TextLayerPage> {
        vec![
            TextLayerPage::new(200.0, 100.0)
                .push_line(TextLine::monospace("Invoice 42", 0.0, 0.0, 10.0)),
            TextLayerPage::new(400.0, 200.0)
                .push_line(TextLine::monospace("Bill Alice and Alice", 40.0, 100.0, 10.0)),
            TextLayerPage::new(200.0, 100.0)
                .push_line(TextLine::monospace("Alice", 0.0, 0.0, 10.0)),
        ]
    }

    #[test]
    fn test_first_page_first_occurrence() {
        let geo = locate(Span::new("Alice", 0, 5, "NAME"), &pages());

        assert_eq!(geo.page, Some(2));
        // "Bill " is five 5pt glyphs after x = 40
        assert_eq!(geo.x, Some(65.0 / 400.0));
        assert_eq!(geo.y, Some(0.5));
        assert_eq!(geo.w, Some(25.0 / 400.0));
        assert_eq!(geo.h, Some(10.0 / 200.0));
    }

    #[test]
    fn test_normalized_against_page_origin() {
        let page = TextLayerPage::with_bounds(Rect::new(100.0, 100.0, 300.0, 200.0))
            .push_line(TextLine::monospace("Secret", 150.0, 150.0, 10.0));
        let geo = locate(Span::new("Secret", 0, 6, "X"), &[page]);

        assert_eq!(geo.page, Some(1));
        assert_eq!(geo.x, Some(0.25));
        assert_eq!(geo.y, Some(0.5));
        for v in [geo.x, geo.y, geo.w, geo.h] {
            let v = v.unwrap();
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_not_found_is_null_geometry() {
        let geo = locate(Span::new("Carol", 0, 5, "NAME"), &pages());
        assert!(!geo.is_located());
        assert_eq!(geo.x, None);
        assert_eq!(geo.span.text, "Carol");
    }

    #[test]
    fn test_locate_all_preserves_order() {
        let spans = vec![
            Span::new("Alice", 0, 5, "NAME"),
            Span::new("Invoice", 6, 13, "DOC"),
        ];
        let located = locate_all(spans, &pages());
        assert_eq!(located[0].page, Some(2));
        assert_eq!(located[1].page, Some(1));
    }
}
