//! Blackout redaction of literal terms

use std::collections::HashSet;

use blackout_core::{
    Document, Error, Page, RedactionItem, RedactionResult, RedactionStatus, Result,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct BlackoutOptions {
    /// Report `NoHits` instead of `Success` when nothing matched
    pub report_no_hits: bool,
}

/// Reduce bare terms and span-like records to the list of terms to black out.
pub fn collect_terms(items: &[RedactionItem]) -> Result<Vec<String>> {
    if items.is_empty() {
        return Err(Error::InvalidInput("no redaction items provided".to_string()));
    }

    let terms: Vec<String> = items
        .iter()
        .filter_map(RedactionItem::term)
        .filter(|term| !term.trim().is_empty())
        .map(str::to_string)
        .collect();

    if terms.is_empty() {
        return Err(Error::InvalidInput("no valid redaction terms found".to_string()));
    }
    Ok(terms)
}

/// Cover every occurrence of every term on every page.
///
/// Each term is a separate pass over the pages, and each page is committed as soon
/// as its occurrences for the current term are covered. Terms are not checked
/// against each other, so a location matched by two terms counts twice.
pub fn apply_redactions<D: Document>(
    doc: &mut D,
    items: &[RedactionItem],
    options: BlackoutOptions,
) -> Result<RedactionResult> {
    let terms = collect_terms(items)?;

    let mut total_hits = 0;
    for (index, term) in terms.iter().enumerate() {
        let hits = blackout_term(doc, term);
        debug!(term_index = index, hits, "Term blacked out");
        total_hits += hits;
    }

    let total_terms = terms.iter().collect::<HashSet<_>>().len();
    let status = if total_hits == 0 && options.report_no_hits {
        RedactionStatus::NoHits
    } else {
        RedactionStatus::Success
    };

    Ok(RedactionResult {
        total_terms,
        total_hits,
        status,
    })
}

/// One pass of `term` over all pages. Returns the number of covered occurrences.
pub fn blackout_term<D: Document>(doc: &mut D, term: &str) -> usize {
    let mut hits = 0;

    for (index, page) in doc.pages_mut().iter_mut().enumerate() {
        let matches = page.search_text(term);
        if matches.is_empty() {
            continue;
        }

        for area in &matches {
            page.add_opaque_cover(*area);
        }
        page.commit();

        debug!(page = index + 1, hits = matches.len(), "Page committed");
        hits += matches.len();
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackout_core::{SpanRecord, TextLayerDocument};

    fn two_pages() -> TextLayerDocument {
        TextLayerDocument::from_page_texts(&[
            "Patient: Alice\nWard 4",
            "Contact alice@example.com for records",
        ])
    }

    #[test]
    fn test_hits_across_pages() {
        let mut doc = two_pages();
        let items = vec![
            RedactionItem::from("Alice"),
            RedactionItem::from("alice@example.com"),
        ];

        let result = apply_redactions(&mut doc, &items, BlackoutOptions::default()).unwrap();

        assert_eq!(result.total_hits, 2);
        assert_eq!(result.total_terms, 2);
        assert_eq!(result.status, RedactionStatus::Success);
        assert!(!doc.extract_text().contains("Alice"));
        assert!(!doc.extract_text().contains("alice@example.com"));
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut doc = two_pages();
        let err = apply_redactions(&mut doc, &[], BlackoutOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_items_without_text_rejected() {
        let items = vec![
            RedactionItem::from("   "),
            RedactionItem::Span(SpanRecord::default()),
        ];
        assert!(matches!(collect_terms(&items), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_span_records_reduce_to_text() {
        let items = vec![RedactionItem::Span(SpanRecord {
            text: Some("Ward 4".to_string()),
            ..Default::default()
        })];
        assert_eq!(collect_terms(&items).unwrap(), vec!["Ward 4"]);
    }

    #[test]
    fn test_zero_hits_is_success() {
        let mut doc = two_pages();
        let result =
            apply_redactions(&mut doc, &["Mallory".into()], BlackoutOptions::default()).unwrap();
        assert_eq!(result.total_hits, 0);
        assert_eq!(result.status, RedactionStatus::Success);

        let strict = BlackoutOptions {
            report_no_hits: true,
        };
        let result = apply_redactions(&mut doc, &["Mallory".into()], strict).unwrap();
        assert_eq!(result.status, RedactionStatus::NoHits);
    }

    #[test]
    fn test_repeated_term_finds_committed_content_gone() {
        let mut doc = two_pages();
        let result = apply_redactions(
            &mut doc,
            &["Alice".into(), "Alice".into()],
            BlackoutOptions::default(),
        )
        .unwrap();

        assert_eq!(result.total_terms, 1);
        assert_eq!(result.total_hits, 1);
    }

    #[test]
    fn test_every_occurrence_on_a_page_counts() {
        let mut doc = TextLayerDocument::from_page_texts(&["Bob, Bob\nand Bob"]);
        assert_eq!(blackout_term(&mut doc, "Bob"), 3);
        assert_eq!(doc.pages[0].covers.len(), 3);
    }
}
