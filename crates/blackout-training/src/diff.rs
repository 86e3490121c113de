//! Removed-segment detection between two versions of a document's text
//!
//! Three verbatim heuristics, unioned. Duplicates and false positives are expected;
//! the aligner filters them.

use std::collections::HashSet;

/// Field labels whose whole line is treated as removed when it disappears
pub const DEFAULT_FIELD_KEYWORDS: &[&str] = &[
    "Produced by",
    "Producer",
    "Client",
    "Name",
    "Address",
    "Lot",
    "Batch",
    "Certificate",
    "Sample",
    "Issued",
    "Received",
];

/// Byte ranges of `original` that do not survive into `redacted`.
pub fn find_removed_segments<S: AsRef<str>>(
    original: &str,
    redacted: &str,
    field_keywords: &[S],
) -> Vec<(usize, usize)> {
    let mut removed = removed_words(original, redacted);
    removed.extend(removed_fields(original, redacted, field_keywords));
    removed.extend(removed_delimited_lines(original, redacted));
    removed
}

/// Words of `original` that appear nowhere among the words of `redacted`.
///
/// The search cursor only moves forward, so each word instance is located at its
/// own position rather than at an earlier copy of the same word.
fn removed_words(original: &str, redacted: &str) -> Vec<(usize, usize)> {
    let kept: HashSet<&str> = redacted.split_whitespace().collect();
    let mut cursor = 0;
    let mut removed = Vec::new();

    for word in original.split_whitespace() {
        let Some(offset) = original[cursor..].find(word) else {
            continue;
        };
        let start = cursor + offset;
        let end = start + word.len();

        if !kept.contains(word) {
            removed.push((start, end));
        }
        cursor = end;
    }

    removed
}

/// From each keyword occurrence to the end of its line, when that text is gone.
fn removed_fields<S: AsRef<str>>(
    original: &str,
    redacted: &str,
    keywords: &[S],
) -> Vec<(usize, usize)> {
    let mut removed = Vec::new();

    for keyword in keywords.iter().map(AsRef::as_ref) {
        let Some(first_char) = keyword.chars().next() else {
            continue;
        };

        let mut from = 0;
        while let Some(offset) = original[from..].find(keyword) {
            let start = from + offset;
            let end = original[start..]
                .find('\n')
                .map_or(original.len(), |i| start + i);
            let line = &original[start..end];

            if !line.trim().is_empty() && !redacted.contains(line) {
                removed.push((start, end));
            }
            from = start + first_char.len_utf8();
        }
    }

    removed
}

/// Lines containing a colon (label: value rows) that are gone from `redacted`.
fn removed_delimited_lines(original: &str, redacted: &str) -> Vec<(usize, usize)> {
    let mut removed = Vec::new();
    let mut offset = 0;

    for line in original.split('\n') {
        if line.contains(':') && !line.trim().is_empty() && !redacted.contains(line) {
            removed.push((offset, offset + line.len()));
        }
        offset += line.len() + 1;
    }

    removed
}
