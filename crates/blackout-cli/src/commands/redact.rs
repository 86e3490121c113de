use std::path::Path;

use anyhow::{Context, Result};
use blackout_config::Config;
use blackout_core::{NormalizedRect, RedactionItem};
use serde::Deserialize;
use tracing::info;

use super::{build_engine, load_state, write_document};

/// Accepted shapes of an `--items` file
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsFile {
    List(Vec<RedactionItem>),
    Report { suggestions: Vec<RedactionItem> },
}

impl ItemsFile {
    fn into_items(self) -> Vec<RedactionItem> {
        match self {
            ItemsFile::List(items) => items,
            ItemsFile::Report { suggestions } => suggestions,
        }
    }
}

fn read_items(path: &Path) -> Result<Vec<RedactionItem>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: ItemsFile = serde_json::from_str(&content).with_context(|| {
        format!(
            "parsing {}: expected an array of items or a suggestion report",
            path.display()
        )
    })?;
    Ok(file.into_items())
}

pub fn handle_terms(
    document: &Path,
    terms: Vec<String>,
    items_file: Option<&Path>,
    out: &Path,
    config: &Config,
) -> Result<()> {
    let mut items: Vec<RedactionItem> = terms.into_iter().map(RedactionItem::from).collect();
    if let Some(path) = items_file {
        items.extend(read_items(path)?);
    }

    let engine = build_engine(config)?;
    let mut state = load_state(document)?;

    let output = engine.redact_terms(&mut state, &items)?;
    write_document(out, &output.bytes)?;

    info!(
        hits = output.result.total_hits,
        terms = output.result.total_terms,
        out = %out.display(),
        "Redaction written"
    );
    println!("{}", serde_json::to_string_pretty(&output.result)?);
    Ok(())
}

pub fn handle_auto(document: &Path, out: &Path, config: &Config) -> Result<()> {
    let engine = build_engine(config)?;
    let mut state = load_state(document)?;

    let outcome = engine.auto_redact(&mut state)?;
    write_document(out, &state.to_bytes()?)?;

    info!(
        applied = outcome.applied,
        suggestions = outcome.total_suggestions,
        out = %out.display(),
        "Auto-redaction written"
    );
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

pub fn handle_span(
    document: &Path,
    start: usize,
    end: usize,
    out: &Path,
    config: &Config,
) -> Result<()> {
    let engine = build_engine(config)?;
    let mut state = load_state(document)?;

    let outcome = engine.redact_span(&mut state, start, end)?;
    write_document(out, &state.to_bytes()?)?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

pub fn handle_box(
    document: &Path,
    page: usize,
    [x, y, w, h]: [f64; 4],
    out: &Path,
    config: &Config,
) -> Result<()> {
    let engine = build_engine(config)?;
    let mut state = load_state(document)?;

    let outcome = engine.redact_region(&mut state, page, NormalizedRect::new(x, y, w, h))?;
    write_document(out, &state.to_bytes()?)?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackout_core::{Document, TextLayerDocument};

    #[test]
    fn test_terms_and_items_file_combined() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let items = dir.path().join("items.json");
        let out = dir.path().join("out.json");

        let doc = TextLayerDocument::from_page_texts(&["Alice owes Bob", "Carol"]);
        std::fs::write(&input, doc.to_bytes().unwrap()).unwrap();
        std::fs::write(&items, r#"[{"text": "Carol", "label": "PERSON"}]"#).unwrap();

        handle_terms(
            &input,
            vec!["Alice".to_string()],
            Some(&items),
            &out,
            &Config::default(),
        )
        .unwrap();

        let redacted = TextLayerDocument::from_bytes(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(redacted.extract_text(), " owes Bob\n");
    }

    #[test]
    fn test_suggest_report_accepted_as_items() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let items = dir.path().join("report.json");
        let out = dir.path().join("out.json");

        let doc = TextLayerDocument::from_page_texts(&["Mail bob@example.com today"]);
        std::fs::write(&input, doc.to_bytes().unwrap()).unwrap();

        let config = Config::default();
        let report = build_engine(&config)
            .unwrap()
            .suggest(&load_state(&input).unwrap())
            .unwrap();
        std::fs::write(&items, serde_json::to_vec(&report).unwrap()).unwrap();

        handle_terms(&input, Vec::new(), Some(&items), &out, &config).unwrap();

        let redacted = TextLayerDocument::from_bytes(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(redacted.extract_text(), "Mail  today");
    }

    #[test]
    fn test_items_file_of_wrong_shape_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let items = dir.path().join("items.json");
        std::fs::write(&items, r#"{"terms": ["x"]}"#).unwrap();
        assert!(read_items(&items).is_err());
    }

    #[test]
    fn test_auto_redaction_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let out = dir.path().join("out.json");

        let doc = TextLayerDocument::from_page_texts(&["SSN 123-45-6789 on file"]);
        std::fs::write(&input, doc.to_bytes().unwrap()).unwrap();

        handle_auto(&input, &out, &Config::default()).unwrap();

        let redacted = TextLayerDocument::from_bytes(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(redacted.extract_text(), "SSN  on file");
    }

    #[test]
    fn test_box_rejects_missing_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let doc = TextLayerDocument::from_page_texts(&["x"]);
        std::fs::write(&input, doc.to_bytes().unwrap()).unwrap();

        let result = handle_box(
            &input,
            3,
            [0.0, 0.0, 0.5, 0.5],
            &dir.path().join("out.json"),
            &Config::default(),
        );
        assert!(result.is_err());
    }
}
