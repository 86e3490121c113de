//! Training dataset assembly from (original, redacted) document pairs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use blackout_core::{Document, SENSITIVE_LABEL, Span, TextLayerDocument};
use blackout_tokens::{RuleTokenizer, Tokenizer};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::align::{RawSpan, clean_and_align};
use crate::diff::{DEFAULT_FIELD_KEYWORDS, find_removed_segments};

/// File-name suffix marking the redacted copy of a document
const REDACTED_SUFFIX: &str = "_Redacted";

/// One labeled document: its text and the sensitive spans within it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub entities: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPair {
    pub name: String,
    pub original: PathBuf,
    pub redacted: PathBuf,
}

/// Diff, align and label one document pair at a time
#[derive(Clone)]
pub struct ExampleBuilder {
    field_keywords: Vec<String>,
    label: String,
    tokenizer: Arc<dyn Tokenizer>,
}

impl ExampleBuilder {
    pub fn new(field_keywords: Vec<String>, label: impl Into<String>) -> Self {
        Self {
            field_keywords,
            label: label.into(),
            tokenizer: Arc::new(RuleTokenizer::new()),
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Example from two texts, or `None` when no removed span survives alignment
    pub fn build(&self, original: &str, redacted: &str) -> Option<TrainingExample> {
        build_example(
            original,
            redacted,
            &self.field_keywords,
            self.tokenizer.as_ref(),
            &self.label,
        )
    }

    pub fn build_pair(&self, pair: &DocumentPair) -> Result<Option<TrainingExample>> {
        let original = load_text(&pair.original)?;
        let redacted = load_text(&pair.redacted)?;

        let example = self.build(&original, &redacted);
        if example.is_none() {
            warn!(name = %pair.name, "Dropping pair with no valid aligned spans");
        }
        Ok(example)
    }

    /// Every pair under the two directories, processed in order.
    ///
    /// A pair whose files cannot be read is logged and skipped.
    pub fn build_dataset(&self, original_dir: &Path, redacted_dir: &Path) -> Result<Vec<TrainingExample>> {
        let mut examples = Vec::new();
        for pair in pair_documents(original_dir, redacted_dir)? {
            match self.build_pair(&pair) {
                Ok(example) => examples.extend(example),
                Err(e) => warn!(name = %pair.name, error = %e, "Skipping unreadable pair"),
            }
        }
        Ok(examples)
    }
}

impl Default for ExampleBuilder {
    fn default() -> Self {
        Self::new(
            DEFAULT_FIELD_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            SENSITIVE_LABEL,
        )
    }
}

/// Diff `original` against `redacted` and label the aligned removed spans.
pub fn build_example<S: AsRef<str>>(
    original: &str,
    redacted: &str,
    field_keywords: &[S],
    tokenizer: &dyn Tokenizer,
    label: &str,
) -> Option<TrainingExample> {
    let raw: Vec<RawSpan> = find_removed_segments(original, redacted, field_keywords)
        .into_iter()
        .map(RawSpan::from)
        .collect();
    let entities = clean_and_align(original, &raw, tokenizer, label);

    debug!(raw = raw.len(), aligned = entities.len(), "Aligned removed segments");
    if entities.is_empty() {
        return None;
    }

    Some(TrainingExample {
        text: original.to_string(),
        entities,
    })
}

/// Pair each file in `original_dir` with its counterpart in `redacted_dir`: the
/// same file name, or failing that `<stem>_Redacted.<ext>`.
///
/// Originals with no redacted counterpart are skipped with a warning.
pub fn pair_documents(original_dir: &Path, redacted_dir: &Path) -> Result<Vec<DocumentPair>> {
    let mut pairs = Vec::new();

    for entry in WalkDir::new(original_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("reading {}", original_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let Some(redacted) = redacted_counterpart(redacted_dir, entry.path()) else {
            warn!(name = %name, "No redacted counterpart, skipping");
            continue;
        };

        pairs.push(DocumentPair {
            name,
            original: entry.into_path(),
            redacted,
        });
    }

    Ok(pairs)
}

fn redacted_counterpart(redacted_dir: &Path, original: &Path) -> Option<PathBuf> {
    let file_name = original.file_name()?;
    let same_name = redacted_dir.join(file_name);
    if same_name.is_file() {
        return Some(same_name);
    }

    let stem = original.file_stem()?.to_string_lossy();
    let suffixed = match original.extension() {
        Some(ext) => format!("{}{}.{}", stem, REDACTED_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, REDACTED_SUFFIX),
    };
    let suffixed = redacted_dir.join(suffixed);
    suffixed.is_file().then_some(suffixed)
}

/// Extracted text of a text-layer document (`.json`) or a plain text file
pub fn load_text(path: &Path) -> Result<String> {
    let is_layout = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_layout {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let document = TextLayerDocument::from_bytes(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(document.extract_text())
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

/// Write one JSON object per line
pub fn write_jsonl(examples: &[TrainingExample], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for example in examples {
        serde_json::to_writer(&mut writer, example)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_build_example_from_texts() {
        let builder = ExampleBuilder::default();
        let example = builder
            .build("Name: Alice\nAmount: 100", "Amount: 100")
            .unwrap();

        assert_eq!(example.text, "Name: Alice\nAmount: 100");
        assert_eq!(
            example.entities,
            vec![Span::new("Name: Alice", 0, 11, SENSITIVE_LABEL)]
        );
    }

    #[test]
    fn test_build_example_with_custom_label() {
        let example = build_example(
            "Lot 42 shipped to Acme",
            "Lot 42 shipped to",
            &[] as &[&str],
            &RuleTokenizer::new(),
            "ORG",
        )
        .unwrap();
        assert_eq!(example.entities, vec![Span::new("Acme", 18, 22, "ORG")]);
    }

    /// Treats the whole text as a single token
    struct WholeText;

    impl Tokenizer for WholeText {
        fn tokenize(&self, text: &str) -> Vec<blackout_tokens::Token> {
            vec![blackout_tokens::Token::new(0, text.len())]
        }
    }

    #[test]
    fn test_custom_tokenizer_drives_alignment() {
        let builder = ExampleBuilder::default().with_tokenizer(Arc::new(WholeText));
        let example = builder.build("Pay Alice now", "Pay now").unwrap();

        assert_eq!(
            example.entities,
            vec![Span::new("Pay Alice now", 0, 13, SENSITIVE_LABEL)]
        );
    }

    #[test]
    fn test_unchanged_pair_yields_nothing() {
        let builder = ExampleBuilder::new(Vec::new(), "PII");
        assert!(builder.build("Same text", "Same text").is_none());
    }

    #[test]
    fn test_pairs_matched_by_name() {
        let root = tempfile::tempdir().unwrap();
        let original = root.path().join("original");
        let redacted = root.path().join("redacted");
        fs::create_dir_all(&original).unwrap();
        fs::create_dir_all(&redacted).unwrap();

        fs::write(original.join("b.txt"), "Client: Globex\nTotal: 9").unwrap();
        fs::write(original.join("a.txt"), "Client: Initech").unwrap();
        fs::write(original.join("orphan.txt"), "Client: Nobody").unwrap();
        fs::write(redacted.join("a.txt"), "").unwrap();
        fs::write(redacted.join("b.txt"), "Total: 9").unwrap();

        let pairs = pair_documents(&original, &redacted).unwrap();
        let names: Vec<_> = pairs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        let examples = ExampleBuilder::default()
            .build_dataset(&original, &redacted)
            .unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[1].entities[0].text, "Client: Globex");
    }

    #[test]
    fn test_pairs_matched_by_redacted_suffix() {
        let root = tempfile::tempdir().unwrap();
        let original = root.path().join("original");
        let redacted = root.path().join("redacted");
        fs::create_dir_all(&original).unwrap();
        fs::create_dir_all(&redacted).unwrap();

        fs::write(original.join("cert.txt"), "Issued to Dana Smith").unwrap();
        fs::write(redacted.join("cert_Redacted.txt"), "Issued to").unwrap();
        fs::write(original.join("notes"), "Sample 7 from Dana").unwrap();
        fs::write(redacted.join("notes_Redacted"), "Sample 7 from").unwrap();
        fs::write(original.join("memo.txt"), "Ship to Dana").unwrap();
        fs::write(redacted.join("memo.txt"), "Ship to").unwrap();
        fs::write(redacted.join("memo_Redacted.txt"), "unused").unwrap();

        let pairs = pair_documents(&original, &redacted).unwrap();
        let matched: Vec<_> = pairs
            .iter()
            .map(|p| (p.name.as_str(), p.redacted.file_name().unwrap().to_str().unwrap()))
            .collect();
        assert_eq!(
            matched,
            vec![
                ("cert.txt", "cert_Redacted.txt"),
                ("memo.txt", "memo.txt"),
                ("notes", "notes_Redacted"),
            ]
        );
    }

    #[test]
    fn test_unreadable_pair_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        let original = root.path().join("original");
        let redacted = root.path().join("redacted");
        fs::create_dir_all(&original).unwrap();
        fs::create_dir_all(&redacted).unwrap();

        fs::write(original.join("broken.json"), "not a document").unwrap();
        fs::write(redacted.join("broken.json"), "not a document").unwrap();
        fs::write(original.join("good.txt"), "Pay Alice today").unwrap();
        fs::write(redacted.join("good.txt"), "Pay today").unwrap();

        let examples = ExampleBuilder::default()
            .build_dataset(&original, &redacted)
            .unwrap();

        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].entities[0].text, "Alice");
    }

    #[test]
    fn test_load_text_reads_layout_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let doc = TextLayerDocument::from_page_texts(&["Page one", "Page two"]);
        fs::write(&path, doc.to_bytes().unwrap()).unwrap();

        assert_eq!(load_text(&path).unwrap(), "Page one\nPage two");
    }

    #[test]
    fn test_write_jsonl_one_line_per_example() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.jsonl");
        let examples = vec![
            TrainingExample {
                text: "a".to_string(),
                entities: vec![Span::new("a", 0, 1, "X")],
            },
            TrainingExample {
                text: "b".to_string(),
                entities: Vec::new(),
            },
        ];

        write_jsonl(&examples, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: TrainingExample = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, examples[0]);
    }
}
