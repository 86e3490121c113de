pub mod dataset;
pub mod redact;
pub mod suggest;

use std::path::Path;

use anyhow::{Context, Result};
use blackout_config::Config;
use blackout_core::{DocumentState, TextLayerDocument};
use blackout_detect::{EntityDetector, GazetteerModel, PatternDetector};
use blackout_engine::{BlackoutOptions, RedactionEngine};
use tracing::warn;

/// Assemble detectors and options from config
pub fn build_engine(config: &Config) -> Result<RedactionEngine> {
    let mut patterns = PatternDetector::with_labels(&config.detection.patterns);
    for custom in &config.detection.custom_patterns {
        patterns.add_pattern(&custom.label, &custom.regex)?;
    }

    let entities = match &config.detection.lexicon {
        Some(path) => match GazetteerModel::load(path) {
            Ok(model) => EntityDetector::new(model),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not load lexicon, entity detection disabled");
                EntityDetector::unloaded()
            }
        },
        None => EntityDetector::unloaded(),
    };

    let options = BlackoutOptions {
        report_no_hits: config.blackout.report_no_hits,
    };

    Ok(RedactionEngine::new(patterns, entities).with_options(options))
}

/// Read a text-layer document; its id is the blake3 hash of the file bytes
pub fn load_state(path: &Path) -> Result<DocumentState<TextLayerDocument>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let id = blake3::hash(&bytes).to_hex().to_string();
    let document = TextLayerDocument::from_bytes(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(DocumentState::new(id, document))
}

pub fn write_document(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackout_config::CustomPattern;
    use blackout_core::Document;

    #[test]
    fn test_engine_from_config() {
        let mut config = Config::default();
        config.detection.patterns = vec!["EMAIL".to_string()];
        config.detection.custom_patterns.push(CustomPattern {
            label: "LOT".to_string(),
            regex: r"LOT-\d+".to_string(),
        });

        let engine = build_engine(&config).unwrap();
        let labels: Vec<_> = engine
            .detect("LOT-12 to a@b.io, call 416 555 0199")
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["LOT", "EMAIL"]);
    }

    #[test]
    fn test_bad_custom_pattern_is_an_error() {
        let mut config = Config::default();
        config.detection.custom_patterns.push(CustomPattern {
            label: "BAD".to_string(),
            regex: "[".to_string(),
        });
        assert!(build_engine(&config).is_err());
    }

    #[test]
    fn test_load_state_hashes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let doc = TextLayerDocument::from_page_texts(&["Hello"]);
        let bytes = doc.to_bytes().unwrap();
        std::fs::write(&path, &bytes).unwrap();

        let state = load_state(&path).unwrap();
        assert_eq!(state.id, blake3::hash(&bytes).to_hex().to_string());
        assert_eq!(state.text, "Hello");
    }
}
