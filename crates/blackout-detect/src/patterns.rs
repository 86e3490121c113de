use blackout_core::{Error, Result, Span};
use lazy_static::lazy_static;
use regex::Regex;

use crate::SpanSource;

lazy_static! {
    static ref BUILTIN_PATTERNS: Vec<(&'static str, Regex)> = vec![
        (
            "EMAIL",
            Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap(),
        ),
        ("PHONE", Regex::new(r"\+?\d[\d\-\s]{7,}\d").unwrap()),
        ("CREDIT_CARD", Regex::new(r"\b(?:\d[ -]*?){13,16}\b").unwrap()),
        ("SSN", Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap()),
        ("DATE", Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap()),
        (
            "ADDRESS",
            Regex::new(
                r"\b\d+\s+[A-Za-z0-9'.\-]+\s+(?:Street|St|Road|Rd|Avenue|Ave|Boulevard|Blvd|Lane|Ln|Drive|Dr)\b",
            )
            .unwrap(),
        ),
        (
            "LICENSE",
            Regex::new(r"\b(?:DL|Driver.?s License|License No\.?)[:\s]*[A-Za-z0-9\-]{5,}\b").unwrap(),
        ),
        ("PASSPORT", Regex::new(r"\b[A-Z]{1,2}\d{6,9}\b").unwrap()),
        ("HEALTH_CARD", Regex::new(r"\b\d{4}\s?\d{3}\s?\d{3}\b").unwrap()),
        (
            "POSTAL_CODE",
            Regex::new(r"\b[A-Za-z]\d[A-Za-z]\s?\d[A-Za-z]\d\b").unwrap(),
        ),
    ];
}

/// Labels of the built-in patterns, in evaluation order
pub const BUILTIN_LABELS: &[&str] = &[
    "EMAIL",
    "PHONE",
    "CREDIT_CARD",
    "SSN",
    "DATE",
    "ADDRESS",
    "LICENSE",
    "PASSPORT",
    "HEALTH_CARD",
    "POSTAL_CODE",
];

/// Regex-based PII detector
pub struct PatternDetector {
    patterns: Vec<(String, Regex)>,
}

impl PatternDetector {
    /// Detector with every built-in pattern enabled
    pub fn new() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(label, re)| (label.to_string(), re.clone()))
            .collect();
        Self { patterns }
    }

    /// Detector with only the named built-in patterns, kept in built-in order
    pub fn with_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .filter(|(label, _)| labels.iter().any(|l| l.as_ref().eq_ignore_ascii_case(label)))
            .map(|(label, re)| (label.to_string(), re.clone()))
            .collect();
        Self { patterns }
    }

    /// Append a custom pattern, evaluated after everything already registered
    pub fn add_pattern(&mut self, label: &str, pattern: &str) -> Result<()> {
        let re = Regex::new(pattern).map_err(|e| {
            Error::InvalidInput(format!("pattern for {} does not compile: {}", label, e))
        })?;
        self.patterns.push((label.to_string(), re));
        Ok(())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.patterns.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// Every match of every pattern, grouped by pattern in registration order
    pub fn find_all(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();

        for (label, pattern) in &self.patterns {
            for m in pattern.find_iter(text) {
                spans.push(Span::new(m.as_str(), m.start(), m.end(), label.as_str()));
            }
        }

        spans
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanSource for PatternDetector {
    fn name(&self) -> &str {
        "patterns"
    }

    fn detect(&self, text: &str) -> Result<Vec<Span>> {
        Ok(self.find_all(text))
    }
}
