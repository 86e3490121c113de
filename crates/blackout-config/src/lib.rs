use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for blackout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub blackout: BlackoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Built-in pattern labels to enable
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    /// Extra patterns, evaluated after the built-ins
    #[serde(default)]
    pub custom_patterns: Vec<CustomPattern>,

    /// Gazetteer used as the entity model; no lexicon means no entity detector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    pub label: String,
    pub regex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_label")]
    pub label: String,

    #[serde(default = "default_field_keywords")]
    pub field_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlackoutConfig {
    #[serde(default)]
    pub report_no_hits: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            custom_patterns: Vec::new(),
            lexicon: None,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            field_keywords: default_field_keywords(),
        }
    }
}

fn default_patterns() -> Vec<String> {
    [
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
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_label() -> String {
    "SENSITIVE".to_string()
}

fn default_field_keywords() -> Vec<String> {
    [
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
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "blackout", "blackout") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.blackout/config.toml")
        }
    }
}
