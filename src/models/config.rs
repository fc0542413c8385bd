use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// One catalog entry as it appears in the configuration file.
///
/// Weights may be given either as a CSS number (700) or as a keyword
/// ("bold", "regular"); both go through the weight alias table when the
/// catalog is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontRecord {
    pub identifier: String,
    pub font_family: String,
    pub font_weight: WeightKey,
    #[serde(rename = "fontURI")]
    pub font_uri: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

/// Numeric or keyword weight key from the configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WeightKey {
    Number(u16),
    Keyword(String),
}

impl WeightKey {
    /// Lower-cased token form used for alias lookups
    pub fn token(&self) -> String {
        match self {
            WeightKey::Number(n) => n.to_string(),
            WeightKey::Keyword(s) => s.to_lowercase(),
        }
    }
}

/// External scanner invocation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerConfig {
    /// Program to spawn, e.g. "python"
    pub program: String,
    /// Arguments placed before the document path, e.g. the script name
    #[serde(default)]
    pub args: Vec<String>,
    /// Seconds to wait before killing the subprocess
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Whether the scanner emits per-layer output (last-line JSON)
    #[serde(default)]
    pub per_layer: bool,
}

fn default_timeout_secs() -> u64 {
    60
}

impl ScannerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            program: "python".to_string(),
            args: vec!["scan_fonts_binary.py".to_string()],
            timeout_secs: default_timeout_secs(),
            per_layer: false,
        }
    }
}

/// Configuration for one extraction session
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Available fonts, in catalog order
    pub fonts: Vec<FontRecord>,
    /// External scanner invocation
    pub scanner: ScannerConfig,
    /// Validate that file:// catalog entries point at parseable fonts
    pub verify_catalog: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fonts: Vec::new(),
            scanner: ScannerConfig::default(),
            verify_catalog: false,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_keyword_weights() {
        let json = r#"{
            "fonts": [
                {"identifier": "bebas-neue-bold", "fontFamily": "Bebas Neue",
                 "fontWeight": 700, "fontURI": "file:///fonts/BebasNeue Bold.otf",
                 "format": "otf", "provider": "file"},
                {"identifier": "arial-regular", "fontFamily": "Arial",
                 "fontWeight": "regular", "fontURI": "file:///fonts/Arial.ttf"}
            ],
            "scanner": {"program": "python", "args": ["scan_fonts_binary.py"]}
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.fonts.len(), 2);
        assert_eq!(config.fonts[0].font_weight.token(), "700");
        assert_eq!(config.fonts[1].font_weight.token(), "regular");
        assert_eq!(config.scanner.timeout_secs, 60);
    }
}
