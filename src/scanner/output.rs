use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{
    BlockKind, LayerRecord, PropertyValue, Provenance, Strategy, UNKNOWN_FONT,
};

/// Output of the scanner's binary-analysis mode: a flat, unordered list
/// of font names found anywhere in the raw document bytes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BinaryScan {
    #[serde(default)]
    pub fonts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScanSummary {
    pub total_text_layers: usize,
    pub total_fonts: usize,
    pub association_success: usize,
    #[serde(default)]
    pub all_fonts_found: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScanLayer {
    pub layer_name: String,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default)]
    pub fonts_found: Vec<String>,
    #[serde(default)]
    pub association_method: Option<String>,
}

/// Output of the scanner's per-layer mode
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PerLayerScan {
    pub summary: ScanSummary,
    #[serde(default)]
    pub layers: Vec<ScanLayer>,
}

/// Parsed scanner output, either mode
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Binary(BinaryScan),
    PerLayer(PerLayerScan),
}

impl ScanOutcome {
    /// All font names the scan found, regardless of mode
    pub fn fonts(&self) -> &[String] {
        match self {
            ScanOutcome::Binary(scan) => &scan.fonts,
            ScanOutcome::PerLayer(scan) => &scan.summary.all_fonts_found,
        }
    }

    /// Layer records for the per-layer associations, tagged with the
    /// scan provenance. Binary mode has no per-layer data and yields
    /// nothing.
    pub fn layer_records(&self) -> Vec<LayerRecord> {
        let scan = match self {
            ScanOutcome::Binary(_) => return Vec::new(),
            ScanOutcome::PerLayer(scan) => scan,
        };
        scan.layers
            .iter()
            .enumerate()
            .map(|(index, layer)| {
                let mut properties = BTreeMap::new();
                if let Some(method) = &layer.association_method {
                    properties.insert(
                        "associationMethod".to_string(),
                        PropertyValue::Str(method.clone()),
                    );
                }
                LayerRecord {
                    name: layer.layer_name.clone(),
                    block_id: index as u32,
                    kind: BlockKind::Text,
                    properties,
                    text: layer.text_content.clone(),
                    font_size: None,
                    font_name: layer
                        .fonts_found
                        .first()
                        .cloned()
                        .unwrap_or_else(|| UNKNOWN_FONT.to_string()),
                    strategy: Strategy::None,
                    provenance: Provenance::ExternalScan,
                }
            })
            .collect()
    }
}

/// Parse binary-analysis stdout: the whole output is one JSON object.
pub fn parse_binary(stdout: &str) -> Result<ScanOutcome> {
    let scan: BinaryScan = serde_json::from_str(stdout.trim())
        .map_err(|e| Error::Scanner(format!("malformed binary scan output: {}", e)))?;
    Ok(ScanOutcome::Binary(scan))
}

/// Parse per-layer stdout: the scanner prints progress lines and the
/// LAST line is the JSON result.
pub fn parse_per_layer(stdout: &str) -> Result<ScanOutcome> {
    let last_line = stdout
        .trim()
        .lines()
        .last()
        .ok_or_else(|| Error::Scanner("empty per-layer scan output".to_string()))?;
    let scan: PerLayerScan = serde_json::from_str(last_line)
        .map_err(|e| Error::Scanner(format!("malformed per-layer scan output: {}", e)))?;
    Ok(ScanOutcome::PerLayer(scan))
}
