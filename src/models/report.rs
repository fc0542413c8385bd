use serde::Serialize;
use std::collections::BTreeSet;

use super::layer::LayerRecord;

/// Combined outcome of the engine-side extraction and the external scan.
///
/// `combined_fonts` is always the union of the two source sets; the set
/// fields are sorted, the layer sequence preserves traversal order.
#[derive(Debug, Serialize)]
pub struct MergeResult {
    pub combined_fonts: Vec<String>,
    pub engine_fonts: Vec<String>,
    pub external_fonts: Vec<String>,
    pub layers: Vec<LayerRecord>,
}

impl MergeResult {
    pub fn new(
        engine: BTreeSet<String>,
        external: BTreeSet<String>,
        layers: Vec<LayerRecord>,
    ) -> Self {
        let combined: BTreeSet<String> = engine.union(&external).cloned().collect();
        MergeResult {
            combined_fonts: combined.into_iter().collect(),
            engine_fonts: engine.into_iter().collect(),
            external_fonts: external.into_iter().collect(),
            layers,
        }
    }
}

/// Per-run counters included in every report
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub total_unique_fonts: usize,
    pub engine_fonts: usize,
    pub external_fonts: usize,
    pub text_layers_processed: usize,
}

/// Top-level JSON report written for one document
#[derive(Debug, Serialize)]
pub struct Report {
    pub success: bool,
    pub source_file: String,
    pub summary: ReportSummary,
    pub fonts_found: MergeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    pub fn from_merge(source_file: &str, merge: MergeResult) -> Self {
        let text_layers = merge
            .layers
            .iter()
            .filter(|l| l.kind == crate::models::BlockKind::Text)
            .count();
        Report {
            success: true,
            source_file: source_file.to_string(),
            summary: ReportSummary {
                total_unique_fonts: merge.combined_fonts.len(),
                engine_fonts: merge.engine_fonts.len(),
                external_fonts: merge.external_fonts.len(),
                text_layers_processed: text_layers,
            },
            fonts_found: merge,
            error: None,
        }
    }
}
