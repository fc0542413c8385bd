//! External heuristic scanner integration

pub mod output;
pub mod subprocess;

use std::path::Path;

use crate::error::Result;
pub use output::{parse_binary, parse_per_layer, BinaryScan, PerLayerScan, ScanLayer, ScanOutcome, ScanSummary};
pub use subprocess::{ScanMode, SubprocessScanner};

/// Capability for scanning a document's raw bytes for font names.
///
/// The subprocess scanner is the shipped implementation; the seam exists
/// so an in-process analyzer can replace it without touching the hybrid
/// merge stage.
pub trait FontScanner: Sync {
    fn scan(&self, document: &Path) -> Result<ScanOutcome>;
}
