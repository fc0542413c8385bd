//! Data model shared across the extraction pipeline

pub mod config;
pub mod font;
pub mod layer;
pub mod report;

pub use config::{Config, FontRecord, ScannerConfig, WeightKey};
pub use font::{FontDescriptor, FontQuery, FontStyle, FontWeight};
pub use layer::{BlockKind, LayerRecord, PropertyValue, Provenance, Rgba, Strategy, UNKNOWN_FONT};
pub use report::{MergeResult, Report, ReportSummary};
