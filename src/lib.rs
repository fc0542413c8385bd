//! Font and text-layer metadata extraction for parsed PSD scene graphs.
//!
//! The pipeline reads an opaque block/property graph (a scene dump from a
//! rendering engine that parsed the PSD), probes typed properties off each
//! block, runs a multi-strategy typeface-name extraction per text layer,
//! resolves requested fonts against a configured catalog, and reconciles
//! the findings with an independent out-of-process binary scanner.

pub mod cli;
pub mod diag;
pub mod engine;
pub mod error;
pub mod font;
pub mod hybrid;
pub mod models;
pub mod scanner;
pub mod utils;

pub use diag::{CollectingSink, Diagnostic, DiagnosticSink};
pub use error::{Error, Result};
