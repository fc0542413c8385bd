//! Engine-side extraction: block access, typed property probing, and the
//! typeface-name strategy cascade

pub mod access;
pub mod extract;
pub mod probe;
pub mod scene;
pub mod typeface;

pub use access::{AccessError, BlockAccessor, BlockId, TypefaceRef};
pub use extract::extract_layers;
pub use probe::{declared_kind, probe, PathRule, Probe, PropertyKind, PROPERTY_SCHEMA};
pub use scene::{BlockDump, JsonScene, PropertyDump};
pub use typeface::extract_font_name;
