use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder font name emitted when every extraction strategy failed.
/// Callers must treat it as "no font determined", not as an error.
pub const UNKNOWN_FONT: &str = "Unknown";

/// RGBA color value as stored by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// A typed property value read off a block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Str(String),
    Bool(bool),
    Float(f32),
    Double(f64),
    Enum(String),
    Color(Rgba),
}

/// Coarse block classification derived from the engine type string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Text,
    Graphic,
    Other,
}

impl BlockKind {
    /// Classify an engine type string such as `//ly.img.ubq/text`
    pub fn from_type_str(type_str: &str) -> Self {
        if type_str.contains("text") {
            BlockKind::Text
        } else if type_str.contains("graphic") {
            BlockKind::Graphic
        } else {
            BlockKind::Other
        }
    }
}

/// Which extraction strategy produced a layer's font name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    NativeTypeface,
    RangedTypefaces,
    StringProperty,
    IdentifierLookup,
    FileUri,
    None,
}

/// Which source a layer's font value ultimately came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Engine,
    ExternalScan,
    IndexFallback,
}

/// Everything extracted for one traversed block.
///
/// Created per block during traversal, dropped at the end of the request.
#[derive(Debug, Clone, Serialize)]
pub struct LayerRecord {
    pub name: String,
    pub block_id: u32,
    pub kind: BlockKind,
    pub properties: BTreeMap<String, PropertyValue>,
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub font_name: String,
    pub strategy: Strategy,
    pub provenance: Provenance,
}

impl LayerRecord {
    /// Whether no extraction strategy produced a font for this layer
    pub fn is_font_unknown(&self) -> bool {
        self.font_name == UNKNOWN_FONT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_kind_classifies_engine_type_strings() {
        assert_eq!(BlockKind::from_type_str("//ly.img.ubq/text"), BlockKind::Text);
        assert_eq!(BlockKind::from_type_str("//ly.img.ubq/graphic"), BlockKind::Graphic);
        assert_eq!(BlockKind::from_type_str("//ly.img.ubq/page"), BlockKind::Other);
    }
}
