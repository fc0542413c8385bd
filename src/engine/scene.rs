use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::access::{AccessError, BlockAccessor, BlockId, TypefaceRef};
use crate::error::{Error, Result as CrateResult};
use crate::models::Rgba;

/// One typed property value in a scene dump.
///
/// Externally tagged so the dump keeps the engine's declared storage
/// kinds: `{"float": 24.0}`, `{"string": "HELLO"}`, or the bare string
/// `"unreadable"` for paths the engine refuses to read.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyDump {
    String(String),
    Bool(bool),
    Float(f32),
    Double(f64),
    Enum(String),
    Color(Rgba),
    Unreadable,
}

/// One block in a scene dump
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDump {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: std::collections::BTreeMap<String, PropertyDump>,
    #[serde(default)]
    pub typeface: Option<TypefaceRef>,
    #[serde(default)]
    pub typefaces: Option<Vec<TypefaceRef>>,
    #[serde(default)]
    pub fill: Option<u32>,
}

/// A parsed scene graph loaded from a JSON dump.
///
/// This is the concrete `BlockAccessor` shipped with the crate; it reads
/// the dump the rendering engine writes after parsing a PSD, so the whole
/// extraction pipeline runs without the engine process itself.
#[derive(Debug, Deserialize)]
pub struct JsonScene {
    pub blocks: Vec<BlockDump>,
}

impl JsonScene {
    pub fn from_file(path: &Path) -> CrateResult<Self> {
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> CrateResult<Self> {
        serde_json::from_str(content).map_err(|e| Error::Scene(format!("invalid scene dump: {}", e)))
    }

    fn block(&self, id: BlockId) -> Option<&BlockDump> {
        self.blocks.get(id as usize)
    }

    fn property(&self, id: BlockId, path: &str) -> Result<&PropertyDump, AccessError> {
        match self.block(id).and_then(|b| b.properties.get(path)) {
            Some(PropertyDump::Unreadable) | None => Err(AccessError::NotReadable),
            Some(value) => Ok(value),
        }
    }
}

fn wrong_type(path: &str, wanted: &str) -> AccessError {
    AccessError::Other(format!("property {} is not of type {}", path, wanted))
}

impl BlockAccessor for JsonScene {
    fn find_all(&self) -> Vec<BlockId> {
        (0..self.blocks.len() as u32).collect()
    }

    fn name(&self, id: BlockId) -> Option<String> {
        self.block(id).and_then(|b| b.name.clone())
    }

    fn kind(&self, id: BlockId) -> String {
        self.block(id).map(|b| b.kind.clone()).unwrap_or_default()
    }

    fn property_paths(&self, id: BlockId) -> Vec<String> {
        self.block(id)
            .map(|b| b.properties.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn get_string(&self, id: BlockId, path: &str) -> Result<String, AccessError> {
        match self.property(id, path)? {
            PropertyDump::String(s) => Ok(s.clone()),
            _ => Err(wrong_type(path, "string")),
        }
    }

    fn get_bool(&self, id: BlockId, path: &str) -> Result<bool, AccessError> {
        match self.property(id, path)? {
            PropertyDump::Bool(b) => Ok(*b),
            _ => Err(wrong_type(path, "bool")),
        }
    }

    fn get_float(&self, id: BlockId, path: &str) -> Result<f32, AccessError> {
        match self.property(id, path)? {
            PropertyDump::Float(v) => Ok(*v),
            _ => Err(wrong_type(path, "float")),
        }
    }

    fn get_double(&self, id: BlockId, path: &str) -> Result<f64, AccessError> {
        match self.property(id, path)? {
            PropertyDump::Double(v) => Ok(*v),
            _ => Err(wrong_type(path, "double")),
        }
    }

    fn get_enum(&self, id: BlockId, path: &str) -> Result<String, AccessError> {
        match self.property(id, path)? {
            PropertyDump::Enum(s) => Ok(s.clone()),
            _ => Err(wrong_type(path, "enum")),
        }
    }

    fn get_color(&self, id: BlockId, path: &str) -> Result<Rgba, AccessError> {
        match self.property(id, path)? {
            PropertyDump::Color(c) => Ok(*c),
            _ => Err(wrong_type(path, "color")),
        }
    }

    fn typeface(&self, id: BlockId) -> Result<TypefaceRef, AccessError> {
        self.block(id)
            .and_then(|b| b.typeface.clone())
            .ok_or_else(|| AccessError::Other("block has no typeface".to_string()))
    }

    fn typefaces(
        &self,
        id: BlockId,
        _range: Option<(u32, u32)>,
    ) -> Result<Vec<TypefaceRef>, AccessError> {
        match self.block(id).and_then(|b| b.typefaces.clone()) {
            Some(list) if !list.is_empty() => Ok(list),
            _ => Err(AccessError::Other("unknown typeface".to_string())),
        }
    }

    fn fill(&self, id: BlockId) -> Option<BlockId> {
        self.block(id).and_then(|b| b.fill)
    }
}
