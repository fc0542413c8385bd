use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Rgba;

/// Opaque handle to one block in the scene graph
pub type BlockId = u32;

/// Failure from a typed block getter.
///
/// `NotReadable` means the path exists but cannot currently be read; the
/// probe treats it as absence and skips the path silently. Everything
/// else is a soft failure recorded for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessError {
    NotReadable,
    Other(String),
}

impl AccessError {
    pub fn is_not_readable(&self) -> bool {
        matches!(self, AccessError::NotReadable)
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::NotReadable => write!(f, "Property is not readable"),
            AccessError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// A typeface object as returned by the engine's native lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypefaceRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// The engine's block API, reduced to what extraction needs.
///
/// Each typed getter fails independently when the path's declared type
/// does not match or the path is not readable; the probe cascades over
/// them without any prior type knowledge.
pub trait BlockAccessor {
    fn find_all(&self) -> Vec<BlockId>;
    fn name(&self, id: BlockId) -> Option<String>;
    fn kind(&self, id: BlockId) -> String;
    fn property_paths(&self, id: BlockId) -> Vec<String>;

    fn get_string(&self, id: BlockId, path: &str) -> Result<String, AccessError>;
    fn get_bool(&self, id: BlockId, path: &str) -> Result<bool, AccessError>;
    fn get_float(&self, id: BlockId, path: &str) -> Result<f32, AccessError>;
    fn get_double(&self, id: BlockId, path: &str) -> Result<f64, AccessError>;
    fn get_enum(&self, id: BlockId, path: &str) -> Result<String, AccessError>;
    fn get_color(&self, id: BlockId, path: &str) -> Result<Rgba, AccessError>;

    /// Native single-typeface lookup for a block
    fn typeface(&self, id: BlockId) -> Result<TypefaceRef, AccessError>;
    /// Per-character-range typeface lookup; `None` means unranged
    fn typefaces(&self, id: BlockId, range: Option<(u32, u32)>)
        -> Result<Vec<TypefaceRef>, AccessError>;
    /// Fill sub-block attached to a block, if any
    fn fill(&self, id: BlockId) -> Option<BlockId>;
}
