use super::access::{AccessError, BlockAccessor, BlockId};
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::models::PropertyValue;

/// How a schema rule matches a property path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRule {
    Exact(&'static str),
    Contains(&'static str),
}

impl PathRule {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathRule::Exact(p) => path == *p,
            PathRule::Contains(p) => path.contains(p),
        }
    }
}

/// Storage kinds a block property can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Str,
    Bool,
    Float,
    Double,
    Enum,
    Color,
}

use PathRule::{Contains, Exact};
use PropertyKind::{Bool, Color, Double, Enum, Float, Str};

/// Declared property schema, evaluated top to bottom; the first matching
/// rule picks the getter. Paths matching no rule go through the typed
/// fallback chain instead. Rule order is part of the contract: "color"
/// outranks everything, and the broad geometry substrings come last
/// within their group.
pub static PROPERTY_SCHEMA: &[(PathRule, PropertyKind)] = &[
    (Contains("color"), Color),
    // String properties, including every font-identifying path
    (Contains("text/text"), Str),
    (Contains("text/typeface"), Str),
    (Contains("text/fontFamily"), Str),
    (Contains("text/fontName"), Str),
    (Contains("text/postScriptName"), Str),
    (Contains("text/displayName"), Str),
    (Contains("text/familyName"), Str),
    (Contains("text/styleName"), Str),
    (Exact("text/fontFileUri"), Str),
    (Contains("uri"), Str),
    (Contains("name"), Str),
    (Contains("type"), Str),
    (Contains("identifier"), Str),
    (Contains("format"), Str),
    (Contains("provider"), Str),
    (Contains("externalReference"), Str),
    // Boolean flags
    (Exact("text/hasClippedLines"), Bool),
    (Exact("text/automaticFontSizeEnabled"), Bool),
    (Exact("text/clipLinesOutsideOfFrame"), Bool),
    (Contains("alwaysOnBottom"), Bool),
    (Contains("alwaysOnTop"), Bool),
    (Contains("dropShadow/clip"), Bool),
    (Contains("highlightEnabled"), Bool),
    (Contains("includedInExport"), Bool),
    (Contains("placeholderControls/showButton"), Bool),
    (Contains("placeholderControls/showOverlay"), Bool),
    (Contains("playback/looping"), Bool),
    (Contains("playback/muted"), Bool),
    (Contains("playback/playing"), Bool),
    (Contains("playback/soloPlaybackEnabled"), Bool),
    (Contains("selected"), Bool),
    (Contains("transformLocked"), Bool),
    (Contains("placeholderBehavior/enabled"), Bool),
    (Contains("enabled"), Bool),
    (Contains("visible"), Bool),
    (Contains("clipped"), Bool),
    (Contains("locked"), Bool),
    // Enum-valued paths
    (Contains("text/horizontalAlignment"), Enum),
    (Contains("text/verticalAlignment"), Enum),
    (Contains("blend/mode"), Enum),
    (Contains("contentFill/mode"), Enum),
    (Contains("height/mode"), Enum),
    (Contains("position/x/mode"), Enum),
    (Contains("position/y/mode"), Enum),
    (Contains("stroke/cornerGeometry"), Enum),
    (Contains("stroke/position"), Enum),
    (Contains("stroke/style"), Enum),
    (Contains("width/mode"), Enum),
    // Timing doubles
    (Contains("playback/duration"), Double),
    (Contains("playback/time"), Double),
    (Contains("playback/timeOffset"), Double),
    // Floats, narrow text paths before the broad geometry substrings
    (Contains("text/fontSize"), Float),
    (Contains("text/letterSpacing"), Float),
    (Contains("text/lineHeight"), Float),
    (Contains("text/paragraphSpacing"), Float),
    (Contains("text/maxAutomaticFontSize"), Float),
    (Contains("text/minAutomaticFontSize"), Float),
    (Contains("size"), Float),
    (Contains("width"), Float),
    (Contains("height"), Float),
    (Contains("x"), Float),
    (Contains("y"), Float),
    (Contains("weight"), Float),
    (Contains("opacity"), Float),
    (Contains("rotation"), Float),
];

/// Getter order for paths the schema does not cover
const FALLBACK_ORDER: &[PropertyKind] = &[Str, Bool, Float, Enum, Double];

/// Outcome of probing one property path
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    /// The path yielded a value
    Value(PropertyValue),
    /// The path is not currently readable; skipped silently
    Absent,
    /// Every attempt failed for another reason; recorded to the sink
    Failed,
}

/// Look up the declared kind for a path, if the schema covers it
pub fn declared_kind(path: &str) -> Option<PropertyKind> {
    PROPERTY_SCHEMA
        .iter()
        .find(|(rule, _)| rule.matches(path))
        .map(|(_, kind)| *kind)
}

fn read_kind(
    accessor: &dyn BlockAccessor,
    id: BlockId,
    path: &str,
    kind: PropertyKind,
) -> Result<PropertyValue, AccessError> {
    match kind {
        Str => accessor.get_string(id, path).map(PropertyValue::Str),
        Bool => accessor.get_bool(id, path).map(PropertyValue::Bool),
        Float => accessor.get_float(id, path).map(PropertyValue::Float),
        Double => accessor.get_double(id, path).map(PropertyValue::Double),
        Enum => accessor.get_enum(id, path).map(PropertyValue::Enum),
        Color => accessor.get_color(id, path).map(PropertyValue::Color),
    }
}

/// Read a property of unknown declared type off a block.
///
/// Schema-covered paths go straight to their typed getter; unknown paths
/// are probed string -> bool -> float -> enum -> double, first success
/// wins. Never panics and never returns an error across this boundary:
/// unreadable paths come back `Absent`, anything else lands in the sink.
pub fn probe(
    accessor: &dyn BlockAccessor,
    id: BlockId,
    block_name: &str,
    path: &str,
    sink: &mut dyn DiagnosticSink,
) -> Probe {
    if let Some(kind) = declared_kind(path) {
        return match read_kind(accessor, id, path, kind) {
            Ok(value) => Probe::Value(value),
            Err(err) if err.is_not_readable() => Probe::Absent,
            Err(err) => {
                sink.record(Diagnostic {
                    block: block_name.to_string(),
                    path: path.to_string(),
                    message: err.to_string(),
                });
                Probe::Failed
            }
        };
    }

    let mut last_err = AccessError::NotReadable;
    for kind in FALLBACK_ORDER {
        match read_kind(accessor, id, path, *kind) {
            Ok(value) => return Probe::Value(value),
            Err(err) => last_err = err,
        }
    }
    if last_err.is_not_readable() {
        Probe::Absent
    } else {
        sink.record(Diagnostic {
            block: block_name.to_string(),
            path: path.to_string(),
            message: last_err.to_string(),
        });
        Probe::Failed
    }
}
