use serde::{Deserialize, Serialize};
use std::fmt;

/// Named font weights, matching the engine's weight vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    Normal,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Heavy,
}

impl FontWeight {
    /// Canonical lower-camel-case token for this weight
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Thin => "thin",
            FontWeight::ExtraLight => "extraLight",
            FontWeight::Light => "light",
            FontWeight::Normal => "normal",
            FontWeight::Medium => "medium",
            FontWeight::SemiBold => "semiBold",
            FontWeight::Bold => "bold",
            FontWeight::ExtraBold => "extraBold",
            FontWeight::Heavy => "heavy",
        }
    }

    /// Equivalent CSS numeric weight
    pub fn css_value(&self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::ExtraLight => 200,
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
            FontWeight::Heavy => 900,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Slant variants recognized by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

/// One available font in the catalog.
///
/// Built once from the catalog configuration records and never mutated;
/// the catalog lives for one extraction session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontDescriptor {
    pub identifier: String,
    pub family: String,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub source_uri: String,
}

/// A requested font, as the engine hands it to the resolver.
///
/// Transient; built per resolution request and discarded afterwards.
/// Numeric weights arrive as their decimal string form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontQuery {
    pub family: String,
    pub style: Option<String>,
    pub weight: Option<String>,
}

impl FontQuery {
    pub fn family(family: &str) -> Self {
        FontQuery {
            family: family.to_string(),
            ..Default::default()
        }
    }
}
