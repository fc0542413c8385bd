use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use ttf_parser::Face;

use super::weight::weight_from_token;
use crate::models::{FontDescriptor, FontRecord, FontStyle, FontWeight};

/// In-memory table of available font descriptors.
///
/// Loaded once per extraction session from the configuration record list
/// and treated as read-only afterwards.
#[derive(Debug, Default)]
pub struct FontCatalog {
    fonts: Vec<FontDescriptor>,
}

impl FontCatalog {
    /// Build the catalog from configuration records, preserving order.
    /// Records with an unrecognized weight token fall back to normal.
    pub fn from_records(records: &[FontRecord]) -> Self {
        let fonts = records
            .iter()
            .map(|record| {
                let token = record.font_weight.token();
                let weight = weight_from_token(&token).unwrap_or_else(|| {
                    log::warn!(
                        "unrecognized weight '{}' for catalog entry '{}', using normal",
                        token,
                        record.identifier
                    );
                    FontWeight::Normal
                });
                let style = match record.style.as_deref() {
                    Some(s) if s.eq_ignore_ascii_case("italic") => FontStyle::Italic,
                    _ => FontStyle::Normal,
                };
                FontDescriptor {
                    identifier: record.identifier.clone(),
                    family: record.font_family.clone(),
                    weight,
                    style,
                    source_uri: record.font_uri.clone(),
                }
            })
            .collect();
        FontCatalog { fonts }
    }

    pub fn by_identifier(&self, identifier: &str) -> Option<&FontDescriptor> {
        self.fonts.iter().find(|f| f.identifier == identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontDescriptor> {
        self.fonts.iter()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Check that file-backed catalog entries point at parseable font
    /// files. Problems are warnings only; a broken entry is still served
    /// to the resolver since the engine may handle the URI itself.
    pub fn verify(&self) {
        for font in &self.fonts {
            if let Some(path) = file_path_from_uri(&font.source_uri) {
                if !is_valid_font_file(&path) {
                    log::warn!(
                        "catalog entry '{}' does not resolve to a valid font file: {}",
                        font.identifier,
                        path.display()
                    );
                }
            }
        }
    }
}

/// Convert a file:// URI to a local path, if it is one
pub fn file_path_from_uri(uri: &str) -> Option<PathBuf> {
    uri.strip_prefix("file://").map(PathBuf::from)
}

/// Check if a file is a valid font file
pub fn is_valid_font_file(path: &Path) -> bool {
    if let Ok(mut file) = fs::File::open(path) {
        let mut header = [0u8; 4];
        if file.read_exact(&mut header).is_ok() {
            let is_valid_magic =
                header == [0x00, 0x01, 0x00, 0x00] || // TTF
                header == [0x4F, 0x54, 0x54, 0x4F];   // OTF

            if is_valid_magic {
                if let Ok(_face) = Face::parse(&fs::read(path).unwrap_or_default(), 0) {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeightKey;

    fn record(identifier: &str, family: &str, weight: WeightKey) -> FontRecord {
        FontRecord {
            identifier: identifier.to_string(),
            font_family: family.to_string(),
            font_weight: weight,
            font_uri: format!("file:///fonts/{}.ttf", identifier),
            format: Some("ttf".to_string()),
            provider: Some("file".to_string()),
            style: None,
        }
    }

    #[test]
    fn builds_descriptors_in_record_order() {
        let catalog = FontCatalog::from_records(&[
            record("bebas-neue-bold", "Bebas Neue", WeightKey::Number(700)),
            record("arial-regular", "Arial", WeightKey::Keyword("regular".to_string())),
        ]);
        assert_eq!(catalog.len(), 2);
        let fonts: Vec<_> = catalog.iter().collect();
        assert_eq!(fonts[0].weight, FontWeight::Bold);
        assert_eq!(fonts[1].weight, FontWeight::Normal);
    }

    #[test]
    fn unknown_weight_falls_back_to_normal() {
        let catalog = FontCatalog::from_records(&[record(
            "odd",
            "Odd",
            WeightKey::Keyword("chonky".to_string()),
        )]);
        assert_eq!(catalog.by_identifier("odd").unwrap().weight, FontWeight::Normal);
    }

    #[test]
    fn file_uri_conversion() {
        assert_eq!(
            file_path_from_uri("file:///fonts/Arial.ttf"),
            Some(PathBuf::from("/fonts/Arial.ttf"))
        );
        assert_eq!(file_path_from_uri("https://fonts.example/Arial.ttf"), None);
    }
}
