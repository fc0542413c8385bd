use super::access::{BlockAccessor, BlockId, TypefaceRef};
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::font::FontCatalog;
use crate::models::{Strategy, UNKNOWN_FONT};
use crate::utils::font_name_from_uri;

/// String properties checked in priority order by the direct-read strategy
const FONT_STRING_PROPS: &[&str] = &[
    "text/fontFamily",
    "text/fontName",
    "text/postScriptName",
    "text/displayName",
    "text/familyName",
    "text/styleName",
    "text/typeface",
];

fn name_from_typeface(tf: &TypefaceRef) -> Option<String> {
    tf.name
        .as_ref()
        .filter(|n| !n.is_empty())
        .or(tf.id.as_ref().filter(|i| !i.is_empty()))
        .cloned()
}

/// Determine the best-guess font name for one text layer.
///
/// Tries each strategy in order and stops at the first success; every
/// failure is soft and falls through to the next. When nothing works the
/// terminal `"Unknown"` placeholder is returned, which callers treat as
/// "no font determined" rather than an error.
pub fn extract_font_name(
    accessor: &dyn BlockAccessor,
    id: BlockId,
    block_name: &str,
    text_len: u32,
    catalog: &FontCatalog,
    sink: &mut dyn DiagnosticSink,
) -> (String, Strategy) {
    let mut soft = |path: &str, message: String| {
        sink.record(Diagnostic {
            block: block_name.to_string(),
            path: path.to_string(),
            message,
        });
    };

    // 1. Native single-typeface lookup
    match accessor.typeface(id) {
        Ok(tf) => {
            if let Some(name) = name_from_typeface(&tf) {
                log::debug!("font for '{}' via native typeface: {}", block_name, name);
                return (name, Strategy::NativeTypeface);
            }
            // An object with neither name nor id is still a finding
            return (
                format!("Unknown Font ({:?})", tf),
                Strategy::NativeTypeface,
            );
        }
        Err(err) => soft("typeface", err.to_string()),
    }

    // 2. Ranged typeface lookup over the whole text
    let range = if text_len > 0 { Some((0, text_len)) } else { None };
    match accessor.typefaces(id, range) {
        Ok(list) => {
            if let Some(first) = list.first() {
                if let Some(name) = name_from_typeface(first) {
                    log::debug!("font for '{}' via ranged typefaces: {}", block_name, name);
                    return (name, Strategy::RangedTypefaces);
                }
            }
        }
        Err(err) => soft("typefaces", err.to_string()),
    }

    // 3. Direct string-property reads, fixed priority order
    for path in FONT_STRING_PROPS {
        match accessor.get_string(id, path) {
            Ok(value) if !value.trim().is_empty() => {
                // A text/typeface value is an identifier, not a family;
                // resolve it against the catalog (strategy 4).
                if *path == "text/typeface" {
                    let name = match catalog.by_identifier(&value) {
                        Some(descriptor) => descriptor.family.clone(),
                        None => format!("Unknown (ID: {})", value),
                    };
                    log::debug!("font for '{}' via identifier lookup: {}", block_name, name);
                    return (name, Strategy::IdentifierLookup);
                }
                log::debug!("font for '{}' via {}: {}", block_name, path, value);
                return (value, Strategy::StringProperty);
            }
            Ok(_) => {}
            Err(err) if err.is_not_readable() => {}
            Err(err) => soft(path, err.to_string()),
        }
    }

    // 5. File-URI inference: synthesize a name from the font file path
    match accessor.get_string(id, "text/fontFileUri") {
        Ok(uri) if !uri.is_empty() => {
            if let Some(name) = font_name_from_uri(&uri) {
                log::debug!("font for '{}' via fontFileUri: {}", block_name, name);
                return (name, Strategy::FileUri);
            }
        }
        Ok(_) => {}
        Err(err) if err.is_not_readable() => {}
        Err(err) => soft("text/fontFileUri", err.to_string()),
    }

    // 6. Terminal fallback
    log::debug!("no strategy produced a font for '{}'", block_name);
    (UNKNOWN_FONT.to_string(), Strategy::None)
}
