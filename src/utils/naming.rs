use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref FONT_EXTENSION: Regex = Regex::new(r"(?i)\.(ttf|otf|woff|woff2)$").unwrap();
}

/// Synthesize a font name from a font-file URI by stripping directory
/// components (either separator) and the font file extension.
///
/// "file:///fonts/Arial Bold.ttf" becomes "Arial Bold".
pub fn font_name_from_uri(uri: &str) -> Option<String> {
    let file_name = uri
        .rsplit('/')
        .next()
        .and_then(|tail| tail.rsplit('\\').next())?;
    let name = FONT_EXTENSION.replace(file_name, "").to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Build the report file path next to the document, e.g.
/// "design.psd" -> "design_fonts_hybrid.json"
pub fn report_path(document: &Path, suffix: &str) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    document.with_file_name(format!("{}_{}.json", stem, suffix))
}
