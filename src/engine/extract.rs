use super::access::{BlockAccessor, BlockId};
use super::probe::{probe, Probe};
use super::typeface::extract_font_name;
use crate::diag::DiagnosticSink;
use crate::font::FontCatalog;
use crate::models::{BlockKind, LayerRecord, Provenance, PropertyValue, Strategy, UNKNOWN_FONT};
use std::collections::BTreeMap;

fn is_text_block(kind: &str, paths: &[String]) -> bool {
    kind.contains("text") || paths.iter().any(|p| p.starts_with("text/"))
}

fn probe_block(
    accessor: &dyn BlockAccessor,
    id: BlockId,
    block_name: &str,
    prefix: &str,
    properties: &mut BTreeMap<String, PropertyValue>,
    sink: &mut dyn DiagnosticSink,
) {
    for path in accessor.property_paths(id) {
        match probe(accessor, id, block_name, &path, sink) {
            Probe::Value(value) => {
                properties.insert(format!("{}{}", prefix, path), value);
            }
            Probe::Absent | Probe::Failed => {}
        }
    }
}

/// Traverse every named block in the scene and build one `LayerRecord`
/// per block, in document order.
///
/// Unnamed blocks are skipped. Text blocks additionally get the typeface
/// extraction cascade; no single-block failure aborts the traversal.
pub fn extract_layers(
    accessor: &dyn BlockAccessor,
    catalog: &FontCatalog,
    sink: &mut dyn DiagnosticSink,
) -> Vec<LayerRecord> {
    let mut layers = Vec::new();

    for id in accessor.find_all() {
        let name = match accessor.name(id) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };
        let kind_str = accessor.kind(id);
        log::debug!("processing block {}: {} ({})", id, name, kind_str);

        let mut properties = BTreeMap::new();
        probe_block(accessor, id, &name, "", &mut properties, sink);

        // Fill sub-block properties, recorded under a fill/ prefix
        if let Some(fill_id) = accessor.fill(id) {
            probe_block(accessor, fill_id, &name, "fill/", &mut properties, sink);
        }

        let paths = accessor.property_paths(id);
        let text_block = is_text_block(&kind_str, &paths);

        let mut text = None;
        let mut font_size = None;
        let mut font_name = UNKNOWN_FONT.to_string();
        let mut strategy = Strategy::None;

        if text_block {
            text = accessor.get_string(id, "text/text").ok();
            font_size = accessor.get_float(id, "text/fontSize").ok();
            let text_len = text.as_ref().map(|t| t.chars().count() as u32).unwrap_or(0);
            let (name_found, used) =
                extract_font_name(accessor, id, &name, text_len, catalog, sink);
            font_name = name_found;
            strategy = used;
        }

        layers.push(LayerRecord {
            name,
            block_id: id,
            kind: BlockKind::from_type_str(&kind_str),
            properties,
            text,
            font_size,
            font_name,
            strategy,
            provenance: Provenance::Engine,
        });
    }

    log::info!("traversal produced {} named layers", layers.len());
    layers
}
