//! Hybrid merge of engine-side extraction and the external binary scan

use std::collections::BTreeSet;
use std::path::Path;
use std::thread;

use crate::diag::{CollectingSink, DiagnosticSink};
use crate::engine::{extract_layers, BlockAccessor};
use crate::error::Result;
use crate::font::FontCatalog;
use crate::models::{BlockKind, LayerRecord, MergeResult, Provenance};
use crate::scanner::FontScanner;

/// Reconcile the two font sources into one deduplicated result.
///
/// The source sets are computed before the degenerate fallback runs, so
/// fallback-patched layers never inflate the engine set. When the engine
/// found nothing and the scan found something, each text layer still
/// carrying the placeholder receives `distinct[i mod n]` (i counting text
/// layers, n the distinct scanned names) tagged `index_fallback`, a
/// best-effort heuristic with no claim of per-layer correctness.
pub fn merge(mut layers: Vec<LayerRecord>, external_fonts: &[String]) -> MergeResult {
    let engine: BTreeSet<String> = layers
        .iter()
        .filter(|layer| !layer.is_font_unknown())
        .map(|layer| layer.font_name.clone())
        .collect();
    let external: BTreeSet<String> = external_fonts.iter().cloned().collect();

    if engine.is_empty() && !external.is_empty() {
        log::info!("engine extraction found no fonts, applying index fallback");
        // Scanners repeat a name once per glyph run; cycle over distinct
        // names in first-seen order
        let mut pool: Vec<&String> = Vec::new();
        for font in external_fonts {
            if !pool.contains(&font) {
                pool.push(font);
            }
        }
        let mut text_index = 0usize;
        for layer in layers.iter_mut() {
            if layer.kind != BlockKind::Text {
                continue;
            }
            if layer.is_font_unknown() {
                let assigned = pool[text_index % pool.len()].clone();
                log::info!("index fallback: {} -> {}", layer.name, assigned);
                layer.font_name = assigned;
                layer.provenance = Provenance::IndexFallback;
            }
            text_index += 1;
        }
    }

    MergeResult::new(engine, external, layers)
}

/// Run the engine traversal and the external scan concurrently, join,
/// and merge.
///
/// The two tasks touch disjoint data until the join point; a scanner
/// failure (launch, exit code, timeout, malformed output) degrades to an
/// empty external set with a warning instead of aborting the request.
pub fn run_hybrid<A: BlockAccessor + Sync>(
    accessor: &A,
    catalog: &FontCatalog,
    scanner: &dyn FontScanner,
    document: &Path,
    sink: &mut dyn DiagnosticSink,
) -> Result<MergeResult> {
    let (layers, events, scan) = thread::scope(|scope| {
        let engine_task = scope.spawn(|| {
            let mut task_sink = CollectingSink::default();
            let layers = extract_layers(accessor, catalog, &mut task_sink);
            (layers, task_sink.events)
        });
        let scan_task = scope.spawn(|| scanner.scan(document));

        // A panic in either task is a bug, not a recoverable condition
        let (layers, events) = engine_task.join().expect("engine traversal panicked");
        let scan = scan_task.join().expect("scanner task panicked");
        (layers, events, scan)
    });

    for event in events {
        sink.record(event);
    }

    let external_fonts = match scan {
        Ok(outcome) => outcome.fonts().to_vec(),
        Err(err) => {
            log::warn!("external scan failed, continuing engine-only: {}", err);
            Vec::new()
        }
    };

    Ok(merge(layers, &external_fonts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Strategy, UNKNOWN_FONT};
    use std::collections::BTreeMap;

    fn text_layer(name: &str, font: &str) -> LayerRecord {
        LayerRecord {
            name: name.to_string(),
            block_id: 0,
            kind: BlockKind::Text,
            properties: BTreeMap::new(),
            text: None,
            font_size: None,
            font_name: font.to_string(),
            strategy: Strategy::None,
            provenance: Provenance::Engine,
        }
    }

    #[test]
    fn combined_is_always_the_union() {
        let layers = vec![
            text_layer("a", "Montserrat"),
            text_layer("b", UNKNOWN_FONT),
        ];
        let result = merge(layers, &["Arial".to_string(), "Montserrat".to_string()]);
        assert_eq!(result.engine_fonts, ["Montserrat"]);
        assert_eq!(result.external_fonts, ["Arial", "Montserrat"]);
        assert_eq!(result.combined_fonts, ["Arial", "Montserrat"]);
    }

    #[test]
    fn placeholder_never_enters_the_engine_set() {
        let layers = vec![text_layer("a", UNKNOWN_FONT)];
        let result = merge(layers, &[]);
        assert!(result.engine_fonts.is_empty());
        assert!(result.combined_fonts.is_empty());
    }

    #[test]
    fn index_fallback_is_a_heuristic_not_an_association() {
        // Three unresolved layers, two scanned fonts: assignment cycles
        // i mod n. Nothing here claims the mapping is correct per layer;
        // the behavior is preserved for compatibility.
        let layers = vec![
            text_layer("l0", UNKNOWN_FONT),
            text_layer("l1", UNKNOWN_FONT),
            text_layer("l2", UNKNOWN_FONT),
        ];
        let external = vec!["FontA".to_string(), "FontB".to_string()];
        let result = merge(layers, &external);

        assert_eq!(result.layers[0].font_name, "FontA");
        assert_eq!(result.layers[1].font_name, "FontB");
        assert_eq!(result.layers[2].font_name, "FontA");
        for layer in &result.layers {
            assert_eq!(layer.provenance, Provenance::IndexFallback);
        }
        // The engine set was computed before patching
        assert!(result.engine_fonts.is_empty());
        assert_eq!(result.combined_fonts, ["FontA", "FontB"]);
    }

    #[test]
    fn index_fallback_cycles_over_distinct_names() {
        // A scan that reports ["FontA", "FontA", "FontB"] collapses to a
        // two-font pool, so the second layer gets FontB rather than the
        // repeated FontA.
        let layers = vec![
            text_layer("l0", UNKNOWN_FONT),
            text_layer("l1", UNKNOWN_FONT),
        ];
        let external = vec![
            "FontA".to_string(),
            "FontA".to_string(),
            "FontB".to_string(),
        ];
        let result = merge(layers, &external);

        assert_eq!(result.layers[0].font_name, "FontA");
        assert_eq!(result.layers[1].font_name, "FontB");
        assert_eq!(result.external_fonts, ["FontA", "FontB"]);
    }

    #[test]
    fn fallback_does_not_run_when_engine_found_anything() {
        let layers = vec![
            text_layer("a", "Inter"),
            text_layer("b", UNKNOWN_FONT),
        ];
        let result = merge(layers, &["FontA".to_string()]);
        assert_eq!(result.layers[1].font_name, UNKNOWN_FONT);
        assert_eq!(result.layers[1].provenance, Provenance::Engine);
    }

    #[test]
    fn fallback_skips_non_text_layers() {
        let mut graphic = text_layer("bg", UNKNOWN_FONT);
        graphic.kind = BlockKind::Graphic;
        let layers = vec![graphic, text_layer("t0", UNKNOWN_FONT)];
        let result = merge(layers, &["FontA".to_string(), "FontB".to_string()]);

        assert_eq!(result.layers[0].font_name, UNKNOWN_FONT);
        // The text layer is index 0 among text layers
        assert_eq!(result.layers[1].font_name, "FontA");
    }
}
