//! End-to-end pipeline tests over an in-memory scene dump and a stubbed
//! scanner, exercising traversal, probing, typeface extraction, and the
//! hybrid merge together.

use std::path::Path;

use psdfx::diag::CollectingSink;
use psdfx::engine::{extract_layers, JsonScene};
use psdfx::font::FontCatalog;
use psdfx::hybrid::run_hybrid;
use psdfx::models::{Config, Provenance, Strategy};
use psdfx::scanner::{BinaryScan, FontScanner, ScanOutcome};
use psdfx::Result;

const CONFIG: &str = r#"{
    "fonts": [
        {"identifier": "bebas-neue-bold", "fontFamily": "Bebas Neue",
         "fontWeight": 700, "fontURI": "file:///fonts/BebasNeue Bold.otf",
         "format": "otf", "provider": "file"},
        {"identifier": "montserrat-regular", "fontFamily": "Montserrat",
         "fontWeight": 400, "fontURI": "file:///fonts/Montserrat-Regular.ttf",
         "format": "ttf", "provider": "file"}
    ]
}"#;

struct StubScanner {
    fonts: Vec<String>,
    fail: bool,
}

impl FontScanner for StubScanner {
    fn scan(&self, _document: &Path) -> Result<ScanOutcome> {
        if self.fail {
            return Err(psdfx::Error::Scanner("simulated failure".to_string()));
        }
        Ok(ScanOutcome::Binary(BinaryScan {
            fonts: self.fonts.clone(),
        }))
    }
}

fn catalog() -> FontCatalog {
    let config: Config = serde_json::from_str(CONFIG).unwrap();
    FontCatalog::from_records(&config.fonts)
}

#[test]
fn mixed_scene_resolves_every_strategy() {
    let scene = JsonScene::from_str(
        r#"{
        "blocks": [
            {
                "name": "Headline",
                "type": "//ly.img.ubq/text",
                "properties": {
                    "text/text": {"string": "BIG SALE"},
                    "text/fontSize": {"float": 64.0}
                },
                "typeface": {"id": "bebas-neue-bold", "name": "Bebas Neue"}
            },
            {
                "name": "Subtitle",
                "type": "//ly.img.ubq/text",
                "properties": {
                    "text/text": {"string": "this weekend only"},
                    "text/typeface": {"string": "montserrat-regular"}
                }
            },
            {
                "name": "Footer",
                "type": "//ly.img.ubq/text",
                "properties": {
                    "text/text": {"string": "terms apply"},
                    "text/fontFileUri": {"string": "file:///fonts/Arial Bold.ttf"}
                }
            },
            {
                "name": "Background",
                "type": "//ly.img.ubq/graphic",
                "properties": {"opacity": {"float": 1.0}}
            }
        ]
    }"#,
    )
    .unwrap();

    let mut sink = CollectingSink::default();
    let layers = extract_layers(&scene, &catalog(), &mut sink);

    assert_eq!(layers.len(), 4);
    assert_eq!(layers[0].font_name, "Bebas Neue");
    assert_eq!(layers[0].strategy, Strategy::NativeTypeface);
    // Identifier resolved through the catalog to a family name
    assert_eq!(layers[1].font_name, "Montserrat");
    assert_eq!(layers[1].strategy, Strategy::IdentifierLookup);
    // File-URI inference strips directories and the extension
    assert_eq!(layers[2].font_name, "Arial Bold");
    assert_eq!(layers[2].strategy, Strategy::FileUri);
    assert!(layers[3].is_font_unknown());
}

#[test]
fn hybrid_merges_both_sources() {
    let scene = JsonScene::from_str(
        r#"{
        "blocks": [
            {
                "name": "Headline",
                "type": "//ly.img.ubq/text",
                "properties": {"text/text": {"string": "HELLO"}},
                "typeface": {"name": "Bebas Neue"}
            }
        ]
    }"#,
    )
    .unwrap();
    let scanner = StubScanner {
        fonts: vec!["Calibri".to_string(), "Bebas Neue".to_string()],
        fail: false,
    };

    let mut sink = CollectingSink::default();
    let result = run_hybrid(&scene, &catalog(), &scanner, Path::new("doc.psd"), &mut sink).unwrap();

    assert_eq!(result.engine_fonts, ["Bebas Neue"]);
    assert_eq!(result.external_fonts, ["Bebas Neue", "Calibri"]);
    assert_eq!(result.combined_fonts, ["Bebas Neue", "Calibri"]);
    assert_eq!(result.layers[0].provenance, Provenance::Engine);
}

#[test]
fn degenerate_scene_takes_index_fallback() {
    // Engine side finds nothing across three text layers; the scan found
    // two fonts, so layers get FontA, FontB, FontA.
    let scene = JsonScene::from_str(
        r#"{
        "blocks": [
            {"name": "l0", "type": "//ly.img.ubq/text",
             "properties": {"text/text": {"string": "a"}}},
            {"name": "l1", "type": "//ly.img.ubq/text",
             "properties": {"text/text": {"string": "b"}}},
            {"name": "l2", "type": "//ly.img.ubq/text",
             "properties": {"text/text": {"string": "c"}}}
        ]
    }"#,
    )
    .unwrap();
    let scanner = StubScanner {
        fonts: vec!["FontA".to_string(), "FontB".to_string()],
        fail: false,
    };

    let mut sink = CollectingSink::default();
    let result = run_hybrid(&scene, &catalog(), &scanner, Path::new("doc.psd"), &mut sink).unwrap();

    let names: Vec<&str> = result.layers.iter().map(|l| l.font_name.as_str()).collect();
    assert_eq!(names, ["FontA", "FontB", "FontA"]);
    assert!(result
        .layers
        .iter()
        .all(|l| l.provenance == Provenance::IndexFallback));
    assert_eq!(result.combined_fonts, ["FontA", "FontB"]);
}

#[test]
fn scanner_failure_degrades_to_engine_only() {
    let scene = JsonScene::from_str(
        r#"{
        "blocks": [
            {"name": "Headline", "type": "//ly.img.ubq/text",
             "properties": {"text/text": {"string": "HELLO"}},
             "typeface": {"name": "Bebas Neue"}}
        ]
    }"#,
    )
    .unwrap();
    let scanner = StubScanner {
        fonts: Vec::new(),
        fail: true,
    };

    let mut sink = CollectingSink::default();
    let result = run_hybrid(&scene, &catalog(), &scanner, Path::new("doc.psd"), &mut sink).unwrap();

    assert_eq!(result.engine_fonts, ["Bebas Neue"]);
    assert!(result.external_fonts.is_empty());
    assert_eq!(result.combined_fonts, ["Bebas Neue"]);
}
