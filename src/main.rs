use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rayon::prelude::*;

use psdfx::cli::{get_help_message, parse_args, CliOptions, Command};
use psdfx::diag::CollectingSink;
use psdfx::engine::{extract_layers, JsonScene};
use psdfx::error::Result;
use psdfx::font::FontCatalog;
use psdfx::hybrid::{merge, run_hybrid};
use psdfx::models::{Config, MergeResult, Report};
use psdfx::scanner::{FontScanner, ScanMode, SubprocessScanner};
use psdfx::utils::report_path;

fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn load_config(options: &CliOptions) -> Result<Config> {
    let mut config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(secs) = options.timeout_secs {
        config.scanner.timeout_secs = secs;
    }
    if options.per_layer {
        config.scanner.per_layer = true;
    }
    Ok(config)
}

fn failure_report(path: &Path, err: &psdfx::Error) -> Report {
    Report {
        success: false,
        source_file: path.display().to_string(),
        summary: psdfx::models::ReportSummary {
            total_unique_fonts: 0,
            engine_fonts: 0,
            external_fonts: 0,
            text_layers_processed: 0,
        },
        fonts_found: merge(Vec::new(), &[]),
        error: Some(err.to_string()),
    }
}

fn extract_one(scene_path: &Path, catalog: &FontCatalog) -> Result<Report> {
    let scene = JsonScene::from_file(scene_path)?;
    let mut sink = CollectingSink::default();
    let layers = extract_layers(&scene, catalog, &mut sink);
    for event in &sink.events {
        log::warn!("soft failure: {}", event);
    }
    Ok(Report::from_merge(
        &scene_path.display().to_string(),
        merge(layers, &[]),
    ))
}

fn scan_one(document: &Path, scanner: &SubprocessScanner) -> Result<Report> {
    let outcome = scanner.scan(document)?;
    // Per-layer mode reports its own associations; they carry their
    // fonts already, so no merge fallback applies.
    let external: BTreeSet<String> = outcome.fonts().iter().cloned().collect();
    let result = MergeResult::new(BTreeSet::new(), external, outcome.layer_records());
    Ok(Report::from_merge(&document.display().to_string(), result))
}

fn hybrid_one(
    scene_path: &Path,
    document: &Path,
    catalog: &FontCatalog,
    scanner: &SubprocessScanner,
) -> Result<Report> {
    let scene = JsonScene::from_file(scene_path)?;
    let mut sink = CollectingSink::default();
    let result = run_hybrid(&scene, catalog, scanner, document, &mut sink)?;
    for event in &sink.events {
        log::warn!("soft failure: {}", event);
    }
    Ok(Report::from_merge(&document.display().to_string(), result))
}

/// Process a batch in parallel; a per-item failure becomes a per-item
/// failure report, never a whole-batch failure.
fn run_batch<F>(paths: &[PathBuf], process: F) -> Vec<Report>
where
    F: Fn(&Path) -> Result<Report> + Sync,
{
    paths
        .par_iter()
        .map(|path| match process(path) {
            Ok(report) => report,
            Err(err) => {
                log::error!("{}: {}", path.display(), err);
                failure_report(path, &err)
            }
        })
        .collect()
}

fn write_report_file(document: &Path, suffix: &str, report: &Report) -> Result<()> {
    let out = report_path(document, suffix);
    fs::write(&out, serde_json::to_string_pretty(report)?)?;
    log::info!("report written to {}", out.display());
    Ok(())
}

fn run(options: &CliOptions) -> Result<bool> {
    let config = load_config(options)?;
    let catalog = FontCatalog::from_records(&config.fonts);
    if config.verify_catalog {
        catalog.verify();
    }
    log::info!("catalog loaded with {} fonts", catalog.len());

    let mode = if config.scanner.per_layer {
        ScanMode::PerLayer
    } else {
        ScanMode::Binary
    };
    let scanner = SubprocessScanner::new(
        &config.scanner.program,
        &config.scanner.args,
        Duration::from_secs(config.scanner.timeout_secs),
        mode,
    );

    let reports = match &options.command {
        Command::Extract(paths) => run_batch(paths, |path| extract_one(path, &catalog)),
        Command::Scan(paths) => run_batch(paths, |path| scan_one(path, &scanner)),
        Command::Hybrid { scene, document } => {
            let report = hybrid_one(scene, document, &catalog, &scanner)?;
            if options.write_report {
                write_report_file(document, "fonts_hybrid", &report)?;
            }
            vec![report]
        }
    };

    if reports.len() == 1 {
        println!("{}", serde_json::to_string_pretty(&reports[0])?);
    } else {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(reports.iter().any(|r| r.success))
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty()
        || args.contains(&"--help".to_string())
        || args.contains(&"-h".to_string())
    {
        println!("{}", get_help_message());
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("{}", get_help_message());
            std::process::exit(2);
        }
    };

    init_logger(options.debug);

    match run(&options) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
