use std::path::PathBuf;

use crate::error::{Error, Result};

/// What the invocation asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Engine-side extraction over one or more scene dumps
    Extract(Vec<PathBuf>),
    /// External scanner over one or more raw documents
    Scan(Vec<PathBuf>),
    /// Concurrent hybrid extraction: scene dump + raw document
    Hybrid { scene: PathBuf, document: PathBuf },
}

/// Parsed command line
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub command: Command,
    pub config: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub per_layer: bool,
    pub debug: bool,
    pub write_report: bool,
}

/// Parse command line arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut config = None;
    let mut timeout_secs = None;
    let mut per_layer = false;
    let mut debug = false;
    let mut write_report = false;
    let mut positional: Vec<String> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::Config("--config requires a file path".to_string()))?;
                config = Some(PathBuf::from(value));
            }
            "--timeout" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::Config("--timeout requires seconds".to_string()))?;
                let secs = value
                    .parse::<u64>()
                    .map_err(|_| Error::Config(format!("invalid timeout: {}", value)))?;
                timeout_secs = Some(secs);
            }
            "--per-layer" => per_layer = true,
            "--debug" => debug = true,
            "--write-report" => write_report = true,
            other if other.starts_with("--") => {
                return Err(Error::Config(format!("unknown option: {}", other)));
            }
            other => positional.push(other.to_string()),
        }
    }

    if positional.is_empty() {
        return Err(Error::Config("missing command".to_string()));
    }
    let command_name = positional.remove(0);
    let paths: Vec<PathBuf> = positional.iter().map(PathBuf::from).collect();

    let command = match command_name.as_str() {
        "extract" => {
            if paths.is_empty() {
                return Err(Error::Config("extract requires at least one scene dump".to_string()));
            }
            Command::Extract(paths)
        }
        "scan" => {
            if paths.is_empty() {
                return Err(Error::Config("scan requires at least one document".to_string()));
            }
            Command::Scan(paths)
        }
        "hybrid" => {
            if paths.len() != 2 {
                return Err(Error::Config(
                    "hybrid requires a scene dump and a document".to_string(),
                ));
            }
            Command::Hybrid {
                scene: paths[0].clone(),
                document: paths[1].clone(),
            }
        }
        other => return Err(Error::Config(format!("unknown command: {}", other))),
    };

    Ok(CliOptions {
        command,
        config,
        timeout_secs,
        per_layer,
        debug,
        write_report,
    })
}

/// Get the help message for command-line usage
pub fn get_help_message() -> String {
    r#"psdfx - font and text-layer metadata extraction for parsed PSD documents

USAGE:
    psdfx [OPTIONS] <COMMAND> <PATHS...>

COMMANDS:
    extract <SCENE.json>...          Engine-side extraction over scene dumps
    scan <DOCUMENT.psd>...           External binary scan over raw documents
    hybrid <SCENE.json> <DOCUMENT.psd>
                                     Run both sources concurrently and merge

OPTIONS:
    -h, --help           Show this help message
    --config <FILE>      JSON configuration (font catalog, scanner command)
    --timeout <SECS>     Kill the scanner subprocess after this many seconds
    --per-layer          Scanner emits per-layer output (last-line JSON)
    --write-report       Write the report JSON next to the document
    --debug              Enable debug output

Multiple extract/scan paths are processed in parallel; failures are
reported per item without failing the whole batch.
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(&owned)
    }

    #[test]
    fn parses_hybrid_with_options() {
        let options = parse(&[
            "--config", "conf.json", "--timeout", "30", "hybrid", "scene.json", "doc.psd",
        ])
        .unwrap();
        assert_eq!(options.config, Some(PathBuf::from("conf.json")));
        assert_eq!(options.timeout_secs, Some(30));
        assert_eq!(
            options.command,
            Command::Hybrid {
                scene: PathBuf::from("scene.json"),
                document: PathBuf::from("doc.psd"),
            }
        );
    }

    #[test]
    fn extract_accepts_multiple_paths() {
        let options = parse(&["extract", "a.json", "b.json"]).unwrap();
        assert_eq!(
            options.command,
            Command::Extract(vec![PathBuf::from("a.json"), PathBuf::from("b.json")])
        );
    }

    #[test]
    fn missing_required_paths_are_usage_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["extract"]).is_err());
        assert!(parse(&["hybrid", "only-one.json"]).is_err());
        assert!(parse(&["frobnicate", "x"]).is_err());
        assert!(parse(&["--timeout", "soon", "scan", "doc.psd"]).is_err());
    }
}
