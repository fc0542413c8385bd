use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use super::output::{parse_binary, parse_per_layer, ScanOutcome};
use super::FontScanner;
use crate::error::{Error, Result};
use crate::models::ScannerConfig;

/// Which stdout contract the scanner follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Whole stdout is `{"fonts": [...]}`; invoked with `--json`
    Binary,
    /// Last stdout line is the per-layer JSON result
    PerLayer,
}

/// Spawns the out-of-process heuristic scanner over the raw document.
///
/// The wait is bounded by the configured timeout; on expiry the child is
/// killed and the scan counts as a hard failure, which the hybrid stage
/// degrades from gracefully.
pub struct SubprocessScanner {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    mode: ScanMode,
}

impl SubprocessScanner {
    pub fn new(program: &str, args: &[String], timeout: Duration, mode: ScanMode) -> Self {
        SubprocessScanner {
            program: program.to_string(),
            args: args.to_vec(),
            timeout,
            mode,
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        let mode = if config.per_layer {
            ScanMode::PerLayer
        } else {
            ScanMode::Binary
        };
        Self::new(&config.program, &config.args, config.timeout(), mode)
    }

    fn wait_with_timeout(&self, child: &mut Child) -> Result<i32> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait()? {
                Some(status) => return Ok(status.code().unwrap_or(-1)),
                None => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(Error::Scanner(format!(
                            "scanner timed out after {:?}",
                            self.timeout
                        )));
                    }
                    thread::sleep(Duration::from_millis(50));
                }
            }
        }
    }
}

/// Consume a child stream incrementally on its own thread.
///
/// Raw bytes are accumulated as-is; decoding happens once after EOF so a
/// multibyte character split across two reads stays intact.
fn drain<R: Read + Send + 'static>(stream: R) -> (Arc<Mutex<Vec<u8>>>, thread::JoinHandle<()>) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let shared = Arc::clone(&buffer);
    let handle = thread::spawn(move || {
        let mut stream = stream;
        let mut chunk = [0u8; 4096];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if let Ok(mut buffer) = shared.lock() {
                        buffer.extend_from_slice(&chunk[..n]);
                    }
                }
            }
        }
    });
    (buffer, handle)
}

impl FontScanner for SubprocessScanner {
    fn scan(&self, document: &Path) -> Result<ScanOutcome> {
        if !document.is_file() {
            return Err(Error::InvalidPath(PathBuf::from(document)));
        }

        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(document);
        if self.mode == ScanMode::Binary {
            command.arg("--json");
        }
        log::info!("spawning scanner: {} {:?}", self.program, document);

        let mut child = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Scanner(format!("failed to start scanner: {}", e)))?;

        let (stdout, stdout_done) = drain(child.stdout.take().ok_or_else(|| {
            Error::Scanner("scanner stdout not captured".to_string())
        })?);
        let (stderr, stderr_done) = drain(child.stderr.take().ok_or_else(|| {
            Error::Scanner("scanner stderr not captured".to_string())
        })?);

        let code = self.wait_with_timeout(&mut child)?;
        // Streams hit EOF once the child is gone; wait for the tail
        let _ = stdout_done.join();
        let _ = stderr_done.join();
        let stdout = stdout
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();
        let stderr = stderr
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();

        if code != 0 {
            return Err(Error::Scanner(format!(
                "scanner exited with code {}: {}",
                code,
                stderr.trim()
            )));
        }

        let outcome = match self.mode {
            ScanMode::Binary => parse_binary(&stdout)?,
            ScanMode::PerLayer => parse_per_layer(&stdout)?,
        };
        log::info!("scanner found {} fonts", outcome.fonts().len());
        Ok(outcome)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_document(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"8BPS fake document").unwrap();
        path
    }

    fn scanner_with(script: &str, mode: ScanMode) -> SubprocessScanner {
        // The document path and --json flag land in "$@" after -c's $0
        SubprocessScanner::new(
            "sh",
            &["-c".to_string(), script.to_string(), "scanner".to_string()],
            Duration::from_secs(5),
            mode,
        )
    }

    #[test]
    fn successful_binary_scan_parses_stdout() {
        let document = temp_document("psdfx_scan_ok.psd");
        let scanner = scanner_with(r#"echo '{"fonts": ["BebasNeue", "Arial"]}'"#, ScanMode::Binary);
        let outcome = scanner.scan(&document).unwrap();
        assert_eq!(outcome.fonts(), ["BebasNeue", "Arial"]);
    }

    #[test]
    fn nonzero_exit_is_a_hard_failure_with_stderr() {
        let document = temp_document("psdfx_scan_fail.psd");
        let scanner = scanner_with("echo 'boom' >&2; exit 3", ScanMode::Binary);
        let err = scanner.scan(&document).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("code 3"), "{}", message);
        assert!(message.contains("boom"), "{}", message);
    }

    #[test]
    fn timeout_kills_the_child() {
        let document = temp_document("psdfx_scan_slow.psd");
        let scanner = SubprocessScanner::new(
            "sh",
            &["-c".to_string(), "sleep 30".to_string(), "scanner".to_string()],
            Duration::from_millis(200),
            ScanMode::Binary,
        );
        let err = scanner.scan(&document).unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn missing_document_is_rejected_before_spawning() {
        let scanner = scanner_with("echo unused", ScanMode::Binary);
        assert!(scanner.scan(Path::new("/nonexistent/file.psd")).is_err());
    }

    #[test]
    fn multibyte_output_survives_chunked_reads() {
        // Pad stdout so the two UTF-8 bytes of 'é' straddle the 4096-byte
        // read boundary; decoding after EOF must keep the character whole.
        let document = temp_document("psdfx_scan_utf8.psd");
        let script = r#"pad=$(printf 'a%.0s' $(seq 1 4083)); printf '{"fonts": ["%sé"]}' "$pad""#;
        let scanner = scanner_with(script, ScanMode::Binary);
        let outcome = scanner.scan(&document).unwrap();
        assert_eq!(outcome.fonts().len(), 1);
        assert!(outcome.fonts()[0].ends_with('é'), "{}", outcome.fonts()[0]);
        assert!(!outcome.fonts()[0].contains('\u{FFFD}'));
    }
}
