use std::fmt;

/// A soft failure observed while probing or extracting.
///
/// These never abort processing; components push them into a sink so the
/// caller can inspect what was skipped after the fact.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Name of the block being processed
    pub block: String,
    /// Property path or strategy that failed
    pub path: String,
    /// Failure message from the accessor or parser
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.block, self.path, self.message)
    }
}

/// Sink for soft failures, injected into every extraction component.
pub trait DiagnosticSink {
    fn record(&mut self, event: Diagnostic);
}

/// Collects diagnostics in memory for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<Diagnostic>,
}

impl DiagnosticSink for CollectingSink {
    fn record(&mut self, event: Diagnostic) {
        log::debug!("soft failure: {}", event);
        self.events.push(event);
    }
}
