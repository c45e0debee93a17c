//! Sinks for the human-readable dump a reference cell writes on initialization.
//!
//! The sink is handed to [`ReferenceCell::initialize`][crate::ReferenceCell::initialize]
//! explicitly instead of living in global state,
//! so a host application decides where the dump goes.

/// Receiver of diagnostic records.
///
/// A record is built up from any number of [`line`][Self::line]s
/// and finalized with one call to [`log`][Self::log].
pub trait InfoSink {
    /// Append a line of text to the current record.
    fn line(&mut self, text: &str);
    /// Finalize the current record.
    fn log(&mut self);
}

/// Forwards finalized records to the [`log`] crate at `Info` level.
#[derive(Clone, Debug)]
pub struct LogInfo {
    target: String,
    pending: Vec<String>,
}

impl LogInfo {
    /// Default target used for the emitted log records.
    pub const DEFAULT_TARGET: &'static str = "fecell::reference_cell";

    /// Log under a custom target, e.g. one per cell type.
    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            pending: Vec::new(),
        }
    }
}

impl Default for LogInfo {
    fn default() -> Self {
        Self::with_target(Self::DEFAULT_TARGET)
    }
}

impl InfoSink for LogInfo {
    fn line(&mut self, text: &str) {
        self.pending.push(text.to_string());
    }

    fn log(&mut self) {
        log::info!(target: self.target.as_str(), "{}", self.pending.join("\n"));
        self.pending.clear();
    }
}

/// Keeps everything in memory.
///
/// Useful for tests and for embedding the dump in some other output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfoRecord {
    /// Every line received, finalized or not.
    pub lines: Vec<String>,
    /// How many records have been finalized.
    pub records: usize,
}

impl InfoRecord {
    /// All received lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl InfoSink for InfoRecord {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn log(&mut self) {
        self.records += 1;
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInfo;

impl InfoSink for NoInfo {
    fn line(&mut self, _text: &str) {}
    fn log(&mut self) {}
}
