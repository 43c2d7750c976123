//! Output sinks and formatting
//!
//! Commands write human-readable text through the [`Output`] trait. It is an
//! append-only string sink: text is passed through literally.

use std::io::Write as _;
use std::sync::{Mutex, PoisonError};

mod formatter;

pub use formatter::Formatter;

/// Append-only text sink
pub trait Output: Send + Sync {
    /// Write text exactly as given
    fn write(&self, text: &str);

    /// Flush any buffered text
    fn flush(&self) {}
}

/// Output that writes to the process stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdout;

impl Output for Stdout {
    fn write(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout leaves nowhere to report the failure
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// In-memory output that records every write
#[derive(Debug, Default)]
pub struct BufferOutput {
    writes: Mutex<Vec<String>>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each write, in order
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Everything written, concatenated
    pub fn contents(&self) -> String {
        self.writes().concat()
    }

    /// Written text split into lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Output for BufferOutput {
    fn write(&self, text: &str) {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }
}
