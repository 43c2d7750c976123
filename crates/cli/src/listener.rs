//! Line listener
//!
//! Reads one input line at a time and splits it into command invocations.
//! Several commands may share a line when separated by `&&`; arguments are
//! separated by single spaces and there is no quoting. Bytes that are not
//! valid UTF-8 are replaced rather than ending the session.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use s3fs_core::Result;

use crate::indicator::Indicator;

/// Separator between commands on one line
pub const COMMAND_DELIMITER: &str = "&&";

/// Separator between the arguments of one command
pub const ARGUMENT_DELIMITER: char = ' ';

/// Split an input line into commands, each a list of arguments
pub fn parse_line(line: &str) -> Vec<Vec<String>> {
    line.split(COMMAND_DELIMITER)
        .map(str::trim)
        .filter(|command| !command.is_empty())
        .map(|command| {
            command
                .split(ARGUMENT_DELIMITER)
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// Listener reading commands from a line-oriented async reader
pub struct TextListener<R> {
    reader: R,
    indicator: Arc<dyn Indicator>,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin> TextListener<R> {
    pub fn new(reader: R, indicator: Arc<dyn Indicator>) -> Self {
        Self {
            reader,
            indicator,
            buf: Vec::new(),
        }
    }

    /// Show the prompt and wait for the next line
    ///
    /// Returns `None` at end of input.
    pub async fn listen(&mut self) -> Result<Option<Vec<Vec<String>>>> {
        self.indicator.show_prompt();

        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }

        let text = String::from_utf8_lossy(&self.buf);
        let mut line: &str = &text;
        line = line.strip_suffix('\n').unwrap_or(line);
        line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(parse_line(line)))
    }
}
