//! Interactive session loop
//!
//! Feeds lines from the listener to the dispatcher and reports errors. A
//! failing command is reported and ends the rest of its `&&` chain; the
//! session itself keeps going.

use std::sync::Arc;

use tokio::io::AsyncBufRead;

use s3fs_core::Result;

use crate::dispatcher::Dispatcher;
use crate::listener::{TextListener, parse_line};
use crate::output::{Formatter, Output};

pub struct Session {
    dispatcher: Dispatcher,
    out: Arc<dyn Output>,
    formatter: Formatter,
}

impl Session {
    pub fn new(dispatcher: Dispatcher, out: Arc<dyn Output>, formatter: Formatter) -> Self {
        Self {
            dispatcher,
            out,
            formatter,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run every command of a raw input line
    ///
    /// Returns `false` if a command failed.
    pub async fn run_line(&mut self, line: &str) -> bool {
        self.run_commands(parse_line(line)).await
    }

    /// Run parsed commands in order, stopping at the first failure
    pub async fn run_commands(&mut self, commands: Vec<Vec<String>>) -> bool {
        for args in commands {
            if let Err(e) = self.dispatcher.handle(&args, self.out.as_ref()).await {
                self.formatter.error(self.out.as_ref(), &e.to_string());
                self.out.flush();
                return false;
            }
        }
        true
    }

    /// Read and run lines until end of input
    pub async fn run<R>(&mut self, listener: &mut TextListener<R>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        while let Some(commands) = listener.listen().await? {
            self.run_commands(commands).await;
        }

        // Leave the terminal on a fresh line after the last prompt
        self.out.write("\n");
        self.out.flush();
        tracing::debug!("end of input");
        Ok(())
    }
}
