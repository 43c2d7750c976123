//! Command dispatcher
//!
//! Turns parsed arguments into a [`Command`], runs it against the session
//! state and keeps the loading indicator visible while it waits on the
//! object store. Output of a long-running command is held back until the
//! loader has finished its line.

use std::sync::Arc;

use s3fs_core::{ObjectStore, PathContext, Result};

use crate::commands::Command;
use crate::indicator::Indicator;
use crate::output::{BufferOutput, Output};

/// Owns the session path context and runs one command at a time
pub struct Dispatcher {
    store: Arc<dyn ObjectStore>,
    indicator: Arc<dyn Indicator>,
    context: PathContext,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ObjectStore>, indicator: Arc<dyn Indicator>) -> Self {
        Self {
            store,
            indicator,
            context: PathContext::new(),
        }
    }

    /// Current session path
    pub fn context(&self) -> &PathContext {
        &self.context
    }

    /// Run a single command
    ///
    /// Empty input does nothing. The loader is hidden again before returning,
    /// whether or not the command succeeded.
    pub async fn handle(&mut self, args: &[String], out: &dyn Output) -> Result<()> {
        if args.iter().all(|arg| arg.is_empty()) {
            return Ok(());
        }

        let command = Command::parse(args, &mut self.context, self.store.as_ref())?;
        let long_running = command.is_long_running();
        tracing::debug!(verb = %command.verb(), ?args, long_running, "dispatching");

        let result = if long_running {
            self.indicator.show_loader();
            let pending = BufferOutput::new();
            let result = command.execute(&pending).await;
            self.indicator.hide_loader().await;

            let text = pending.contents();
            if !text.is_empty() {
                out.write(&text);
                out.flush();
            }
            result
        } else {
            command.execute(out).await
        };

        if let Err(e) = &result {
            tracing::debug!(kind = ?e.kind(), "command failed: {e}");
        }
        result
    }
}
