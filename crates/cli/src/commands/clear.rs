//! clear command - Clear the terminal

use crate::output::Output;

#[derive(Debug, Clone, Copy)]
pub struct Clear;

impl Clear {
    /// Run the platform clear program; its output goes straight to the terminal
    pub fn execute(&self, out: &dyn Output) {
        out.flush();

        let status = if cfg!(windows) {
            std::process::Command::new("cmd").args(["/C", "cls"]).status()
        } else {
            std::process::Command::new("clear").status()
        };

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::debug!(%status, "clear exited unsuccessfully"),
            Err(e) => tracing::debug!("failed to run clear: {e}"),
        }
    }
}
