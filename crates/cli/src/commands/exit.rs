//! exit command - Leave the shell

use crate::output::Output;

#[derive(Debug, Clone, Copy)]
pub struct Exit;

impl Exit {
    /// Flush pending output and terminate the process
    pub fn execute(&self, out: &dyn Output) -> ! {
        out.flush();
        tracing::debug!("exit requested");
        std::process::exit(0)
    }
}
