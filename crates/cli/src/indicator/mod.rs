//! Loading and prompt indicators
//!
//! Long-running commands are wrapped in `show_loader` / `hide_loader` so the
//! user sees that the shell is waiting on the network. `hide_loader` returns
//! only once the animation has stopped.

use std::sync::Arc;

use async_trait::async_trait;
use s3fs_core::{LoaderStyle, ShellConfig};

use crate::output::Output;

mod dots;
mod spinner;

pub use dots::DotIndicator;
pub use spinner::SpinnerIndicator;

/// UI feedback for the interactive session
#[async_trait]
pub trait Indicator: Send + Sync {
    /// Start the loading animation
    fn show_loader(&self);

    /// Stop the loading animation and wait for it to finish
    async fn hide_loader(&self);

    /// Show the input prompt
    fn show_prompt(&self);
}

/// Indicator without a loading animation
///
/// Shows the prompt when one is configured; used for `--loader none` and
/// for non-interactive runs.
pub struct QuietIndicator {
    out: Arc<dyn Output>,
    prompt: Option<String>,
}

impl QuietIndicator {
    pub fn new(out: Arc<dyn Output>, prompt: Option<String>) -> Self {
        Self { out, prompt }
    }
}

#[async_trait]
impl Indicator for QuietIndicator {
    fn show_loader(&self) {}

    async fn hide_loader(&self) {}

    fn show_prompt(&self) {
        if let Some(prompt) = &self.prompt {
            self.out.write(prompt);
            self.out.flush();
        }
    }
}

/// Build the indicator selected by the shell configuration
pub fn from_config(shell: &ShellConfig, out: Arc<dyn Output>) -> Arc<dyn Indicator> {
    let prompt = shell.prompt.clone();
    match shell.loader {
        LoaderStyle::Dots => Arc::new(DotIndicator::new(out, prompt)),
        LoaderStyle::Spinner => Arc::new(SpinnerIndicator::new(out, prompt)),
        LoaderStyle::None => Arc::new(QuietIndicator::new(out, Some(prompt))),
    }
}
