//! Spinner loader backed by indicatif
//!
//! The spinner draws on stderr, so it never mixes with command output.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

use super::Indicator;
use crate::output::Output;

/// Spinner redraw interval
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Message shown next to the spinner
const SPINNER_MESSAGE: &str = "working";

/// Indicator that shows an animated spinner during long-running commands
pub struct SpinnerIndicator {
    out: Arc<dyn Output>,
    prompt: String,
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerIndicator {
    pub fn new(out: Arc<dyn Output>, prompt: impl Into<String>) -> Self {
        Self {
            out,
            prompt: prompt.into(),
            bar: Mutex::new(None),
        }
    }

    fn spinner() -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(SPINNER_MESSAGE);
        bar.enable_steady_tick(TICK_INTERVAL);
        bar
    }
}

#[async_trait]
impl Indicator for SpinnerIndicator {
    fn show_loader(&self) {
        let mut bar = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if bar.is_none() {
            *bar = Some(Self::spinner());
        }
    }

    async fn hide_loader(&self) {
        let bar = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }

    fn show_prompt(&self) {
        self.out.write(&self.prompt);
        self.out.flush();
    }
}
