//! Dot loader: prints a dot on every tick until stopped

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::Indicator;
use crate::output::Output;

/// Time between loading indicator updates
const LOADER_INTERVAL: Duration = Duration::from_millis(200);

/// Text written on every tick
const LOADER_TEXT: &str = ".";

struct Loader {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Command line indicator that animates with dots on the output sink
pub struct DotIndicator {
    out: Arc<dyn Output>,
    prompt: String,
    interval: Duration,
    loader: Mutex<Option<Loader>>,
}

impl DotIndicator {
    pub fn new(out: Arc<dyn Output>, prompt: impl Into<String>) -> Self {
        Self {
            out,
            prompt: prompt.into(),
            interval: LOADER_INTERVAL,
            loader: Mutex::new(None),
        }
    }

    /// Override the tick interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Whether the animation task is running
    pub fn is_loading(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Loader>> {
        self.loader.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Indicator for DotIndicator {
    fn show_loader(&self) {
        let mut loader = self.lock();
        if loader.is_some() {
            return;
        }

        let (stop, mut stopped) = oneshot::channel::<()>();
        let out = Arc::clone(&self.out);
        let mut ticker = tokio::time::interval(self.interval);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        out.write(LOADER_TEXT);
                        out.flush();
                    }
                }
            }
            // Always end the dots with a newline so output starts on a fresh line
            out.write("\n");
            out.flush();
        });

        *loader = Some(Loader { stop, task });
    }

    async fn hide_loader(&self) {
        let Some(loader) = self.lock().take() else {
            return;
        };

        // The task may already be gone if the runtime is shutting down
        let _ = loader.stop.send(());
        if let Err(e) = loader.task.await {
            tracing::warn!("loading indicator task failed: {e}");
        }
    }

    fn show_prompt(&self) {
        self.out.write(&self.prompt);
        self.out.flush();
    }
}
