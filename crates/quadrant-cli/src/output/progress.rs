//! Progress bar adapter using indicatif.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use quadrant_core::{ProgressEvent, ProgressSink};

/// Progress bar adapter for CLI output.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
}

impl ProgressBar {
    /// Creates a new progress bar over `total` operations.
    ///
    /// When `enabled` is false the adapter swallows every event.
    #[must_use]
    pub fn new(total: u64, enabled: bool) -> Self {
        let bar = if enabled {
            let bar = IndicatifBar::new(total);

            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            ) {
                bar.set_style(style.progress_chars("#>-"));
            }

            Some(bar)
        } else {
            None
        };

        Self { bar }
    }

    /// Finishes the bar with a closing message.
    pub fn finish(&self, message: impl Into<String>) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.into());
        }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if let Some(bar) = &self.bar {
            bar.set_position(event.index as u64);
            bar.set_message(event.description);
        }
    }
}
