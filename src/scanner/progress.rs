//! Progress accounting for a running scan.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// How often (in probed ports) a progress event is logged.
const LOG_EVERY: u64 = 100;

/// Counts probed ports, open or closed.
///
/// Increments are lock-free and never lost; after a completed scan the count
/// equals the number of ports requested.
pub struct ProgressCounter {
    done: AtomicU64,
    total: u64,
    bar: Option<ProgressBar>,
}

impl ProgressCounter {
    /// Counter without any visual output.
    pub fn new(total: usize) -> Self {
        Self {
            done: AtomicU64::new(0),
            total: total as u64,
            bar: None,
        }
    }

    /// Counter that also drives a terminal progress bar.
    pub fn with_bar(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            bar.set_style(style.progress_chars("=>-"));
        }

        Self {
            bar: Some(bar),
            ..Self::new(total)
        }
    }

    /// Record one probed port and return the new count.
    pub fn increment(&self) -> u64 {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;

        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
        if done % LOG_EVERY == 0 || done == self.total {
            debug!(
                scanned = done,
                total = self.total,
                "progress {:.1}%",
                self.percent_of(done)
            );
        }

        done
    }

    /// Note an open port on the progress bar, if any.
    pub fn report_open(&self, port: u16, service: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("open: {} ({})", port, service));
        }
    }

    /// Ports probed so far.
    pub fn value(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Completion percentage in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        self.percent_of(self.value())
    }

    /// Close out the progress bar.
    pub fn finish(&self, message: &'static str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message);
        }
    }

    fn percent_of(&self, done: u64) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            done as f64 / self.total as f64 * 100.0
        }
    }
}
