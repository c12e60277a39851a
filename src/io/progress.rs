//! Batch and per-image progress display

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for batch synthesis
///
/// Shows one bar per image being synthesized (position = output pixels
/// committed) and, when more than one file is queued, an overall batch
/// bar above it.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    pixel_bar: Option<ProgressBar>,
}

static PIXEL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            pixel_bar: None,
        }
    }

    /// Set up the batch bar for the given number of files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Start a per-pixel bar for one file and hand it to the caller
    ///
    /// The bar's length is unknown until the engine reports it; the
    /// caller's progress callback sets both length and position.
    pub fn start_file(&mut self, path: &Path) -> ProgressBar {
        if let Some(old) = self.pixel_bar.take() {
            old.finish_and_clear();
        }
        let bar = ProgressBar::new(0);
        bar.set_style(PIXEL_STYLE.clone());
        bar.set_message(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        let bar = self.multi_progress.add(bar);
        self.pixel_bar = Some(bar.clone());
        bar
    }

    /// Mark the current file as done and bump the batch bar
    pub fn complete_file(&mut self) {
        if let Some(bar) = self.pixel_bar.take() {
            bar.finish_and_clear();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}
