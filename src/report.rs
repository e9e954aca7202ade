use indicatif::ProgressBar;
use log::{debug, warn};
use std::path::Path;

use crate::error::ConvertError;
use crate::types::SkipReason;

/// Receives the outcome of every file the batch driver touches.
pub trait Reporter {
    /// Called once with the number of files about to be converted.
    fn started(&mut self, _total: usize) {}
    fn converted(&mut self, source: &Path, output: &Path);
    fn skipped(&mut self, source: &Path, reason: SkipReason);
    fn failed(&mut self, source: &Path, error: &ConvertError);
}

/// Discards every outcome.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn converted(&mut self, _source: &Path, _output: &Path) {}
    fn skipped(&mut self, _source: &Path, _reason: SkipReason) {}
    fn failed(&mut self, _source: &Path, _error: &ConvertError) {}
}

/// Logs outcomes and advances a progress bar.
pub struct LogReporter {
    pb: ProgressBar,
}

impl LogReporter {
    pub fn new(pb: ProgressBar) -> Self {
        Self { pb }
    }

    pub fn finish(&self) {
        self.pb.finish_with_message("Conversion complete");
    }
}

impl Reporter for LogReporter {
    fn started(&mut self, total: usize) {
        self.pb.set_length(total as u64);
    }

    fn converted(&mut self, source: &Path, output: &Path) {
        debug!("Converted {} -> {}", source.display(), output.display());
        self.pb.inc(1);
    }

    fn skipped(&mut self, source: &Path, reason: SkipReason) {
        debug!("Skipped {}: {}", source.display(), reason);
        self.pb.inc(1);
    }

    fn failed(&mut self, source: &Path, error: &ConvertError) {
        self.pb
            .suspend(|| warn!("Failed to convert {}: {}", source.display(), error));
        self.pb.inc(1);
    }
}
