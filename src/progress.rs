use indicatif::{ProgressBar, ProgressStyle};

/// Observer for long scans. Purely informational.
pub trait Progress {
    fn start(&self, total: usize);
    fn advance(&self, current: usize);
    fn finish(&self);
}

/// Reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _total: usize) {}
    fn advance(&self, _current: usize) {}
    fn finish(&self) {}
}

/// Terminal progress bar.
pub struct BarProgress {
    pb: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Self { pb }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn start(&self, total: usize) {
        self.pb.set_length(total as u64);
        self.pb.set_position(0);
    }

    fn advance(&self, current: usize) {
        self.pb.set_position(current as u64);
    }

    fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
