//! Preload progress tracking
//!
//! Counts assets as an external loader reports them and notifies on
//! update/complete. Failed loads count as loaded so a broken asset can
//! never wedge the intro sequence.

/// Tracks preload progress for a fixed set of assets
pub struct PreloadQueue {
    total: usize,
    loaded: usize,
    done: bool,
    progress: Box<dyn FnMut(f32)>,
    complete: Box<dyn FnMut()>,
}

impl PreloadQueue {
    /// Create a tracker for `total` assets
    pub fn new(total: usize) -> Self {
        Self {
            total,
            loaded: 0,
            done: false,
            progress: Box::new(|_| {}),
            complete: Box::new(|| {}),
        }
    }

    /// Pass the progress handler, called with a percentage (0.0-100.0)
    pub fn on_progress(&mut self, handler: impl FnMut(f32) + 'static) {
        self.progress = Box::new(handler);
    }

    /// Pass the completion handler, called exactly once
    pub fn on_complete(&mut self, handler: impl FnMut() + 'static) {
        self.complete = Box::new(handler);
    }

    /// Record one asset as loaded (or failed; both advance the queue).
    ///
    /// Reports past the total are ignored.
    pub fn mark_loaded(&mut self) {
        if self.done || self.loaded >= self.total {
            return;
        }

        self.loaded += 1;
        let percent = (self.loaded * 100) as f32 / self.total as f32;
        (self.progress)(percent);

        if self.loaded == self.total {
            self.done = true;
            log::debug!("preload complete ({} assets)", self.total);
            (self.complete)();
        }
    }

    /// Percentage loaded so far (0.0-100.0)
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.loaded * 100) as f32 / self.total as f32
    }

    pub fn is_complete(&self) -> bool {
        self.done
    }
}
