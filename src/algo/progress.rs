//! Progress reporting for long-running computations.
//!
//! Computing a patch for every vertex of a large surface takes a while; the
//! [`Progress`] callback lets callers surface that to a user without the
//! algorithms knowing anything about the host UI.
//!
//! # Example
//!
//! ```
//! use surfpatch::algo::Progress;
//!
//! let progress = Progress::new(|done, total| {
//!     eprintln!("patches: {done}/{total}");
//! });
//! progress.report(1000, 25000);
//! ```

use std::sync::Arc;

/// A progress callback invoked periodically during long-running operations.
///
/// The callback receives the number of completed steps and the total step
/// count. It must be thread-safe; parallel computations report from worker
/// threads. Cloning is cheap and shares the underlying callback.
#[derive(Clone)]
pub struct Progress {
    callback: Arc<dyn Fn(usize, usize) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Report `done` completed steps out of `total`.
    #[inline]
    pub fn report(&self, done: usize, total: usize) {
        (self.callback)(done, total);
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
