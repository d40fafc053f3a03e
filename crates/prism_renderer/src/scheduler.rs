//! Work distribution for parallel rendering.
//!
//! Workers pull pixels from a shared [`PixelScheduler`] until it runs dry.
//! The cursor is a single atomic counter over the flattened pixel range, so
//! every pixel is handed out exactly once with no ordering guarantee across
//! workers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A pixel coordinate, column `col` of row `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub col: u32,
    pub row: u32,
}

/// Hands out the pixels of an `nx × ny` grid and tracks completion.
#[derive(Debug)]
pub struct PixelScheduler {
    width: u32,
    total: u64,
    /// Next flattened pixel index to hand out
    cursor: AtomicU64,
    /// Pixels reported done
    done: AtomicU64,
    progress_interval: Option<Duration>,
    last_report: Mutex<Instant>,
}

impl PixelScheduler {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            total: width as u64 * height as u64,
            cursor: AtomicU64::new(0),
            done: AtomicU64::new(0),
            progress_interval: None,
            last_report: Mutex::new(Instant::now()),
        }
    }

    /// Log the completion percentage at most once per `interval`.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = Some(interval);
        self
    }

    /// Number of pixels in the grid.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Claim the next unrendered pixel, row by row. `None` once exhausted.
    pub fn next_pixel(&self) -> Option<Pixel> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        if index >= self.total {
            return None;
        }
        Some(Pixel {
            col: (index % self.width as u64) as u32,
            row: (index / self.width as u64) as u32,
        })
    }

    /// Record that a claimed pixel has been written.
    pub fn pixel_done(&self) {
        self.done.fetch_add(1, Ordering::Relaxed);

        let Some(interval) = self.progress_interval else {
            return;
        };
        // Whoever holds the lock is already reporting
        if let Ok(mut last) = self.last_report.try_lock() {
            if last.elapsed() >= interval {
                *last = Instant::now();
                log::info!("Rendering: {:.1}%", self.progress());
            }
        }
    }

    /// Pixels reported done so far.
    pub fn completed(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    /// Completion percentage in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed() as f64 * 100.0 / self.total as f64
    }

    /// Stop handing out pixels. Used to abort a render.
    pub fn drain(&self) {
        self.cursor.fetch_max(self.total, Ordering::Relaxed);
    }
}
