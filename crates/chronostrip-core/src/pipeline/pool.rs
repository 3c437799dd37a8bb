//! Fixed-size worker pool mapping image paths to average colors.
//!
//! Work distribution is pull-based: a single shared atomic cursor is the
//! only contended state, and each claimed index is written to its own
//! pre-sized output slot. Decode cost varies a lot between files, so
//! dynamic claiming balances load where a static split would not.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::thread;

use crate::types::ColorOutcome;

use super::average::average_color;

/// Reduces a list of images to one average color each, in input order.
pub struct WorkerPool {
    threads: usize,
}

impl WorkerPool {
    /// Create a pool with the given thread count (minimum 1).
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    /// Process all paths, returning one outcome per input at the matching
    /// index, independent of thread count and completion order.
    ///
    /// A failing image records `ColorOutcome::Failed` in its slot and never
    /// disturbs the cursor or the pool. Returns after every worker has
    /// observed the cursor past the end of the input.
    pub fn run(&self, paths: &[PathBuf]) -> Vec<ColorOutcome> {
        let total = paths.len();
        if total == 0 {
            return Vec::new();
        }

        let cursor = AtomicUsize::new(0);
        let slots: Vec<OnceLock<ColorOutcome>> = (0..total).map(|_| OnceLock::new()).collect();

        thread::scope(|scope| {
            for worker in 0..self.threads {
                let cursor = &cursor;
                let slots = &slots;
                scope.spawn(move || {
                    loop {
                        // Claim-and-increment is the only contended step;
                        // slot writes synchronize through OnceLock.
                        let index = cursor.fetch_add(1, Ordering::Relaxed);
                        if index >= total {
                            break;
                        }

                        let outcome = match average_color(&paths[index]) {
                            Ok(color) => {
                                tracing::trace!(
                                    "worker {worker}: {}/{total} {:?}",
                                    index + 1,
                                    paths[index]
                                );
                                ColorOutcome::Resolved(color)
                            }
                            Err(e) => {
                                tracing::debug!("worker {worker}: {e}");
                                ColorOutcome::Failed
                            }
                        };

                        // Indices are claimed exactly once, so the slot is
                        // always empty here.
                        let _ = slots[index].set(outcome);
                    }
                });
            }
        });

        slots
            .into_iter()
            .map(|slot| slot.into_inner().unwrap_or(ColorOutcome::Failed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use std::path::Path;

    fn write_solid_png(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb(color));
        img.save(&path).unwrap();
        path
    }

    fn fixture_paths(dir: &Path, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| write_solid_png(dir, &format!("img_{i:03}.png"), [i as u8, 0, 255 - i as u8]))
            .collect()
    }

    #[test]
    fn test_results_are_position_stable() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixture_paths(dir.path(), 12);

        let outcomes = WorkerPool::new(4).run(&paths);
        assert_eq!(outcomes.len(), 12);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(
                outcome.color(),
                Some(Color::new(i as u8, 0, 255 - i as u8))
            );
        }
    }

    #[test]
    fn test_identical_output_across_thread_counts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixture_paths(dir.path(), 10);

        let single = WorkerPool::new(1).run(&paths);
        for threads in [2, 8] {
            let multi = WorkerPool::new(threads).run(&paths);
            assert_eq!(single, multi, "threads = {threads}");
        }
    }

    #[test]
    fn test_more_threads_than_work() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixture_paths(dir.path(), 2);

        let outcomes = WorkerPool::new(8).run(&paths);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.is_failed()));
    }

    #[test]
    fn test_empty_input() {
        let outcomes = WorkerPool::new(4).run(&[]);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_corrupt_file_recorded_without_crashing_pool() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = fixture_paths(dir.path(), 10);

        let corrupt = dir.path().join("corrupt.jpg");
        std::fs::write(&corrupt, b"garbage bytes").unwrap();
        paths.insert(5, corrupt);

        let outcomes = WorkerPool::new(3).run(&paths);
        assert_eq!(outcomes.len(), 11);
        assert!(outcomes[5].is_failed());
        assert_eq!(outcomes.iter().filter(|o| o.is_failed()).count(), 1);
    }

    #[test]
    fn test_zero_threads_clamped_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixture_paths(dir.path(), 1);

        let outcomes = WorkerPool::new(0).run(&paths);
        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].is_failed());
    }
}
