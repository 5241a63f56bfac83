//! Tree filtering: delete every file whose tree-relative path fails a predicate.
//!
//! Decisions are pure per file, so they run on a small worker pool fed through
//! a bounded channel. Deletions are issued from the calling thread as rejected
//! files come back, in no particular order.

use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel as channel;
use mig_core::OperationError;
use mig_core::paths::relative_path;
use tracing::{debug, info};

use crate::FileSystem;

const DEFAULT_QUEUE_DEPTH: usize = 1024;

/// What a filter pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Files enumerated under the base directory
    pub examined: usize,
    /// Relative paths of deleted files, sorted
    pub deleted: Vec<String>,
}

impl FilterOutcome {
    pub fn kept(&self) -> usize {
        self.examined - self.deleted.len()
    }
}

/// Configured tree filter over a borrowed file system
pub struct TreeFilter<'a> {
    fs: &'a dyn FileSystem,
    parallelism: usize,
    queue_depth: usize,
}

impl<'a> TreeFilter<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            parallelism: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    pub fn with_queue_depth(mut self, queue_depth: usize) -> Self {
        self.queue_depth = queue_depth.max(1);
        self
    }

    /// Delete files under `base_dir` whose relative path does not satisfy `keep`.
    ///
    /// On failure, files deleted so far stay deleted.
    pub fn apply<P>(&self, base_dir: &Path, keep: P) -> Result<FilterOutcome, OperationError>
    where
        P: Fn(&str) -> bool + Sync,
    {
        let files = self
            .fs
            .find_files(base_dir)
            .map_err(|source| OperationError::FileOperation {
                action: "enumerate",
                path: base_dir.to_path_buf(),
                source,
            })?;
        let examined = files.len();
        let workers = self.parallelism.min(examined).max(1);
        let keep = &keep;

        let mut deleted = thread::scope(|scope| -> Result<Vec<String>, OperationError> {
            let (work_tx, work_rx) = channel::bounded::<PathBuf>(self.queue_depth);
            let (reject_tx, reject_rx) =
                channel::unbounded::<Result<(PathBuf, String), OperationError>>();

            for _ in 0..workers {
                let work_rx = work_rx.clone();
                let reject_tx = reject_tx.clone();
                scope.spawn(move || {
                    for file in work_rx {
                        let verdict = match relative_path(&file, base_dir) {
                            Ok(rel) if keep(&rel) => continue,
                            Ok(rel) => Ok((file, rel)),
                            Err(e) => Err(e),
                        };
                        // Receiver gone means the pass already failed
                        if reject_tx.send(verdict).is_err() {
                            return;
                        }
                    }
                });
            }
            drop(work_rx);
            drop(reject_tx);

            scope.spawn(move || {
                for file in files {
                    if work_tx.send(file).is_err() {
                        return;
                    }
                }
            });

            let mut deleted = Vec::new();
            for verdict in reject_rx {
                let (file, rel) = verdict?;
                self.fs
                    .delete_recursively(&file)
                    .map_err(|source| OperationError::FileOperation {
                        action: "delete",
                        path: file.clone(),
                        source,
                    })?;
                debug!(path = %rel, "Deleted filtered file");
                deleted.push(rel);
            }
            Ok(deleted)
        })?;

        deleted.sort();
        info!(
            base = %base_dir.display(),
            examined,
            deleted = deleted.len(),
            "Filtered tree"
        );
        Ok(FilterOutcome { examined, deleted })
    }
}

/// Filter with default parallelism
pub fn filter_files<P>(
    fs: &dyn FileSystem,
    base_dir: &Path,
    keep: P,
) -> Result<FilterOutcome, OperationError>
where
    P: Fn(&str) -> bool + Sync,
{
    TreeFilter::new(fs).apply(base_dir, keep)
}
