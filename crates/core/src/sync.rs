//! Periodic re-walk of the docs directory into the tree store.
//!
//! One poller thread per docs handle walks, then publishes. Walks never
//! overlap because they run sequentially on that thread. Every start or
//! stop bumps a generation counter; a walk publishes only if its generation
//! is still current, so a walk in flight when the handle is cleared or
//! replaced is discarded instead of overwriting newer state.
//!
//! The tree value is written under the state lock; subscribers are notified
//! after it is released, with the value current at that moment.

use crate::handle::SharedDirectory;
use crate::store::Store;
use crate::tree::{TreeMapping, walk};
use crate::PreviewError;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Interval between two walks unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// How walks are triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollMode {
    /// A background thread walks every poll interval.
    #[default]
    Background,
    /// The host calls [`TreeSynchronizer::poll_once`] itself, e.g. from a
    /// browser timer where threads are unavailable.
    Manual,
}

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A fresh mapping was published.
    Published,
    /// The docs handle changed while walking; the result was dropped.
    Stale,
    /// No docs handle is set.
    Idle,
}

struct SyncState {
    generation: u64,
    docs: Option<SharedDirectory>,
}

struct Shared {
    state: Mutex<SyncState>,
    tree: Store<TreeMapping>,
}

struct Worker {
    // Dropping the sender wakes the poller and ends its loop.
    _stop: mpsc::Sender<()>,
    _thread: JoinHandle<()>,
}

/// Keeps a [`TreeMapping`] store in step with a docs directory.
pub struct TreeSynchronizer {
    shared: Arc<Shared>,
    interval: Duration,
    mode: PollMode,
    worker: Option<Worker>,
}

impl TreeSynchronizer {
    /// Creates an idle synchronizer publishing into `tree`.
    pub fn new(tree: Store<TreeMapping>, interval: Duration, mode: PollMode) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SyncState {
                    generation: 0,
                    docs: None,
                }),
                tree,
            }),
            interval,
            mode,
            worker: None,
        }
    }

    /// Starts synchronizing `docs`, replacing any previous handle.
    ///
    /// The previous handle's tree is cleared first, so it is never shown
    /// under the new handle. In background mode the first walk happens one
    /// interval after start.
    pub fn start(&mut self, docs: SharedDirectory) -> Result<(), PreviewError> {
        self.worker = None;
        let (generation, replaced) = {
            let mut state = lock(&self.shared.state);
            state.generation += 1;
            let replaced = state.docs.replace(Arc::clone(&docs)).is_some();
            if replaced {
                self.shared.tree.write_quiet(TreeMapping::new());
            }
            (state.generation, replaced)
        };
        if replaced {
            self.shared.tree.notify_latest();
        }
        log::debug!(
            "Synchronizing '{}' (generation {}, {:?})",
            docs.name(),
            generation,
            self.mode
        );

        if self.mode == PollMode::Background {
            let (stop_tx, stop_rx) = mpsc::channel::<()>();
            let shared = Arc::clone(&self.shared);
            let interval = self.interval;
            let thread = thread::Builder::new()
                .name("docsview-sync".to_string())
                .spawn(move || {
                    loop {
                        match stop_rx.recv_timeout(interval) {
                            Err(RecvTimeoutError::Timeout) => {
                                if let Err(err) = poll(&shared, generation, &docs) {
                                    log::warn!("Poll of '{}' failed: {}", docs.name(), err);
                                }
                            }
                            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                        }
                        if lock(&shared.state).generation != generation {
                            break;
                        }
                    }
                    log::debug!("Poller for generation {} stopped", generation);
                })?;
            self.worker = Some(Worker {
                _stop: stop_tx,
                _thread: thread,
            });
        }

        Ok(())
    }

    /// Stops synchronizing and clears the tree.
    ///
    /// A walk already in flight runs to completion but is not published.
    pub fn stop(&mut self) {
        self.worker = None;
        {
            let mut state = lock(&self.shared.state);
            state.generation += 1;
            state.docs = None;
            // Cleared under the state lock so no stale walk can publish after.
            self.shared.tree.write_quiet(TreeMapping::new());
        }
        self.shared.tree.notify_latest();
    }

    /// Walks the current docs handle once and publishes the result.
    ///
    /// A read error leaves the previously published mapping in place.
    pub fn poll_once(&self) -> Result<PollOutcome, PreviewError> {
        let (generation, docs) = {
            let state = lock(&self.shared.state);
            match &state.docs {
                Some(docs) => (state.generation, Arc::clone(docs)),
                None => return Ok(PollOutcome::Idle),
            }
        };
        poll(&self.shared, generation, &docs)
    }

    /// Returns true while a docs handle is set.
    pub fn is_active(&self) -> bool {
        lock(&self.shared.state).docs.is_some()
    }

    /// Returns true while a background poller is running.
    pub fn has_worker(&self) -> bool {
        self.worker.is_some()
    }

    /// Configured poll interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Configured poll mode.
    pub fn mode(&self) -> PollMode {
        self.mode
    }
}

impl Drop for TreeSynchronizer {
    fn drop(&mut self) {
        self.worker = None;
        lock(&self.shared.state).generation += 1;
    }
}

fn poll(
    shared: &Shared,
    generation: u64,
    docs: &SharedDirectory,
) -> Result<PollOutcome, PreviewError> {
    let tree = walk(docs.as_ref(), "")?;

    {
        let state = lock(&shared.state);
        if state.generation != generation {
            log::debug!("Discarding walk of generation {}", generation);
            return Ok(PollOutcome::Stale);
        }
        shared.tree.write_quiet(tree);
    }
    shared.tree.notify_latest();
    Ok(PollOutcome::Published)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{DirectoryHandle, Entry};
    use crate::host::MemoryDirectory;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn docs() -> SharedDirectory {
        Arc::new(
            MemoryDirectory::new("docs")
                .with_file("index.mdx", "A")
                .with_dir(MemoryDirectory::new("foo").with_file("index.mdx", "C")),
        )
    }

    fn manual() -> (Store<TreeMapping>, TreeSynchronizer) {
        let tree = Store::default();
        let sync = TreeSynchronizer::new(tree.clone(), DEFAULT_POLL_INTERVAL, PollMode::Manual);
        (tree, sync)
    }

    /// Fails every read until `healthy` is set.
    struct Flaky {
        healthy: Arc<AtomicBool>,
    }

    impl DirectoryHandle for Flaky {
        fn name(&self) -> &str {
            "docs"
        }

        fn entries(&self) -> Result<Vec<Entry>, PreviewError> {
            if self.healthy.load(Ordering::SeqCst) {
                MemoryDirectory::new("docs").with_file("new.mdx", "new").entries()
            } else {
                Err(PreviewError::access_revoked("/"))
            }
        }
    }

    #[test]
    fn idle_without_docs() {
        let (tree, sync) = manual();
        assert_eq!(sync.poll_once().unwrap(), PollOutcome::Idle);
        assert!(tree.get().is_empty());
    }

    #[test]
    fn poll_publishes_full_tree() {
        let (tree, mut sync) = manual();
        sync.start(docs()).unwrap();
        assert!(tree.get().is_empty(), "nothing published before the first poll");

        assert_eq!(sync.poll_once().unwrap(), PollOutcome::Published);
        let snapshot = tree.get();
        assert_eq!(snapshot.get("/index.mdx"), Some("A"));
        assert_eq!(snapshot.get("/foo/index.mdx"), Some("C"));
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn consecutive_polls_are_identical() {
        let (tree, mut sync) = manual();
        sync.start(docs()).unwrap();
        sync.poll_once().unwrap();
        let first = tree.get();
        sync.poll_once().unwrap();
        assert_eq!(first, tree.get());
    }

    #[test]
    fn stop_clears_tree_regardless_of_content() {
        let (tree, mut sync) = manual();
        sync.start(docs()).unwrap();
        sync.poll_once().unwrap();
        assert!(!tree.get().is_empty());

        sync.stop();
        assert!(tree.get().is_empty());
        assert!(!sync.is_active());
        assert_eq!(sync.poll_once().unwrap(), PollOutcome::Idle);
    }

    #[test]
    fn failed_poll_keeps_previous_tree() {
        let healthy = Arc::new(AtomicBool::new(true));
        let (tree, mut sync) = manual();
        sync.start(Arc::new(Flaky {
            healthy: Arc::clone(&healthy),
        }))
        .unwrap();

        sync.poll_once().unwrap();
        assert_eq!(tree.get().get("/new.mdx"), Some("new"));

        healthy.store(false, Ordering::SeqCst);
        assert!(sync.poll_once().is_err());
        assert_eq!(tree.get().get("/new.mdx"), Some("new"));
    }

    #[test]
    fn stale_generation_is_not_published() {
        let (tree, mut sync) = manual();
        let first = docs();
        sync.start(Arc::clone(&first)).unwrap();
        let stale_generation = lock(&sync.shared.state).generation;

        sync.stop();
        let outcome = poll(&sync.shared, stale_generation, &first).unwrap();
        assert_eq!(outcome, PollOutcome::Stale);
        assert!(tree.get().is_empty());
    }

    #[test]
    fn restarting_with_another_handle_clears_the_old_tree() {
        let (tree, mut sync) = manual();
        sync.start(docs()).unwrap();
        sync.poll_once().unwrap();
        assert!(tree.get().contains("/index.mdx"));

        let other: SharedDirectory =
            Arc::new(MemoryDirectory::new("docs").with_file("other.mdx", "O"));
        sync.start(other).unwrap();
        assert!(tree.get().is_empty());

        sync.poll_once().unwrap();
        assert_eq!(tree.get().get("/other.mdx"), Some("O"));
        assert!(!tree.get().contains("/index.mdx"));
    }

    #[test]
    fn subscribers_run_without_the_state_lock() {
        let (tree, mut sync) = manual();
        let shared = Arc::clone(&sync.shared);
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        // Re-locking the state from a callback would deadlock if it were held.
        let _sub = tree.subscribe(move |t: &TreeMapping| {
            let active = lock(&shared.state).docs.is_some();
            sink.lock().unwrap().push((t.len(), active));
        });

        sync.start(docs()).unwrap();
        sync.poll_once().unwrap();
        sync.stop();
        assert_eq!(*seen.lock().unwrap(), vec![(2, true), (0, false)]);
    }

    #[test]
    fn background_poller_publishes_and_stops() {
        let tree = Store::default();
        let mut sync = TreeSynchronizer::new(
            tree.clone(),
            Duration::from_millis(10),
            PollMode::Background,
        );
        sync.start(docs()).unwrap();
        assert!(sync.has_worker());

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while tree.get().is_empty() && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(tree.get().get("/index.mdx"), Some("A"));

        sync.stop();
        thread::sleep(Duration::from_millis(50));
        assert!(tree.get().is_empty());
        assert!(!sync.has_worker());
    }
}
