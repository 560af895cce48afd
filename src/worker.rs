//! Per-worker validator handles.
//!
//! Every harness worker owns exactly one [`XmlValidator`]. The handle is
//! created on the worker's first evaluation and dropped when the harness
//! reports the worker finished. [`ValidatorTable`] is the explicit resource
//! table for hosts that track workers themselves; the `thread_*` functions
//! keep one table per OS thread for hosts that map workers onto threads.

use crate::config::ValidatorSettings;
use crate::validate::XmlValidator;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Identity of a harness worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(pub u64);

/// Lifecycle signals a host sends for each worker.
pub trait WorkerLifecycle {
    fn on_worker_start(&mut self, worker: WorkerId);

    /// Must release every resource held for `worker`.
    fn on_worker_finish(&mut self, worker: WorkerId);
}

/// Validator handles keyed by worker.
///
/// Access is through `&mut self`; the table is meant to live on the thread
/// that runs its workers and is never shared between threads.
#[derive(Debug, Default)]
pub struct ValidatorTable {
    handles: HashMap<WorkerId, XmlValidator>,
}

impl ValidatorTable {
    pub fn new() -> Self {
        ValidatorTable::default()
    }

    /// Returns the worker's handle, creating it on first use.
    ///
    /// An existing handle is reconfigured when `settings` changed since it
    /// was created.
    pub fn acquire(&mut self, worker: WorkerId, settings: &ValidatorSettings) -> &mut XmlValidator {
        let handle = self.handles.entry(worker).or_insert_with(|| {
            debug!(worker = worker.0, "creating validator handle");
            XmlValidator::new(settings)
        });
        handle.configure(settings);
        handle
    }

    /// Drops the worker's handle. Returns `true` if one existed.
    pub fn release(&mut self, worker: WorkerId) -> bool {
        let released = self.handles.remove(&worker).is_some();
        if released {
            debug!(worker = worker.0, "released validator handle");
        }
        released
    }

    pub fn contains(&self, worker: WorkerId) -> bool {
        self.handles.contains_key(&worker)
    }

    /// Number of live handles.
    pub fn live(&self) -> usize {
        self.handles.len()
    }
}

impl WorkerLifecycle for ValidatorTable {
    fn on_worker_start(&mut self, worker: WorkerId) {
        // Handles are created lazily by `acquire`.
        debug!(worker = worker.0, "worker started");
    }

    fn on_worker_finish(&mut self, worker: WorkerId) {
        self.release(worker);
    }
}

// ─── Thread-bound workers ───────────────────────────────────────────────────

static NEXT_WORKER: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_WORKER: WorkerId = WorkerId(NEXT_WORKER.fetch_add(1, Ordering::Relaxed));
    static THREAD_VALIDATORS: RefCell<ValidatorTable> = RefCell::new(ValidatorTable::new());
}

/// Worker identity of the calling thread.
pub fn current_worker() -> WorkerId {
    THREAD_WORKER.with(|id| *id)
}

/// Signals that the calling thread started acting as a worker.
pub fn thread_started() {
    let worker = current_worker();
    THREAD_VALIDATORS.with(|table| table.borrow_mut().on_worker_start(worker));
}

/// Signals that the calling thread finished; releases its handle.
pub fn thread_finished() {
    let worker = current_worker();
    THREAD_VALIDATORS.with(|table| table.borrow_mut().on_worker_finish(worker));
}

/// True if the calling thread currently holds a validator handle.
pub fn thread_has_validator() -> bool {
    let worker = current_worker();
    THREAD_VALIDATORS.with(|table| table.borrow().contains(worker))
}

/// Runs `f` with the calling thread's validator, creating it if needed.
pub fn with_thread_validator<R>(
    settings: &ValidatorSettings,
    f: impl FnOnce(&mut XmlValidator) -> R,
) -> R {
    let worker = current_worker();
    THREAD_VALIDATORS.with(|table| {
        let mut table = table.borrow_mut();
        f(table.acquire(worker, settings))
    })
}
