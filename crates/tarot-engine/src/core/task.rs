//! Write-once background work.
//!
//! A `BackgroundTask` runs one job on a detached worker thread and publishes
//! its value into a single slot. The main loop polls the slot every tick and
//! never blocks on it. Jobs cannot be cancelled; dropping the handle leaves
//! the worker to finish and discard its result.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;

pub struct BackgroundTask<T> {
    slot: Arc<OnceLock<T>>,
    name: String,
}

impl<T: Send + Sync + 'static> BackgroundTask<T> {
    /// Start `job` on a worker thread.
    ///
    /// If the job panics, or the thread cannot be started, `fallback` is
    /// called with a description of the failure and its value fills the slot
    /// instead, so the task always becomes ready.
    pub fn spawn<F, R>(name: &str, job: F, fallback: R) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
        R: FnOnce(String) -> T + Send + 'static,
    {
        let slot = Arc::new(OnceLock::new());
        let worker_slot = Arc::clone(&slot);
        let worker_name = name.to_string();

        // The fallback is shared between the worker and the spawn-failure
        // path below; whichever runs first takes it.
        let fallback = Arc::new(Mutex::new(Some(fallback)));
        let worker_fallback = Arc::clone(&fallback);

        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let value = match panic::catch_unwind(AssertUnwindSafe(job)) {
                    Ok(value) => value,
                    Err(payload) => {
                        let reason = panic_message(payload.as_ref());
                        log::error!("Background task '{}' panicked: {}", worker_name, reason);
                        match take_fallback(&worker_fallback) {
                            Some(fallback) => fallback(reason),
                            None => return,
                        }
                    }
                };
                let _ = worker_slot.set(value);
            });

        if let Err(err) = spawned {
            log::error!("Failed to start background task '{}': {}", name, err);
            if let Some(fallback) = take_fallback(&fallback) {
                let _ = slot.set(fallback(err.to_string()));
            }
        }

        Self {
            slot,
            name: name.to_string(),
        }
    }

    /// A task that is already complete. Useful for tests and offline paths.
    pub fn ready(name: &str, value: T) -> Self {
        let slot = Arc::new(OnceLock::new());
        let _ = slot.set(value);
        Self {
            slot,
            name: name.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Read the result without consuming it.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn take_fallback<R>(shared: &Mutex<Option<R>>) -> Option<R> {
    match shared.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
