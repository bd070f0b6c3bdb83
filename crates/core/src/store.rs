//! Observable values shared between the preview's concerns.
//!
//! A [`Store`] holds one value and notifies subscribers synchronously on
//! every write, in subscription order. Writes replace the whole value, so a
//! reader sees either the old or the new value, never a mix.
//!
//! # Example
//!
//! ```
//! use docsview_core::store::Store;
//! use std::sync::{Arc, Mutex};
//!
//! let path = Store::new("/".to_string());
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let _sub = path.subscribe(move |p: &String| sink.lock().unwrap().push(p.clone()));
//!
//! path.set("/guide".to_string());
//! assert_eq!(*seen.lock().unwrap(), vec!["/guide".to_string()]);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: Mutex<Arc<T>>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: AtomicU64,
}

/// An observable value. Cloning yields another handle to the same value.
pub struct Store<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Store<T> {
    /// Creates a store holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(Arc::new(value)),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the current snapshot without cloning the value.
    pub fn snapshot(&self) -> Arc<T> {
        Arc::clone(&lock(&self.inner.value))
    }

    /// Runs `f` against the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.snapshot())
    }

    /// Replaces the value and notifies subscribers with the new value.
    pub fn set(&self, value: T) {
        let current = Arc::new(value);
        *lock(&self.inner.value) = Arc::clone(&current);
        self.notify(&current);
    }

    /// Replaces the value without notifying. Pair with [`Store::notify_latest`]
    /// when the write must happen under a lock the callbacks may not see.
    pub(crate) fn write_quiet(&self, value: T) {
        *lock(&self.inner.value) = Arc::new(value);
    }

    /// Notifies subscribers with whatever value is current now.
    pub(crate) fn notify_latest(&self) {
        let current = self.snapshot();
        self.notify(&current);
    }

    /// Registers `callback`; it runs on every subsequent write until the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.subscribers).push((id, Arc::new(callback)));

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner.subscribers).retain(|(sub_id, _)| *sub_id != id);
                }
            })),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len()
    }

    // No lock is held while callbacks run, so they may read or write stores.
    fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = lock(&self.inner.subscribers)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }
}

impl<T: Clone> Store<T> {
    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        T::clone(&lock(&self.inner.value))
    }

    /// Mutates a copy of the value, stores it, and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }
}

/// Keeps a subscription alive; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Unsubscribes now.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

// A panicking subscriber must not wedge every later reader.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
