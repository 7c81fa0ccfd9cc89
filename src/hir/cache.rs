//! Compute-once fact slots.
//!
//! Each fact category of a module gets one [`LazyFact`] slot. A slot is
//! populated on first read and then reused; it is scoped to one immutable
//! [`SourceFile`](crate::syntax::SourceFile) snapshot, so there is no
//! invalidation protocol — an edit produces a new snapshot with fresh slots.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// A thread-safe, compute-once cell holding an `Arc` snapshot.
///
/// Readers race benignly: the fast path is a read lock, the slow path takes
/// the write lock and re-checks before computing, so the extractor runs at
/// most once per slot and a partially built value is never published.
pub struct LazyFact<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> Default for LazyFact<T> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl<T> LazyFact<T> {
    /// Return the cached value, computing and storing it on first access.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> T) -> Arc<T> {
        // Fast path: already populated (read lock)
        {
            if let Some(value) = self.slot.read().as_ref() {
                return value.clone();
            }
        }

        // Slow path: populate (write lock)
        let mut slot = self.slot.write();

        // Double-check after acquiring the write lock
        if let Some(value) = slot.as_ref() {
            return value.clone();
        }

        let value = Arc::new(compute());
        *slot = Some(value.clone());
        value
    }

    /// Whether the slot has been populated.
    pub fn is_computed(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl<T> fmt::Debug for LazyFact<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_computed() { "computed" } else { "empty" };
        write!(f, "LazyFact({state})")
    }
}
