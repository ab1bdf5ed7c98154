//! Per-document mutation locks.
//!
//! Every mutation in this service follows a read-modify-write pattern over
//! whole documents. Two concurrent writers against the same document would
//! otherwise race: both read the pre-mutation state and the second write
//! overwrites the first. The registry hands out one async mutex per
//! document id so mutations of the same document serialise while unrelated
//! documents proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of per-id async locks shared by the mutating services.
///
/// Entries are kept for the lifetime of the process; the registry grows
/// with the number of distinct documents ever mutated.
#[derive(Default)]
pub struct MutationLocks {
    inner: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl MutationLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, waiting until any in-flight mutation of
    /// the same document completes. The guard releases on drop.
    pub async fn acquire(&self, key: impl Into<String>) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self
                .inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(
                map.entry(key.into())
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}
