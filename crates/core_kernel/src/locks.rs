//! Keyed mutual exclusion
//!
//! The billing ledger requires that the read-check-write sequence of a
//! payment application is exclusive per bill key. [`KeyedLock`] hands out one
//! async mutex per key so operations on distinct keys proceed concurrently
//! while operations on the same key serialize.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A map of per-key async mutexes.
///
/// Cloning is cheap; clones share the same lock table.
///
/// # Example
///
/// ```rust,ignore
/// let locks = KeyedLock::new();
/// let _guard = locks.acquire("ebm101010100").await;
/// // exclusive section for that key
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyedLock {
    table: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl KeyedLock {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the mutex for `key`, creating it on first use.
    ///
    /// The returned guard releases the key when dropped. Entries are kept for
    /// the lifetime of the table; the key space here is small (one entry per
    /// bill that ever saw a payment in this process).
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut table = self.table.lock().await;
            Arc::clone(
                table
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        entry.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn same_key_serializes() {
        let locks = KeyedLock::new();
        let counter = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire("bill-1").await;
                let seen = counter.fetch_add(1, Ordering::SeqCst);
                // While we hold the key no other task may be inside.
                tokio::task::yield_now().await;
                counter.fetch_sub(1, Ordering::SeqCst);
                seen
            }));
        }

        for handle in handles {
            // Every task observed zero concurrent holders on entry.
            assert_eq!(handle.await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn distinct_keys_do_not_block() {
        let locks = KeyedLock::new();
        let _a = locks.acquire("bill-1").await;
        // Would deadlock if keys shared a mutex.
        let _b = locks.acquire("bill-2").await;
    }
}
