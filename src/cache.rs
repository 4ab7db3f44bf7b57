//! Key cache capability.
//!
//! The resolver only needs `get`/`set`; eviction and TTL policy belong to the
//! implementation. [`MemoryCache`] is the default, injected explicitly (no
//! process-wide singleton). Concurrent resolutions for the same key may race
//! to populate an entry; last-writer-wins is acceptable because registry
//! records for a given key are stable within a session.

use crate::crypto::verify::KeyHandle;
use std::collections::HashMap;
use std::sync::RwLock;

/// Cache capability for resolved key handles.
pub trait KeyCache: Send + Sync {
    /// Look up a cached handle by composite `subscriberId:uniqueKeyId` key.
    fn get(&self, key: &str) -> Option<KeyHandle>;

    /// Store a handle under the composite key.
    fn set(&self, key: &str, handle: KeyHandle);
}

/// In-memory key cache with no eviction.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, KeyHandle>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyCache for MemoryCache {
    fn get(&self, key: &str) -> Option<KeyHandle> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, handle: KeyHandle) {
        // Best-effort insert; a poisoned lock just skips the write.
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), handle);
        }
    }
}
