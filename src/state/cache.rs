//! Shared collection-name cache.
//!
//! The router is the only writer; pages receive a [`CollectionsReader`] when
//! they are constructed and can only take snapshots. A refresh swaps the whole
//! list at once so a reader sees either the previous list or the new one.

use std::sync::{Arc, RwLock};

type Shared = Arc<RwLock<Arc<Vec<String>>>>;

/// Writable handle, owned by the router.
///
#[derive(Debug, Default)]
pub struct CollectionCache {
    inner: Shared,
}

/// Read-only handle handed to page modules.
///
#[derive(Debug, Clone)]
pub struct CollectionsReader {
    inner: Shared,
}

impl CollectionCache {
    pub fn reader(&self) -> CollectionsReader {
        CollectionsReader {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<String>> {
        read(&self.inner)
    }

    /// Replace the cached list wholesale.
    ///
    pub fn replace(&self, names: Vec<String>) {
        let fresh = Arc::new(names);
        match self.inner.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }
}

impl CollectionsReader {
    pub fn snapshot(&self) -> Arc<Vec<String>> {
        read(&self.inner)
    }
}

fn read(inner: &Shared) -> Arc<Vec<String>> {
    match inner.read() {
        Ok(guard) => Arc::clone(&guard),
        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
    }
}
