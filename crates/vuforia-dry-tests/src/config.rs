// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vuforia_config::{ConfigError, ConfigStore};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// Counts reads and writes and can be told to fail, so tests can check how
/// a session reacts to a broken preferences store.
///
/// # Example
///
/// ```
/// use vuforia_dry_tests::InMemoryConfigStore;
/// use vuforia_config::{PrefsService, SessionPrefs};
///
/// let store = InMemoryConfigStore::new();
/// let prefs = PrefsService::new(store.clone());
///
/// prefs.save(&SessionPrefs::with_license_key("key")).unwrap();
/// assert_eq!(store.read_count(), 0);
/// assert_eq!(store.write_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<String, Vec<u8>>,
    read_count: usize,
    write_count: usize,
    fail_reads: bool,
    fail_writes: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty in-memory config store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `data` under `key`.
    pub fn with_entry(key: &str, data: &[u8]) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_owned(), data.to_vec());
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every read fail with an I/O error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make every write fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Number of reads, including failed ones.
    pub fn read_count(&self) -> usize {
        self.lock().read_count
    }

    /// Number of writes, including failed ones.
    pub fn write_count(&self) -> usize {
        self.lock().write_count
    }

    /// Raw bytes stored under `key`.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        let mut inner = self.lock();
        inner.read_count += 1;
        if inner.fail_reads {
            return Err(io::Error::other("simulated read failure").into());
        }
        Ok(inner.data.get(key).cloned())
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.write_count += 1;
        if inner.fail_writes {
            return Err(io::Error::other("simulated write failure").into());
        }
        inner.data.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn writes_are_readable_and_counted() {
        let store = InMemoryConfigStore::new();
        store.write("test", b"hello").unwrap();
        assert_eq!(store.read("test").unwrap().as_deref(), Some(&b"hello"[..]));
        assert!(store.read("missing").unwrap().is_none());
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.read_count(), 2);
    }

    #[test]
    fn failing_reads_are_io_errors_and_still_count() {
        let store = InMemoryConfigStore::with_entry("test", b"data");
        store.set_fail_reads(true);
        assert!(matches!(store.read("test"), Err(ConfigError::Io(_))));
        assert_eq!(store.read_count(), 1);
    }

    #[test]
    fn failing_writes_leave_data_untouched() {
        let store = InMemoryConfigStore::new();
        store.set_fail_writes(true);
        assert!(matches!(store.write("test", b"data"), Err(ConfigError::Io(_))));
        assert!(store.raw("test").is_none());
    }
}
