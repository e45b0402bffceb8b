// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fake object tracker and data sets.
//!
//! Data set files are registered on the tracker up front; every data set it
//! creates can `load` them. Activation rules mirror the native side: a set
//! can only be destroyed while inactive.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vuforia_port::{
    DataSetHandle, NativeObjectTracker, StorageType, TrackableClass, TrackableHandle,
};

use crate::handles::FakeTrackable;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
struct DataSetFile {
    path: String,
    storage: StorageType,
    trackables: Vec<Arc<dyn TrackableHandle>>,
}

/// Data set created by [`FakeObjectTracker`].
pub struct FakeDataSet {
    files: Vec<DataSetFile>,
    trackables: Mutex<Vec<Arc<dyn TrackableHandle>>>,
    limit: usize,
    next_id: AtomicUsize,
    active: AtomicBool,
}

impl FakeDataSet {
    fn new(files: Vec<DataSetFile>, limit: usize) -> Self {
        Self {
            files,
            trackables: Mutex::new(Vec::new()),
            limit,
            next_id: AtomicUsize::new(1000),
            active: AtomicBool::new(false),
        }
    }

    fn file(&self, path: &str, storage: StorageType) -> Option<&DataSetFile> {
        self.files
            .iter()
            .find(|f| f.path == path && f.storage == storage)
    }
}

impl DataSetHandle for FakeDataSet {
    fn create_multi_target(&self, name: &str) -> Option<Arc<dyn TrackableHandle>> {
        let mut trackables = lock(&self.trackables);
        if trackables.len() >= self.limit {
            return None;
        }
        let id = i32::try_from(self.next_id.fetch_add(1, Ordering::SeqCst)).unwrap_or(i32::MAX);
        let target = FakeTrackable::new(TrackableClass::MultiTarget, id, name).into_handle();
        trackables.push(Arc::clone(&target));
        Some(target)
    }

    fn destroy(&self, trackable: &dyn TrackableHandle) -> bool {
        let mut trackables = lock(&self.trackables);
        let before = trackables.len();
        trackables.retain(|t| t.id() != trackable.id());
        trackables.len() != before
    }

    fn exists(&self, path: &str, storage: StorageType) -> bool {
        self.file(path, storage).is_some()
    }

    fn load(&self, path: &str, storage: StorageType) -> bool {
        let Some(file) = self.file(path, storage) else {
            return false;
        };
        lock(&self.trackables).extend(file.trackables.iter().cloned());
        true
    }

    fn num_trackables(&self) -> usize {
        lock(&self.trackables).len()
    }

    fn trackable(&self, index: usize) -> Option<Arc<dyn TrackableHandle>> {
        lock(&self.trackables).get(index).cloned()
    }

    fn has_reached_trackable_limit(&self) -> bool {
        lock(&self.trackables).len() >= self.limit
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Object tracker fake. Refuses every call until `init_tracker` succeeds.
pub struct FakeObjectTracker {
    files: Mutex<Vec<DataSetFile>>,
    limit: usize,
    refuse_init: AtomicBool,
    initialized: AtomicBool,
    started: AtomicBool,
    data_sets: Mutex<Vec<Arc<FakeDataSet>>>,
}

impl Default for FakeObjectTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeObjectTracker {
    /// Tracker whose data sets hold up to 100 trackables.
    pub fn new() -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            limit: 100,
            refuse_init: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            started: AtomicBool::new(false),
            data_sets: Mutex::new(Vec::new()),
        }
    }

    /// Register a data set file loadable from `path`.
    pub fn with_file(
        self,
        path: impl Into<String>,
        storage: StorageType,
        trackables: Vec<Arc<dyn TrackableHandle>>,
    ) -> Self {
        lock(&self.files).push(DataSetFile {
            path: path.into(),
            storage,
            trackables,
        });
        self
    }

    /// Make `init_tracker` fail.
    pub fn refuse_init(&self) {
        self.refuse_init.store(true, Ordering::SeqCst);
    }

    /// Whether the tracker is initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Whether the tracker is started.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of live data sets.
    pub fn data_set_count(&self) -> usize {
        lock(&self.data_sets).len()
    }

    fn find(&self, data_set: &dyn DataSetHandle) -> Option<Arc<FakeDataSet>> {
        lock(&self.data_sets)
            .iter()
            .find(|d| std::ptr::addr_eq(Arc::as_ptr(*d), std::ptr::from_ref(data_set)))
            .cloned()
    }
}

impl NativeObjectTracker for FakeObjectTracker {
    fn init_tracker(&self) -> bool {
        if self.refuse_init.load(Ordering::SeqCst) {
            return false;
        }
        self.initialized.store(true, Ordering::SeqCst);
        true
    }

    fn deinit_tracker(&self) -> bool {
        if self.started.load(Ordering::SeqCst) {
            return false;
        }
        self.initialized.swap(false, Ordering::SeqCst)
    }

    fn start(&self) -> bool {
        self.is_initialized() && !self.started.swap(true, Ordering::SeqCst)
    }

    fn stop(&self) {
        self.started.store(false, Ordering::SeqCst);
    }

    fn create_data_set(&self) -> Option<Arc<dyn DataSetHandle>> {
        if !self.is_initialized() {
            return None;
        }
        let data_set = Arc::new(FakeDataSet::new(lock(&self.files).clone(), self.limit));
        lock(&self.data_sets).push(Arc::clone(&data_set));
        Some(data_set)
    }

    fn destroy_data_set(&self, data_set: &dyn DataSetHandle) -> bool {
        let Some(found) = self.find(data_set) else {
            return false;
        };
        if found.is_active() {
            return false;
        }
        lock(&self.data_sets).retain(|d| !Arc::ptr_eq(d, &found));
        true
    }

    fn activate_data_set(&self, data_set: &dyn DataSetHandle) -> bool {
        self.find(data_set)
            .is_some_and(|d| !d.active.swap(true, Ordering::SeqCst))
    }

    fn deactivate_data_set(&self, data_set: &dyn DataSetHandle) -> bool {
        self.find(data_set)
            .is_some_and(|d| d.active.swap(false, Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_sets_need_an_initialized_tracker() {
        let tracker = FakeObjectTracker::new();
        assert!(tracker.create_data_set().is_none());
        assert!(tracker.init_tracker());
        assert!(tracker.create_data_set().is_some());
        assert_eq!(tracker.data_set_count(), 1);
    }

    #[test]
    fn active_data_set_cannot_be_destroyed() {
        let tracker = FakeObjectTracker::new();
        assert!(tracker.init_tracker());
        let Some(ds) = tracker.create_data_set() else {
            unreachable!("tracker is initialized");
        };
        assert!(tracker.activate_data_set(ds.as_ref()));
        assert!(!tracker.destroy_data_set(ds.as_ref()));
        assert!(tracker.deactivate_data_set(ds.as_ref()));
        assert!(tracker.destroy_data_set(ds.as_ref()));
        assert_eq!(tracker.data_set_count(), 0);
    }
}
