// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Object tracker and data set facades.
//!
//! Calls block on the native engine. Stopping or destroying while a state that
//! references the affected trackables is being delivered is the caller's
//! responsibility to avoid.
//!
//! Controls return the native success flag, except [`ObjectTracker::stop`]:
//! the native stop has no result, so neither does the facade.

use std::fmt;
use std::sync::Arc;

use vuforia_port::{DataSetHandle, NativeObjectTracker, StorageType};

use crate::resolve::{resolve_trackable, ResolveError};
use crate::trackable::{MultiTarget, Trackable};

/// Active object tracker, available after [`crate::Session::init_object_tracker`].
#[derive(Clone)]
pub struct ObjectTracker {
    native: Arc<dyn NativeObjectTracker>,
}

impl ObjectTracker {
    pub(crate) fn new(native: Arc<dyn NativeObjectTracker>) -> Self {
        Self { native }
    }

    /// Start tracking.
    pub fn start(&self) -> bool {
        self.native.start()
    }

    /// Stop tracking. Returns nothing: the native stop cannot fail.
    pub fn stop(&self) {
        self.native.stop();
    }

    /// Create an empty data set.
    pub fn create_data_set(&self) -> Option<DataSet> {
        self.native.create_data_set().map(|handle| DataSet { handle })
    }

    /// Destroy a data set. It must be deactivated first.
    pub fn destroy_data_set(&self, data_set: &DataSet) -> bool {
        self.native.destroy_data_set(data_set.handle.as_ref())
    }

    /// Activate a data set.
    pub fn activate_data_set(&self, data_set: &DataSet) -> bool {
        self.native.activate_data_set(data_set.handle.as_ref())
    }

    /// Deactivate a data set.
    pub fn deactivate_data_set(&self, data_set: &DataSet) -> bool {
        self.native.deactivate_data_set(data_set.handle.as_ref())
    }
}

impl fmt::Debug for ObjectTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectTracker").finish_non_exhaustive()
    }
}

/// A set of trackables loaded into the object tracker.
#[derive(Clone)]
pub struct DataSet {
    handle: Arc<dyn DataSetHandle>,
}

impl DataSet {
    /// Create an empty multi target named `name`.
    pub fn create_multi_target(&self, name: &str) -> Option<MultiTarget> {
        self.handle
            .create_multi_target(name)
            .map(MultiTarget::from_handle)
    }

    /// Destroy a trackable owned by this set.
    pub fn destroy(&self, trackable: &Trackable) -> bool {
        self.handle.destroy(trackable.handle())
    }

    /// Whether a data set file exists at `path`.
    pub fn exists(&self, path: &str, storage: StorageType) -> bool {
        self.handle.exists(path, storage)
    }

    /// Load a data set file from `path`.
    pub fn load(&self, path: &str, storage: StorageType) -> bool {
        self.handle.load(path, storage)
    }

    /// Number of trackables.
    pub fn num_trackables(&self) -> usize {
        self.handle.num_trackables()
    }

    /// Trackable at `index`, `Ok(None)` when out of range or null.
    pub fn trackable(&self, index: usize) -> Result<Option<Trackable>, ResolveError> {
        if index >= self.handle.num_trackables() {
            return Ok(None);
        }
        self.handle
            .trackable(index)
            .map(resolve_trackable)
            .transpose()
    }

    /// Every present trackable.
    pub fn trackables(&self) -> impl Iterator<Item = Result<Trackable, ResolveError>> + '_ {
        (0..self.num_trackables()).filter_map(move |i| self.trackable(i).transpose())
    }

    /// Whether the set cannot take more trackables.
    pub fn has_reached_trackable_limit(&self) -> bool {
        self.handle.has_reached_trackable_limit()
    }

    /// Whether the set is active.
    pub fn is_active(&self) -> bool {
        self.handle.is_active()
    }
}

impl fmt::Debug for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSet")
            .field("num_trackables", &self.handle.num_trackables())
            .finish_non_exhaustive()
    }
}
