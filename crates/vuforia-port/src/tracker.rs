// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Object tracker and data set ports.
//!
//! All calls are synchronous and blocking. Destroying a tracker or data set
//! while a state referencing its trackables is being delivered is undefined
//! on the native side; callers must sequence these against the state callback.
//!
//! Every control reports success as a `bool` except [`NativeObjectTracker::stop`],
//! which the native tracker exposes as `void`: stopping cannot fail.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::handle::TrackableHandle;

/// Where a data set path is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum StorageType {
    /// Application storage directory.
    App = 0,
    /// Bundled application resources.
    AppResource = 1,
    /// Absolute filesystem path.
    Absolute = 2,
}

/// Native data set.
pub trait DataSetHandle: Send + Sync {
    /// Create an empty multi target named `name`.
    fn create_multi_target(&self, name: &str) -> Option<Arc<dyn TrackableHandle>>;
    /// Destroy a trackable owned by this data set.
    fn destroy(&self, trackable: &dyn TrackableHandle) -> bool;
    /// Whether a data set file exists at `path`.
    fn exists(&self, path: &str, storage: StorageType) -> bool;
    /// Load a data set file from `path`.
    fn load(&self, path: &str, storage: StorageType) -> bool;
    /// Number of trackables in the set.
    fn num_trackables(&self) -> usize;
    /// Trackable at `index`, `None` when the native entry is null.
    fn trackable(&self, index: usize) -> Option<Arc<dyn TrackableHandle>>;
    /// Whether the set cannot take more trackables.
    fn has_reached_trackable_limit(&self) -> bool;
    /// Whether the set is active on the tracker.
    fn is_active(&self) -> bool;
}

/// Native object tracker singleton.
pub trait NativeObjectTracker: Send + Sync {
    /// Create the tracker instance.
    fn init_tracker(&self) -> bool;
    /// Destroy the tracker instance.
    fn deinit_tracker(&self) -> bool;
    /// Start tracking.
    fn start(&self) -> bool;
    /// Stop tracking. Native `void`; there is no failure to report.
    fn stop(&self);
    /// Create an empty data set.
    fn create_data_set(&self) -> Option<Arc<dyn DataSetHandle>>;
    /// Destroy a data set.
    fn destroy_data_set(&self, data_set: &dyn DataSetHandle) -> bool;
    /// Activate a data set.
    fn activate_data_set(&self, data_set: &dyn DataSetHandle) -> bool;
    /// Deactivate a data set.
    fn deactivate_data_set(&self, data_set: &dyn DataSetHandle) -> bool;
}
