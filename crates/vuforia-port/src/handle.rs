// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Opaque native handles.
//!
//! Trackables are owned by the engine and outlive any single update, so they
//! travel as shared `Arc` handles. Everything reachable from a
//! [`StateHandle`] (results, frame, images) is borrowed from it.

use std::sync::Arc;

use crate::class::{ResultClass, TrackableClass};
use crate::matrix::NativeMatrix44;

/// Native trackable object.
pub trait TrackableHandle: Send + Sync {
    /// Native `isKindOfClass` query: true for the concrete class and its ancestors.
    fn is_instance_of(&self, class: TrackableClass) -> bool;
    /// Numeric id.
    fn id(&self) -> i32;
    /// Target name.
    fn name(&self) -> String;
    /// Whether extended tracking is running.
    fn is_extended_tracking_started(&self) -> bool;
    /// Start extended tracking.
    fn start_extended_tracking(&self) -> bool;
    /// Stop extended tracking.
    fn stop_extended_tracking(&self) -> bool;
    /// Unique cloud/target id; only object targets carry one.
    fn unique_target_id(&self) -> Option<String> {
        None
    }
    /// Target extent in scene units; only object targets carry one.
    fn size(&self) -> Option<[f32; 3]> {
        None
    }
}

/// Native trackable-result object.
pub trait TrackableResultHandle {
    /// Native `isKindOfClass` query: true for the concrete class and its ancestors.
    fn is_instance_of(&self, class: ResultClass) -> bool;
    /// Pose transform record.
    fn pose(&self) -> NativeMatrix44;
    /// Observation timestamp in seconds.
    fn time_stamp(&self) -> f64;
    /// Raw native status code.
    fn status(&self) -> i32;
    /// Trackable this result observes.
    fn trackable(&self) -> Arc<dyn TrackableHandle>;
}

/// Native camera image.
pub trait ImageHandle {
    /// Image width in pixels.
    fn width(&self) -> i32;
    /// Image height in pixels.
    fn height(&self) -> i32;
    /// Buffer width in pixels (may exceed `width` due to padding).
    fn buffer_width(&self) -> i32;
    /// Buffer height in pixels.
    fn buffer_height(&self) -> i32;
    /// Row stride in bytes.
    fn stride(&self) -> i32;
    /// Raw native pixel format code.
    fn format(&self) -> i32;
    /// Pixel buffer; owned by the native frame.
    fn pixels(&self) -> &[u8];
}

/// Native camera frame.
pub trait FrameHandle {
    /// Frame index.
    fn index(&self) -> i32;
    /// Capture timestamp in seconds.
    fn time_stamp(&self) -> f64;
    /// Number of images in the frame.
    fn num_images(&self) -> usize;
    /// Image at `index`, `None` when the native entry is null.
    fn image(&self, index: usize) -> Option<&dyn ImageHandle>;
}

/// Native state (one tracking update).
pub trait StateHandle {
    /// Camera frame for this update.
    fn frame(&self) -> &dyn FrameHandle;
    /// Number of known trackables.
    fn num_trackables(&self) -> usize;
    /// Trackable at `index`, `None` when the native entry is null.
    fn trackable(&self, index: usize) -> Option<Arc<dyn TrackableHandle>>;
    /// Number of current results.
    fn num_trackable_results(&self) -> usize;
    /// Result at `index`, `None` when the native entry is null.
    fn trackable_result(&self, index: usize) -> Option<&dyn TrackableResultHandle>;
}
