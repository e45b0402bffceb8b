// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fake native handles: trackables, results, images, frames and states.
//!
//! Class queries follow the native `isKindOfClass` contract: a handle is an
//! instance of its own class and of every ancestor. An "alien" handle answers
//! false to every query, standing in for a class the SDK added later.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use vuforia_port::{
    FrameHandle, ImageHandle, NativeMatrix44, ResultClass, StateHandle, TrackableClass,
    TrackableHandle, TrackableResultHandle,
};

/// Trackable handle with a fixed class.
#[derive(Debug)]
pub struct FakeTrackable {
    class: Option<TrackableClass>,
    id: i32,
    name: String,
    extended: AtomicBool,
    unique_target_id: Option<String>,
    size: Option<[f32; 3]>,
}

impl FakeTrackable {
    /// Trackable of `class`.
    pub fn new(class: TrackableClass, id: i32, name: impl Into<String>) -> Self {
        Self {
            class: Some(class),
            id,
            name: name.into(),
            extended: AtomicBool::new(false),
            unique_target_id: None,
            size: None,
        }
    }

    /// Trackable that matches no known class.
    pub fn alien(id: i32) -> Self {
        Self {
            class: None,
            ..Self::new(TrackableClass::Trackable, id, "alien")
        }
    }

    /// Attach object-target attributes.
    pub fn with_target(mut self, unique_target_id: impl Into<String>, size: [f32; 3]) -> Self {
        self.unique_target_id = Some(unique_target_id.into());
        self.size = Some(size);
        self
    }

    /// Share as a port handle.
    pub fn into_handle(self) -> Arc<dyn TrackableHandle> {
        Arc::new(self)
    }
}

impl TrackableHandle for FakeTrackable {
    fn is_instance_of(&self, class: TrackableClass) -> bool {
        self.class.is_some_and(|own| own.is_a(class))
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_extended_tracking_started(&self) -> bool {
        self.extended.load(Ordering::SeqCst)
    }

    fn start_extended_tracking(&self) -> bool {
        !self.extended.swap(true, Ordering::SeqCst)
    }

    fn stop_extended_tracking(&self) -> bool {
        self.extended.swap(false, Ordering::SeqCst)
    }

    fn unique_target_id(&self) -> Option<String> {
        self.unique_target_id.clone()
    }

    fn size(&self) -> Option<[f32; 3]> {
        self.size
    }
}

/// Result handle with a fixed class and observation data.
pub struct FakeTrackableResult {
    class: Option<ResultClass>,
    pose: NativeMatrix44,
    time_stamp: f64,
    status: i32,
    trackable: Arc<dyn TrackableHandle>,
}

impl FakeTrackableResult {
    /// Result of `class` observing `trackable`, status `Tracked`.
    pub fn new(class: ResultClass, trackable: Arc<dyn TrackableHandle>) -> Self {
        Self {
            class: Some(class),
            pose: NativeMatrix44::default(),
            time_stamp: 0.0,
            status: 3,
            trackable,
        }
    }

    /// Result that matches no known class.
    pub fn alien(trackable: Arc<dyn TrackableHandle>) -> Self {
        Self {
            class: None,
            ..Self::new(ResultClass::TrackableResult, trackable)
        }
    }

    /// Set the pose.
    pub fn with_pose(mut self, pose: [f32; 16]) -> Self {
        self.pose = NativeMatrix44::from(pose);
        self
    }

    /// Set the timestamp.
    pub fn with_time_stamp(mut self, time_stamp: f64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    /// Set the raw status code.
    pub fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }
}

impl TrackableResultHandle for FakeTrackableResult {
    fn is_instance_of(&self, class: ResultClass) -> bool {
        self.class.is_some_and(|own| own.is_a(class))
    }

    fn pose(&self) -> NativeMatrix44 {
        self.pose
    }

    fn time_stamp(&self) -> f64 {
        self.time_stamp
    }

    fn status(&self) -> i32 {
        self.status
    }

    fn trackable(&self) -> Arc<dyn TrackableHandle> {
        Arc::clone(&self.trackable)
    }
}

/// Camera image with public fields.
#[derive(Clone, Debug, Default)]
pub struct FakeImage {
    /// Logical width.
    pub width: i32,
    /// Logical height.
    pub height: i32,
    /// Allocated buffer width.
    pub buffer_width: i32,
    /// Allocated buffer height.
    pub buffer_height: i32,
    /// Bytes per row.
    pub stride: i32,
    /// Raw pixel format code.
    pub format: i32,
    /// Pixel bytes.
    pub pixels: Vec<u8>,
}

impl FakeImage {
    /// Zero-filled 8-bit grayscale image.
    pub fn grayscale(width: i32, height: i32) -> Self {
        let len = usize::try_from(width.max(0) * height.max(0)).unwrap_or(0);
        Self {
            width,
            height,
            buffer_width: width,
            buffer_height: height,
            stride: width,
            format: 4,
            pixels: vec![0; len],
        }
    }
}

impl ImageHandle for FakeImage {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn buffer_width(&self) -> i32 {
        self.buffer_width
    }

    fn buffer_height(&self) -> i32 {
        self.buffer_height
    }

    fn stride(&self) -> i32 {
        self.stride
    }

    fn format(&self) -> i32 {
        self.format
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Camera frame with public fields.
#[derive(Clone, Debug, Default)]
pub struct FakeFrame {
    /// Frame index.
    pub index: i32,
    /// Capture time in seconds.
    pub time_stamp: f64,
    /// Images in this frame.
    pub images: Vec<FakeImage>,
}

impl FrameHandle for FakeFrame {
    fn index(&self) -> i32 {
        self.index
    }

    fn time_stamp(&self) -> f64 {
        self.time_stamp
    }

    fn num_images(&self) -> usize {
        self.images.len()
    }

    fn image(&self, index: usize) -> Option<&dyn ImageHandle> {
        self.images.get(index).map(|i| i as &dyn ImageHandle)
    }
}

/// State snapshot builder. `None` entries model null native slots.
#[derive(Default)]
pub struct FakeState {
    frame: FakeFrame,
    trackables: Vec<Option<Arc<dyn TrackableHandle>>>,
    results: Vec<Option<FakeTrackableResult>>,
}

impl FakeState {
    /// Empty state with an image-less frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the frame.
    pub fn with_frame(mut self, frame: FakeFrame) -> Self {
        self.frame = frame;
        self
    }

    /// Append a trackable.
    pub fn with_trackable(mut self, trackable: Arc<dyn TrackableHandle>) -> Self {
        self.trackables.push(Some(trackable));
        self
    }

    /// Append a null trackable slot.
    pub fn with_null_trackable(mut self) -> Self {
        self.trackables.push(None);
        self
    }

    /// Append a result.
    pub fn with_result(mut self, result: FakeTrackableResult) -> Self {
        self.results.push(Some(result));
        self
    }

    /// Append a null result slot.
    pub fn with_null_result(mut self) -> Self {
        self.results.push(None);
        self
    }

    /// Box as a port handle.
    pub fn into_handle(self) -> Box<dyn StateHandle> {
        Box::new(self)
    }
}

impl StateHandle for FakeState {
    fn frame(&self) -> &dyn FrameHandle {
        &self.frame
    }

    fn num_trackables(&self) -> usize {
        self.trackables.len()
    }

    fn trackable(&self, index: usize) -> Option<Arc<dyn TrackableHandle>> {
        self.trackables.get(index).cloned().flatten()
    }

    fn num_trackable_results(&self) -> usize {
        self.results.len()
    }

    fn trackable_result(&self, index: usize) -> Option<&dyn TrackableResultHandle> {
        self.results
            .get(index)
            .and_then(Option::as_ref)
            .map(|r| r as &dyn TrackableResultHandle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_target_is_an_object_target_and_a_trackable() {
        let t = FakeTrackable::new(TrackableClass::ImageTarget, 1, "stones");
        assert!(t.is_instance_of(TrackableClass::ImageTarget));
        assert!(t.is_instance_of(TrackableClass::ObjectTarget));
        assert!(t.is_instance_of(TrackableClass::Trackable));
        assert!(!t.is_instance_of(TrackableClass::MultiTarget));
    }

    #[test]
    fn alien_matches_nothing() {
        let t = FakeTrackable::alien(9);
        assert!(TrackableClass::ALL.iter().all(|c| !t.is_instance_of(*c)));
    }

    #[test]
    fn null_slots_count_toward_length() {
        let state = FakeState::new()
            .with_null_trackable()
            .with_trackable(FakeTrackable::new(TrackableClass::Marker, 1, "m").into_handle());
        assert_eq!(state.num_trackables(), 2);
        assert!(state.trackable(0).is_none());
        assert!(state.trackable(1).is_some());
    }
}
