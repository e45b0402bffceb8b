// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for the Vuforia session crates.
//!
//! Every native port has a scriptable in-memory fake here, so the session
//! core can be exercised without the SDK.
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`device`] - Camera, device, rendering primitives and renderer fakes
//! - [`engine`] - Native engine fake with scriptable init completion
//! - [`handles`] - Trackable, result, image, frame and state handle builders
//! - [`host`] - Video view, display and host event bus fakes
//! - [`trace`] - Shared call log for ordering assertions
//! - [`tracker`] - Object tracker and data set fakes
#![forbid(unsafe_code)]

pub mod config;
pub mod device;
pub mod engine;
pub mod handles;
pub mod host;
pub mod trace;
pub mod tracker;

use std::sync::Arc;

use vuforia_port::{InterfaceOrientation, VideoMode, ViewerParameters};

// Re-export commonly used items at crate root for convenience
pub use config::InMemoryConfigStore;
pub use device::{FakeCamera, FakeDevice, FakeRenderer, FakeRenderingPrimitives};
pub use engine::{FakeEngine, InitMode};
pub use handles::{FakeFrame, FakeImage, FakeState, FakeTrackable, FakeTrackableResult};
pub use host::{FakeDisplay, FakeHostEvents, FakeVideoView};
pub use trace::{Call, Trace};
pub use tracker::{FakeDataSet, FakeObjectTracker};

/// View width in points used by [`FakeSdk::new`].
pub const VIEW_WIDTH: f32 = 375.0;
/// View height in points used by [`FakeSdk::new`].
pub const VIEW_HEIGHT: f32 = 667.0;
/// Content scale used by [`FakeSdk::new`].
pub const VIEW_SCALE: f32 = 2.0;

/// One fake of every native collaborator, sharing a single [`Trace`].
pub struct FakeSdk {
    /// Call log shared by the engine and the view.
    pub trace: Trace,
    /// Native engine.
    pub engine: Arc<FakeEngine>,
    /// Video view.
    pub view: Arc<FakeVideoView>,
    /// Display orientation source.
    pub display: Arc<FakeDisplay>,
    /// Object tracker.
    pub object_tracker: Arc<FakeObjectTracker>,
    /// Camera.
    pub camera: Arc<FakeCamera>,
    /// Device.
    pub device: Arc<FakeDevice>,
    /// Renderer.
    pub renderer: Arc<FakeRenderer>,
}

impl Default for FakeSdk {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSdk {
    /// Portrait phone-sized view, init succeeding immediately.
    pub fn new() -> Self {
        Self::with_object_tracker(FakeObjectTracker::new())
    }

    /// Like [`FakeSdk::new`] with a pre-configured object tracker.
    pub fn with_object_tracker(object_tracker: FakeObjectTracker) -> Self {
        let trace = Trace::new();
        Self {
            engine: Arc::new(FakeEngine::new(trace.clone())),
            view: Arc::new(FakeVideoView::new(
                trace.clone(),
                VIEW_WIDTH,
                VIEW_HEIGHT,
                VIEW_SCALE,
            )),
            display: Arc::new(FakeDisplay::new(InterfaceOrientation::Portrait)),
            object_tracker: Arc::new(object_tracker),
            camera: Arc::new(FakeCamera::new(vec![
                VideoMode {
                    width: 640,
                    height: 480,
                    framerate: 30.0,
                },
                VideoMode {
                    width: 1280,
                    height: 720,
                    framerate: 30.0,
                },
            ])),
            device: Arc::new(FakeDevice::new(vec![
                viewer("Cardboard v1", "Google"),
                viewer("Cardboard v2", "Google"),
                viewer("Gear VR", "Samsung"),
            ])),
            renderer: Arc::new(FakeRenderer::new()),
            trace,
        }
    }
}

fn viewer(name: &str, manufacturer: &str) -> ViewerParameters {
    ViewerParameters {
        name: name.to_owned(),
        manufacturer: manufacturer.to_owned(),
        version: 1.0,
        ..ViewerParameters::default()
    }
}
