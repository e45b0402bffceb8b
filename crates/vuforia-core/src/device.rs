// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera, device and renderer facades.
//!
//! Stateless forwarders to native singletons. The only work done here is
//! converting matrix records and turning out-of-range lookups into `None`.

use std::sync::Arc;

use vuforia_port::{
    CameraCalibration, CameraDirection, CoordinateSystem, DeviceMode, FocusMode, MeshData,
    NativeCameraDevice, NativeDevice, NativeRenderer, RenderingPrimitivesHandle,
    VideoBackgroundConfig, VideoMode, ViewId, ViewerParameters,
};

use crate::matrix::{matrix44, Matrix44};

/// Camera device facade.
#[derive(Clone)]
pub struct CameraDevice {
    native: Arc<dyn NativeCameraDevice>,
}

impl CameraDevice {
    pub(crate) fn new(native: Arc<dyn NativeCameraDevice>) -> Self {
        Self { native }
    }

    /// Open the camera facing `direction`.
    pub fn init(&self, direction: CameraDirection) -> bool {
        self.native.init_camera(direction)
    }

    /// Close the camera.
    pub fn deinit(&self) -> bool {
        self.native.deinit_camera()
    }

    /// Current calibration.
    pub fn camera_calibration(&self) -> CameraCalibration {
        self.native.camera_calibration()
    }

    /// Direction of the open camera.
    pub fn camera_direction(&self) -> CameraDirection {
        self.native.camera_direction()
    }

    /// Number of supported video modes.
    pub fn num_video_modes(&self) -> usize {
        self.native.num_video_modes()
    }

    /// Video mode at `index`. Negative indices are native presets and pass through.
    pub fn video_mode(&self, index: i32) -> Option<VideoMode> {
        if usize::try_from(index).is_ok_and(|i| i >= self.native.num_video_modes()) {
            return None;
        }
        Some(self.native.video_mode(index))
    }

    /// Select the video mode at `index`.
    pub fn select_video_mode(&self, index: i32) -> bool {
        self.native.select_video_mode(index)
    }

    /// Toggle the torch.
    pub fn set_flash_torch_mode(&self, on: bool) -> bool {
        self.native.set_flash_torch_mode(on)
    }

    /// Set the focus mode.
    pub fn set_focus_mode(&self, mode: FocusMode) -> bool {
        self.native.set_focus_mode(mode)
    }

    /// Start capture.
    pub fn start(&self) -> bool {
        self.native.start()
    }

    /// Stop capture.
    pub fn stop(&self) -> bool {
        self.native.stop()
    }
}

/// Device facade.
#[derive(Clone)]
pub struct Device {
    native: Arc<dyn NativeDevice>,
}

impl Device {
    pub(crate) fn new(native: Arc<dyn NativeDevice>) -> Self {
        Self { native }
    }

    /// Switch presentation mode.
    pub fn set_mode(&self, mode: DeviceMode) -> bool {
        self.native.set_mode(mode)
    }

    /// Current presentation mode.
    pub fn mode(&self) -> DeviceMode {
        self.native.mode()
    }

    /// Enable or disable the head-mounted viewer.
    pub fn set_viewer_active(&self, active: bool) {
        self.native.set_viewer_active(active);
    }

    /// Whether a viewer is active.
    pub fn is_viewer_active(&self) -> bool {
        self.native.is_viewer_active()
    }

    /// Snapshot of the known viewers.
    pub fn viewer_list(&self) -> ViewerList {
        ViewerList {
            native: Arc::clone(&self.native),
            viewers: self.native.viewer_list(),
        }
    }

    /// Select `viewer`.
    pub fn select_viewer(&self, viewer: &ViewerParameters) -> bool {
        self.native.select_viewer(viewer)
    }

    /// Selected viewer, `None` while no viewer is active.
    pub fn selected_viewer(&self) -> Option<ViewerParameters> {
        if !self.native.is_viewer_active() {
            return None;
        }
        Some(self.native.selected_viewer())
    }

    /// Rendering primitives for the current configuration.
    pub fn rendering_primitives(&self) -> RenderingPrimitives {
        RenderingPrimitives {
            native: self.native.rendering_primitives(),
        }
    }
}

/// Known viewers, as of the last fetch or filter change.
pub struct ViewerList {
    native: Arc<dyn NativeDevice>,
    viewers: Vec<ViewerParameters>,
}

impl ViewerList {
    /// Viewer at `index`.
    pub fn get(&self, index: usize) -> Option<&ViewerParameters> {
        self.viewers.get(index)
    }

    /// Viewer matching both `name` and `manufacturer`.
    pub fn find(&self, name: &str, manufacturer: &str) -> Option<&ViewerParameters> {
        self.viewers
            .iter()
            .find(|v| v.name == name && v.manufacturer == manufacturer)
    }

    /// Apply an SDK filter and refetch the list.
    pub fn set_sdk_filter(&mut self, filter: &str) {
        self.native.set_viewer_sdk_filter(filter);
        self.viewers = self.native.viewer_list();
    }

    /// Number of viewers.
    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }
}

/// Views a configuration renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewList(Vec<ViewId>);

impl ViewList {
    /// Whether `view` is rendered.
    pub fn contains(&self, view: ViewId) -> bool {
        self.0.contains(&view)
    }

    /// View at `index`.
    pub fn get(&self, index: usize) -> Option<ViewId> {
        self.0.get(index).copied()
    }

    /// Number of views.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no views are rendered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rendering primitives facade.
pub struct RenderingPrimitives {
    native: Box<dyn RenderingPrimitivesHandle>,
}

impl RenderingPrimitives {
    /// Views to render.
    pub fn rendering_views(&self) -> ViewList {
        ViewList(self.native.rendering_views())
    }

    /// Viewport in pixels (x, y, width, height).
    pub fn viewport(&self, view: ViewId) -> [i32; 4] {
        self.native.viewport(view)
    }

    /// Viewport normalized to the surface.
    pub fn normalized_viewport(&self, view: ViewId) -> [f32; 4] {
        self.native.normalized_viewport(view)
    }

    /// Projection matrix for `view`.
    pub fn projection_matrix(&self, view: ViewId, cs: CoordinateSystem) -> Matrix44 {
        matrix44(&self.native.projection_matrix(view, cs))
    }

    /// Projection matrix for the video background of `view`.
    pub fn video_background_projection_matrix(
        &self,
        view: ViewId,
        cs: CoordinateSystem,
    ) -> Matrix44 {
        matrix44(&self.native.video_background_projection_matrix(view, cs))
    }

    /// Eye display adjustment for `view`.
    pub fn eye_display_adjustment_matrix(&self, view: ViewId) -> Matrix44 {
        matrix44(&self.native.eye_display_adjustment_matrix(view))
    }

    /// Video background mesh for `view`.
    pub fn video_background_mesh(&self, view: ViewId) -> Option<MeshData> {
        self.native.video_background_mesh(view)
    }

    /// Distortion texture mesh for `view`.
    pub fn distortion_texture_mesh(&self, view: ViewId) -> Option<MeshData> {
        self.native.distortion_texture_mesh(view)
    }

    /// Distortion texture size in pixels.
    pub fn distortion_texture_size(&self, view: ViewId) -> [f32; 2] {
        self.native.distortion_texture_size(view)
    }

    /// Distortion texture viewport in pixels.
    pub fn distortion_texture_viewport(&self, view: ViewId) -> [i32; 4] {
        self.native.distortion_texture_viewport(view)
    }
}

/// Renderer facade.
#[derive(Clone)]
pub struct Renderer {
    native: Arc<dyn NativeRenderer>,
}

impl Renderer {
    pub(crate) fn new(native: Arc<dyn NativeRenderer>) -> Self {
        Self { native }
    }

    /// Recommended frame rate for the given native flags.
    pub fn recommended_fps(&self, flags: i32) -> i32 {
        self.native.recommended_fps(flags)
    }

    /// Current video background configuration.
    pub fn video_background_config(&self) -> VideoBackgroundConfig {
        self.native.video_background_config()
    }

    /// Request a target frame rate.
    pub fn set_target_fps(&self, fps: i32) -> bool {
        self.native.set_target_fps(fps)
    }

    /// Apply a video background configuration.
    pub fn set_video_background_config(&self, config: &VideoBackgroundConfig) {
        self.native.set_video_background_config(config);
    }
}
