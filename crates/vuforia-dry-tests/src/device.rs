// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fake camera, device, rendering primitives and renderer.

use std::sync::{Mutex, MutexGuard, PoisonError};

use vuforia_port::{
    CameraCalibration, CameraDirection, CoordinateSystem, DeviceMode, FocusMode, MeshData,
    NativeCameraDevice, NativeDevice, NativeMatrix44, NativeRenderer, RenderingPrimitivesHandle,
    VideoBackgroundConfig, VideoMode, ViewId, ViewerParameters,
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct CameraInner {
    direction: Option<CameraDirection>,
    selected_mode: Option<i32>,
    torch: bool,
    focus: Option<FocusMode>,
    started: bool,
}

/// Camera with a fixed list of video modes.
pub struct FakeCamera {
    modes: Vec<VideoMode>,
    calibration: CameraCalibration,
    inner: Mutex<CameraInner>,
}

impl FakeCamera {
    /// Camera supporting `modes`.
    pub fn new(modes: Vec<VideoMode>) -> Self {
        Self {
            modes,
            calibration: CameraCalibration {
                size: [640.0, 480.0],
                ..CameraCalibration::default()
            },
            inner: Mutex::new(CameraInner::default()),
        }
    }

    /// Whether capture is running.
    pub fn is_started(&self) -> bool {
        lock(&self.inner).started
    }

    /// Torch state.
    pub fn torch(&self) -> bool {
        lock(&self.inner).torch
    }

    /// Last selected video mode index.
    pub fn selected_mode(&self) -> Option<i32> {
        lock(&self.inner).selected_mode
    }

    /// Last requested focus mode.
    pub fn focus(&self) -> Option<FocusMode> {
        lock(&self.inner).focus
    }
}

impl NativeCameraDevice for FakeCamera {
    fn init_camera(&self, direction: CameraDirection) -> bool {
        lock(&self.inner).direction = Some(direction);
        true
    }

    fn deinit_camera(&self) -> bool {
        lock(&self.inner).direction.take().is_some()
    }

    fn camera_calibration(&self) -> CameraCalibration {
        self.calibration
    }

    fn camera_direction(&self) -> CameraDirection {
        lock(&self.inner)
            .direction
            .unwrap_or(CameraDirection::Default)
    }

    fn num_video_modes(&self) -> usize {
        self.modes.len()
    }

    fn video_mode(&self, index: i32) -> VideoMode {
        // Negative indices are presets; the fake answers them with the first mode.
        usize::try_from(index)
            .ok()
            .and_then(|i| self.modes.get(i))
            .or_else(|| self.modes.first())
            .copied()
            .unwrap_or_default()
    }

    fn select_video_mode(&self, index: i32) -> bool {
        lock(&self.inner).selected_mode = Some(index);
        true
    }

    fn set_flash_torch_mode(&self, on: bool) -> bool {
        lock(&self.inner).torch = on;
        true
    }

    fn set_focus_mode(&self, mode: FocusMode) -> bool {
        lock(&self.inner).focus = Some(mode);
        true
    }

    fn start(&self) -> bool {
        let mut inner = lock(&self.inner);
        if inner.direction.is_none() {
            return false;
        }
        inner.started = true;
        true
    }

    fn stop(&self) -> bool {
        std::mem::replace(&mut lock(&self.inner).started, false)
    }
}

struct DeviceInner {
    mode: DeviceMode,
    viewer_active: bool,
    filter: String,
    selected: Option<ViewerParameters>,
}

/// Device with a fixed viewer catalogue.
///
/// The SDK filter keeps viewers whose name contains the filter string.
pub struct FakeDevice {
    viewers: Vec<ViewerParameters>,
    inner: Mutex<DeviceInner>,
}

impl FakeDevice {
    /// Device in AR mode knowing `viewers`.
    pub fn new(viewers: Vec<ViewerParameters>) -> Self {
        Self {
            viewers,
            inner: Mutex::new(DeviceInner {
                mode: DeviceMode::Ar,
                viewer_active: false,
                filter: String::new(),
                selected: None,
            }),
        }
    }
}

impl NativeDevice for FakeDevice {
    fn set_mode(&self, mode: DeviceMode) -> bool {
        lock(&self.inner).mode = mode;
        true
    }

    fn mode(&self) -> DeviceMode {
        lock(&self.inner).mode
    }

    fn set_viewer_active(&self, active: bool) {
        lock(&self.inner).viewer_active = active;
    }

    fn is_viewer_active(&self) -> bool {
        lock(&self.inner).viewer_active
    }

    fn viewer_list(&self) -> Vec<ViewerParameters> {
        let filter = lock(&self.inner).filter.clone();
        self.viewers
            .iter()
            .filter(|v| v.name.contains(&filter))
            .cloned()
            .collect()
    }

    fn set_viewer_sdk_filter(&self, filter: &str) {
        filter.clone_into(&mut lock(&self.inner).filter);
    }

    fn select_viewer(&self, viewer: &ViewerParameters) -> bool {
        if !self.viewers.contains(viewer) {
            return false;
        }
        lock(&self.inner).selected = Some(viewer.clone());
        true
    }

    fn selected_viewer(&self) -> ViewerParameters {
        lock(&self.inner).selected.clone().unwrap_or_default()
    }

    fn rendering_primitives(&self) -> Box<dyn RenderingPrimitivesHandle> {
        let views = if lock(&self.inner).viewer_active {
            vec![ViewId::LeftEye, ViewId::RightEye, ViewId::Postprocess]
        } else {
            vec![ViewId::Singular]
        };
        Box::new(FakeRenderingPrimitives { views })
    }
}

/// Rendering primitives whose matrices encode their arguments.
///
/// Element 0 holds the view id, element 1 the coordinate system (0 when the
/// call takes none), element 15 is 1.
pub struct FakeRenderingPrimitives {
    views: Vec<ViewId>,
}

impl FakeRenderingPrimitives {
    #[allow(clippy::cast_precision_loss)]
    fn encode(view: ViewId, cs: Option<CoordinateSystem>) -> NativeMatrix44 {
        let mut m = [0.0; 16];
        m[0] = view as i32 as f32;
        m[1] = cs.map_or(0, |cs| cs as i32) as f32;
        m[15] = 1.0;
        NativeMatrix44::from(m)
    }
}

impl RenderingPrimitivesHandle for FakeRenderingPrimitives {
    fn rendering_views(&self) -> Vec<ViewId> {
        self.views.clone()
    }

    fn viewport(&self, _view: ViewId) -> [i32; 4] {
        [0, 0, 640, 480]
    }

    fn normalized_viewport(&self, _view: ViewId) -> [f32; 4] {
        [0.0, 0.0, 1.0, 1.0]
    }

    fn projection_matrix(&self, view: ViewId, cs: CoordinateSystem) -> NativeMatrix44 {
        Self::encode(view, Some(cs))
    }

    fn video_background_projection_matrix(
        &self,
        view: ViewId,
        cs: CoordinateSystem,
    ) -> NativeMatrix44 {
        Self::encode(view, Some(cs))
    }

    fn eye_display_adjustment_matrix(&self, view: ViewId) -> NativeMatrix44 {
        Self::encode(view, None)
    }

    fn video_background_mesh(&self, view: ViewId) -> Option<MeshData> {
        (view != ViewId::Postprocess).then(|| MeshData {
            positions: vec![-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0, 1.0, 0.0],
            uvs: vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0],
            triangles: vec![0, 1, 2],
            ..MeshData::default()
        })
    }

    fn distortion_texture_mesh(&self, view: ViewId) -> Option<MeshData> {
        matches!(view, ViewId::LeftEye | ViewId::RightEye).then(MeshData::default)
    }

    fn distortion_texture_size(&self, _view: ViewId) -> [f32; 2] {
        [1024.0, 1024.0]
    }

    fn distortion_texture_viewport(&self, _view: ViewId) -> [i32; 4] {
        [0, 0, 1024, 1024]
    }
}

struct RendererInner {
    target_fps: i32,
    background: VideoBackgroundConfig,
}

/// Renderer that stores what it is given.
pub struct FakeRenderer {
    inner: Mutex<RendererInner>,
}

impl Default for FakeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRenderer {
    /// Renderer targeting 60 fps with the background enabled.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RendererInner {
                target_fps: 60,
                background: VideoBackgroundConfig {
                    enabled: true,
                    ..VideoBackgroundConfig::default()
                },
            }),
        }
    }

    /// Last accepted target frame rate.
    pub fn target_fps(&self) -> i32 {
        lock(&self.inner).target_fps
    }
}

impl NativeRenderer for FakeRenderer {
    fn recommended_fps(&self, flags: i32) -> i32 {
        if flags == 0 {
            60
        } else {
            30
        }
    }

    fn video_background_config(&self) -> VideoBackgroundConfig {
        lock(&self.inner).background
    }

    fn set_target_fps(&self, fps: i32) -> bool {
        if fps <= 0 {
            return false;
        }
        lock(&self.inner).target_fps = fps;
        true
    }

    fn set_video_background_config(&self, config: &VideoBackgroundConfig) {
        lock(&self.inner).background = *config;
    }
}
