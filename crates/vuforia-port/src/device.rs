// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera, device and renderer ports plus the plain data shapes they return.

use serde::{Deserialize, Serialize};

use crate::matrix::NativeMatrix44;

/// Physical camera selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum CameraDirection {
    /// Platform default camera.
    Default = 0,
    /// Rear-facing camera.
    Back = 1,
    /// Front-facing camera.
    Front = 2,
}

/// Camera focus behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum FocusMode {
    /// Platform default focus.
    Normal = 0,
    /// Single autofocus run.
    TriggerAuto = 1,
    /// Continuous autofocus.
    ContinuousAuto = 2,
    /// Focus at infinity.
    Infinity = 3,
    /// Close-up focus.
    Macro = 4,
}

/// One camera video mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMode {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Frames per second.
    pub framerate: f32,
}

/// Intrinsic camera calibration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraCalibration {
    /// Radial/tangential distortion coefficients.
    pub distortion: [f32; 4],
    /// Horizontal and vertical field of view in radians.
    pub field_of_view_rads: [f32; 2],
    /// Focal length in pixels.
    pub focal_length: [f32; 2],
    /// Principal point in pixels.
    pub principal_point: [f32; 2],
    /// Calibrated image size in pixels.
    pub size: [f32; 2],
}

/// Camera device singleton.
pub trait NativeCameraDevice: Send + Sync {
    /// Open the camera facing `direction`.
    fn init_camera(&self, direction: CameraDirection) -> bool;
    /// Close the camera.
    fn deinit_camera(&self) -> bool;
    /// Current calibration.
    fn camera_calibration(&self) -> CameraCalibration;
    /// Direction of the open camera.
    fn camera_direction(&self) -> CameraDirection;
    /// Number of supported video modes.
    fn num_video_modes(&self) -> usize;
    /// Video mode at `index`; negative indices are native presets.
    fn video_mode(&self, index: i32) -> VideoMode;
    /// Select the video mode at `index`.
    fn select_video_mode(&self, index: i32) -> bool;
    /// Toggle the torch.
    fn set_flash_torch_mode(&self, on: bool) -> bool;
    /// Set the focus mode.
    fn set_focus_mode(&self, mode: FocusMode) -> bool;
    /// Start capture.
    fn start(&self) -> bool;
    /// Stop capture.
    fn stop(&self) -> bool;
}

/// Device presentation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum DeviceMode {
    /// Augmented reality video see-through.
    Ar = 0,
    /// Virtual reality.
    Vr = 1,
}

/// Render views a device configuration may expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ViewId {
    /// Left eye of a stereo viewer.
    LeftEye = 0,
    /// Right eye of a stereo viewer.
    RightEye = 1,
    /// Single mono view.
    Singular = 2,
    /// Distortion post-process pass.
    Postprocess = 3,
}

/// Coordinate system a projection matrix is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum CoordinateSystem {
    /// Camera coordinates.
    Camera = 1,
    /// World coordinates.
    World = 2,
}

/// Head-mounted viewer description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerParameters {
    /// Model name.
    pub name: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Parameter format version.
    pub version: f32,
    /// Whether the viewer has a magnet trigger.
    pub contains_magnet: bool,
    /// Native button type code.
    pub button_type: i32,
    /// Lens distortion coefficients.
    pub distortion_coefficients: Vec<f32>,
    /// Field of view (left, right, bottom, top) in degrees.
    pub field_of_view: [f32; 4],
    /// Distance between lens centers in meters.
    pub inter_lens_distance: f32,
    /// Lens center to tray distance in meters.
    pub lens_centre_to_tray_distance: f32,
    /// Screen to lens distance in meters.
    pub screen_to_lens_distance: f32,
    /// Native tray alignment code.
    pub tray_alignment: i32,
}

/// Plain mesh buffers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// XYZ positions, three floats per vertex.
    pub positions: Vec<f32>,
    /// XYZ normals, three floats per vertex (empty when absent).
    pub normals: Vec<f32>,
    /// UV coordinates, two floats per vertex (empty when absent).
    pub uvs: Vec<f32>,
    /// Triangle indices, three per triangle.
    pub triangles: Vec<u16>,
}

/// Native rendering primitives for the current device configuration.
pub trait RenderingPrimitivesHandle: Send + Sync {
    /// Views to render, in native order.
    fn rendering_views(&self) -> Vec<ViewId>;
    /// Viewport in pixels (x, y, width, height).
    fn viewport(&self, view: ViewId) -> [i32; 4];
    /// Viewport normalized to the surface.
    fn normalized_viewport(&self, view: ViewId) -> [f32; 4];
    /// Projection matrix for `view`.
    fn projection_matrix(&self, view: ViewId, cs: CoordinateSystem) -> NativeMatrix44;
    /// Projection matrix for the video background of `view`.
    fn video_background_projection_matrix(
        &self,
        view: ViewId,
        cs: CoordinateSystem,
    ) -> NativeMatrix44;
    /// Eye display adjustment for `view`.
    fn eye_display_adjustment_matrix(&self, view: ViewId) -> NativeMatrix44;
    /// Video background mesh for `view`.
    fn video_background_mesh(&self, view: ViewId) -> Option<MeshData>;
    /// Distortion texture mesh for `view`.
    fn distortion_texture_mesh(&self, view: ViewId) -> Option<MeshData>;
    /// Distortion texture size in pixels.
    fn distortion_texture_size(&self, view: ViewId) -> [f32; 2];
    /// Distortion texture viewport in pixels.
    fn distortion_texture_viewport(&self, view: ViewId) -> [i32; 4];
}

/// Device singleton.
pub trait NativeDevice: Send + Sync {
    /// Switch presentation mode.
    fn set_mode(&self, mode: DeviceMode) -> bool;
    /// Current presentation mode.
    fn mode(&self) -> DeviceMode;
    /// Enable or disable the head-mounted viewer.
    fn set_viewer_active(&self, active: bool);
    /// Whether a viewer is active.
    fn is_viewer_active(&self) -> bool;
    /// Known viewers after the current SDK filter.
    fn viewer_list(&self) -> Vec<ViewerParameters>;
    /// Restrict the viewer list to an SDK filter string.
    fn set_viewer_sdk_filter(&self, filter: &str);
    /// Select `viewer`.
    fn select_viewer(&self, viewer: &ViewerParameters) -> bool;
    /// Currently selected viewer.
    fn selected_viewer(&self) -> ViewerParameters;
    /// Rendering primitives for the current configuration.
    fn rendering_primitives(&self) -> Box<dyn RenderingPrimitivesHandle>;
}

/// Video background placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoBackgroundConfig {
    /// Whether the background is drawn.
    pub enabled: bool,
    /// Offset from the surface center in pixels.
    pub position: [i32; 2],
    /// Size in pixels.
    pub size: [i32; 2],
    /// Native reflection code.
    pub reflection: i32,
}

/// Renderer singleton.
pub trait NativeRenderer: Send + Sync {
    /// Recommended frame rate for the given native flags.
    fn recommended_fps(&self, flags: i32) -> i32;
    /// Current video background configuration.
    fn video_background_config(&self) -> VideoBackgroundConfig;
    /// Request a target frame rate.
    fn set_target_fps(&self, fps: i32) -> bool;
    /// Apply a video background configuration.
    fn set_video_background_config(&self, config: &VideoBackgroundConfig);
}
