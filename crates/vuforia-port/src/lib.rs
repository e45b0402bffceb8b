// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port contract for the Vuforia session core.
//!
//! This crate defines everything the core consumes from the outside world:
//! the native tracking engine, the video view and display, the host
//! application's lifecycle events, and the opaque handles the engine hands
//! back for trackables, results, states and frames. It contains NO session
//! logic; that lives in `vuforia-core`.
//!
//! # Design Principles
//!
//! - **Natives are opaque**: Handles answer hierarchy queries and forward
//!   accessors. Classification happens in the core, once, at the boundary.
//! - **Collaborators are dumb**: Camera, device and renderer ports forward to
//!   native singletons and return plain data shapes.
//! - **Borrowed snapshots**: Results, frames and images are borrowed from the
//!   state handle that produced them and cannot outlive it.

mod class;
mod device;
mod engine;
mod handle;
mod host;
mod matrix;
mod tracker;

pub use class::{ResultClass, TrackableClass};
pub use device::{
    CameraCalibration, CameraDirection, CoordinateSystem, DeviceMode, FocusMode, MeshData,
    NativeCameraDevice, NativeDevice, NativeRenderer, RenderingPrimitivesHandle,
    VideoBackgroundConfig, VideoMode, ViewId, ViewerParameters,
};
pub use engine::{Hint, InitCompletion, NativeSession, Rotation, StateCallback};
pub use handle::{FrameHandle, ImageHandle, StateHandle, TrackableHandle, TrackableResultHandle};
pub use host::{
    DisplayOrientation, HostEvent, HostEventHandler, HostEvents, InterfaceOrientation, VideoView,
};
pub use matrix::NativeMatrix44;
pub use tracker::{DataSetHandle, NativeObjectTracker, StorageType};
