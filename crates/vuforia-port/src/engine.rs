// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Native tracking engine port.

use serde::{Deserialize, Serialize};

use crate::handle::StateHandle;

/// One-shot completion the engine invokes with its init result code.
pub type InitCompletion = Box<dyn FnOnce(i32) + Send>;

/// Per-update callback the engine invokes on its own delivery thread.
///
/// The state handle is only valid for the duration of the call.
pub type StateCallback = Box<dyn Fn(Box<dyn StateHandle>) + Send + Sync>;

/// Native rotation values understood by `setRotation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Rotation {
    /// Device held with the home button on the right.
    Ios0 = 1024,
    /// Upright portrait.
    Ios90 = 128,
    /// Device held with the home button on the left.
    Ios180 = 256,
    /// Portrait, upside down.
    Ios270 = 512,
}

impl Rotation {
    /// Raw value passed to the engine.
    pub const fn raw(self) -> i32 {
        self as i32
    }
}

/// Session hints accepted by `setHintValue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum Hint {
    /// Upper bound on image targets tracked at once.
    MaxSimultaneousImageTargets = 0,
    /// Upper bound on object targets tracked at once.
    MaxSimultaneousObjectTargets = 1,
    /// Defer loading object data sets until first use.
    DelayedLoadingObjectDatasets = 2,
}

impl Hint {
    /// Raw value passed to the engine.
    pub const fn raw(self) -> u32 {
        self as u32
    }
}

/// Native session singleton.
///
/// Every call except [`NativeSession::init_done`] is fire-and-forget. The
/// engine serializes these calls against its own state-delivery thread.
pub trait NativeSession: Send + Sync {
    /// Set the license key; returns the native status (`0` on success).
    fn set_license_key(&self, key: &str) -> i32;
    /// Set a hint value; `false` when the hint or value is rejected.
    fn set_hint_value(&self, hint: u32, value: i32) -> bool;
    /// Begin asynchronous initialization; `done` is invoked once with the result code.
    fn init_done(&self, done: InitCompletion);
    /// Tear down the native session.
    fn deinit(&self);
    /// Pause tracking and the camera.
    fn on_pause(&self);
    /// Resume tracking and the camera.
    fn on_resume(&self);
    /// Notify that the rendering surface exists.
    fn on_surface_created(&self);
    /// Notify the rendering surface size in pixels.
    fn on_surface_changed(&self, width: f32, height: f32);
    /// Set the rendering rotation.
    fn set_rotation(&self, rotation: Rotation);
    /// Register the state-update callback.
    fn register_callback(&self, callback: StateCallback);
    /// Set the world scale factor. Builds without this capability ignore it.
    fn set_scale_factor(&self, _factor: f32) {}
    /// Current world scale factor.
    fn scale_factor(&self) -> f32;
}
