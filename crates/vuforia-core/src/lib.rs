// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vuforia session core.
//!
//! Drives the native tracking session through its lifecycle and turns the
//! opaque handles it hands back into typed trackables, results and state
//! snapshots.
//!
//! # Modules
//!
//! - [`session`] - Lifecycle controller: init, surface configuration, host events, deinit
//! - [`resolve`] - Most-specific-class recovery for trackable and result handles
//! - [`trackable`] - Typed trackable hierarchy
//! - [`result`] - Typed trackable-result hierarchy
//! - [`state`] - State snapshots, frames and images
//! - [`tracker`] - Object tracker and data sets
//! - [`device`] - Camera, device, viewer and renderer facades
//! - [`init`] - Native init result codes
//! - [`orientation`] - Interface orientation to engine rotation
//! - [`matrix`] - Native matrix conversion
//!
//! # Example
//!
//! ```ignore
//! let ctx = SessionContext::current(collaborators)?;
//! let session = Session::new(ctx);
//! session.apply_prefs(&prefs);
//! session.set_state_callback(|state| {
//!     for result in state.trackable_results().flatten() {
//!         tracing::trace!(pose = ?result.pose(), "tracked");
//!     }
//! });
//! if session.init().await.is_success() {
//!     session.bind_host_events(&host);
//! }
//! ```
#![forbid(unsafe_code)]

pub mod device;
pub mod init;
pub mod matrix;
pub mod orientation;
pub mod resolve;
pub mod result;
pub mod session;
pub mod state;
pub mod trackable;
pub mod tracker;

pub use device::{CameraDevice, Device, RenderingPrimitives, Renderer, ViewList, ViewerList};
pub use init::InitResult;
pub use matrix::{matrix44, Matrix44};
pub use orientation::rotation_for;
pub use resolve::{resolve_trackable, resolve_trackable_result, ResolveError};
pub use result::{
    CylinderTargetResult, ImageTargetResult, MarkerResult, MultiTargetResult, ObjectTargetResult,
    TrackableResult, TrackableResultBase, TrackingStatus, WordResult,
};
pub use session::{
    Collaborators, Phase, PreconditionViolation, PrefsReport, Running, Session, SessionContext,
    SessionError, SURFACE_SETTLE_DELAY,
};
pub use state::{Frame, Image, PixelFormat, State};
pub use trackable::{
    CylinderTarget, ImageTarget, Marker, MultiTarget, ObjectTarget, Trackable, TrackableBase, Word,
};
pub use tracker::{DataSet, ObjectTracker};
