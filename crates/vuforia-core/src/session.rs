// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Session lifecycle controller.
//!
//! Sequences initialization, surface configuration, suspend/resume and
//! teardown of the native session, and forwards state updates to a
//! registered callback.
//!
//! # Phases
//!
//! ```text
//! Uninitialized ──init──▶ Initializing ──100──▶ Ready(Resumed) ◀─resume/suspend─▶ Ready(Paused)
//!        ▲                     │                      │
//!        └──── other code ─────┘                      └──────deinit──────▶ Deinitialized
//! ```
//!
//! `deinit` is accepted from every phase and is terminal.
//!
//! # Failure Semantics
//!
//! - Explicit surface configuration outside `Ready`, or a second `init` on the
//!   same session, is a caller sequencing bug. It panics with a typed
//!   [`PreconditionViolation`] payload (matchable via `downcast_ref`).
//! - Host events (suspend, resume, orientation, view load/layout) arrive
//!   whenever the platform sends them. Outside `Ready` they are ignored and
//!   logged at debug level; after `deinit` this is permanent.
//! - License and hint setters return `bool`; `init` returns an
//!   [`InitResult`] for every native outcome.
//!
//! # Concurrency
//!
//! The engine delivers states on its own thread and serializes lifecycle
//! calls against that delivery. Locks here guard single fields and are never
//! held across a native call. Deferred work runs on the tokio runtime the
//! session was built on and holds only a weak reference to the session.
//!
//! Every phase write bumps an epoch. A multi-step transition (init setup,
//! suspend, resume) records the epoch it started from and only commits its
//! final phase if nothing else moved the session in between, so a `deinit`
//! or `suspend` racing with it is never overwritten.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn, Instrument, Span};
use vuforia_config::{ConfigError, ConfigStore, HintSetting, PrefsService, SessionPrefs};
use vuforia_port::{
    DisplayOrientation, Hint, HostEvent, HostEvents, NativeCameraDevice, NativeDevice,
    NativeObjectTracker, NativeRenderer, NativeSession, VideoView,
};

use crate::device::{CameraDevice, Device, Renderer};
use crate::init::InitResult;
use crate::orientation::rotation_for;
use crate::state::State;
use crate::tracker::ObjectTracker;

/// Delay before the second, corrective surface reconfiguration after init.
///
/// Some platforms report view geometry that is still settling right after the
/// surface is created.
pub const SURFACE_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Whether a ready session is tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Running {
    /// Native session paused.
    Paused,
    /// Native session running.
    Resumed,
}

/// Lifecycle phase of a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `init` not yet called, or the last attempt failed.
    Uninitialized,
    /// An init request is in flight.
    Initializing,
    /// Initialized; surface configured and callback registered.
    Ready(Running),
    /// Torn down. Terminal.
    Deinitialized,
}

impl Phase {
    /// True in either `Ready` sub-state.
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Panic payload for lifecycle calls made in the wrong phase.
///
/// These are caller bugs, not runtime conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreconditionViolation {
    /// Operation that was called.
    pub operation: &'static str,
    /// Phase the session was in.
    pub phase: Phase,
}

impl fmt::Display for PreconditionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "session precondition violated: {} called in phase {:?}",
            self.operation, self.phase
        )
    }
}

/// Error building a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No tokio runtime to schedule deferred work on.
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Native collaborators a session drives.
pub struct Collaborators {
    /// Native session singleton.
    pub engine: Arc<dyn NativeSession>,
    /// Native object tracker singleton.
    pub object_tracker: Arc<dyn NativeObjectTracker>,
    /// Camera device singleton.
    pub camera: Arc<dyn NativeCameraDevice>,
    /// Device singleton.
    pub device: Arc<dyn NativeDevice>,
    /// Renderer singleton.
    pub renderer: Arc<dyn NativeRenderer>,
    /// Video view the engine renders into.
    pub view: Arc<dyn VideoView>,
    /// Source of the current interface orientation.
    pub display: Arc<dyn DisplayOrientation>,
}

/// Everything a session needs: collaborators plus the runtime deferred work runs on.
pub struct SessionContext {
    collaborators: Collaborators,
    runtime: Handle,
}

impl SessionContext {
    /// Build a context on an explicit runtime handle.
    pub fn new(collaborators: Collaborators, runtime: Handle) -> Self {
        Self {
            collaborators,
            runtime,
        }
    }

    /// Build a context on the runtime the caller is running in.
    pub fn current(collaborators: Collaborators) -> Result<Self, SessionError> {
        Ok(Self::new(collaborators, Handle::try_current()?))
    }
}

/// Per-setting outcome of [`Session::apply_prefs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefsReport {
    /// License key outcome; `None` when the prefs carried no key.
    pub license_key: Option<bool>,
    /// Hint outcomes in application order.
    pub hints: Vec<HintSetting>,
}

impl PrefsReport {
    /// True when the engine accepted every setting it was given.
    pub fn all_accepted(&self) -> bool {
        self.license_key.unwrap_or(true) && self.hints.iter().all(|h| h.accepted)
    }
}

#[derive(Clone, Copy, Debug)]
struct Lifecycle {
    phase: Phase,
    epoch: u64,
}

impl Lifecycle {
    fn enter(&mut self, phase: Phase) -> u64 {
        self.phase = phase;
        self.epoch += 1;
        self.epoch
    }
}

type UserCallback = Arc<dyn Fn(&State) + Send + Sync>;
type CallbackSlot = Arc<Mutex<Option<UserCallback>>>;

struct Shared {
    engine: Arc<dyn NativeSession>,
    tracker_port: Arc<dyn NativeObjectTracker>,
    camera: Arc<dyn NativeCameraDevice>,
    device: Arc<dyn NativeDevice>,
    renderer: Arc<dyn NativeRenderer>,
    view: Arc<dyn VideoView>,
    display: Arc<dyn DisplayOrientation>,
    runtime: Handle,
    lifecycle: Mutex<Lifecycle>,
    callback: CallbackSlot,
    callback_registered: AtomicBool,
    host_events_bound: AtomicBool,
    object_tracker: Mutex<Option<ObjectTracker>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to the tracking session. Clones share the same session.
#[derive(Clone)]
pub struct Session {
    shared: Arc<Shared>,
}

impl Session {
    /// Create a session in [`Phase::Uninitialized`].
    pub fn new(ctx: SessionContext) -> Self {
        let SessionContext {
            collaborators: c,
            runtime,
        } = ctx;
        Self {
            shared: Arc::new(Shared {
                engine: c.engine,
                tracker_port: c.object_tracker,
                camera: c.camera,
                device: c.device,
                renderer: c.renderer,
                view: c.view,
                display: c.display,
                runtime,
                lifecycle: Mutex::new(Lifecycle {
                    phase: Phase::Uninitialized,
                    epoch: 0,
                }),
                callback: Arc::new(Mutex::new(None)),
                callback_registered: AtomicBool::new(false),
                host_events_bound: AtomicBool::new(false),
                object_tracker: Mutex::new(None),
            }),
        }
    }

    fn from_weak(weak: &Weak<Shared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        lock(&self.shared.lifecycle).phase
    }

    fn is_current(&self, epoch: u64) -> bool {
        lock(&self.shared.lifecycle).epoch == epoch
    }

    /// Commit `phase` only if no other transition happened since `epoch`.
    fn commit(&self, epoch: u64, phase: Phase) -> bool {
        let mut lifecycle = lock(&self.shared.lifecycle);
        if lifecycle.epoch != epoch {
            debug!(current = ?lifecycle.phase, wanted = ?phase, "phase moved on; not committing");
            return false;
        }
        lifecycle.enter(phase);
        true
    }

    fn require_ready(&self, operation: &'static str) {
        let phase = self.phase();
        if !phase.is_ready() {
            std::panic::panic_any(PreconditionViolation { operation, phase });
        }
    }

    // ── Pre-init settings ──────────────────────────────────────────────────

    /// Set the license key. `false` when the engine rejects it.
    pub fn set_license_key(&self, key: &str) -> bool {
        let status = self.shared.engine.set_license_key(key);
        if status != 0 {
            warn!(status, "license key rejected");
        }
        status == 0
    }

    /// Set a hint. `false` when the engine rejects the hint or value.
    pub fn set_hint(&self, hint: Hint, value: i32) -> bool {
        self.set_raw_hint(hint.raw(), value)
    }

    /// Set a hint by native id, for hints newer than [`Hint`].
    pub fn set_raw_hint(&self, hint: u32, value: i32) -> bool {
        let accepted = self.shared.engine.set_hint_value(hint, value);
        if !accepted {
            warn!(hint, value, "hint rejected");
        }
        accepted
    }

    /// Set the world scale factor (ignored by SDK builds without the capability).
    pub fn set_scale_factor(&self, factor: f32) {
        self.shared.engine.set_scale_factor(factor);
    }

    /// Current world scale factor.
    pub fn scale_factor(&self) -> f32 {
        self.shared.engine.scale_factor()
    }

    /// Apply saved preferences: license key, then hints in order, then scale.
    pub fn apply_prefs(&self, prefs: &SessionPrefs) -> PrefsReport {
        let license_key = prefs
            .license_key
            .as_deref()
            .map(|key| self.set_license_key(key));
        let hints = prefs
            .hints
            .iter()
            .map(|&pref| HintSetting {
                pref,
                accepted: self.set_hint(pref.hint, pref.value),
            })
            .collect();
        if let Some(factor) = prefs.scale_factor {
            self.set_scale_factor(factor);
        }
        PrefsReport { license_key, hints }
    }

    /// Load saved preferences from `prefs` and apply them.
    ///
    /// Nothing is applied when loading fails.
    pub fn apply_saved_prefs<S: ConfigStore>(
        &self,
        prefs: &PrefsService<S>,
    ) -> Result<PrefsReport, ConfigError> {
        let saved = prefs.load()?;
        Ok(self.apply_prefs(&saved))
    }

    // ── State delivery ─────────────────────────────────────────────────────

    /// Receive every state update. Replaces any previous callback.
    ///
    /// Runs on the engine's delivery thread. The state is only valid during
    /// the call.
    pub fn set_state_callback<F>(&self, callback: F)
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        *lock(&self.shared.callback) = Some(Arc::new(callback));
    }

    /// Stop forwarding state updates.
    pub fn clear_state_callback(&self) {
        *lock(&self.shared.callback) = None;
    }

    fn register_state_callback(&self) {
        if self.shared.callback_registered.swap(true, Ordering::SeqCst) {
            return;
        }
        let slot = Arc::clone(&self.shared.callback);
        self.shared.engine.register_callback(Box::new(move |handle| {
            let callback = lock(&slot).clone();
            if let Some(callback) = callback {
                callback(&State::new(handle));
            }
        }));
    }

    // ── Lifecycle ──────────────────────────────────────────────────────────

    /// Initialize the native session.
    ///
    /// Resolves exactly once with the native result code. On success the
    /// session notifies surface creation, configures the surface, schedules a
    /// second configuration after [`SURFACE_SETTLE_DELAY`], registers the
    /// state callback and resumes, in that order. Any other code leaves the
    /// session uninitialized so `init` may be retried.
    ///
    /// Completion and setup run on the session's runtime, not in this future.
    /// Dropping the future (a timeout, say) only discards the result: the
    /// session still finishes setting up when the engine reports back.
    ///
    /// # Panics
    /// With [`PreconditionViolation`] unless the session is uninitialized.
    #[instrument(skip(self))]
    pub async fn init(&self) -> InitResult {
        {
            let mut lifecycle = lock(&self.shared.lifecycle);
            let phase = lifecycle.phase;
            if phase != Phase::Uninitialized {
                drop(lifecycle);
                std::panic::panic_any(PreconditionViolation {
                    operation: "init",
                    phase,
                });
            }
            lifecycle.enter(Phase::Initializing);
        }

        let (native_tx, native_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        let session = self.clone();
        drop(self.shared.runtime.spawn(
            async move {
                let result = match native_rx.await {
                    Ok(code) => InitResult::from_code(code),
                    Err(_) => {
                        warn!("native engine dropped the init completion");
                        InitResult::Error
                    }
                };
                info!(code = result.code(), ?result, "native init completed");
                session.finish_init(result);
                let _ = done_tx.send(result);
            }
            .instrument(Span::current()),
        ));

        info!("requesting native init");
        self.shared.engine.init_done(Box::new(move |code| {
            let _ = native_tx.send(code);
        }));
        done_rx.await.unwrap_or_else(|_| {
            warn!("runtime stopped before init completed");
            InitResult::Error
        })
    }

    fn finish_init(&self, result: InitResult) {
        let epoch = {
            let mut lifecycle = lock(&self.shared.lifecycle);
            if lifecycle.phase != Phase::Initializing {
                debug!(phase = ?lifecycle.phase, "session changed phase during init; skipping setup");
                return;
            }
            if !result.is_success() {
                lifecycle.enter(Phase::Uninitialized);
                return;
            }
            lifecycle.enter(Phase::Ready(Running::Paused))
        };

        self.shared.engine.on_surface_created();
        self.reconfigure_if_ready("init");
        self.schedule_settle_reconfiguration();
        if self.phase().is_ready() {
            self.register_state_callback();
        }
        // A suspend or deinit during setup wins over the trailing resume.
        if !self.is_current(epoch) {
            debug!(phase = ?self.phase(), "session moved on during setup; not resuming");
            return;
        }
        self.shared.engine.on_resume();
        self.commit(epoch, Phase::Ready(Running::Resumed));
    }

    /// Tear down the native session and pause it. Terminal; repeated calls are no-ops.
    #[instrument(skip(self))]
    pub fn deinit(&self) {
        let previous = {
            let mut lifecycle = lock(&self.shared.lifecycle);
            let previous = lifecycle.phase;
            if previous != Phase::Deinitialized {
                lifecycle.enter(Phase::Deinitialized);
            }
            previous
        };
        if previous == Phase::Deinitialized {
            debug!("session already deinitialized");
            return;
        }
        info!(?previous, "deinitializing session");
        self.shared.engine.deinit();
        self.shared.engine.on_pause();
        self.clear_state_callback();
    }

    // ── Surface ────────────────────────────────────────────────────────────

    /// Push the view's pixel size and the current rotation to the engine.
    ///
    /// # Panics
    /// With [`PreconditionViolation`] unless the session is ready.
    pub fn configure_surface(&self) {
        self.require_ready("configure_surface");
        self.push_view_surface();
    }

    /// Push an explicit surface size in pixels and the current rotation.
    ///
    /// # Panics
    /// With [`PreconditionViolation`] unless the session is ready.
    pub fn on_surface_changed(&self, width: f32, height: f32) {
        self.require_ready("on_surface_changed");
        self.push_surface(width, height);
    }

    fn push_view_surface(&self) {
        let (width, height) = self.shared.view.frame_size();
        let scale = self.shared.view.content_scale_factor();
        self.push_surface(width * scale, height * scale);
    }

    fn push_surface(&self, width: f32, height: f32) {
        let orientation = self.shared.display.interface_orientation();
        let rotation = rotation_for(orientation);
        debug!(width, height, ?orientation, ?rotation, "surface changed");
        self.shared.engine.on_surface_changed(width, height);
        self.shared.engine.set_rotation(rotation);
    }

    fn reconfigure_if_ready(&self, reason: &'static str) {
        let phase = self.phase();
        if phase.is_ready() {
            debug!(reason, "reconfiguring surface");
            self.push_view_surface();
        } else {
            debug!(reason, ?phase, "session not ready; surface left alone");
        }
    }

    fn schedule_settle_reconfiguration(&self) {
        let weak = Arc::downgrade(&self.shared);
        // Detached: runs to completion even if a newer configuration happened.
        drop(self.shared.runtime.spawn(async move {
            tokio::time::sleep(SURFACE_SETTLE_DELAY).await;
            if let Some(session) = Session::from_weak(&weak) {
                session.reconfigure_if_ready("settle");
            }
        }));
    }

    // ── Host events ────────────────────────────────────────────────────────

    /// Subscribe this session to every [`HostEvent`], once per process.
    ///
    /// Returns `false` (and subscribes nothing) when already bound.
    pub fn bind_host_events(&self, events: &dyn HostEvents) -> bool {
        if self.shared.host_events_bound.swap(true, Ordering::SeqCst) {
            debug!("host events already bound");
            return false;
        }
        for event in HostEvent::ALL {
            let weak = Arc::downgrade(&self.shared);
            events.subscribe(
                event,
                Box::new(move || {
                    if let Some(session) = Session::from_weak(&weak) {
                        session.handle_host_event(event);
                    }
                }),
            );
        }
        true
    }

    /// Dispatch one host event to its handler.
    pub fn handle_host_event(&self, event: HostEvent) {
        match event {
            HostEvent::SurfaceLoaded => self.on_surface_loaded(),
            HostEvent::SurfaceLayout => self.on_surface_layout(),
            HostEvent::Suspend => self.on_suspend(),
            HostEvent::Resume => self.on_resume(),
            HostEvent::OrientationChanged => self.on_orientation_changed(),
        }
    }

    /// Epoch of the current phase when ready, `None` (logged) otherwise.
    fn ready_for(&self, event: HostEvent) -> Option<u64> {
        let lifecycle = *lock(&self.shared.lifecycle);
        if lifecycle.phase.is_ready() {
            Some(lifecycle.epoch)
        } else {
            debug!(?event, phase = ?lifecycle.phase, "host event ignored; session not ready");
            None
        }
    }

    /// The video view was attached: tell the engine its surface exists.
    pub fn on_surface_loaded(&self) {
        if self.ready_for(HostEvent::SurfaceLoaded).is_some() {
            self.shared.engine.on_surface_created();
        }
    }

    /// The video view was laid out: reconfigure the surface.
    pub fn on_surface_layout(&self) {
        if self.ready_for(HostEvent::SurfaceLayout).is_some() {
            self.reconfigure_if_ready("layout");
        }
    }

    /// Pause and release GL resources before returning.
    ///
    /// Resources freed after the suspend handler returns may be reclaimed by
    /// the OS mid-release, so everything here is synchronous. GL resources are
    /// released even if the session is torn down halfway through.
    pub fn on_suspend(&self) {
        let Some(epoch) = self.ready_for(HostEvent::Suspend) else {
            return;
        };
        info!("pausing session");
        self.shared.engine.on_pause();
        self.shared.view.finish_gl_commands();
        self.shared.view.free_gl_resources();
        self.commit(epoch, Phase::Ready(Running::Paused));
    }

    /// Resume, recreate the surface, and reconfigure it.
    ///
    /// Stops early if another transition lands while the engine is resuming.
    pub fn on_resume(&self) {
        let Some(epoch) = self.ready_for(HostEvent::Resume) else {
            return;
        };
        info!("resuming session");
        self.shared.engine.on_resume();
        if !self.is_current(epoch) {
            return;
        }
        self.shared.engine.on_surface_created();
        if !self.is_current(epoch) {
            return;
        }
        self.push_view_surface();
        self.commit(epoch, Phase::Ready(Running::Resumed));
    }

    /// Reconfigure the surface on the next scheduler turn.
    ///
    /// The platform orientation query can still report the old value while
    /// the change notification is being delivered.
    pub fn on_orientation_changed(&self) {
        if self.ready_for(HostEvent::OrientationChanged).is_none() {
            return;
        }
        let weak = Arc::downgrade(&self.shared);
        drop(self.shared.runtime.spawn(async move {
            if let Some(session) = Session::from_weak(&weak) {
                session.reconfigure_if_ready("orientation");
            }
        }));
    }

    // ── Collaborator facades ───────────────────────────────────────────────

    /// Create the object tracker. `false` when the engine refuses.
    pub fn init_object_tracker(&self) -> bool {
        if !self.shared.tracker_port.init_tracker() {
            return false;
        }
        *lock(&self.shared.object_tracker) =
            Some(ObjectTracker::new(Arc::clone(&self.shared.tracker_port)));
        true
    }

    /// The object tracker, if initialized.
    pub fn object_tracker(&self) -> Option<ObjectTracker> {
        lock(&self.shared.object_tracker).clone()
    }

    /// Destroy the object tracker. `false` when the engine refuses; the tracker is then kept.
    pub fn deinit_object_tracker(&self) -> bool {
        if !self.shared.tracker_port.deinit_tracker() {
            return false;
        }
        *lock(&self.shared.object_tracker) = None;
        true
    }

    /// Camera device facade.
    pub fn camera_device(&self) -> CameraDevice {
        CameraDevice::new(Arc::clone(&self.shared.camera))
    }

    /// Device facade.
    pub fn device(&self) -> Device {
        Device::new(Arc::clone(&self.shared.device))
    }

    /// Renderer facade.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(Arc::clone(&self.shared.renderer))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vuforia_config::HintPref;

    #[test]
    fn violation_message_names_operation_and_phase() {
        let v = PreconditionViolation {
            operation: "configure_surface",
            phase: Phase::Deinitialized,
        };
        assert_eq!(
            v.to_string(),
            "session precondition violated: configure_surface called in phase Deinitialized"
        );
    }

    #[test]
    fn report_without_license_key_only_counts_hints() {
        let pref = HintPref {
            hint: Hint::MaxSimultaneousObjectTargets,
            value: 2,
        };
        let mut report = PrefsReport {
            license_key: None,
            hints: vec![HintSetting {
                pref,
                accepted: true,
            }],
        };
        assert!(report.all_accepted());
        report.license_key = Some(false);
        assert!(!report.all_accepted());
    }

    #[test]
    fn only_ready_phases_are_ready() {
        assert!(Phase::Ready(Running::Paused).is_ready());
        assert!(Phase::Ready(Running::Resumed).is_ready());
        assert!(!Phase::Initializing.is_ready());
        assert!(!Phase::Deinitialized.is_ready());
    }
}
