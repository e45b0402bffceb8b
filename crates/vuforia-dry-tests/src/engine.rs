// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scriptable fake of the native tracking engine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vuforia_port::{InitCompletion, NativeSession, Rotation, StateCallback, StateHandle};

use crate::trace::{Call, Trace};

type SharedCallback = Arc<dyn Fn(Box<dyn StateHandle>) + Send + Sync>;

/// How the fake answers an init request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitMode {
    /// Invoke the completion immediately with this code.
    Immediate(i32),
    /// Hold the completion until [`FakeEngine::complete_init`] or
    /// [`FakeEngine::drop_init`].
    Manual,
}

struct Inner {
    init_mode: InitMode,
    pending: Option<InitCompletion>,
    license_status: i32,
    rejected_hints: Vec<u32>,
    scale_factor: f32,
    callback: Option<SharedCallback>,
}

/// In-memory [`NativeSession`] that records every call into a [`Trace`].
///
/// # Example
///
/// ```
/// use vuforia_dry_tests::{Call, FakeEngine, Trace};
/// use vuforia_port::NativeSession;
///
/// let trace = Trace::new();
/// let engine = FakeEngine::new(trace.clone());
/// engine.on_pause();
/// assert_eq!(trace.calls(), vec![Call::Pause]);
/// ```
pub struct FakeEngine {
    trace: Trace,
    inner: Mutex<Inner>,
}

impl FakeEngine {
    /// Engine that accepts every setting and completes init with success.
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            inner: Mutex::new(Inner {
                init_mode: InitMode::Immediate(100),
                pending: None,
                license_status: 0,
                rejected_hints: Vec::new(),
                scale_factor: 1.0,
                callback: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Choose how the next init requests are answered.
    pub fn set_init_mode(&self, mode: InitMode) {
        self.lock().init_mode = mode;
    }

    /// Status code `set_license_key` returns (0 accepts).
    pub fn set_license_status(&self, status: i32) {
        self.lock().license_status = status;
    }

    /// Make `set_hint_value` reject this raw hint id.
    pub fn reject_hint(&self, hint: u32) {
        self.lock().rejected_hints.push(hint);
    }

    /// True while an init completion is being held.
    pub fn has_pending_init(&self) -> bool {
        self.lock().pending.is_some()
    }

    /// Invoke the held completion with `code`. `false` if none is pending.
    pub fn complete_init(&self, code: i32) -> bool {
        let pending = self.lock().pending.take();
        match pending {
            Some(done) => {
                done(code);
                true
            }
            None => false,
        }
    }

    /// Drop the held completion without invoking it.
    pub fn drop_init(&self) -> bool {
        self.lock().pending.take().is_some()
    }

    /// True once a state callback has been registered.
    pub fn has_callback(&self) -> bool {
        self.lock().callback.is_some()
    }

    /// Deliver one state through the registered callback. `false` if none.
    pub fn deliver(&self, state: Box<dyn StateHandle>) -> bool {
        let callback = self.lock().callback.clone();
        match callback {
            Some(callback) => {
                callback(state);
                true
            }
            None => false,
        }
    }
}

impl NativeSession for FakeEngine {
    fn set_license_key(&self, key: &str) -> i32 {
        self.trace.record(Call::SetLicenseKey(key.to_owned()));
        self.lock().license_status
    }

    fn set_hint_value(&self, hint: u32, value: i32) -> bool {
        self.trace.record(Call::SetHint { hint, value });
        !self.lock().rejected_hints.contains(&hint)
    }

    fn init_done(&self, done: InitCompletion) {
        self.trace.record(Call::InitRequested);
        let mode = self.lock().init_mode;
        match mode {
            InitMode::Immediate(code) => done(code),
            InitMode::Manual => self.lock().pending = Some(done),
        }
    }

    fn deinit(&self) {
        self.trace.record(Call::Deinit);
    }

    fn on_pause(&self) {
        self.trace.record(Call::Pause);
    }

    fn on_resume(&self) {
        self.trace.record(Call::Resume);
    }

    fn on_surface_created(&self) {
        self.trace.record(Call::SurfaceCreated);
    }

    fn on_surface_changed(&self, width: f32, height: f32) {
        self.trace.record(Call::SurfaceChanged { width, height });
    }

    fn set_rotation(&self, rotation: Rotation) {
        self.trace.record(Call::SetRotation(rotation));
    }

    fn register_callback(&self, callback: StateCallback) {
        self.trace.record(Call::RegisterCallback);
        self.lock().callback = Some(Arc::from(callback));
    }

    fn set_scale_factor(&self, factor: f32) {
        self.trace.record(Call::SetScaleFactor(factor));
        self.lock().scale_factor = factor;
    }

    fn scale_factor(&self) -> f32 {
        self.lock().scale_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn manual_init_holds_completion_until_completed() {
        let engine = FakeEngine::new(Trace::new());
        engine.set_init_mode(InitMode::Manual);
        let seen = Arc::new(AtomicI32::new(0));
        let sink = Arc::clone(&seen);
        engine.init_done(Box::new(move |code| sink.store(code, Ordering::SeqCst)));
        assert!(engine.has_pending_init());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
        assert!(engine.complete_init(-5));
        assert_eq!(seen.load(Ordering::SeqCst), -5);
        assert!(!engine.complete_init(100));
    }

    #[test]
    fn rejected_hints_return_false() {
        let engine = FakeEngine::new(Trace::new());
        engine.reject_hint(2);
        assert!(engine.set_hint_value(0, 4));
        assert!(!engine.set_hint_value(2, 1));
    }
}
