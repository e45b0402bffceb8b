// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared call log for ordering assertions across fakes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vuforia_port::Rotation;

/// One observable call into a fake engine or view.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    /// `NativeSession::set_license_key`.
    SetLicenseKey(String),
    /// `NativeSession::set_hint_value`.
    SetHint {
        /// Raw hint id.
        hint: u32,
        /// Requested value.
        value: i32,
    },
    /// `NativeSession::set_scale_factor`.
    SetScaleFactor(f32),
    /// `NativeSession::init_done`.
    InitRequested,
    /// `NativeSession::deinit`.
    Deinit,
    /// `NativeSession::on_pause`.
    Pause,
    /// `NativeSession::on_resume`.
    Resume,
    /// `NativeSession::on_surface_created`.
    SurfaceCreated,
    /// `NativeSession::on_surface_changed`.
    SurfaceChanged {
        /// Width in pixels.
        width: f32,
        /// Height in pixels.
        height: f32,
    },
    /// `NativeSession::set_rotation`.
    SetRotation(Rotation),
    /// `NativeSession::register_callback`.
    RegisterCallback,
    /// `VideoView::finish_gl_commands`.
    FinishGlCommands,
    /// `VideoView::free_gl_resources`.
    FreeGlResources,
}

impl Call {
    /// True for `SurfaceChanged` of any size.
    pub const fn is_surface_changed(&self) -> bool {
        matches!(self, Self::SurfaceChanged { .. })
    }
}

type Hook = Box<dyn FnOnce() + Send>;

/// Append-only, cloneable call log. Clones share the same log.
///
/// A one-shot action can be armed on a call with [`Trace::on_next`] to
/// interleave a second caller at an exact point of a sequence.
#[derive(Clone, Default)]
pub struct Trace {
    calls: Arc<Mutex<Vec<Call>>>,
    hooks: Arc<Mutex<Vec<(Call, Hook)>>>,
}

impl Trace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Call>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a call, then run the action armed on it, if any.
    pub fn record(&self, call: Call) {
        self.lock().push(call.clone());
        let hook = {
            let mut hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
            hooks
                .iter()
                .position(|(armed, _)| *armed == call)
                .map(|i| hooks.remove(i).1)
        };
        if let Some(action) = hook {
            action();
        }
    }

    /// Run `action` once, right after `call` is next recorded.
    ///
    /// The action runs outside the trace's locks and may call back into the
    /// fakes (and so into this trace).
    pub fn on_next(&self, call: Call, action: impl FnOnce() + Send + 'static) {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((call, Box::new(action)));
    }

    /// Snapshot of every call so far.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().clone()
    }

    /// Remove and return every call so far.
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.lock().iter().filter(|c| pred(c)).count()
    }

    /// Number of `SurfaceChanged` calls.
    pub fn surface_changes(&self) -> usize {
        self.count(Call::is_surface_changed)
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl std::fmt::Debug for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.lock().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_log() {
        let trace = Trace::new();
        let other = trace.clone();
        other.record(Call::Pause);
        trace.record(Call::Resume);
        assert_eq!(trace.calls(), vec![Call::Pause, Call::Resume]);
    }

    #[test]
    fn take_drains() {
        let trace = Trace::new();
        trace.record(Call::SurfaceChanged {
            width: 1.0,
            height: 2.0,
        });
        assert_eq!(trace.surface_changes(), 1);
        assert_eq!(trace.take().len(), 1);
        assert!(trace.is_empty());
    }

    #[test]
    fn armed_action_fires_once_after_its_call() {
        let trace = Trace::new();
        let inner = trace.clone();
        trace.on_next(Call::Pause, move || inner.record(Call::Deinit));

        trace.record(Call::Resume);
        trace.record(Call::Pause);
        trace.record(Call::Pause);
        assert_eq!(
            trace.calls(),
            vec![Call::Resume, Call::Pause, Call::Deinit, Call::Pause]
        );
    }
}
