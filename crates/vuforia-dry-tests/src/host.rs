// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fake video view, display and host event bus.

use std::sync::{Mutex, PoisonError};

use vuforia_port::{
    DisplayOrientation, HostEvent, HostEventHandler, HostEvents, InterfaceOrientation, VideoView,
};

use crate::trace::{Call, Trace};

/// Video view with a settable size and scale. GL calls land in the trace.
pub struct FakeVideoView {
    trace: Trace,
    geometry: Mutex<((f32, f32), f32)>,
}

impl FakeVideoView {
    /// View of `width` x `height` points at `scale` pixels per point.
    pub fn new(trace: Trace, width: f32, height: f32, scale: f32) -> Self {
        Self {
            trace,
            geometry: Mutex::new(((width, height), scale)),
        }
    }

    /// Change the reported bounds.
    pub fn resize(&self, width: f32, height: f32) {
        self.geometry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .0 = (width, height);
    }
}

impl VideoView for FakeVideoView {
    fn frame_size(&self) -> (f32, f32) {
        self.geometry.lock().unwrap_or_else(PoisonError::into_inner).0
    }

    fn content_scale_factor(&self) -> f32 {
        self.geometry.lock().unwrap_or_else(PoisonError::into_inner).1
    }

    fn finish_gl_commands(&self) {
        self.trace.record(Call::FinishGlCommands);
    }

    fn free_gl_resources(&self) {
        self.trace.record(Call::FreeGlResources);
    }
}

/// Display whose orientation tests can flip.
pub struct FakeDisplay {
    orientation: Mutex<InterfaceOrientation>,
}

impl FakeDisplay {
    /// Display reporting `orientation`.
    pub fn new(orientation: InterfaceOrientation) -> Self {
        Self {
            orientation: Mutex::new(orientation),
        }
    }

    /// Change the reported orientation.
    pub fn set_orientation(&self, orientation: InterfaceOrientation) {
        *self
            .orientation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = orientation;
    }
}

impl DisplayOrientation for FakeDisplay {
    fn interface_orientation(&self) -> InterfaceOrientation {
        *self
            .orientation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Host event bus that fires subscribers on demand.
#[derive(Default)]
pub struct FakeHostEvents {
    handlers: Mutex<Vec<(HostEvent, HostEventHandler)>>,
}

impl FakeHostEvents {
    /// Empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every handler subscribed to `event`, in subscription order.
    pub fn fire(&self, event: HostEvent) {
        let handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, handler) in handlers.iter().filter(|(e, _)| *e == event) {
            handler();
        }
    }

    /// Number of handlers subscribed to `event`.
    pub fn subscribers(&self, event: HostEvent) -> usize {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(e, _)| *e == event)
            .count()
    }
}

impl HostEvents for FakeHostEvents {
    fn subscribe(&self, event: HostEvent, handler: HostEventHandler) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((event, handler));
    }
}
