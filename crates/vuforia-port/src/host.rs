// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Host-side collaborators: the video view, the display, and application
//! lifecycle notifications.

/// Native view the engine renders video into.
pub trait VideoView: Send + Sync {
    /// View bounds in points (width, height).
    fn frame_size(&self) -> (f32, f32);
    /// Points-to-pixels factor.
    fn content_scale_factor(&self) -> f32;
    /// Block until queued GL commands have executed.
    fn finish_gl_commands(&self);
    /// Release GL resources held by the view.
    fn free_gl_resources(&self);
}

/// Interface orientation as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InterfaceOrientation {
    /// Upright portrait.
    Portrait,
    /// Portrait, upside down.
    PortraitUpsideDown,
    /// Landscape, home button on the left.
    LandscapeLeft,
    /// Landscape, home button on the right.
    LandscapeRight,
    /// Any value the platform adds later, or `Unknown` (0).
    Unknown(i64),
}

impl InterfaceOrientation {
    /// Decode the platform's raw orientation value.
    pub const fn from_raw(raw: i64) -> Self {
        match raw {
            1 => Self::Portrait,
            2 => Self::PortraitUpsideDown,
            3 => Self::LandscapeRight,
            4 => Self::LandscapeLeft,
            other => Self::Unknown(other),
        }
    }
}

/// Source of the current interface orientation.
pub trait DisplayOrientation: Send + Sync {
    /// Orientation right now. May lag a just-fired orientation change.
    fn interface_orientation(&self) -> InterfaceOrientation;
}

/// Host notifications the session reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// The video view was attached.
    SurfaceLoaded,
    /// The video view was laid out.
    SurfaceLayout,
    /// The application is about to be suspended.
    Suspend,
    /// The application returned to the foreground.
    Resume,
    /// The device orientation changed.
    OrientationChanged,
}

impl HostEvent {
    /// Every event kind.
    pub const ALL: [Self; 5] = [
        Self::SurfaceLoaded,
        Self::SurfaceLayout,
        Self::Suspend,
        Self::Resume,
        Self::OrientationChanged,
    ];
}

/// Handler invoked on the host's thread when an event fires.
pub type HostEventHandler = Box<dyn Fn() + Send + Sync>;

/// Subscription surface of the host application.
pub trait HostEvents {
    /// Subscribe `handler` to `event` for the lifetime of the process.
    fn subscribe(&self, event: HostEvent, handler: HostEventHandler);
}
