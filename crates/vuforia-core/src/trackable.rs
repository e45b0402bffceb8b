// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed trackable wrappers.
//!
//! Wrappers hold a shared, non-owning reference to the engine's trackable.
//! The native hierarchy is mirrored with newtypes that `Deref` to their
//! parent, so an [`ImageTarget`] exposes the [`ObjectTarget`] accessors and,
//! through it, the [`TrackableBase`] ones.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use vuforia_port::{TrackableClass, TrackableHandle};

/// Accessors every trackable supports.
#[derive(Clone)]
pub struct TrackableBase {
    handle: Arc<dyn TrackableHandle>,
}

impl TrackableBase {
    pub(crate) fn from_handle(handle: Arc<dyn TrackableHandle>) -> Self {
        Self { handle }
    }

    pub(crate) fn handle(&self) -> &dyn TrackableHandle {
        self.handle.as_ref()
    }

    /// Numeric id.
    pub fn id(&self) -> i32 {
        self.handle.id()
    }

    /// Target name.
    pub fn name(&self) -> String {
        self.handle.name()
    }

    /// Whether extended tracking is running.
    pub fn is_extended_tracking_started(&self) -> bool {
        self.handle.is_extended_tracking_started()
    }

    /// Start extended tracking.
    pub fn start_extended_tracking(&self) -> bool {
        self.handle.start_extended_tracking()
    }

    /// Stop extended tracking.
    pub fn stop_extended_tracking(&self) -> bool {
        self.handle.stop_extended_tracking()
    }
}

impl fmt::Debug for TrackableBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackableBase")
            .field("id", &self.handle.id())
            .finish_non_exhaustive()
    }
}

/// Base of the object-target family.
#[derive(Clone, Debug)]
pub struct ObjectTarget(TrackableBase);

impl ObjectTarget {
    pub(crate) fn from_handle(handle: Arc<dyn TrackableHandle>) -> Self {
        Self(TrackableBase::from_handle(handle))
    }

    /// Unique target id (empty when the engine reports none).
    pub fn unique_target_id(&self) -> String {
        self.0.handle.unique_target_id().unwrap_or_default()
    }

    /// Target extent in scene units.
    pub fn size(&self) -> [f32; 3] {
        self.0.handle.size().unwrap_or_default()
    }
}

impl Deref for ObjectTarget {
    type Target = TrackableBase;

    fn deref(&self) -> &TrackableBase {
        &self.0
    }
}

macro_rules! trackable_leaf {
    ($(#[$doc:meta])* $name:ident : $parent:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name($parent);

        impl $name {
            pub(crate) fn from_handle(handle: Arc<dyn TrackableHandle>) -> Self {
                Self($parent::from_handle(handle))
            }
        }

        impl Deref for $name {
            type Target = $parent;

            fn deref(&self) -> &$parent {
                &self.0
            }
        }
    };
}

trackable_leaf!(
    /// Frame marker.
    Marker: TrackableBase
);
trackable_leaf!(
    /// Recognized word.
    Word: TrackableBase
);
trackable_leaf!(
    /// Planar image target.
    ImageTarget: ObjectTarget
);
trackable_leaf!(
    /// Cylindrical target.
    CylinderTarget: ObjectTarget
);
trackable_leaf!(
    /// Composite of several image targets.
    MultiTarget: ObjectTarget
);

/// A trackable resolved to its most specific known class.
#[derive(Clone, Debug)]
pub enum Trackable {
    /// Frame marker.
    Marker(Marker),
    /// Recognized word.
    Word(Word),
    /// Planar image target.
    ImageTarget(ImageTarget),
    /// Cylindrical target.
    CylinderTarget(CylinderTarget),
    /// Composite of several image targets.
    MultiTarget(MultiTarget),
    /// Object target of a subtype this crate does not know.
    ObjectTarget(ObjectTarget),
    /// Trackable of a family this crate does not know.
    Generic(TrackableBase),
}

impl Trackable {
    /// Class this value was resolved to.
    pub const fn class(&self) -> TrackableClass {
        match self {
            Self::Marker(_) => TrackableClass::Marker,
            Self::Word(_) => TrackableClass::Word,
            Self::ImageTarget(_) => TrackableClass::ImageTarget,
            Self::CylinderTarget(_) => TrackableClass::CylinderTarget,
            Self::MultiTarget(_) => TrackableClass::MultiTarget,
            Self::ObjectTarget(_) => TrackableClass::ObjectTarget,
            Self::Generic(_) => TrackableClass::Trackable,
        }
    }

    /// Object-target view, for any member of that family.
    pub fn as_object_target(&self) -> Option<&ObjectTarget> {
        match self {
            Self::ImageTarget(t) => Some(&t.0),
            Self::CylinderTarget(t) => Some(&t.0),
            Self::MultiTarget(t) => Some(&t.0),
            Self::ObjectTarget(t) => Some(t),
            Self::Marker(_) | Self::Word(_) | Self::Generic(_) => None,
        }
    }
}

impl Deref for Trackable {
    type Target = TrackableBase;

    fn deref(&self) -> &TrackableBase {
        match self {
            Self::Marker(t) => &t.0,
            Self::Word(t) => &t.0,
            Self::ImageTarget(t) => &(t.0).0,
            Self::CylinderTarget(t) => &(t.0).0,
            Self::MultiTarget(t) => &(t.0).0,
            Self::ObjectTarget(t) => &t.0,
            Self::Generic(t) => t,
        }
    }
}
