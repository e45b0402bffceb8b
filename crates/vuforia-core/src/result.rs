// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed trackable-result wrappers.
//!
//! Results borrow from the [`crate::State`] that produced them (`'s`), so
//! they cannot be kept past the snapshot's lifetime. Like the trackable
//! wrappers, every level derefs to its parent and [`TrackableResult`] derefs
//! to [`TrackableResultBase`].

use std::fmt;
use std::ops::Deref;

use tracing::warn;
use vuforia_port::{ResultClass, TrackableResultHandle};

use crate::matrix::{matrix44, Matrix44};
use crate::resolve::{resolve_trackable, ResolveError};
use crate::trackable::Trackable;

/// Native tracking status of a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackingStatus {
    /// Status not known.
    Unknown,
    /// Status not defined for this trackable type.
    Undefined,
    /// Detected this frame.
    Detected,
    /// Tracked this frame.
    Tracked,
    /// Pose extrapolated by extended tracking.
    ExtendedTracked,
    /// Any other native code.
    Other(i32),
}

impl TrackingStatus {
    /// Decode a native status code.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Unknown,
            1 => Self::Undefined,
            2 => Self::Detected,
            3 => Self::Tracked,
            4 => Self::ExtendedTracked,
            other => Self::Other(other),
        }
    }

    /// True when the pose is usable (detected, tracked or extended).
    pub const fn has_pose(self) -> bool {
        matches!(self, Self::Detected | Self::Tracked | Self::ExtendedTracked)
    }
}

/// Accessors every result supports.
#[derive(Clone, Copy)]
pub struct TrackableResultBase<'s> {
    handle: &'s dyn TrackableResultHandle,
}

impl<'s> TrackableResultBase<'s> {
    pub(crate) fn from_handle(handle: &'s dyn TrackableResultHandle) -> Self {
        Self { handle }
    }

    /// Pose as 16 floats in native element order.
    pub fn pose(&self) -> Matrix44 {
        matrix44(&self.handle.pose())
    }

    /// Observation timestamp in seconds.
    pub fn time_stamp(&self) -> f64 {
        self.handle.time_stamp()
    }

    /// Tracking status.
    pub fn status(&self) -> TrackingStatus {
        TrackingStatus::from_raw(self.handle.status())
    }

    /// Resolve the observed trackable. Resolution happens on each call.
    pub fn trackable(&self) -> Result<Trackable, ResolveError> {
        resolve_trackable(self.handle.trackable())
    }
}

impl fmt::Debug for TrackableResultBase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackableResultBase")
            .field("time_stamp", &self.handle.time_stamp())
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// Base of the object-target result family.
#[derive(Clone, Copy, Debug)]
pub struct ObjectTargetResult<'s>(TrackableResultBase<'s>);

impl<'s> ObjectTargetResult<'s> {
    pub(crate) fn from_handle(handle: &'s dyn TrackableResultHandle) -> Self {
        Self(TrackableResultBase::from_handle(handle))
    }
}

impl<'s> Deref for ObjectTargetResult<'s> {
    type Target = TrackableResultBase<'s>;

    fn deref(&self) -> &TrackableResultBase<'s> {
        &self.0
    }
}

macro_rules! result_leaf {
    ($(#[$doc:meta])* $name:ident : $parent:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name<'s>($parent<'s>);

        impl<'s> $name<'s> {
            pub(crate) fn from_handle(handle: &'s dyn TrackableResultHandle) -> Self {
                Self($parent::from_handle(handle))
            }
        }

        impl<'s> Deref for $name<'s> {
            type Target = $parent<'s>;

            fn deref(&self) -> &$parent<'s> {
                &self.0
            }
        }
    };
}

result_leaf!(
    /// Observation of a marker.
    MarkerResult: TrackableResultBase
);
result_leaf!(
    /// Observation of a word.
    WordResult: TrackableResultBase
);
result_leaf!(
    /// Observation of an image target.
    ImageTargetResult: ObjectTargetResult
);
result_leaf!(
    /// Observation of a cylinder target.
    CylinderTargetResult: ObjectTargetResult
);
result_leaf!(
    /// Observation of a multi target.
    MultiTargetResult: ObjectTargetResult
);

/// A result resolved to its most specific known class.
#[derive(Clone, Copy, Debug)]
pub enum TrackableResult<'s> {
    /// Observation of a marker.
    Marker(MarkerResult<'s>),
    /// Observation of a word.
    Word(WordResult<'s>),
    /// Observation of an image target.
    ImageTarget(ImageTargetResult<'s>),
    /// Observation of a cylinder target.
    CylinderTarget(CylinderTargetResult<'s>),
    /// Observation of a multi target.
    MultiTarget(MultiTargetResult<'s>),
    /// Observation of an object target of an unknown subtype.
    ObjectTarget(ObjectTargetResult<'s>),
    /// Observation of a trackable of an unknown family.
    Generic(TrackableResultBase<'s>),
}

impl<'s> TrackableResult<'s> {
    /// Class this value was resolved to.
    pub const fn class(&self) -> ResultClass {
        match self {
            Self::Marker(_) => ResultClass::MarkerResult,
            Self::Word(_) => ResultClass::WordResult,
            Self::ImageTarget(_) => ResultClass::ImageTargetResult,
            Self::CylinderTarget(_) => ResultClass::CylinderTargetResult,
            Self::MultiTarget(_) => ResultClass::MultiTargetResult,
            Self::ObjectTarget(_) => ResultClass::ObjectTargetResult,
            Self::Generic(_) => ResultClass::TrackableResult,
        }
    }

    /// Resolve the observed trackable.
    ///
    /// The trackable is classified independently of the result; a mismatch
    /// between the two hierarchies is logged, not corrected.
    pub fn trackable(&self) -> Result<Trackable, ResolveError> {
        let trackable = Deref::deref(self).trackable()?;
        let expected = self.class().trackable_class();
        if !trackable.class().is_a(expected) {
            warn!(
                result = ?self.class(),
                trackable = ?trackable.class(),
                "result resolved to a trackable of an unrelated class"
            );
        }
        Ok(trackable)
    }

    /// Object-target view, for any member of that family.
    pub fn as_object_target(&self) -> Option<&ObjectTargetResult<'s>> {
        match self {
            Self::ImageTarget(r) => Some(&r.0),
            Self::CylinderTarget(r) => Some(&r.0),
            Self::MultiTarget(r) => Some(&r.0),
            Self::ObjectTarget(r) => Some(r),
            Self::Marker(_) | Self::Word(_) | Self::Generic(_) => None,
        }
    }
}

impl<'s> Deref for TrackableResult<'s> {
    type Target = TrackableResultBase<'s>;

    fn deref(&self) -> &TrackableResultBase<'s> {
        match self {
            Self::Marker(r) => &r.0,
            Self::Word(r) => &r.0,
            Self::ImageTarget(r) => &(r.0).0,
            Self::CylinderTarget(r) => &(r.0).0,
            Self::MultiTarget(r) => &(r.0).0,
            Self::ObjectTarget(r) => &r.0,
            Self::Generic(r) => r,
        }
    }
}
