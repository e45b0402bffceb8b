// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Handle registry: recovers typed wrappers from opaque native handles.
//!
//! Classification walks a single ordered table per hierarchy and picks the
//! first class the handle is an instance of. Tables list leaves before their
//! ancestors, so a handle is never classified into a base category when a more
//! specific class matches. Adding a native subtype is one table row plus its
//! wrapper.
//!
//! Resolution only allocates the wrapper; it never touches native state.

use std::sync::Arc;

use thiserror::Error;
use vuforia_port::{ResultClass, TrackableClass, TrackableHandle, TrackableResultHandle};

use crate::result::{
    CylinderTargetResult, ImageTargetResult, MarkerResult, MultiTargetResult, ObjectTargetResult,
    TrackableResult, TrackableResultBase, WordResult,
};
use crate::trackable::{
    CylinderTarget, ImageTarget, Marker, MultiTarget, ObjectTarget, Trackable, TrackableBase, Word,
};

/// Handle matched none of the known classes, not even the hierarchy root.
///
/// Unreachable with a well-formed SDK; seeing it means the binding and the
/// native SDK disagree about the class hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A trackable handle outside the trackable hierarchy.
    #[error("trackable handle is not an instance of any known trackable class")]
    UnknownTrackable,
    /// A result handle outside the trackable-result hierarchy.
    #[error("trackable result handle is not an instance of any known result class")]
    UnknownTrackableResult,
}

type TrackableCtor = fn(Arc<dyn TrackableHandle>) -> Trackable;
type ResultCtor = for<'s> fn(&'s dyn TrackableResultHandle) -> TrackableResult<'s>;

/// Most-specific-first classification order for trackables.
const TRACKABLE_TABLE: [(TrackableClass, TrackableCtor); 7] = [
    (TrackableClass::Marker, |h| {
        Trackable::Marker(Marker::from_handle(h))
    }),
    (TrackableClass::Word, |h| Trackable::Word(Word::from_handle(h))),
    (TrackableClass::ImageTarget, |h| {
        Trackable::ImageTarget(ImageTarget::from_handle(h))
    }),
    (TrackableClass::CylinderTarget, |h| {
        Trackable::CylinderTarget(CylinderTarget::from_handle(h))
    }),
    (TrackableClass::MultiTarget, |h| {
        Trackable::MultiTarget(MultiTarget::from_handle(h))
    }),
    (TrackableClass::ObjectTarget, |h| {
        Trackable::ObjectTarget(ObjectTarget::from_handle(h))
    }),
    (TrackableClass::Trackable, |h| {
        Trackable::Generic(TrackableBase::from_handle(h))
    }),
];

/// Most-specific-first classification order for results.
const RESULT_TABLE: [(ResultClass, ResultCtor); 7] = [
    (ResultClass::MarkerResult, |h| {
        TrackableResult::Marker(MarkerResult::from_handle(h))
    }),
    (ResultClass::WordResult, |h| {
        TrackableResult::Word(WordResult::from_handle(h))
    }),
    (ResultClass::ImageTargetResult, |h| {
        TrackableResult::ImageTarget(ImageTargetResult::from_handle(h))
    }),
    (ResultClass::CylinderTargetResult, |h| {
        TrackableResult::CylinderTarget(CylinderTargetResult::from_handle(h))
    }),
    (ResultClass::MultiTargetResult, |h| {
        TrackableResult::MultiTarget(MultiTargetResult::from_handle(h))
    }),
    (ResultClass::ObjectTargetResult, |h| {
        TrackableResult::ObjectTarget(ObjectTargetResult::from_handle(h))
    }),
    (ResultClass::TrackableResult, |h| {
        TrackableResult::Generic(TrackableResultBase::from_handle(h))
    }),
];

/// Wrap a trackable handle in its most specific variant.
pub fn resolve_trackable(handle: Arc<dyn TrackableHandle>) -> Result<Trackable, ResolveError> {
    let ctor = TRACKABLE_TABLE
        .iter()
        .find(|(class, _)| handle.is_instance_of(*class))
        .map(|(_, ctor)| *ctor)
        .ok_or(ResolveError::UnknownTrackable)?;
    Ok(ctor(handle))
}

/// Wrap a result handle in its most specific variant. Does not resolve the
/// observed trackable; that happens when [`TrackableResult::trackable`] is called.
pub fn resolve_trackable_result(
    handle: &dyn TrackableResultHandle,
) -> Result<TrackableResult<'_>, ResolveError> {
    let ctor = RESULT_TABLE
        .iter()
        .find(|(class, _)| handle.is_instance_of(*class))
        .map(|(_, ctor)| *ctor)
        .ok_or(ResolveError::UnknownTrackableResult)?;
    Ok(ctor(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_follow_the_leaves_first_order() {
        let trackables: Vec<_> = TRACKABLE_TABLE.iter().map(|(c, _)| *c).collect();
        assert_eq!(trackables, TrackableClass::ALL);
        let results: Vec<_> = RESULT_TABLE.iter().map(|(c, _)| *c).collect();
        assert_eq!(results, ResultClass::ALL);
    }
}
