// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Native class hierarchy tags for trackables and trackable results.
//!
//! The native SDK exposes an inheritance tree:
//!
//! ```text
//! Trackable
//! ├── Marker
//! ├── Word
//! └── ObjectTarget
//!     ├── ImageTarget
//!     ├── CylinderTarget
//!     └── MultiTarget
//! ```
//!
//! and a parallel tree rooted at `TrackableResult`. Handles answer
//! `is_instance_of` queries against these tags the way a native `isKindOfClass`
//! would: true for the concrete class and every ancestor.

/// Classes in the native trackable hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackableClass {
    /// Root of the hierarchy.
    Trackable,
    /// Frame marker.
    Marker,
    /// Recognized word.
    Word,
    /// Base of the object-target family.
    ObjectTarget,
    /// Planar image target.
    ImageTarget,
    /// Cylindrical target.
    CylinderTarget,
    /// Composite of several image targets.
    MultiTarget,
}

impl TrackableClass {
    /// Every class, leaves first.
    pub const ALL: [Self; 7] = [
        Self::Marker,
        Self::Word,
        Self::ImageTarget,
        Self::CylinderTarget,
        Self::MultiTarget,
        Self::ObjectTarget,
        Self::Trackable,
    ];

    /// Direct superclass, `None` for the root.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Trackable => None,
            Self::Marker | Self::Word | Self::ObjectTarget => Some(Self::Trackable),
            Self::ImageTarget | Self::CylinderTarget | Self::MultiTarget => {
                Some(Self::ObjectTarget)
            }
        }
    }

    /// True when `self` is `ancestor` or descends from it.
    pub fn is_a(self, ancestor: Self) -> bool {
        let mut cur = Some(self);
        while let Some(class) = cur {
            if class == ancestor {
                return true;
            }
            cur = class.parent();
        }
        false
    }

    /// Result class that observations of this trackable class carry.
    pub const fn result_class(self) -> ResultClass {
        match self {
            Self::Trackable => ResultClass::TrackableResult,
            Self::Marker => ResultClass::MarkerResult,
            Self::Word => ResultClass::WordResult,
            Self::ObjectTarget => ResultClass::ObjectTargetResult,
            Self::ImageTarget => ResultClass::ImageTargetResult,
            Self::CylinderTarget => ResultClass::CylinderTargetResult,
            Self::MultiTarget => ResultClass::MultiTargetResult,
        }
    }
}

/// Classes in the native trackable-result hierarchy (parallel to [`TrackableClass`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultClass {
    /// Root of the hierarchy.
    TrackableResult,
    /// Observation of a marker.
    MarkerResult,
    /// Observation of a word.
    WordResult,
    /// Base of the object-target result family.
    ObjectTargetResult,
    /// Observation of an image target.
    ImageTargetResult,
    /// Observation of a cylinder target.
    CylinderTargetResult,
    /// Observation of a multi target.
    MultiTargetResult,
}

impl ResultClass {
    /// Every class, leaves first.
    pub const ALL: [Self; 7] = [
        Self::MarkerResult,
        Self::WordResult,
        Self::ImageTargetResult,
        Self::CylinderTargetResult,
        Self::MultiTargetResult,
        Self::ObjectTargetResult,
        Self::TrackableResult,
    ];

    /// Direct superclass, `None` for the root.
    pub const fn parent(self) -> Option<Self> {
        match self.trackable_class().parent() {
            Some(parent) => Some(parent.result_class()),
            None => None,
        }
    }

    /// True when `self` is `ancestor` or descends from it.
    pub fn is_a(self, ancestor: Self) -> bool {
        self.trackable_class().is_a(ancestor.trackable_class())
    }

    /// Trackable class a result of this class refers back to.
    pub const fn trackable_class(self) -> TrackableClass {
        match self {
            Self::TrackableResult => TrackableClass::Trackable,
            Self::MarkerResult => TrackableClass::Marker,
            Self::WordResult => TrackableClass::Word,
            Self::ObjectTargetResult => TrackableClass::ObjectTarget,
            Self::ImageTargetResult => TrackableClass::ImageTarget,
            Self::CylinderTargetResult => TrackableClass::CylinderTarget,
            Self::MultiTargetResult => TrackableClass::MultiTarget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_are_instances_of_their_ancestors() {
        assert!(TrackableClass::ImageTarget.is_a(TrackableClass::ObjectTarget));
        assert!(TrackableClass::ImageTarget.is_a(TrackableClass::Trackable));
        assert!(TrackableClass::Word.is_a(TrackableClass::Trackable));
        assert!(!TrackableClass::Word.is_a(TrackableClass::ObjectTarget));
        assert!(!TrackableClass::Trackable.is_a(TrackableClass::Marker));
    }

    #[test]
    fn result_tree_mirrors_trackable_tree() {
        for class in TrackableClass::ALL {
            let result = class.result_class();
            assert_eq!(result.trackable_class(), class);
            assert_eq!(result.parent(), class.parent().map(TrackableClass::result_class));
        }
        assert!(ResultClass::MultiTargetResult.is_a(ResultClass::ObjectTargetResult));
        assert!(!ResultClass::MarkerResult.is_a(ResultClass::WordResult));
    }

    #[test]
    fn all_lists_children_before_parents() {
        for (i, class) in TrackableClass::ALL.iter().enumerate() {
            for later in &TrackableClass::ALL[i + 1..] {
                assert!(
                    !later.is_a(*class),
                    "{later:?} listed after its ancestor {class:?}"
                );
            }
        }
    }
}
