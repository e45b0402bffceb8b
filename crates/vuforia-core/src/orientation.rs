// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Interface orientation to native rotation mapping.

use vuforia_port::{InterfaceOrientation, Rotation};

/// Native rotation for a platform orientation. Unrecognized values render as portrait.
pub const fn rotation_for(orientation: InterfaceOrientation) -> Rotation {
    match orientation {
        InterfaceOrientation::Portrait | InterfaceOrientation::Unknown(_) => Rotation::Ios90,
        InterfaceOrientation::PortraitUpsideDown => Rotation::Ios270,
        InterfaceOrientation::LandscapeLeft => Rotation::Ios180,
        InterfaceOrientation::LandscapeRight => Rotation::Ios0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn four_known_orientations() {
        let table = [
            (1, Rotation::Ios90),
            (2, Rotation::Ios270),
            (3, Rotation::Ios0),
            (4, Rotation::Ios180),
        ];
        for (raw, rotation) in table {
            assert_eq!(rotation_for(InterfaceOrientation::from_raw(raw)), rotation);
        }
        assert_eq!(Rotation::Ios90.raw(), 128);
        assert_eq!(Rotation::Ios0.raw(), 1024);
    }

    proptest! {
        #[test]
        fn unknown_orientations_default_to_portrait(raw in any::<i64>()) {
            prop_assume!(!(1..=4).contains(&raw));
            prop_assert_eq!(
                rotation_for(InterfaceOrientation::from_raw(raw)),
                rotation_for(InterfaceOrientation::Portrait)
            );
        }
    }
}
