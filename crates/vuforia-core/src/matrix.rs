// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Matrix adapter: native transform record to a flat 16-element array.

use vuforia_port::NativeMatrix44;

/// Flat 4×4 matrix in the native SDK's element order.
pub type Matrix44 = [f32; 16];

/// Copy the 16 record fields out in ascending order.
///
/// Runs on every pose read, so it is a straight field copy with no checks.
#[inline]
pub fn matrix44(m: &NativeMatrix44) -> Matrix44 {
    [
        m._0, m._1, m._2, m._3, m._4, m._5, m._6, m._7, m._8, m._9, m._10, m._11, m._12, m._13,
        m._14, m._15,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identity_keeps_diagonal_positions() {
        let mut id = [0.0f32; 16];
        for i in 0..4 {
            id[i * 5] = 1.0;
        }
        let out = matrix44(&NativeMatrix44::from(id));
        assert_eq!(out, id);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[5], 1.0);
        assert_eq!(out[15], 1.0);
        assert_eq!(out[3], 0.0);
    }

    #[test]
    fn record_fields_map_to_ascending_indices() {
        let m = NativeMatrix44 {
            _3: 3.0,
            _12: 12.0,
            ..NativeMatrix44::default()
        };
        let out = matrix44(&m);
        assert_eq!(out[3], 3.0);
        assert_eq!(out[12], 12.0);
    }

    proptest! {
        #[test]
        fn round_trip_preserves_every_bit(values in prop::array::uniform16(any::<f32>())) {
            let out = matrix44(&NativeMatrix44::from(values));
            for (a, b) in values.iter().zip(out.iter()) {
                prop_assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }
}
