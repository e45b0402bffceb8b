// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Native 4×4 transform record.

/// 16-field transform record as laid out by the native SDK.
///
/// Field `_n` is element `n` of the SDK's row-major convention; the core's
/// matrix adapter copies them out in ascending order.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct NativeMatrix44 {
    pub _0: f32,
    pub _1: f32,
    pub _2: f32,
    pub _3: f32,
    pub _4: f32,
    pub _5: f32,
    pub _6: f32,
    pub _7: f32,
    pub _8: f32,
    pub _9: f32,
    pub _10: f32,
    pub _11: f32,
    pub _12: f32,
    pub _13: f32,
    pub _14: f32,
    pub _15: f32,
}

impl From<[f32; 16]> for NativeMatrix44 {
    fn from(m: [f32; 16]) -> Self {
        Self {
            _0: m[0],
            _1: m[1],
            _2: m[2],
            _3: m[3],
            _4: m[4],
            _5: m[5],
            _6: m[6],
            _7: m[7],
            _8: m[8],
            _9: m[9],
            _10: m[10],
            _11: m[11],
            _12: m[12],
            _13: m[13],
            _14: m[14],
            _15: m[15],
        }
    }
}
