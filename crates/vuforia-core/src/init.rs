// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Initialization outcome codes.

/// Result of [`crate::Session::init`].
///
/// Every native outcome is a value, never an error. [`InitResult::code`]
/// returns the raw native code, including codes this crate does not know.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InitResult {
    /// Initialization succeeded (code 100).
    Success,
    /// Unspecified native error (-1).
    Error,
    /// The device is not supported (-2).
    DeviceNotSupported,
    /// Camera access was denied (-3).
    NoCameraAccess,
    /// No license key was set (-4).
    LicenseMissingKey,
    /// The license key is invalid (-5).
    LicenseInvalidKey,
    /// License check failed permanently for lack of network (-6).
    LicenseNoNetworkPermanent,
    /// License check failed transiently for lack of network (-7).
    LicenseNoNetworkTransient,
    /// The license key was revoked (-8).
    LicenseCanceledKey,
    /// The license key is for another product type (-9).
    LicenseProductTypeMismatch,
    /// A required external device was not found (-10).
    ExternalDeviceNotDetected,
    /// Any other native code.
    Other(i32),
}

impl InitResult {
    /// Native success code.
    pub const SUCCESS_CODE: i32 = 100;

    /// Decode a native result code.
    pub const fn from_code(code: i32) -> Self {
        match code {
            Self::SUCCESS_CODE => Self::Success,
            -1 => Self::Error,
            -2 => Self::DeviceNotSupported,
            -3 => Self::NoCameraAccess,
            -4 => Self::LicenseMissingKey,
            -5 => Self::LicenseInvalidKey,
            -6 => Self::LicenseNoNetworkPermanent,
            -7 => Self::LicenseNoNetworkTransient,
            -8 => Self::LicenseCanceledKey,
            -9 => Self::LicenseProductTypeMismatch,
            -10 => Self::ExternalDeviceNotDetected,
            other => Self::Other(other),
        }
    }

    /// Raw native code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => Self::SUCCESS_CODE,
            Self::Error => -1,
            Self::DeviceNotSupported => -2,
            Self::NoCameraAccess => -3,
            Self::LicenseMissingKey => -4,
            Self::LicenseInvalidKey => -5,
            Self::LicenseNoNetworkPermanent => -6,
            Self::LicenseNoNetworkTransient => -7,
            Self::LicenseCanceledKey => -8,
            Self::LicenseProductTypeMismatch => -9,
            Self::ExternalDeviceNotDetected => -10,
            Self::Other(code) => code,
        }
    }

    /// True only for [`InitResult::Success`].
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// True for the license failure family.
    pub const fn is_license_error(self) -> bool {
        matches!(
            self,
            Self::LicenseMissingKey
                | Self::LicenseInvalidKey
                | Self::LicenseNoNetworkPermanent
                | Self::LicenseNoNetworkTransient
                | Self::LicenseCanceledKey
                | Self::LicenseProductTypeMismatch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_decode_and_encode_back() {
        for code in [100, -1, -2, -3, -4, -5, -6, -7, -8, -9, -10] {
            let result = InitResult::from_code(code);
            assert!(!matches!(result, InitResult::Other(_)), "{code} unknown");
            assert_eq!(result.code(), code);
        }
    }

    #[test]
    fn unknown_codes_keep_the_raw_value() {
        let result = InitResult::from_code(101);
        assert_eq!(result, InitResult::Other(101));
        assert_eq!(result.code(), 101);
        assert!(!result.is_success());
    }

    #[test]
    fn license_family() {
        assert!(InitResult::LicenseInvalidKey.is_license_error());
        assert!(!InitResult::NoCameraAccess.is_license_error());
    }
}
