// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted session preferences (license key, hints, scale).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vuforia_port::Hint;

/// Config key the session preferences are stored under.
pub const SESSION_PREFS_KEY: &str = "session";

/// A rule [`SessionPrefs`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PrefsError {
    /// License key present but blank; the engine would reject it at init.
    #[error("license key is empty")]
    EmptyLicenseKey,
    /// The same hint appears twice, so the saved order would decide the value.
    #[error("hint {0:?} is listed more than once")]
    DuplicateHint(Hint),
    /// Scale must be finite and positive.
    #[error("scale factor must be finite and positive, got {0}")]
    InvalidScaleFactor(f32),
}

/// One hint to apply before initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintPref {
    /// Which hint.
    pub hint: Hint,
    /// Value to set.
    pub value: i32,
}

/// Outcome of applying one hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintSetting {
    /// The hint that was applied.
    pub pref: HintPref,
    /// Whether the engine accepted it.
    pub accepted: bool,
}

/// Saved preferences applied to a session before `init`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPrefs {
    /// License key; `None` leaves the engine's key untouched.
    pub license_key: Option<String>,
    /// Hints in application order.
    pub hints: Vec<HintPref>,
    /// World scale factor; `None` keeps the engine default.
    pub scale_factor: Option<f32>,
}

impl SessionPrefs {
    /// Convenience: prefs carrying only a license key.
    pub fn with_license_key(key: impl Into<String>) -> Self {
        Self {
            license_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Append a hint (builder style).
    pub fn hint(mut self, hint: Hint, value: i32) -> Self {
        self.hints.push(HintPref { hint, value });
        self
    }

    /// Check the rules the engine relies on.
    pub fn validate(&self) -> Result<(), PrefsError> {
        if self
            .license_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            return Err(PrefsError::EmptyLicenseKey);
        }
        for (i, pref) in self.hints.iter().enumerate() {
            if self.hints[..i].iter().any(|seen| seen.hint == pref.hint) {
                return Err(PrefsError::DuplicateHint(pref.hint));
            }
        }
        match self.scale_factor {
            Some(scale) if !(scale.is_finite() && scale > 0.0) => {
                Err(PrefsError::InvalidScaleFactor(scale))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let prefs: SessionPrefs = serde_json::from_str(r#"{"license_key":"abc"}"#).unwrap();
        assert_eq!(prefs.license_key.as_deref(), Some("abc"));
        assert!(prefs.hints.is_empty());
        assert!(prefs.scale_factor.is_none());
    }

    #[test]
    fn validation_rules() {
        assert_eq!(SessionPrefs::default().validate(), Ok(()));
        assert_eq!(
            SessionPrefs::with_license_key("").validate(),
            Err(PrefsError::EmptyLicenseKey)
        );
        let twice = SessionPrefs::default()
            .hint(Hint::MaxSimultaneousImageTargets, 1)
            .hint(Hint::DelayedLoadingObjectDatasets, 1)
            .hint(Hint::MaxSimultaneousImageTargets, 4);
        assert_eq!(
            twice.validate(),
            Err(PrefsError::DuplicateHint(Hint::MaxSimultaneousImageTargets))
        );
        let nan = SessionPrefs {
            scale_factor: Some(f32::NAN),
            ..SessionPrefs::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(PrefsError::InvalidScaleFactor(_))
        ));
    }

    #[test]
    fn hints_serialize_by_name() {
        let prefs = SessionPrefs::default().hint(Hint::MaxSimultaneousImageTargets, 4);
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("max_simultaneous_image_targets"), "{json}");
    }
}
