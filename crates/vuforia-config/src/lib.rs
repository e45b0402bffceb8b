// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted session preferences: the [`SessionPrefs`] model and its rules,
//! a validating [`PrefsService`], the [`ConfigStore`] port it writes through,
//! and an atomic filesystem store.

pub mod fs;
pub mod prefs;
pub mod service;

pub use fs::FsConfigStore;
pub use prefs::{HintPref, HintSetting, PrefsError, SessionPrefs, SESSION_PREFS_KEY};
pub use service::{ConfigError, ConfigStore, PrefsService};
