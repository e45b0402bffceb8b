// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Storage port and the typed preferences service on top of it.

use thiserror::Error;

use crate::prefs::{PrefsError, SessionPrefs, SESSION_PREFS_KEY};

/// Keyed blob storage the preferences live in.
pub trait ConfigStore {
    /// Blob stored under `key`; `Ok(None)` when nothing has been written.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError>;
    /// Replace the blob under `key`.
    fn write(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failure loading or saving preferences.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The store could not be read or written.
    #[error("config store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Stored bytes are not valid preferences JSON.
    #[error("stored preferences are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Preferences parsed but break a rule the engine relies on.
    #[error("invalid preferences: {0}")]
    Invalid(#[from] PrefsError),
    /// Key cannot be used as a storage name.
    #[error("invalid config key {0:?}")]
    InvalidKey(String),
    /// Platform config directory could not be resolved.
    #[error("no platform config directory")]
    NoConfigDir,
}

/// Loads, validates and saves [`SessionPrefs`] through a [`ConfigStore`].
///
/// Nothing invalid is written, and nothing invalid is handed back: a
/// hand-edited file with an empty license key fails to load rather than
/// reaching the engine.
pub struct PrefsService<S> {
    store: S,
    key: String,
}

impl<S> PrefsService<S> {
    /// Service over `store`, under [`SESSION_PREFS_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, SESSION_PREFS_KEY)
    }

    /// Service over `store` under a custom key (one prefs set per profile, say).
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Key the preferences are stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ConfigStore> PrefsService<S> {
    /// Saved preferences, or the defaults when none were saved.
    pub fn load(&self) -> Result<SessionPrefs, ConfigError> {
        let prefs = match self.store.read(&self.key)? {
            Some(bytes) if !bytes.is_empty() => serde_json::from_slice::<SessionPrefs>(&bytes)?,
            _ => return Ok(SessionPrefs::default()),
        };
        prefs.validate()?;
        Ok(prefs)
    }

    /// Validate and persist `prefs`.
    pub fn save(&self, prefs: &SessionPrefs) -> Result<(), ConfigError> {
        prefs.validate()?;
        let data = serde_json::to_vec_pretty(prefs)?;
        self.store.write(&self.key, &data)
    }

    /// Load, edit, validate and save in one step. Returns what was saved.
    pub fn update(
        &self,
        edit: impl FnOnce(&mut SessionPrefs),
    ) -> Result<SessionPrefs, ConfigError> {
        let mut prefs = self.load()?;
        edit(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }
}
