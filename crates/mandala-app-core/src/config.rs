// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persistence for the `mandala` client's settings.
//!
//! [`ConfigService`] turns typed values into pretty JSON and hands the bytes to a
//! [`ConfigStore`]: the filesystem in the CLI, [`MemoryConfigStore`] in tests.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use thiserror::Error;

/// Where settings blobs live, addressed by key (`client` for [`crate::prefs::ClientPrefs`]).
pub trait ConfigStore {
    /// Bytes stored under `key`; `NotFound` when nothing was saved yet.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replace the bytes stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Why settings could not be read or written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing saved under the key.
    #[error("not found")]
    NotFound,
    /// The backing file could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The stored JSON does not match the expected type.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Anything else (unresolvable config dir, bad key, poisoned lock).
    #[error("other: {0}")]
    Other(String),
}

/// Typed JSON access to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wrap `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Unwrap the store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Decode the value under `key`. A missing key or a blank file (e.g. one
    /// emptied by hand) reads as `Ok(None)` so callers fall back to defaults.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Store `value` under `key` as pretty-printed JSON.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

/// Store that keeps blobs in memory; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl ConfigStore for MemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| ConfigError::Other("config store lock poisoned".into()))?;
        blobs.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| ConfigError::Other("config store lock poisoned".into()))?;
        blobs.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let svc = ConfigService::new(MemoryConfigStore::default());
        let missing: Option<u32> = svc.load("absent").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn blank_blob_is_none() {
        let store = MemoryConfigStore::default();
        store.save_raw("empty", b"").unwrap();
        store.save_raw("blank", b" \n\t").unwrap();
        let svc = ConfigService::new(store);
        for key in ["empty", "blank"] {
            let value: Option<u32> = svc.load(key).unwrap();
            assert!(value.is_none());
        }
    }

    #[test]
    fn mismatched_json_is_a_serde_error() {
        let store = MemoryConfigStore::default();
        store.save_raw("client", b"[1, 2]").unwrap();
        let svc = ConfigService::new(store);
        let err = svc.load::<u32>("client").unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)));
    }

    #[test]
    fn save_writes_pretty_json() {
        let svc = ConfigService::new(MemoryConfigStore::default());
        svc.save("answer", &vec![4, 2]).unwrap();
        let raw = svc.into_inner().load_raw("answer").unwrap();
        assert!(String::from_utf8(raw).unwrap().contains('\n'));
    }
}
