// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port shared by Mandala tools (CLI, surfaces).

use crate::config::{ConfigService, ConfigStore};
use crate::prefs::{ClientPrefs, CLIENT_PREFS_KEY};
use tracing::warn;

/// Config-facing port for loading/saving client preferences.
pub trait ConfigPort {
    /// Load client preferences (returns None if missing or unreadable).
    fn load_prefs(&self) -> Option<ClientPrefs>;
    /// Persist client preferences (best-effort; errors are logged).
    fn save_prefs(&self, prefs: &ClientPrefs);
}

impl<S> ConfigPort for ConfigService<S>
where
    S: ConfigStore,
{
    fn load_prefs(&self) -> Option<ClientPrefs> {
        match self.load(CLIENT_PREFS_KEY) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(%err, "client prefs unreadable; using defaults");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &ClientPrefs) {
        if let Err(err) = self.save(CLIENT_PREFS_KEY, prefs) {
            warn!(%err, "failed to persist client prefs");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::MemoryConfigStore;

    #[test]
    fn prefs_round_trip_through_service() {
        let svc = ConfigService::new(MemoryConfigStore::default());
        assert!(svc.load_prefs().is_none());

        let prefs = ClientPrefs {
            endpoint: "http://10.0.0.2:5000".into(),
            request_timeout_secs: Some(30),
            ..ClientPrefs::default()
        };
        svc.save_prefs(&prefs);
        assert_eq!(svc.load_prefs(), Some(prefs));
    }

    #[test]
    fn corrupt_blob_reads_as_missing() {
        let store = MemoryConfigStore::default();
        store.save_raw(CLIENT_PREFS_KEY, b"{not json").unwrap();
        let svc = ConfigService::new(store);
        assert!(svc.load_prefs().is_none());
    }
}
