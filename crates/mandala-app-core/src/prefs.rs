// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved client preferences (endpoint + request/scroll timing).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Config key under which [`ClientPrefs`] are stored.
pub const CLIENT_PREFS_KEY: &str = "client";

/// Saved preferences for the generation client and its form surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientPrefs {
    /// Base URL of the generation service (e.g. `http://127.0.0.1:5000`).
    pub endpoint: String,
    /// Transport timeout in seconds. `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
    /// Delay before scrolling a fresh result into view.
    pub result_scroll_delay_ms: u64,
}

impl Default for ClientPrefs {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".into(),
            request_timeout_secs: None,
            result_scroll_delay_ms: 100,
        }
    }
}

impl ClientPrefs {
    /// Transport timeout as a `Duration`, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Result scroll delay as a `Duration`.
    pub fn result_scroll_delay(&self) -> Duration {
        Duration::from_millis(self.result_scroll_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let prefs: ClientPrefs =
            serde_json::from_str(r#"{"endpoint":"http://mandala.local"}"#).unwrap();
        assert_eq!(prefs.endpoint, "http://mandala.local");
        assert_eq!(prefs.request_timeout(), None);
        assert_eq!(prefs.result_scroll_delay(), Duration::from_millis(100));
    }
}
