//! Consent configuration.
//!
//! All deploy-time knobs in one place. Loaded from JSON at startup,
//! falls back to defaults if no config file exists; the pro-details
//! feature gate can also be flipped by environment variable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use consentry_dispatch::{DATA_LAYER, DISPATCHER_NAME};
use consentry_store::{CONSENT_SLOT, RETENTION_SECS};

/// Environment toggle for the premium "show me" detail view.
pub const FEATURE_PRO_ENV: &str = "CONSENTRY_FEATURE_PRO";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentConfig {
    /// Slot key for the serialized consent record.
    pub cookie_name: String,
    /// Well-known queue the tag library drains.
    pub queue_name: String,
    /// Well-known dispatch function name.
    pub dispatcher_name: String,
    /// Sliding retention window in seconds.
    pub retention_secs: i64,
    /// Whether the premium detail view is offered. Presentation gate
    /// only; consent semantics are unaffected.
    pub pro_details: bool,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            cookie_name: CONSENT_SLOT.into(),
            queue_name: DATA_LAYER.into(),
            dispatcher_name: DISPATCHER_NAME.into(),
            retention_secs: RETENTION_SECS,
            pro_details: false,
        }
    }
}

impl ConsentConfig {
    /// Load config from a JSON file, falling back to defaults, then
    /// apply environment overrides.
    pub fn load(path: &Path) -> Self {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {} — using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {} — using defaults", path.display());
                Self::default()
            }
        };
        config.with_env_overrides()
    }

    /// Apply environment overrides (currently only the pro gate).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(FEATURE_PRO_ENV) {
            self.pro_details = raw == "true" || raw == "1";
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_well_known_names() {
        let config = ConsentConfig::default();
        assert_eq!(config.cookie_name, "app-consent");
        assert_eq!(config.queue_name, "dataLayer");
        assert_eq!(config.dispatcher_name, "gtag");
        assert_eq!(config.retention_secs, 604_800);
        assert!(!config.pro_details);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ConsentConfig::load(Path::new("/nonexistent/consentry.json"));
        assert_eq!(config.cookie_name, "app-consent");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let parsed: ConsentConfig =
            serde_json::from_str(r#"{"queue_name":"appEvents"}"#).unwrap();
        assert_eq!(parsed.queue_name, "appEvents");
        assert_eq!(parsed.dispatcher_name, "gtag");
        assert_eq!(parsed.retention_secs, 604_800);
    }
}
