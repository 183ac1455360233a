//! Consent Store — one serialized record in one expiring slot.
//!
//! The store owns the durable representation. Every read and write
//! re-establishes the necessary-group invariant, so a caller can never
//! observe (or persist) a revoked necessary signal. Malformed persisted
//! state is a cache miss, not an error: the caller gets a fresh
//! default-deny record and tracking stays off.

use crate::kv::KeyValueStore;
use chrono::Duration;
use consentry_core::{ConsentRecord, SignalId, CONSENT_RECORD_VERSION};

/// Slot key for the serialized consent record.
pub const CONSENT_SLOT: &str = "app-consent";

/// Companion slot: "true" while ad storage is denied, so downstream tag
/// scripts redact ads data.
pub const REDACTION_SLOT: &str = "ads_data_redaction";

/// Retention window: one week, sliding. Every save restarts it.
pub const RETENTION_SECS: i64 = 604_800;

/// Serializes consent records into a durable, expiring slot.
pub struct ConsentStore<S: KeyValueStore> {
    kv: S,
    slot: String,
    retention: Duration,
}

impl<S: KeyValueStore> ConsentStore<S> {
    /// Store with the default slot key and retention window.
    pub fn new(kv: S) -> Self {
        Self::with_slot(kv, CONSENT_SLOT, RETENTION_SECS)
    }

    pub fn with_slot(kv: S, slot: impl Into<String>, retention_secs: i64) -> Self {
        Self {
            kv,
            slot: slot.into(),
            retention: Duration::seconds(retention_secs),
        }
    }

    /// Read the persisted record. Absent, expired, or malformed state
    /// yields a fresh default-deny record; this never fails the caller.
    pub fn load(&self) -> ConsentRecord {
        let raw = match self.kv.get(&self.slot) {
            Some(raw) => raw,
            None => {
                tracing::info!("no consent record in slot {} — default-deny", self.slot);
                return ConsentRecord::default_deny();
            }
        };
        match serde_json::from_str::<ConsentRecord>(&raw) {
            Ok(mut record) if record.version == CONSENT_RECORD_VERSION => {
                record.normalize();
                record
            }
            Ok(record) => {
                tracing::warn!(
                    "consent record version {} does not match {} — default-deny",
                    record.version,
                    CONSENT_RECORD_VERSION
                );
                ConsentRecord::default_deny()
            }
            Err(e) => {
                tracing::warn!("malformed consent record — default-deny: {}", e);
                ConsentRecord::default_deny()
            }
        }
    }

    /// Persist the record. Normalizes first (necessary forced `true`),
    /// writes the canonical form, and restarts the retention window.
    /// Also updates the ads-data-redaction flag from the ad storage
    /// grant.
    pub fn save(&mut self, record: &ConsentRecord) {
        let mut canonical = record.clone();
        canonical.normalize();
        match serde_json::to_string(&canonical) {
            Ok(json) => self.kv.set(&self.slot, &json, self.retention),
            Err(e) => {
                tracing::warn!("failed to serialize consent record: {}", e);
                return;
            }
        }
        let redact = if canonical.granted(SignalId::AdStorage) {
            "false"
        } else {
            "true"
        };
        self.kv.set(REDACTION_SLOT, redact, self.retention);
    }

    /// The backing key-value store, for host-level inspection.
    pub fn kv(&self) -> &S {
        &self.kv
    }
}
