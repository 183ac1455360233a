//! The persisted consent record.
//!
//! Canonical form: every known signal present, keyed in registry order
//! (`BTreeMap` over `SignalId` declaration order), necessary signals
//! always `true`. Loading a record and re-saving it without changes
//! reproduces byte-identical serialized state.

use crate::registry::group_of;
use crate::signal::{Group, SignalId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shape marker for the persisted record. Bumped when the wire form
/// changes; a mismatch is treated as malformed state, not migrated.
pub const CONSENT_RECORD_VERSION: u8 = 1;

/// The persisted mapping of signal id to granted flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub version: u8,
    pub signals: BTreeMap<SignalId, bool>,
}

impl ConsentRecord {
    /// Fresh record: necessary granted, tracking denied. Consent is
    /// explicit — absence of a grant is denial.
    pub fn default_deny() -> Self {
        let signals = SignalId::ALL
            .iter()
            .map(|&id| (id, group_of(id) == Group::Necessary))
            .collect();
        Self {
            version: CONSENT_RECORD_VERSION,
            signals,
        }
    }

    /// Whether a signal is granted. Necessary signals are always granted,
    /// regardless of what the map holds; absent tracking signals are
    /// denied.
    pub fn granted(&self, id: SignalId) -> bool {
        match group_of(id) {
            Group::Necessary => true,
            Group::Tracking => self.signals.get(&id).copied().unwrap_or(false),
        }
    }

    /// Set a tracking signal. Necessary signals cannot be revoked; a
    /// grant for one is coerced to `true`.
    pub fn set(&mut self, id: SignalId, granted: bool) {
        let value = match group_of(id) {
            Group::Necessary => true,
            Group::Tracking => granted,
        };
        self.signals.insert(id, value);
    }

    /// Restore canonical form: every known signal present, necessary
    /// forced `true`, absent tracking filled `false`. Unconditional, so
    /// a record persisted before a signal joined the necessary group
    /// migrates on the next load or save.
    pub fn normalize(&mut self) {
        for id in SignalId::ALL {
            let value = self.granted(id);
            self.signals.insert(id, value);
        }
        self.version = CONSENT_RECORD_VERSION;
    }

    /// All signal states in registry order.
    pub fn signals(&self) -> impl Iterator<Item = (SignalId, bool)> + '_ {
        SignalId::ALL.into_iter().map(move |id| (id, self.granted(id)))
    }
}

impl Default for ConsentRecord {
    fn default() -> Self {
        Self::default_deny()
    }
}
