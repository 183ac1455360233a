//! Consentry — cookie-consent state, persistence, and tag-dispatch sync.
//!
//! Architecture:
//! - `consentry-core`: signal taxonomy, registry, consent record, errors
//! - `consentry-store`: expiring key-value slots and the consent store
//! - `consentry-dispatch`: deferred-event queue and dispatcher registry
//! - this crate: `ConsentManager`, the session-lifetime consent context
//!
//! The manager is built once at startup and passed by reference to
//! whatever renders consent state. All mutations flow through
//! [`ConsentManager::update_consent`]; every mutation is persisted and
//! mirrored to the tag-dispatch queue so tracking scripts only fire for
//! categories the visitor approved.

pub mod config;
pub mod manager;

pub use config::ConsentConfig;
pub use manager::{ConsentManager, GroupView, GroupedConsent, SignalState};

pub use consentry_core::{
    details, group_description, group_of, signals_in, ConsentRecord, Error, Group, Result,
    SignalDetails, SignalId,
};
pub use consentry_dispatch::{DispatchQueue, DispatchRegistry, Dispatcher};
pub use consentry_store::{ConsentStore, FileKvStore, KeyValueStore, MemoryKvStore};
