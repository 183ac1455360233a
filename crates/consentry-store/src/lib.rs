//! Consentry Store - durable, expiring persistence for consent records

pub mod kv;
pub mod store;

pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use store::{ConsentStore, CONSENT_SLOT, REDACTION_SLOT, RETENTION_SECS};
