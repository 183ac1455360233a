//! Consentry Core - Signal taxonomy, consent record, and error handling

pub mod error;
pub mod record;
pub mod registry;
pub mod signal;

pub use error::{Error, Result};
pub use record::{ConsentRecord, CONSENT_RECORD_VERSION};
pub use registry::{details, group_description, group_of, signals_in, SignalDetails};
pub use signal::{Group, SignalId};
