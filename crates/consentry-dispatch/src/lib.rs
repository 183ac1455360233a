//! Consentry Dispatch - deferred-event queue bridge for tag libraries

pub mod bridge;
pub mod queue;

pub use bridge::{DispatchRegistry, DispatchSink, Dispatcher};
pub use queue::{DispatchQueue, DATA_LAYER, DISPATCHER_NAME};
