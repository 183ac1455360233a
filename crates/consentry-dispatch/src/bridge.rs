//! Dispatcher installation: one dispatcher per well-known name.
//!
//! The registry replaces the ambient-global lookup used by browser tag
//! snippets: it is constructed once at process start and passed by
//! reference. `get_dispatcher` installs a queue-backed dispatcher the
//! first time a name is requested and returns the existing identity on
//! every later request — a dispatcher registered by the tag library
//! itself is never overwritten.

use crate::queue::DispatchQueue;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Where dispatched argument lists go. The default sink appends to a
/// named queue; a tag library can take over the name with its own sink.
pub trait DispatchSink: Send + Sync {
    fn dispatch(&self, args: Vec<Value>);
}

struct QueueSink {
    queue: DispatchQueue,
}

impl DispatchSink for QueueSink {
    fn dispatch(&self, args: Vec<Value>) {
        self.queue.push(args);
    }
}

/// A handle to an installed dispatch function. Cloneable; clones share
/// identity with the original.
#[derive(Clone)]
pub struct Dispatcher {
    sink: Arc<dyn DispatchSink>,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn DispatchSink>) -> Self {
        Self { sink }
    }

    /// Queue-backed dispatcher appending to `queue`.
    pub fn for_queue(queue: DispatchQueue) -> Self {
        Self::new(Arc::new(QueueSink { queue }))
    }

    /// Push one argument list. Never fails.
    pub fn dispatch(&self, args: Vec<Value>) {
        self.sink.dispatch(args);
    }

    /// Whether two handles refer to the same installed function.
    pub fn same_identity(&self, other: &Dispatcher) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

/// Holds the named queues and the dispatchers installed over them.
#[derive(Default)]
pub struct DispatchRegistry {
    queues: Mutex<HashMap<String, DispatchQueue>>,
    dispatchers: Mutex<HashMap<String, Dispatcher>>,
}

impl DispatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The queue under `name`, created if absent.
    pub fn queue(&self, name: &str) -> DispatchQueue {
        let mut queues = match self.queues.lock() {
            Ok(queues) => queues,
            Err(poisoned) => poisoned.into_inner(),
        };
        queues
            .entry(name.to_string())
            .or_insert_with(|| DispatchQueue::new(name))
            .clone()
    }

    /// The dispatcher under `fn_name`. If one is already installed —
    /// whether by an earlier call or by a tag library via [`register`] —
    /// it is returned unchanged. Otherwise a queue-backed dispatcher is
    /// installed over the queue named `queue_name`.
    ///
    /// [`register`]: DispatchRegistry::register
    pub fn get_dispatcher(&self, queue_name: &str, fn_name: &str) -> Dispatcher {
        let queue = self.queue(queue_name);
        let mut dispatchers = match self.dispatchers.lock() {
            Ok(dispatchers) => dispatchers,
            Err(poisoned) => poisoned.into_inner(),
        };
        dispatchers
            .entry(fn_name.to_string())
            .or_insert_with(|| Dispatcher::for_queue(queue))
            .clone()
    }

    /// Take over `fn_name` with a library-provided sink. The previously
    /// queued entries stay in their queue for the library to drain.
    pub fn register(&self, fn_name: &str, sink: Arc<dyn DispatchSink>) -> Dispatcher {
        let dispatcher = Dispatcher::new(sink);
        let mut dispatchers = match self.dispatchers.lock() {
            Ok(dispatchers) => dispatchers,
            Err(poisoned) => poisoned.into_inner(),
        };
        dispatchers.insert(fn_name.to_string(), dispatcher.clone());
        dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::{DATA_LAYER, DISPATCHER_NAME};
    use serde_json::json;

    #[test]
    fn second_install_returns_same_identity() {
        let registry = DispatchRegistry::new();
        let first = registry.get_dispatcher(DATA_LAYER, DISPATCHER_NAME);
        let second = registry.get_dispatcher(DATA_LAYER, DISPATCHER_NAME);
        assert!(first.same_identity(&second));
    }

    #[test]
    fn dispatched_args_land_in_queue_in_order() {
        let registry = DispatchRegistry::new();
        let dispatcher = registry.get_dispatcher(DATA_LAYER, DISPATCHER_NAME);
        dispatcher.dispatch(vec![json!("consent"), json!("update"), json!({"a": 1})]);
        dispatcher.dispatch(vec![json!("event"), json!("click")]);
        let queue = registry.queue(DATA_LAYER);
        assert_eq!(
            queue.snapshot(),
            vec![
                vec![json!("consent"), json!("update"), json!({"a": 1})],
                vec![json!("event"), json!("click")],
            ]
        );
    }

    #[test]
    fn registered_sink_is_not_overwritten() {
        struct Recording(Mutex<Vec<Vec<Value>>>);
        impl DispatchSink for Recording {
            fn dispatch(&self, args: Vec<Value>) {
                self.0.lock().unwrap().push(args);
            }
        }

        let registry = DispatchRegistry::new();
        let library = registry.register(DISPATCHER_NAME, Arc::new(Recording(Mutex::new(Vec::new()))));
        let resolved = registry.get_dispatcher(DATA_LAYER, DISPATCHER_NAME);
        assert!(library.same_identity(&resolved));
    }

    #[test]
    fn library_takeover_leaves_queue_for_draining() {
        let registry = DispatchRegistry::new();
        let stub = registry.get_dispatcher(DATA_LAYER, DISPATCHER_NAME);
        stub.dispatch(vec![json!("event"), json!("early")]);

        struct Null;
        impl DispatchSink for Null {
            fn dispatch(&self, _args: Vec<Value>) {}
        }
        registry.register(DISPATCHER_NAME, Arc::new(Null));

        let queue = registry.queue(DATA_LAYER);
        assert_eq!(queue.drain().len(), 1);
    }

    #[test]
    fn distinct_names_get_distinct_dispatchers() {
        let registry = DispatchRegistry::new();
        let a = registry.get_dispatcher(DATA_LAYER, "gtag");
        let b = registry.get_dispatcher(DATA_LAYER, "analytics");
        assert!(!a.same_identity(&b));
    }
}
