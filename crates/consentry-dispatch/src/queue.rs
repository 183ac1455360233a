//! The deferred-dispatch queue.
//!
//! Tag-management libraries load asynchronously and drain a well-known
//! queue of argument lists once attached. Events pushed before the
//! library attaches are not lost — they sit in the queue in call order.

use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Default queue name, matching the standard data-layer convention.
pub const DATA_LAYER: &str = "dataLayer";

/// Default dispatcher function name.
pub const DISPATCHER_NAME: &str = "gtag";

#[derive(Debug)]
struct QueueInner {
    name: String,
    entries: Mutex<Vec<Vec<Value>>>,
}

/// A named append-only queue of argument lists - cheaply cloneable.
#[derive(Clone, Debug)]
pub struct DispatchQueue {
    inner: Arc<QueueInner>,
}

impl DispatchQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                name: name.into(),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Append one argument list. Fire-and-forget: a poisoned lock drops
    /// the entry rather than propagating the panic.
    pub fn push(&self, args: Vec<Value>) {
        match self.inner.entries.lock() {
            Ok(mut entries) => entries.push(args),
            Err(_) => tracing::warn!("queue {} poisoned — dropping event", self.name()),
        }
    }

    /// Take all queued entries, oldest first. Called by the tag library
    /// when it attaches.
    pub fn drain(&self) -> Vec<Vec<Value>> {
        self.inner
            .entries
            .lock()
            .map(|mut entries| std::mem::take(&mut *entries))
            .unwrap_or_default()
    }

    /// Copy of the queued entries, in call order.
    pub fn snapshot(&self) -> Vec<Vec<Value>> {
        self.inner
            .entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
