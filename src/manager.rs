//! The Consent Context — session-lifetime state holder and the single
//! update entry point.
//!
//! Built once from explicit collaborators (store backend, dispatch
//! registry) and passed by reference; there is no ambient lookup to
//! fail late. Construction is the `uninitialized → ready` transition:
//! it loads the persisted record and resolves the dispatcher.

use serde_json::{json, Value};

use crate::config::ConsentConfig;
use consentry_core::{details, group_description, group_of, ConsentRecord, Group, SignalId};
use consentry_dispatch::{DispatchRegistry, Dispatcher};
use consentry_store::{ConsentStore, KeyValueStore};

/// One signal as presentation sees it.
#[derive(Clone, Copy, Debug)]
pub struct SignalState {
    pub id: SignalId,
    pub label: &'static str,
    pub description: &'static str,
    pub checked: bool,
}

/// One group's ordered signals plus its display copy.
#[derive(Clone, Debug)]
pub struct GroupView {
    pub group: Group,
    pub description: &'static str,
    pub signals: Vec<SignalState>,
}

impl GroupView {
    /// Whether every signal in the group is granted — drives the
    /// group-level toggle.
    pub fn all_checked(&self) -> bool {
        self.signals.iter().all(|s| s.checked)
    }
}

/// The grouped read surface consumed by presentation.
#[derive(Clone, Debug)]
pub struct GroupedConsent {
    pub necessary: GroupView,
    pub tracking: GroupView,
    /// Feature gate for the premium detail view. Presentation only.
    pub pro_details: bool,
}

/// Session-lifetime consent state. One logical writer per session: all
/// mutations flow through [`update_consent`](Self::update_consent),
/// which persists and dispatches in invocation order.
pub struct ConsentManager<S: KeyValueStore> {
    store: ConsentStore<S>,
    record: ConsentRecord,
    dispatcher: Dispatcher,
    pro_details: bool,
}

impl<S: KeyValueStore> ConsentManager<S> {
    /// Build the manager: load (or default) the persisted record and
    /// resolve the dispatcher under the configured names.
    pub fn new(config: &ConsentConfig, kv: S, registry: &DispatchRegistry) -> Self {
        let store = ConsentStore::with_slot(kv, &config.cookie_name, config.retention_secs);
        let record = store.load();
        let dispatcher = registry.get_dispatcher(&config.queue_name, &config.dispatcher_name);
        tracing::info!(
            "consent context ready (slot {}, queue {})",
            config.cookie_name,
            config.queue_name
        );
        Self {
            store,
            record,
            dispatcher,
            pro_details: config.pro_details,
        }
    }

    /// Current grouped signal states for presentation.
    pub fn consent(&self) -> GroupedConsent {
        GroupedConsent {
            necessary: self.group_view(Group::Necessary),
            tracking: self.group_view(Group::Tracking),
            pro_details: self.pro_details,
        }
    }

    /// Whether one signal is currently granted.
    pub fn granted(&self, id: SignalId) -> bool {
        self.record.granted(id)
    }

    /// Merge a partial, string-keyed update into the record, persist it,
    /// and emit one consent-update event carrying the full resulting
    /// state.
    ///
    /// Unknown ids are dropped and necessary ids ignored — partial
    /// application, not atomic rejection, because UI toggles are
    /// independent per signal.
    pub fn update_consent<I, K>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        for (key, granted) in partial {
            match key.as_ref().parse::<SignalId>() {
                Ok(id) => match group_of(id) {
                    Group::Necessary => {
                        tracing::debug!("ignoring update for non-revocable signal {}", id)
                    }
                    Group::Tracking => self.record.set(id, granted),
                },
                Err(_) => tracing::debug!("dropping unknown signal {:?}", key.as_ref()),
            }
        }
        self.store.save(&self.record);
        self.dispatcher
            .dispatch(vec![json!("consent"), json!("update"), self.signal_map()]);
        tracing::debug!("consent update dispatched");
    }

    /// Push an arbitrary application event, independent of consent.
    pub fn dispatch_event(&self, name: &str, data: Value) {
        self.dispatcher.dispatch(vec![json!("event"), json!(name), data]);
    }

    /// The full signal map as dispatched: every id, current grant.
    fn signal_map(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .record
            .signals()
            .map(|(id, granted)| (id.as_str().to_string(), Value::Bool(granted)))
            .collect();
        Value::Object(map)
    }

    fn group_view(&self, group: Group) -> GroupView {
        let signals = consentry_core::signals_in(group)
            .iter()
            .map(|&id| {
                let d = details(id);
                SignalState {
                    id,
                    label: d.label,
                    description: d.description,
                    checked: self.record.granted(id),
                }
            })
            .collect();
        GroupView {
            group,
            description: group_description(group),
            signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consentry_store::MemoryKvStore;

    fn manager(registry: &DispatchRegistry) -> ConsentManager<MemoryKvStore> {
        ConsentManager::new(&ConsentConfig::default(), MemoryKvStore::new(), registry)
    }

    #[test]
    fn first_visit_is_default_deny() {
        let registry = DispatchRegistry::new();
        let manager = manager(&registry);
        let view = manager.consent();
        assert!(view.necessary.all_checked());
        assert!(view.tracking.signals.iter().all(|s| !s.checked));
    }

    #[test]
    fn unknown_signal_is_dropped_without_failing() {
        let registry = DispatchRegistry::new();
        let mut manager = manager(&registry);
        let before: Vec<bool> = manager.record.signals().map(|(_, g)| g).collect();
        manager.update_consent([("geo_storage", true)]);
        let after: Vec<bool> = manager.record.signals().map(|(_, g)| g).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn necessary_signal_update_is_ignored() {
        let registry = DispatchRegistry::new();
        let mut manager = manager(&registry);
        manager.update_consent([("security_storage", false)]);
        assert!(manager.granted(SignalId::SecurityStorage));
    }

    #[test]
    fn group_view_carries_registry_metadata() {
        let registry = DispatchRegistry::new();
        let manager = manager(&registry);
        let view = manager.consent();
        let ad = view
            .tracking
            .signals
            .iter()
            .find(|s| s.id == SignalId::AdStorage)
            .unwrap();
        assert_eq!(ad.label, "Personalized Marketing Related Cookies");
        assert!(!ad.description.is_empty());
    }

    #[test]
    fn pro_gate_flows_into_view() {
        let registry = DispatchRegistry::new();
        let config = ConsentConfig {
            pro_details: true,
            ..ConsentConfig::default()
        };
        let manager = ConsentManager::new(&config, MemoryKvStore::new(), &registry);
        assert!(manager.consent().pro_details);
    }
}
