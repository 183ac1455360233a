//! End-to-end consent protocol: context init, partial updates,
//! persistence, and the dispatch events the tag library will drain.

use serde_json::json;

use consentry::{
    ConsentConfig, ConsentManager, DispatchRegistry, FileKvStore, MemoryKvStore, SignalId,
};

fn manager(registry: &DispatchRegistry) -> ConsentManager<MemoryKvStore> {
    ConsentManager::new(&ConsentConfig::default(), MemoryKvStore::new(), registry)
}

#[test]
fn update_reflects_in_view_and_queue() {
    let registry = DispatchRegistry::new();
    let mut manager = manager(&registry);

    manager.update_consent([("ad_storage", true)]);

    let view = manager.consent();
    let ad = view
        .tracking
        .signals
        .iter()
        .find(|s| s.id == SignalId::AdStorage)
        .unwrap();
    assert!(ad.checked);

    let queue = registry.queue("dataLayer");
    let events = queue.snapshot();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0][0], json!("consent"));
    assert_eq!(events[0][1], json!("update"));
    let map = events[0][2].as_object().unwrap();
    assert_eq!(map.len(), SignalId::ALL.len());
    assert_eq!(map["ad_storage"], json!(true));
    assert_eq!(map["analytics_storage"], json!(false));
    assert_eq!(map["security_storage"], json!(true));
}

#[test]
fn each_update_dispatches_exactly_one_event_in_order() {
    let registry = DispatchRegistry::new();
    let mut manager = manager(&registry);

    manager.update_consent([("ad_storage", true)]);
    manager.update_consent([("ad_storage", false), ("analytics_storage", true)]);

    let events = registry.queue("dataLayer").snapshot();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0][2]["ad_storage"], json!(true));
    assert_eq!(events[1][2]["ad_storage"], json!(false));
    assert_eq!(events[1][2]["analytics_storage"], json!(true));
}

#[test]
fn dispatch_event_is_independent_of_consent() {
    let registry = DispatchRegistry::new();
    let manager = manager(&registry);

    manager.dispatch_event("page_view", json!({"path": "/privacy"}));

    let events = registry.queue("dataLayer").snapshot();
    assert_eq!(
        events,
        vec![vec![
            json!("event"),
            json!("page_view"),
            json!({"path": "/privacy"})
        ]]
    );
}

#[test]
fn unknown_ids_apply_partially() {
    let registry = DispatchRegistry::new();
    let mut manager = manager(&registry);

    manager.update_consent([("analytics_storage", true), ("geo_storage", true)]);

    assert!(manager.granted(SignalId::AnalyticsStorage));
    let events = registry.queue("dataLayer").snapshot();
    assert_eq!(events.len(), 1);
    assert!(events[0][2].as_object().unwrap().get("geo_storage").is_none());
}

#[test]
fn consent_survives_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.json");
    let config = ConsentConfig::default();

    {
        let registry = DispatchRegistry::new();
        let mut manager = ConsentManager::new(&config, FileKvStore::open(&path), &registry);
        manager.update_consent([("ad_user_data", true)]);
    }

    let registry = DispatchRegistry::new();
    let manager = ConsentManager::new(&config, FileKvStore::open(&path), &registry);
    assert!(manager.granted(SignalId::AdUserData));
    assert!(!manager.granted(SignalId::AdStorage));
}

#[test]
fn expired_record_starts_a_fresh_default_deny_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.json");
    let config = ConsentConfig {
        retention_secs: -1,
        ..ConsentConfig::default()
    };

    {
        let registry = DispatchRegistry::new();
        let mut manager = ConsentManager::new(&config, FileKvStore::open(&path), &registry);
        manager.update_consent([("ad_storage", true)]);
    }

    let registry = DispatchRegistry::new();
    let manager = ConsentManager::new(&config, FileKvStore::open(&path), &registry);
    assert!(!manager.granted(SignalId::AdStorage));
}

#[test]
fn managers_share_an_installed_dispatcher() {
    let registry = DispatchRegistry::new();
    let first = registry.get_dispatcher("dataLayer", "gtag");
    let mut manager = manager(&registry);
    manager.update_consent([("ad_storage", true)]);

    // The manager resolved the already-installed dispatcher, so the
    // event landed in the same queue.
    let second = registry.get_dispatcher("dataLayer", "gtag");
    assert!(first.same_identity(&second));
    assert_eq!(registry.queue("dataLayer").len(), 1);
}
