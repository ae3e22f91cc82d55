//! In-memory store for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::{Value as JsonValue, json};

use crate::store::Store;

/// HashMap-backed store.
///
/// - No IO / no async
/// - Substitutable for any real backend behind the `Store` trait
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, JsonValue>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a record under a raw id.
    pub fn insert(&self, id: impl Into<String>, record: JsonValue) {
        if let Ok(mut records) = self.records.write() {
            records.insert(id.into(), record);
        }
    }

    /// Store pre-loaded with the sample event, order, and movie records.
    pub fn seeded() -> Self {
        let store = Self::new();

        store.insert(
            "evt_441",
            json!({
                "id": "evt_441",
                "type": "order.shipped",
                "relatedObject": { "id": "ord_452", "type": "order" },
                "data": { "shipping_service": "usps" }
            }),
        );
        store.insert(
            "evt_631",
            json!({
                "id": "evt_631",
                "type": "order.delivery_attempted",
                "relatedObject": { "id": "ord_452", "type": "order" },
                "data": {
                    "success": true,
                    "attempt_num": 2,
                    "delivery_location": "front porch"
                }
            }),
        );
        store.insert(
            "evt_849",
            json!({
                "id": "evt_849",
                "type": "order.lost",
                "data": { "last_seen_city": "Boulder" }
            }),
        );
        store.insert(
            "evt_509",
            json!({
                "id": "evt_509",
                "type": "movie.started",
                "relatedObject": { "id": "mov_261", "type": "movie" },
                "data": { "date": "2025-06-01" }
            }),
        );
        store.insert(
            "evt_606",
            json!({
                "id": "evt_606",
                "type": "movie.completed",
                "relatedObject": { "id": "mov_261", "type": "movie" },
                "data": { "user": "usr_223", "rating": 4 }
            }),
        );
        store.insert(
            "ord_452",
            json!({
                "id": "ord_452",
                "created": "2025-05-09",
                "num_items": 5,
                "cost_cents": 300,
                "delivery_date": "2025-06-09"
            }),
        );
        store.insert(
            "mov_261",
            json!({
                "id": "mov_261",
                "title": "Kung Fu Panda",
                "release_year": 2008
            }),
        );

        store
    }
}

impl Store for InMemoryStore {
    fn get_by_id(&self, id: &str) -> Option<JsonValue> {
        // A poisoned lock reads as "nothing stored" rather than panicking.
        self.records.read().ok()?.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_returns_the_record() {
        let store = InMemoryStore::new();
        store.insert("evt_1", json!({ "id": "evt_1", "type": "order.lost" }));

        let record = store.get_by_id("evt_1").unwrap();
        assert_eq!(record["type"], "order.lost");
    }

    #[test]
    fn get_on_absent_id_returns_none() {
        let store = InMemoryStore::new();
        assert!(store.get_by_id("evt_404").is_none());
    }

    #[test]
    fn seeded_store_holds_events_and_domain_objects() {
        let store = InMemoryStore::seeded();
        for id in ["evt_441", "evt_631", "evt_849", "evt_509", "evt_606", "ord_452", "mov_261"] {
            assert!(store.get_by_id(id).is_some(), "missing seed record {id}");
        }
    }

    #[test]
    fn the_store_is_namespace_agnostic() {
        // Prefix discipline is the resolver's job; the store happily serves
        // any raw id it holds.
        let store = InMemoryStore::new();
        store.insert("usr_9", json!({ "id": "usr_9" }));
        assert!(store.get_by_id("usr_9").is_some());
    }
}
