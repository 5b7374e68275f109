//! Normalized entity cache
//!
//! Query results are stored the way a GraphQL client cache stores them: each
//! entity once under its `(typename, identity)` key, and each query root as the
//! ordered list of keys it returned. The cache has no eviction; it lives as
//! long as the client that owns it.

use graphql_client::Entity;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// Key of a normalized entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey {
    /// GraphQL type name
    pub typename: &'static str,
    /// Identity within the type
    pub id: String,
}

impl EntityKey {
    /// Key for an entity value
    pub fn of<E: Entity>(entity: &E) -> Self {
        Self {
            typename: E::TYPENAME,
            id: entity.identity(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.typename, self.id)
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    entities: HashMap<EntityKey, Value>,
    roots: HashMap<&'static str, Vec<EntityKey>>,
}

/// In-memory normalized cache
#[derive(Debug, Default)]
pub struct NormalizedCache {
    inner: RwLock<CacheInner>,
}

impl NormalizedCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a list result under its root field
    ///
    /// Entities already present are merged field by field, so a record
    /// reached through two roots is kept once. Items sharing an identity
    /// within one list collapse the same way: the later item's fields win
    /// and the root reads back that merged record at each position.
    pub fn write_list<E: Entity>(
        &self,
        root_field: &'static str,
        items: &[E],
    ) -> Result<(), serde_json::Error> {
        let mut normalized = Vec::with_capacity(items.len());
        for item in items {
            normalized.push((EntityKey::of(item), serde_json::to_value(item)?));
        }

        let mut inner = self.inner.write();
        let mut keys = Vec::with_capacity(normalized.len());
        for (key, value) in normalized {
            match inner.entities.entry(key.clone()) {
                Entry::Occupied(mut slot) => merge(slot.get_mut(), value),
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
            }
            keys.push(key);
        }
        inner.roots.insert(root_field, keys);
        Ok(())
    }

    /// Read a list result back, in the order it was written
    ///
    /// Returns `None` when the root was never written or one of its
    /// entities is gone.
    pub fn read_list<E: Entity>(&self, root_field: &str) -> Option<Vec<E>> {
        let inner = self.inner.read();
        let keys = inner.roots.get(root_field)?;

        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            let value = inner.entities.get(key)?;
            match serde_json::from_value(value.clone()) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!("Cached entity {} no longer decodes: {}", key, e);
                    return None;
                }
            }
        }
        Some(items)
    }

    /// Raw stored value of an entity
    pub fn entity(&self, key: &EntityKey) -> Option<Value> {
        self.inner.read().entities.get(key).cloned()
    }

    /// Check if a root has been written
    pub fn contains_root(&self, root_field: &str) -> bool {
        self.inner.read().roots.contains_key(root_field)
    }

    /// Number of distinct entities stored
    pub fn entity_count(&self) -> usize {
        self.inner.read().entities.len()
    }

    /// Drop everything
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entities.clear();
        inner.roots.clear();
    }
}

/// Merge `incoming` into `existing`, object fields overwriting one by one
fn merge(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(current), Value::Object(fields)) => {
            for (field, value) in fields {
                current.insert(field, value);
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_client::test_utils::{customers, orders};
    use graphql_client::{Customer, Order};
    use serde_json::json;

    #[test]
    fn test_entity_key_display() {
        let key = EntityKey::of(&customers::ana());
        assert_eq!(key.to_string(), "Customer:a@x.com/Ana");
    }

    #[test]
    fn test_write_then_read_preserves_order() {
        let cache = NormalizedCache::new();
        cache.write_list("getCustomers", &[customers::bo(), customers::ana()]).unwrap();

        let read: Vec<Customer> = cache.read_list("getCustomers").unwrap();
        assert_eq!(read, vec![customers::bo(), customers::ana()]);
        assert!(cache.contains_root("getCustomers"));
        assert!(!cache.contains_root("getOrders"));
    }

    #[test]
    fn test_unknown_root_is_none() {
        let cache = NormalizedCache::new();
        assert!(cache.read_list::<Order>("getOrders").is_none());
    }

    #[test]
    fn test_entities_are_stored_once() {
        let cache = NormalizedCache::new();
        cache.write_list("getCustomers", &customers::pair()).unwrap();
        cache.write_list("getCustomers", &customers::pair()).unwrap();
        assert_eq!(cache.entity_count(), 2);

        // Same name, different email is a different customer
        let other_ana = Customer {
            name: "Ana".to_string(),
            email: "ana@elsewhere.com".to_string(),
        };
        cache.write_list("getCustomers", &[customers::ana(), other_ana]).unwrap();
        assert_eq!(cache.entity_count(), 3);
    }

    #[test]
    fn test_duplicate_identity_in_one_list_reads_back_merged() {
        let cache = NormalizedCache::new();
        let first = orders::order("1Z1", "Leeds", "UPS");
        let second = orders::order("1Z1", "York", "DHL");
        cache.write_list("getOrders", &[first, second.clone()]).unwrap();

        assert_eq!(cache.entity_count(), 1);
        let read: Vec<Order> = cache.read_list("getOrders").unwrap();
        assert_eq!(read, vec![second.clone(), second]);
    }

    #[test]
    fn test_rewrite_updates_entity_fields() {
        let cache = NormalizedCache::new();
        let mut order = orders::order("1Z1", "Leeds", "UPS");
        cache.write_list("getOrders", &[order.clone()]).unwrap();

        order.carrier = "DHL".to_string();
        cache.write_list("getOrders", &[order.clone()]).unwrap();

        let stored = cache.entity(&EntityKey::of(&order)).unwrap();
        assert_eq!(stored["carrier"], json!("DHL"));
        assert_eq!(cache.entity_count(), 1);
    }

    #[test]
    fn test_merge_keeps_unrelated_fields() {
        let mut existing = json!({ "a": 1, "b": 2 });
        merge(&mut existing, json!({ "b": 3, "c": 4 }));
        assert_eq!(existing, json!({ "a": 1, "b": 3, "c": 4 }));
    }

    #[test]
    fn test_clear() {
        let cache = NormalizedCache::new();
        cache.write_list("getCustomers", &customers::pair()).unwrap();
        cache.clear();
        assert_eq!(cache.entity_count(), 0);
        assert!(!cache.contains_root("getCustomers"));
    }
}
