//! Backing-store abstraction (consumed interface).
//!
//! The store is a synchronous key-value lookup over raw ids, returning opaque
//! records. It is namespace-agnostic: callers validate id prefixes before
//! looking anything up. From this core's perspective the store is shared and
//! read-only; capabilities never write through it.

use std::sync::Arc;

use serde_json::Value as JsonValue;

/// Synchronous lookup over the shared id space.
///
/// Records come back as opaque JSON values; decoding them into typed shapes is
/// the resolver's job, not the store's.
pub trait Store: Send + Sync {
    /// Fetch the record stored under `id`, or `None` if absent.
    fn get_by_id(&self, id: &str) -> Option<JsonValue>;
}

impl<S> Store for Arc<S>
where
    S: Store + ?Sized,
{
    fn get_by_id(&self, id: &str) -> Option<JsonValue> {
        (**self).get_by_id(id)
    }
}
