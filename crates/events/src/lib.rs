//! `thinhook-events` — thin-event envelopes, lazy resolution, typed dispatch.
//!
//! Data flow: raw wire payload → [`ThinEnvelope::parse`] → [`EventResolver`]
//! attaches `pull`/`fetch_related_object` capabilities → [`HandlerRegistry`]
//! routes the pushed event to exactly one registered handler (or the
//! fallback). Everything is synchronous and processed strictly in delivery
//! order; the [`Store`] is the only external collaborator.

pub mod envelope;
pub mod event;
pub mod in_memory_store;
pub mod registry;
pub mod resolver;
pub mod store;

pub use envelope::{RelatedObjectRef, ThinEnvelope};
pub use event::{
    EventKind, FullEvent, MovieCompletedData, MovieCompletedEvent, MovieStartedData,
    MovieStartedEvent, OrderDeliveryAttemptedData, OrderDeliveryAttemptedEvent, OrderLostData,
    OrderLostEvent, OrderShippedData, OrderShippedEvent,
};
pub use in_memory_store::InMemoryStore;
pub use registry::HandlerRegistry;
pub use resolver::{
    EventResolver, MovieCompletedPushed, MovieStartedPushed, OrderDeliveryAttemptedPushed,
    OrderLostPushed, OrderShippedPushed, PushedEvent, UnrecognizedPushed,
};
pub use store::Store;
