//! Lazy resolution: binding envelopes to a store as capability-augmented events.
//!
//! The resolver turns a parsed [`ThinEnvelope`] into a typed pushed event whose
//! `pull`/`fetch_related_object` capabilities close over the originating id/ref
//! and the store reference. Capabilities are bound once, at construction time;
//! nothing is fetched until a capability is explicitly invoked, and results are
//! never cached on the event.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use thinhook_core::{EventError, EventId, EventResult, MovieId, OrderId};
use thinhook_domain::{DomainObject, Movie, Order};

use crate::envelope::{RelatedObjectRef, ThinEnvelope};
use crate::event::{
    EventKind, FullEvent, MovieCompletedEvent, MovieStartedEvent, OrderDeliveryAttemptedEvent,
    OrderLostEvent, OrderShippedEvent,
};
use crate::store::Store;

/// Shared store reference bound into pushed events.
#[derive(Clone)]
struct StoreHandle(Arc<dyn Store>);

impl StoreHandle {
    fn get(&self, id: &str) -> Option<JsonValue> {
        self.0.get_by_id(id)
    }
}

impl core::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("StoreHandle")
    }
}

fn decode<T: DeserializeOwned>(record: JsonValue) -> EventResult<T> {
    Ok(serde_json::from_value(record)?)
}

/// Look up a full event record by its raw id, enforcing the `evt_` namespace.
fn fetch_event_record(store: &StoreHandle, raw_id: &str) -> EventResult<JsonValue> {
    let id = EventId::parse(raw_id)?;
    store
        .get(id.as_str())
        .ok_or_else(|| EventError::not_found(id.as_str()))
}

fn fetch_order(store: &StoreHandle, related: &RelatedObjectRef) -> EventResult<Order> {
    let id = OrderId::parse(&related.id)?;
    let record = store
        .get(id.as_str())
        .ok_or_else(|| EventError::not_found(id.as_str()))?;
    decode(record)
}

fn fetch_movie(store: &StoreHandle, related: &RelatedObjectRef) -> EventResult<Movie> {
    let id = MovieId::parse(&related.id)?;
    let record = store
        .get(id.as_str())
        .ok_or_else(|| EventError::not_found(id.as_str()))?;
    decode(record)
}

/// Kind-agnostic related-object fetch, routing on the ref id's prefix.
fn fetch_domain_object(store: &StoreHandle, related: &RelatedObjectRef) -> EventResult<DomainObject> {
    if related.id.starts_with(OrderId::PREFIX) {
        return fetch_order(store, related).map(DomainObject::from);
    }
    if related.id.starts_with(MovieId::PREFIX) {
        return fetch_movie(store, related).map(DomainObject::from);
    }
    Err(EventError::invalid_id(format!(
        "related object id \"{}\" is outside the known namespaces",
        related.id
    )))
}

macro_rules! impl_pushed_with_relation {
    ($pushed:ident, $full:ty, $related:ty, $fetch:ident, $tag:literal) => {
        #[doc = concat!("Pushed `", $tag, "` event with bound capabilities.")]
        #[derive(Debug, Clone)]
        pub struct $pushed {
            id: String,
            related_object: RelatedObjectRef,
            store: StoreHandle,
        }

        impl $pushed {
            pub fn id(&self) -> &str {
                &self.id
            }

            pub fn related_object(&self) -> &RelatedObjectRef {
                &self.related_object
            }

            /// Fetch the full event record from the store.
            ///
            /// Lazy and idempotent; repeated calls return equivalent data.
            pub fn pull(&self) -> EventResult<$full> {
                decode(fetch_event_record(&self.store, &self.id)?)
            }

            /// Fetch the referenced domain object from the store.
            pub fn fetch_related_object(&self) -> EventResult<$related> {
                $fetch(&self.store, &self.related_object)
            }
        }
    };
}

impl_pushed_with_relation!(
    OrderShippedPushed,
    OrderShippedEvent,
    Order,
    fetch_order,
    "order.shipped"
);
impl_pushed_with_relation!(
    OrderDeliveryAttemptedPushed,
    OrderDeliveryAttemptedEvent,
    Order,
    fetch_order,
    "order.delivery_attempted"
);
impl_pushed_with_relation!(
    MovieStartedPushed,
    MovieStartedEvent,
    Movie,
    fetch_movie,
    "movie.started"
);
impl_pushed_with_relation!(
    MovieCompletedPushed,
    MovieCompletedEvent,
    Movie,
    fetch_movie,
    "movie.completed"
);

/// Pushed `order.lost` event. The kind carries no relation, so the related
/// capability does not exist at this type; that absence is structural, not an
/// error.
#[derive(Debug, Clone)]
pub struct OrderLostPushed {
    id: String,
    store: StoreHandle,
}

impl OrderLostPushed {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetch the full event record from the store.
    pub fn pull(&self) -> EventResult<OrderLostEvent> {
        decode(fetch_event_record(&self.store, &self.id)?)
    }
}

/// Pushed event whose tag is outside the closed kind set.
///
/// Legal on the wire; it simply has no typed payload, so it only reaches the
/// dispatch fallback. The related object, if referenced, can still be fetched.
#[derive(Debug, Clone)]
pub struct UnrecognizedPushed {
    id: String,
    tag: String,
    related_object: Option<RelatedObjectRef>,
    store: StoreHandle,
}

impl UnrecognizedPushed {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn related_object(&self) -> Option<&RelatedObjectRef> {
        self.related_object.as_ref()
    }

    /// Fetch the referenced domain object, routing on its id prefix.
    pub fn fetch_related_object(&self) -> EventResult<DomainObject> {
        let related = self
            .related_object
            .as_ref()
            .ok_or(EventError::MissingRelation)?;
        fetch_domain_object(&self.store, related)
    }
}

/// Union of pushed events, one variant per kind plus the open-dispatch case.
#[derive(Debug, Clone)]
pub enum PushedEvent {
    OrderShipped(OrderShippedPushed),
    OrderDeliveryAttempted(OrderDeliveryAttemptedPushed),
    OrderLost(OrderLostPushed),
    MovieStarted(MovieStartedPushed),
    MovieCompleted(MovieCompletedPushed),
    Unrecognized(UnrecognizedPushed),
}

impl PushedEvent {
    pub fn id(&self) -> &str {
        match self {
            PushedEvent::OrderShipped(e) => e.id(),
            PushedEvent::OrderDeliveryAttempted(e) => e.id(),
            PushedEvent::OrderLost(e) => e.id(),
            PushedEvent::MovieStarted(e) => e.id(),
            PushedEvent::MovieCompleted(e) => e.id(),
            PushedEvent::Unrecognized(e) => e.id(),
        }
    }

    /// Wire tag of this event (the raw tag for unrecognized kinds).
    pub fn tag(&self) -> &str {
        match self {
            PushedEvent::OrderShipped(_) => EventKind::OrderShipped.as_tag(),
            PushedEvent::OrderDeliveryAttempted(_) => EventKind::OrderDeliveryAttempted.as_tag(),
            PushedEvent::OrderLost(_) => EventKind::OrderLost.as_tag(),
            PushedEvent::MovieStarted(_) => EventKind::MovieStarted.as_tag(),
            PushedEvent::MovieCompleted(_) => EventKind::MovieCompleted.as_tag(),
            PushedEvent::Unrecognized(e) => e.tag(),
        }
    }

    /// Kind within the closed set, if any.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            PushedEvent::OrderShipped(_) => Some(EventKind::OrderShipped),
            PushedEvent::OrderDeliveryAttempted(_) => Some(EventKind::OrderDeliveryAttempted),
            PushedEvent::OrderLost(_) => Some(EventKind::OrderLost),
            PushedEvent::MovieStarted(_) => Some(EventKind::MovieStarted),
            PushedEvent::MovieCompleted(_) => Some(EventKind::MovieCompleted),
            PushedEvent::Unrecognized(_) => None,
        }
    }

    pub fn related_object(&self) -> Option<&RelatedObjectRef> {
        match self {
            PushedEvent::OrderShipped(e) => Some(e.related_object()),
            PushedEvent::OrderDeliveryAttempted(e) => Some(e.related_object()),
            PushedEvent::OrderLost(_) => None,
            PushedEvent::MovieStarted(e) => Some(e.related_object()),
            PushedEvent::MovieCompleted(e) => Some(e.related_object()),
            PushedEvent::Unrecognized(e) => e.related_object(),
        }
    }

    /// Fetch the full event record, materialized as the kind's typed shape.
    ///
    /// Unrecognized tags have no payload schema in the closed set, so there is
    /// nothing to decode into.
    pub fn pull(&self) -> EventResult<FullEvent> {
        match self {
            PushedEvent::OrderShipped(e) => e.pull().map(FullEvent::OrderShipped),
            PushedEvent::OrderDeliveryAttempted(e) => {
                e.pull().map(FullEvent::OrderDeliveryAttempted)
            }
            PushedEvent::OrderLost(e) => e.pull().map(FullEvent::OrderLost),
            PushedEvent::MovieStarted(e) => e.pull().map(FullEvent::MovieStarted),
            PushedEvent::MovieCompleted(e) => e.pull().map(FullEvent::MovieCompleted),
            PushedEvent::Unrecognized(e) => Err(EventError::parse(format!(
                "no payload schema for event type \"{}\"",
                e.tag()
            ))),
        }
    }

    /// Fetch the referenced domain object.
    ///
    /// Fails `MissingRelation` on kinds that carry no relation.
    pub fn fetch_related_object(&self) -> EventResult<DomainObject> {
        match self {
            PushedEvent::OrderShipped(e) => e.fetch_related_object().map(DomainObject::from),
            PushedEvent::OrderDeliveryAttempted(e) => {
                e.fetch_related_object().map(DomainObject::from)
            }
            PushedEvent::OrderLost(_) => Err(EventError::MissingRelation),
            PushedEvent::MovieStarted(e) => e.fetch_related_object().map(DomainObject::from),
            PushedEvent::MovieCompleted(e) => e.fetch_related_object().map(DomainObject::from),
            PushedEvent::Unrecognized(e) => e.fetch_related_object(),
        }
    }
}

/// Binds parsed envelopes to a store, producing capability-augmented events.
///
/// The store reference is injected here, once; pushed events never re-bind or
/// mutate it afterwards.
#[derive(Clone)]
pub struct EventResolver {
    store: Arc<dyn Store>,
}

impl EventResolver {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Attach capabilities to an envelope.
    ///
    /// Fails `Parse` when a relation-bearing kind arrives without its
    /// `relatedObject`: the relation is a structural property of the kind, so
    /// its absence makes the envelope malformed for that tag.
    pub fn resolve(&self, envelope: ThinEnvelope) -> EventResult<PushedEvent> {
        let (id, tag, related_object) = envelope.into_parts();
        let store = StoreHandle(Arc::clone(&self.store));

        let Some(kind) = EventKind::from_tag(&tag) else {
            return Ok(PushedEvent::Unrecognized(UnrecognizedPushed {
                id,
                tag,
                related_object,
                store,
            }));
        };

        let require_related = |related: Option<RelatedObjectRef>| {
            related.ok_or_else(|| {
                EventError::parse(format!("\"{}\" envelope requires relatedObject", kind))
            })
        };

        Ok(match kind {
            EventKind::OrderShipped => PushedEvent::OrderShipped(OrderShippedPushed {
                id,
                related_object: require_related(related_object)?,
                store,
            }),
            EventKind::OrderDeliveryAttempted => {
                PushedEvent::OrderDeliveryAttempted(OrderDeliveryAttemptedPushed {
                    id,
                    related_object: require_related(related_object)?,
                    store,
                })
            }
            EventKind::OrderLost => PushedEvent::OrderLost(OrderLostPushed { id, store }),
            EventKind::MovieStarted => PushedEvent::MovieStarted(MovieStartedPushed {
                id,
                related_object: require_related(related_object)?,
                store,
            }),
            EventKind::MovieCompleted => PushedEvent::MovieCompleted(MovieCompletedPushed {
                id,
                related_object: require_related(related_object)?,
                store,
            }),
        })
    }
}

impl core::fmt::Debug for EventResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventResolver").finish_non_exhaustive()
    }
}
