//! The closed set of event kinds and their payload schemas.
//!
//! Each kind uniquely determines the shape of its `data` payload and whether a
//! related object is mandatory. Envelopes with tags outside this set are still
//! legal on the wire; they just have no typed payload here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use thinhook_core::EventId;

use crate::envelope::RelatedObjectRef;

/// Closed set of event-type tags.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    OrderShipped,
    OrderDeliveryAttempted,
    OrderLost,
    MovieStarted,
    MovieCompleted,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::OrderShipped,
        EventKind::OrderDeliveryAttempted,
        EventKind::OrderLost,
        EventKind::MovieStarted,
        EventKind::MovieCompleted,
    ];

    /// Stable wire tag for this kind.
    pub fn as_tag(self) -> &'static str {
        match self {
            EventKind::OrderShipped => "order.shipped",
            EventKind::OrderDeliveryAttempted => "order.delivery_attempted",
            EventKind::OrderLost => "order.lost",
            EventKind::MovieStarted => "movie.started",
            EventKind::MovieCompleted => "movie.completed",
        }
    }

    /// Map a raw tag back into the closed set. `None` for unrecognized tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "order.shipped" => Some(EventKind::OrderShipped),
            "order.delivery_attempted" => Some(EventKind::OrderDeliveryAttempted),
            "order.lost" => Some(EventKind::OrderLost),
            "movie.started" => Some(EventKind::MovieStarted),
            "movie.completed" => Some(EventKind::MovieCompleted),
            _ => None,
        }
    }

    /// Whether this kind mandates a related object on its envelope.
    pub fn has_relation(self) -> bool {
        !matches!(self, EventKind::OrderLost)
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Payload of `order.shipped`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderShippedData {
    pub shipping_service: String,
}

/// Payload of `order.delivery_attempted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDeliveryAttemptedData {
    pub success: bool,
    pub attempt_num: u32,
    pub delivery_location: String,
}

/// Payload of `order.lost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLostData {
    pub last_seen_city: String,
}

/// Payload of `movie.started`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieStartedData {
    pub date: NaiveDate,
}

/// Payload of `movie.completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieCompletedData {
    pub user: String,
    pub rating: u32,
}

/// Full `order.shipped` event: envelope fields plus payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderShippedEvent {
    pub id: EventId,
    #[serde(rename = "relatedObject")]
    pub related_object: RelatedObjectRef,
    pub data: OrderShippedData,
}

/// Full `order.delivery_attempted` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDeliveryAttemptedEvent {
    pub id: EventId,
    #[serde(rename = "relatedObject")]
    pub related_object: RelatedObjectRef,
    pub data: OrderDeliveryAttemptedData,
}

/// Full `order.lost` event. This kind carries no relation by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLostEvent {
    pub id: EventId,
    pub data: OrderLostData,
}

/// Full `movie.started` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieStartedEvent {
    pub id: EventId,
    #[serde(rename = "relatedObject")]
    pub related_object: RelatedObjectRef,
    pub data: MovieStartedData,
}

/// Full `movie.completed` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieCompletedEvent {
    pub id: EventId,
    #[serde(rename = "relatedObject")]
    pub related_object: RelatedObjectRef,
    pub data: MovieCompletedData,
}

/// Union of the full (materialized) events, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullEvent {
    OrderShipped(OrderShippedEvent),
    OrderDeliveryAttempted(OrderDeliveryAttemptedEvent),
    OrderLost(OrderLostEvent),
    MovieStarted(MovieStartedEvent),
    MovieCompleted(MovieCompletedEvent),
}

impl FullEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            FullEvent::OrderShipped(_) => EventKind::OrderShipped,
            FullEvent::OrderDeliveryAttempted(_) => EventKind::OrderDeliveryAttempted,
            FullEvent::OrderLost(_) => EventKind::OrderLost,
            FullEvent::MovieStarted(_) => EventKind::MovieStarted,
            FullEvent::MovieCompleted(_) => EventKind::MovieCompleted,
        }
    }

    pub fn id(&self) -> &EventId {
        match self {
            FullEvent::OrderShipped(e) => &e.id,
            FullEvent::OrderDeliveryAttempted(e) => &e.id,
            FullEvent::OrderLost(e) => &e.id,
            FullEvent::MovieStarted(e) => &e.id,
            FullEvent::MovieCompleted(e) => &e.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_the_closed_set() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_tag(kind.as_tag()), Some(kind));
        }
    }

    #[test]
    fn unrecognized_tags_map_to_none() {
        assert_eq!(EventKind::from_tag("promo.sent"), None);
        assert_eq!(EventKind::from_tag("order.shiped"), None);
        assert_eq!(EventKind::from_tag(""), None);
    }

    #[test]
    fn only_order_lost_lacks_a_relation() {
        for kind in EventKind::ALL {
            assert_eq!(kind.has_relation(), kind != EventKind::OrderLost);
        }
    }

    #[test]
    fn payload_schemas_decode_from_wire_shapes() {
        let data: OrderDeliveryAttemptedData = serde_json::from_value(serde_json::json!({
            "success": true,
            "attempt_num": 2,
            "delivery_location": "front porch"
        }))
        .unwrap();
        assert!(data.success);
        assert_eq!(data.attempt_num, 2);

        let data: MovieStartedData =
            serde_json::from_value(serde_json::json!({ "date": "2025-06-01" })).unwrap();
        assert_eq!(data.date.to_string(), "2025-06-01");
    }
}
