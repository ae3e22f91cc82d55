use serde::{Deserialize, Serialize};

use thinhook_core::EventResult;

/// Non-owning pointer to a domain object in the store's id space.
///
/// Carries no ownership, only a lookup key; the `kind` hint is informational
/// and lookups route on the id's namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedObjectRef {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl RelatedObjectRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
        }
    }

    pub fn with_kind(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: Some(kind.into()),
        }
    }
}

/// A thin-event envelope as delivered to consumers.
///
/// Wire format: `{ id, type, relatedObject? }`. No other top-level fields are
/// part of the contract; unrecognized ones are ignored. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinEnvelope {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(
        rename = "relatedObject",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    related_object: Option<RelatedObjectRef>,
}

impl ThinEnvelope {
    pub fn new(
        id: impl Into<String>,
        event_type: impl Into<String>,
        related_object: Option<RelatedObjectRef>,
    ) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
            related_object,
        }
    }

    /// Parse a raw wire payload into a validated envelope.
    ///
    /// Requires `id` and `type` present and string-typed; `relatedObject`
    /// passes through unchanged. The tag is NOT checked against the closed
    /// kind set here: unrecognized tags are legal envelopes that simply have
    /// no registered handler downstream (open dispatch, closed handling).
    pub fn parse(raw: &str) -> EventResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Raw event id. Namespace validation happens at lookup time, not here.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw event-type tag.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn related_object(&self) -> Option<&RelatedObjectRef> {
        self.related_object.as_ref()
    }

    pub fn into_parts(self) -> (String, String, Option<RelatedObjectRef>) {
        (self.id, self.event_type, self.related_object)
    }
}
