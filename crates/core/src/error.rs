//! Core error model.

use thiserror::Error;

/// Result type used across the thin-event core.
pub type EventResult<T> = Result<T, EventError>;

/// Failures surfaced by the envelope codec, the resolver capabilities, and the
/// handler registry.
///
/// The core performs no local recovery: every variant propagates to the
/// immediate caller. Retries, dead-lettering and the like live outside this
/// crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// A raw envelope or a stored record did not match its expected shape.
    #[error("malformed payload: {0}")]
    Parse(String),

    /// An identifier is outside the namespace expected for the lookup.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A well-formed identifier has no record in the store.
    #[error("record not found: {0}")]
    NotFound(String),

    /// A related-object fetch was attempted on an event that carries no
    /// relation.
    #[error("event carries no related object")]
    MissingRelation,

    /// Dispatch reached an event type with no registered handler and no
    /// fallback override.
    #[error("unhandled event type: \"{0}\"")]
    UnhandledType(String),

    /// A second handler registration for an already-bound event type.
    #[error("handler already registered for event type \"{0}\"")]
    DuplicateRegistration(String),
}

impl EventError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn unhandled_type(tag: impl Into<String>) -> Self {
        Self::UnhandledType(tag.into())
    }

    pub fn duplicate_registration(tag: impl Into<String>) -> Self {
        Self::DuplicateRegistration(tag.into())
    }
}

impl From<serde_json::Error> for EventError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
