//! Type-keyed handler registry and dispatch.
//!
//! One handler slot per event kind, bound exactly once; dispatch routes each
//! raw envelope through the codec and resolver, then through a single
//! exhaustive match, so a new [`EventKind`] variant fails to compile until it
//! has a dispatch path. Handler failures propagate to the dispatch caller
//! unmodified: no retry, no dead-lettering here.

use std::sync::Arc;

use tracing::debug;

use thinhook_core::{EventError, EventResult};

use crate::envelope::ThinEnvelope;
use crate::event::EventKind;
use crate::resolver::{
    EventResolver, MovieCompletedPushed, MovieStartedPushed, OrderDeliveryAttemptedPushed,
    OrderLostPushed, OrderShippedPushed, PushedEvent,
};
use crate::store::Store;

type Handler<E> = Box<dyn FnMut(E) -> EventResult<()>>;

/// Dispatch table mapping each event kind to at most one handler.
///
/// Handlers receive the capability-augmented pushed event, never the resolved
/// full event; whether and when to `pull()` stays the handler's choice.
pub struct HandlerRegistry {
    resolver: EventResolver,
    order_shipped: Option<Handler<OrderShippedPushed>>,
    order_delivery_attempted: Option<Handler<OrderDeliveryAttemptedPushed>>,
    order_lost: Option<Handler<OrderLostPushed>>,
    movie_started: Option<Handler<MovieStartedPushed>>,
    movie_completed: Option<Handler<MovieCompletedPushed>>,
    fallback: Option<Handler<PushedEvent>>,
}

macro_rules! register_method {
    ($method:ident, $slot:ident, $pushed:ty, $kind:expr) => {
        #[doc = concat!(
            "Bind a handler for `",
            stringify!($slot),
            "` events.\n\nRegistration is one-shot per kind: a second call fails \
             `DuplicateRegistration` regardless of handler identity."
        )]
        pub fn $method<F>(&mut self, handler: F) -> EventResult<&mut Self>
        where
            F: FnMut($pushed) -> EventResult<()> + 'static,
        {
            if self.$slot.is_some() {
                return Err(EventError::duplicate_registration($kind.as_tag()));
            }
            self.$slot = Some(Box::new(handler));
            Ok(self)
        }
    };
}

impl HandlerRegistry {
    /// New registry bound to a store; no handlers registered yet.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            resolver: EventResolver::new(store),
            order_shipped: None,
            order_delivery_attempted: None,
            order_lost: None,
            movie_started: None,
            movie_completed: None,
            fallback: None,
        }
    }

    register_method!(
        on_order_shipped,
        order_shipped,
        OrderShippedPushed,
        EventKind::OrderShipped
    );
    register_method!(
        on_order_delivery_attempted,
        order_delivery_attempted,
        OrderDeliveryAttemptedPushed,
        EventKind::OrderDeliveryAttempted
    );
    register_method!(on_order_lost, order_lost, OrderLostPushed, EventKind::OrderLost);
    register_method!(
        on_movie_started,
        movie_started,
        MovieStartedPushed,
        EventKind::MovieStarted
    );
    register_method!(
        on_movie_completed,
        movie_completed,
        MovieCompletedPushed,
        EventKind::MovieCompleted
    );

    /// Override the fallback invoked for events with no registered handler.
    ///
    /// The default fallback fails with `UnhandledType`.
    pub fn set_fallback<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(PushedEvent) -> EventResult<()> + 'static,
    {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Parse, resolve, and route one raw envelope.
    ///
    /// Exactly one handler (or the fallback) runs, synchronously. Parse,
    /// resolution, and handler failures all surface to the caller.
    pub fn dispatch(&mut self, raw: &str) -> EventResult<()> {
        let envelope = ThinEnvelope::parse(raw)?;
        let pushed = self.resolver.resolve(envelope)?;
        debug!(tag = pushed.tag(), id = pushed.id(), "dispatching event");

        match pushed {
            PushedEvent::OrderShipped(ev) => match self.order_shipped.as_mut() {
                Some(handler) => handler(ev),
                None => Self::run_fallback(&mut self.fallback, PushedEvent::OrderShipped(ev)),
            },
            PushedEvent::OrderDeliveryAttempted(ev) => {
                match self.order_delivery_attempted.as_mut() {
                    Some(handler) => handler(ev),
                    None => Self::run_fallback(
                        &mut self.fallback,
                        PushedEvent::OrderDeliveryAttempted(ev),
                    ),
                }
            }
            PushedEvent::OrderLost(ev) => match self.order_lost.as_mut() {
                Some(handler) => handler(ev),
                None => Self::run_fallback(&mut self.fallback, PushedEvent::OrderLost(ev)),
            },
            PushedEvent::MovieStarted(ev) => match self.movie_started.as_mut() {
                Some(handler) => handler(ev),
                None => Self::run_fallback(&mut self.fallback, PushedEvent::MovieStarted(ev)),
            },
            PushedEvent::MovieCompleted(ev) => match self.movie_completed.as_mut() {
                Some(handler) => handler(ev),
                None => Self::run_fallback(&mut self.fallback, PushedEvent::MovieCompleted(ev)),
            },
            unrecognized @ PushedEvent::Unrecognized(_) => {
                Self::run_fallback(&mut self.fallback, unrecognized)
            }
        }
    }

    fn run_fallback(
        fallback: &mut Option<Handler<PushedEvent>>,
        event: PushedEvent,
    ) -> EventResult<()> {
        match fallback.as_mut() {
            Some(handler) => handler(event),
            None => Err(EventError::unhandled_type(event.tag())),
        }
    }
}

impl core::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("order_shipped", &self.order_shipped.is_some())
            .field(
                "order_delivery_attempted",
                &self.order_delivery_attempted.is_some(),
            )
            .field("order_lost", &self.order_lost.is_some())
            .field("movie_started", &self.movie_started.is_some())
            .field("movie_completed", &self.movie_completed.is_some())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
