//! Demo consumer: registers a handler per event kind and processes the sample
//! feed against a seeded in-memory store.
//!
//! Processing is strictly in delivery order and fail-fast: the first
//! unhandled failure stops the loop and surfaces through `main`.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use thinhook_events::{HandlerRegistry, InMemoryStore};

mod feed;

fn build_registry(store: Arc<InMemoryStore>) -> anyhow::Result<HandlerRegistry> {
    let mut registry = HandlerRegistry::new(store);

    registry
        .on_order_shipped(|event| {
            let order = event.fetch_related_object()?;
            info!(
                order_id = %order.id,
                num_items = order.num_items,
                "created a database record for the shipped order"
            );
            Ok(())
        })?
        .on_order_delivery_attempted(|event| {
            let full = event.pull()?;
            info!(
                order_id = %full.related_object.id,
                attempt_num = full.data.attempt_num,
                success = full.data.success,
                "order delivery attempted"
            );
            Ok(())
        })?
        .on_order_lost(|event| {
            let full = event.pull()?;
            info!(
                last_seen_city = %full.data.last_seen_city,
                "an order was lost; no additional information"
            );
            Ok(())
        })?
        .on_movie_started(|event| {
            let movie = event.fetch_related_object()?;
            info!(title = %movie.title, "someone started watching");
            Ok(())
        })?
        .on_movie_completed(|event| {
            // Some facts live on the event, others on the related object.
            let full = event.pull()?;
            let movie = event.fetch_related_object()?;
            info!(
                user = %full.data.user,
                title = %movie.title,
                rating = full.data.rating,
                "movie finished and rated"
            );
            Ok(())
        })?;

    Ok(registry)
}

fn main() -> anyhow::Result<()> {
    thinhook_observability::init();

    let store = Arc::new(InMemoryStore::seeded());
    let mut registry = build_registry(store)?;

    for (idx, raw) in feed::sample_feed().iter().enumerate() {
        info!(idx, "processing envelope");
        registry
            .dispatch(raw)
            .with_context(|| format!("failed to handle envelope {idx}: {raw}"))?;
    }

    Ok(())
}
