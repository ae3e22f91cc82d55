//! End-to-end tests for the codec → resolver → registry pipeline.
//!
//! Runs raw envelopes against a seeded in-memory store, the way a consumer
//! process would: handlers pull full data or fetch related objects on demand,
//! one envelope at a time, fail-fast.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use thinhook_core::EventError;
use thinhook_events::{HandlerRegistry, InMemoryStore};

fn seeded_registry() -> HandlerRegistry {
    HandlerRegistry::new(Arc::new(InMemoryStore::seeded()))
}

/// Raw envelopes for every seeded event record, in delivery order.
fn sample_feed() -> Vec<&'static str> {
    vec![
        r#"{"id":"evt_441","type":"order.shipped","relatedObject":{"id":"ord_452","type":"order"}}"#,
        r#"{"id":"evt_631","type":"order.delivery_attempted","relatedObject":{"id":"ord_452","type":"order"}}"#,
        r#"{"id":"evt_849","type":"order.lost"}"#,
        r#"{"id":"evt_509","type":"movie.started","relatedObject":{"id":"mov_261","type":"movie"}}"#,
        r#"{"id":"evt_606","type":"movie.completed","relatedObject":{"id":"mov_261","type":"movie"}}"#,
    ]
}

#[test]
fn shipped_handler_fetches_the_related_order() {
    let mut registry = seeded_registry();
    let num_items = Rc::new(RefCell::new(None));

    let out = Rc::clone(&num_items);
    registry
        .on_order_shipped(move |event| {
            let order = event.fetch_related_object()?;
            *out.borrow_mut() = Some(order.num_items);
            Ok(())
        })
        .unwrap();

    registry
        .dispatch(r#"{"id":"evt_441","type":"order.shipped","relatedObject":{"id":"ord_452"}}"#)
        .unwrap();

    assert_eq!(*num_items.borrow(), Some(5));
}

#[test]
fn lost_handler_pulls_data_but_has_no_relation() {
    let mut registry = seeded_registry();
    let city = Rc::new(RefCell::new(None));

    let out = Rc::clone(&city);
    registry
        .on_order_lost(move |event| {
            let full = event.pull()?;
            *out.borrow_mut() = Some(full.data.last_seen_city);
            Ok(())
        })
        .unwrap();

    registry
        .dispatch(r#"{"id":"evt_849","type":"order.lost"}"#)
        .unwrap();
    assert_eq!(city.borrow().as_deref(), Some("Boulder"));

    // The union-level related fetch on the same envelope is a typed failure.
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::seeded());
    let resolver = thinhook_events::EventResolver::new(store);
    let pushed = resolver
        .resolve(
            thinhook_events::ThinEnvelope::parse(r#"{"id":"evt_849","type":"order.lost"}"#)
                .unwrap(),
        )
        .unwrap();
    assert_eq!(
        pushed.fetch_related_object().unwrap_err(),
        EventError::MissingRelation
    );
}

#[test]
fn unregistered_tag_fails_and_runs_no_handler() {
    let mut registry = seeded_registry();
    let ran = Rc::new(RefCell::new(false));

    let flag = Rc::clone(&ran);
    registry
        .on_order_shipped(move |_| {
            *flag.borrow_mut() = true;
            Ok(())
        })
        .unwrap();

    let err = registry
        .dispatch(r#"{"id":"evt_910","type":"promo.sent"}"#)
        .unwrap_err();

    assert_eq!(err, EventError::unhandled_type("promo.sent"));
    assert!(!*ran.borrow());
}

#[test]
fn full_feed_processes_in_delivery_order() {
    let mut registry = seeded_registry();
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let out = Rc::clone(&log);
    registry
        .on_order_shipped(move |event| {
            let order = event.fetch_related_object()?;
            out.borrow_mut()
                .push(format!("shipped order with {} items", order.num_items));
            Ok(())
        })
        .unwrap();
    let out = Rc::clone(&log);
    registry
        .on_order_delivery_attempted(move |event| {
            let full = event.pull()?;
            out.borrow_mut()
                .push(format!("delivery attempt {}", full.data.attempt_num));
            Ok(())
        })
        .unwrap();
    let out = Rc::clone(&log);
    registry
        .on_order_lost(move |event| {
            let full = event.pull()?;
            out.borrow_mut()
                .push(format!("lost near {}", full.data.last_seen_city));
            Ok(())
        })
        .unwrap();
    let out = Rc::clone(&log);
    registry
        .on_movie_started(move |event| {
            let movie = event.fetch_related_object()?;
            out.borrow_mut().push(format!("started {}", movie.title));
            Ok(())
        })
        .unwrap();
    let out = Rc::clone(&log);
    registry
        .on_movie_completed(move |event| {
            let full = event.pull()?;
            let movie = event.fetch_related_object()?;
            out.borrow_mut().push(format!(
                "{} rated {} {}/4",
                full.data.user, movie.title, full.data.rating
            ));
            Ok(())
        })
        .unwrap();

    for raw in sample_feed() {
        registry.dispatch(raw).unwrap();
    }

    assert_eq!(
        *log.borrow(),
        vec![
            "shipped order with 5 items".to_string(),
            "delivery attempt 2".to_string(),
            "lost near Boulder".to_string(),
            "started Kung Fu Panda".to_string(),
            "usr_223 rated Kung Fu Panda 4/4".to_string(),
        ]
    );
}

#[test]
fn feed_processing_is_fail_fast() {
    let mut registry = seeded_registry();
    let handled = Rc::new(RefCell::new(0u32));

    let count = Rc::clone(&handled);
    registry
        .on_order_shipped(move |_| {
            *count.borrow_mut() += 1;
            Ok(())
        })
        .unwrap();

    // Second envelope has no handler; the loop must stop there and the third
    // must never be dispatched.
    let feed = [
        r#"{"id":"evt_441","type":"order.shipped","relatedObject":{"id":"ord_452"}}"#,
        r#"{"id":"evt_849","type":"order.lost"}"#,
        r#"{"id":"evt_441","type":"order.shipped","relatedObject":{"id":"ord_452"}}"#,
    ];

    let mut failure = None;
    for raw in feed {
        if let Err(err) = registry.dispatch(raw) {
            failure = Some(err);
            break;
        }
    }

    assert_eq!(failure, Some(EventError::unhandled_type("order.lost")));
    assert_eq!(*handled.borrow(), 1);
}
