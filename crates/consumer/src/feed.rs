//! Sample inbound feed.
//!
//! Stands in for the external process that supplies raw envelopes; one thin
//! envelope per seeded event record, in delivery order.

/// Raw wire envelopes for the seeded sample events.
pub fn sample_feed() -> Vec<String> {
    [
        r#"{"id":"evt_441","type":"order.shipped","relatedObject":{"id":"ord_452","type":"order"}}"#,
        r#"{"id":"evt_631","type":"order.delivery_attempted","relatedObject":{"id":"ord_452","type":"order"}}"#,
        r#"{"id":"evt_849","type":"order.lost"}"#,
        r#"{"id":"evt_509","type":"movie.started","relatedObject":{"id":"mov_261","type":"movie"}}"#,
        r#"{"id":"evt_606","type":"movie.completed","relatedObject":{"id":"mov_261","type":"movie"}}"#,
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
