use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use thinhook_core::OrderId;

/// An order record as stored in the backing store (`ord_` namespace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created: NaiveDate,
    pub num_items: u32,
    /// Total in smallest currency unit (cents).
    pub cost_cents: u64,
    pub delivery_date: NaiveDate,
}
