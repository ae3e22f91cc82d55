//! `thinhook-domain` — domain records referenced by thin events.
//!
//! Pure data shapes only; fetching lives in `thinhook-events`.

pub mod movie;
pub mod object;
pub mod order;

pub use movie::Movie;
pub use object::DomainObject;
pub use order::Order;
