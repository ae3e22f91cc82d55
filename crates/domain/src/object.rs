use serde::{Deserialize, Serialize};

use crate::{Movie, Order};

/// Union of the domain objects an event can reference.
///
/// Typed pushed events return `Order`/`Movie` directly; this union exists for
/// the kind-agnostic paths (the dispatch fallback, generic tooling) where the
/// referenced kind is only known from the id prefix at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainObject {
    Order(Order),
    Movie(Movie),
}

impl DomainObject {
    pub fn as_order(&self) -> Option<&Order> {
        match self {
            DomainObject::Order(order) => Some(order),
            DomainObject::Movie(_) => None,
        }
    }

    pub fn as_movie(&self) -> Option<&Movie> {
        match self {
            DomainObject::Movie(movie) => Some(movie),
            DomainObject::Order(_) => None,
        }
    }

    /// Raw id of the underlying record.
    pub fn id(&self) -> &str {
        match self {
            DomainObject::Order(order) => order.id.as_str(),
            DomainObject::Movie(movie) => movie.id.as_str(),
        }
    }
}

impl From<Order> for DomainObject {
    fn from(value: Order) -> Self {
        Self::Order(value)
    }
}

impl From<Movie> for DomainObject {
    fn from(value: Movie) -> Self {
        Self::Movie(value)
    }
}
