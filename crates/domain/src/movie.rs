use serde::{Deserialize, Serialize};

use thinhook_core::MovieId;

/// A movie record as stored in the backing store (`mov_` namespace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub release_year: i32,
}
