//! Optional price ordering of result buckets.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Itinerary;

/// Requested ordering by total price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Cheapest first.
    Asc,
    /// Most expensive first.
    Desc,
}

/// Error parsing a sort order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order {0:?}, expected \"asc\" or \"desc\"")]
pub struct InvalidSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = InvalidSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(InvalidSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Stable sort by total price. Category tags stay with their entries.
pub fn sort_by_price(bucket: &mut [Itinerary], order: SortOrder) {
    match order {
        SortOrder::Asc => bucket.sort_by_key(|it| it.total_price()),
        SortOrder::Desc => bucket.sort_by_key(|it| Reverse(it.total_price())),
    }
}
