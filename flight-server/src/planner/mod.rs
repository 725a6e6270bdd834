//! Itinerary planner.
//!
//! This module implements the core search that answers:
//! "Which ways are there to fly from here to there, and which is cheapest
//! and which is fastest?"
//!
//! The catalogue snapshot is indexed by origin, then a best-first search
//! enumerates every simple path whose connections fit the layover window.
//! The results are bucketed by shape, the cheapest and fastest entries are
//! tagged, and the bucket is optionally sorted by price.

mod catalogue_index;
mod classify;
mod config;
mod deadline;
mod enumerate;
mod search;
mod sort;

pub use catalogue_index::CatalogueIndex;
pub use classify::{Buckets, classify, place_winners_first, select_buckets};
pub use config::{MAX_LAYOVER_SECS, SearchConfig};
pub use deadline::Deadline;
pub use enumerate::{Enumeration, PathEnumerator};
pub use search::{Planner, SearchError, SearchOutcome, SearchRequest};
pub use sort::{InvalidSortOrder, SortOrder, sort_by_price};
