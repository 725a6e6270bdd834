//! Domain types for the flight itinerary planner.
//!
//! This module contains the core domain model types that represent
//! validated catalogue data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod city;
mod error;
mod itinerary;
mod segment;
mod segment_id;

pub use city::{City, InvalidCity};
pub use error::DomainError;
pub use itinerary::{Category, Itinerary};
pub use segment::Segment;
pub use segment_id::{InvalidSegmentId, SegmentId};
