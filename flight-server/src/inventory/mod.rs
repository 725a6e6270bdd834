//! Flight segment inventory.
//!
//! The planner and the booking flow only ever see the catalogue through the
//! [`Inventory`] trait: a filtered read, a point lookup, and an atomic
//! conditional seat decrement. [`InMemoryInventory`] is the in-process
//! implementation used by the server binary and in tests.

mod error;
mod filter;
mod memory;

pub use error::InventoryError;
pub use filter::{DepartureWindow, SegmentFilter};
pub use memory::InMemoryInventory;

use crate::domain::{Segment, SegmentId};

/// Outcome of a conditional seat decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatUpdate {
    /// The segment existed with enough seats and was decremented
    Applied,
    /// Nothing changed: the segment is missing or has too few seats
    Rejected,
}

/// Source of flight segments and sink for seat sales.
///
/// This abstraction allows the planner and booking flow to be tested with
/// mock stores.
pub trait Inventory {
    /// Return every segment matching `filter`, in no particular order.
    fn find_segments(&self, filter: &SegmentFilter) -> Result<Vec<Segment>, InventoryError>;

    /// Look up one segment by identity.
    fn get_segment(&self, id: &SegmentId) -> Result<Option<Segment>, InventoryError>;

    /// Subtract `count` seats from the segment if, and only if, it currently
    /// has at least `count` seats.
    ///
    /// Check and write happen as one operation, so two concurrent buyers can
    /// never both take the last seats.
    fn decrement_seats(&self, id: &SegmentId, count: u32) -> Result<SeatUpdate, InventoryError>;
}
