//! Segment query filters.

use chrono::{DateTime, Utc};

use crate::domain::{City, Segment, SegmentId};

/// Inclusive range of departure instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartureWindow {
    /// Earliest accepted departure
    pub from: DateTime<Utc>,
    /// Latest accepted departure
    pub until: DateTime<Utc>,
}

impl DepartureWindow {
    /// Create a window; `from` must not be after `until` for it to match
    /// anything.
    pub fn new(from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self { from, until }
    }

    /// Returns true if `from <= until`.
    pub fn is_valid(&self) -> bool {
        self.from <= self.until
    }

    /// Returns true if `instant` lies inside the window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.until
    }
}

/// Criteria for [`Inventory::find_segments`](super::Inventory::find_segments).
///
/// All criteria combine with AND. An empty filter matches every segment with
/// at least one free seat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentFilter {
    /// Match a single segment
    pub id: Option<SegmentId>,

    /// Match segments flying exactly this (origin, destination) pair
    pub route: Option<(City, City)>,

    /// Minimum free seats; zero is treated as one
    pub min_seats: u32,

    /// Match segments departing inside this window. Segments without a
    /// departure never match a window.
    pub departure_window: Option<DepartureWindow>,
}

impl SegmentFilter {
    /// Seat threshold actually applied.
    pub fn effective_min_seats(&self) -> u32 {
        self.min_seats.max(1)
    }

    /// Returns true if `segment` satisfies every criterion.
    pub fn matches(&self, segment: &Segment) -> bool {
        if self.id.is_some_and(|id| id != segment.id) {
            return false;
        }

        if let Some((origin, destination)) = &self.route {
            if &segment.origin != origin || &segment.destination != destination {
                return false;
            }
        }

        if segment.seats < self.effective_min_seats() {
            return false;
        }

        if let Some(window) = &self.departure_window {
            match segment.departure {
                Some(dep) if window.contains(dep) => {}
                _ => return false,
            }
        }

        true
    }
}
