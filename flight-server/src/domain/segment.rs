//! Flight segment type.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{City, DomainError, SegmentId};

/// A single priced, capacity-limited flight leg in the catalogue.
///
/// `departure` is optional because catalogue records may be published
/// before a take-off slot is assigned. Such segments are sold but never
/// routed: the planner drops them before indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment identity
    pub id: SegmentId,

    /// City the flight departs from
    pub origin: City,

    /// City the flight arrives in
    pub destination: City,

    /// Seats still available for sale
    pub seats: u32,

    /// Price per seat; `None` means the fare is unset and counts as zero
    pub price: Option<u32>,

    /// Take-off instant, if scheduled
    pub departure: Option<DateTime<Utc>>,

    /// Landing instant
    pub arrival: DateTime<Utc>,
}

impl Segment {
    /// Create a segment with a fresh identity.
    ///
    /// # Errors
    ///
    /// See [`Segment::validate`].
    pub fn new(
        origin: City,
        destination: City,
        seats: u32,
        price: Option<u32>,
        departure: Option<DateTime<Utc>>,
        arrival: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let segment = Self {
            id: SegmentId::generate(),
            origin,
            destination,
            seats,
            price,
            departure,
            arrival,
        };
        segment.validate()?;
        Ok(segment)
    }

    /// Check the segment's invariants.
    ///
    /// # Errors
    ///
    /// - [`DomainError::CircularSegment`] if origin and destination coincide
    /// - [`DomainError::InvalidTiming`] if a known departure is not strictly
    ///   before the arrival
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.origin == self.destination {
            return Err(DomainError::CircularSegment(self.id, self.origin.clone()));
        }

        if let Some(departure) = self.departure {
            if departure >= self.arrival {
                return Err(DomainError::InvalidTiming(self.id));
            }
        }

        Ok(())
    }

    /// Price per seat, with an unset fare counted as zero.
    pub fn fare(&self) -> u64 {
        self.price.map(u64::from).unwrap_or(0)
    }

    /// Time in the air, if the departure is known.
    pub fn flight_time(&self) -> Option<Duration> {
        self.departure.map(|dep| self.arrival - dep)
    }
}
