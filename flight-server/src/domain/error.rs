//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from storage and HTTP errors.

use super::{City, SegmentId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Segment has no departure time where one is required
    #[error("segment {0} has no departure time")]
    MissingDeparture(SegmentId),

    /// Segment arrives at or before it departs
    #[error("segment {0} must depart strictly before it arrives")]
    InvalidTiming(SegmentId),

    /// Segment departs from and arrives at the same city
    #[error("segment {0} starts and ends in {1}")]
    CircularSegment(SegmentId, City),

    /// Consecutive legs don't connect
    #[error("legs do not connect: arrives in {arrives}, next departs from {departs}")]
    Disconnected { arrives: City, departs: City },

    /// The same segment appears twice in one itinerary
    #[error("segment {0} appears more than once in the itinerary")]
    RepeatedSegment(SegmentId),

    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn error_display() {
        let id = SegmentId::from_uuid(Uuid::from_u128(7));

        let err = DomainError::MissingDeparture(id);
        assert_eq!(
            err.to_string(),
            "segment 00000000-0000-0000-0000-000000000007 has no departure time"
        );

        let err = DomainError::InvalidTiming(id);
        assert!(err.to_string().contains("depart strictly before"));

        let err = DomainError::Disconnected {
            arrives: City::parse("Kazan").unwrap(),
            departs: City::parse("Omsk").unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "legs do not connect: arrives in Kazan, next departs from Omsk"
        );

        let err = DomainError::EmptyItinerary;
        assert_eq!(err.to_string(), "itinerary must have at least one leg");
    }
}
