//! Itinerary types.
//!
//! An `Itinerary` is a complete or partial trip: one or more flight segments
//! flown back to back, each landing in the city the next one leaves from.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{City, DomainError, Segment, SegmentId};

/// Presentation tag marking the best entries of a result bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Neither the cheapest nor the fastest
    #[default]
    None,
    /// Shortest total duration in its bucket
    Fastest,
    /// Lowest total price in its bucket
    Cheapest,
    /// Both the cheapest and the fastest
    CheapestAndFastest,
}

/// A sequence of flight segments forming one journey.
///
/// # Invariants
///
/// - At least one leg
/// - The first leg has a known departure
/// - Consecutive legs connect (destination of one = origin of next)
/// - No segment identity repeats
///
/// Connection waits are *not* checked here; the layover window is search
/// policy, not a property of an itinerary.
#[derive(Debug, Clone)]
pub struct Itinerary {
    legs: Vec<Arc<Segment>>,
    departure: DateTime<Utc>,
    total_price: u64,
    category: Category,
}

impl Itinerary {
    /// Constructs an itinerary from legs in flying order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `legs` is empty
    /// - the first leg has no departure time
    /// - consecutive legs don't connect
    /// - a segment appears more than once
    pub fn new(legs: Vec<Arc<Segment>>) -> Result<Self, DomainError> {
        let first = legs.first().ok_or(DomainError::EmptyItinerary)?;
        let departure = first
            .departure
            .ok_or(DomainError::MissingDeparture(first.id))?;

        for window in legs.windows(2) {
            if window[0].destination != window[1].origin {
                return Err(DomainError::Disconnected {
                    arrives: window[0].destination.clone(),
                    departs: window[1].origin.clone(),
                });
            }
        }

        for (i, leg) in legs.iter().enumerate() {
            if legs[..i].iter().any(|earlier| earlier.id == leg.id) {
                return Err(DomainError::RepeatedSegment(leg.id));
            }
        }

        let total_price = legs.iter().map(|leg| leg.fare()).sum();

        Ok(Itinerary {
            legs,
            departure,
            total_price,
            category: Category::None,
        })
    }

    /// Constructs a one-leg itinerary.
    pub fn single(leg: Arc<Segment>) -> Result<Self, DomainError> {
        Self::new(vec![leg])
    }

    /// Returns a copy of this itinerary with `leg` flown next.
    ///
    /// The caller has already checked that `leg` departs from this
    /// itinerary's destination and is not yet part of it.
    pub(crate) fn extended(&self, leg: Arc<Segment>) -> Self {
        debug_assert_eq!(&leg.origin, self.destination());
        debug_assert!(!self.contains_segment(&leg.id));

        let total_price = self.total_price + leg.fare();
        let mut legs = Vec::with_capacity(self.legs.len() + 1);
        legs.extend(self.legs.iter().cloned());
        legs.push(leg);

        Itinerary {
            legs,
            departure: self.departure,
            total_price,
            category: Category::None,
        }
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Arc<Segment>] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the number of connections (legs - 1).
    pub fn connection_count(&self) -> usize {
        self.legs.len() - 1
    }

    /// Returns the final leg.
    pub fn last_leg(&self) -> &Segment {
        // Non-empty by construction
        &self.legs[self.legs.len() - 1]
    }

    /// Returns the city the itinerary starts from.
    pub fn origin(&self) -> &City {
        &self.legs[0].origin
    }

    /// Returns the city the itinerary ends in.
    pub fn destination(&self) -> &City {
        &self.last_leg().destination
    }

    /// Returns the departure of the first leg.
    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Returns the arrival of the last leg.
    pub fn arrival(&self) -> DateTime<Utc> {
        self.last_leg().arrival
    }

    /// Returns last arrival minus first departure.
    pub fn duration(&self) -> Duration {
        self.arrival() - self.departure
    }

    /// Returns the sum of leg fares, unset fares counting as zero.
    pub fn total_price(&self) -> u64 {
        self.total_price
    }

    /// Returns the presentation tag.
    pub fn category(&self) -> Category {
        self.category
    }

    pub(crate) fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Returns true if the segment is one of this itinerary's legs.
    pub fn contains_segment(&self, id: &SegmentId) -> bool {
        self.legs.iter().any(|leg| &leg.id == id)
    }

    /// Returns true if some leg lands in `city`.
    pub fn lands_in(&self, city: &City) -> bool {
        self.legs.iter().any(|leg| &leg.destination == city)
    }

    /// Returns true if this is a single-leg itinerary.
    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }

    /// Returns the wait between each pair of consecutive legs.
    ///
    /// A leg without a departure time yields no wait.
    pub fn connection_waits(&self) -> impl Iterator<Item = Duration> + '_ {
        self.legs
            .windows(2)
            .filter_map(|pair| pair[1].departure.map(|dep| dep - pair[0].arrival))
    }

    /// Returns the segment ids in flying order.
    pub fn segment_ids(&self) -> Vec<SegmentId> {
        self.legs.iter().map(|leg| leg.id).collect()
    }
}
