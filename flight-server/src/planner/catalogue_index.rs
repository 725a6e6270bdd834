//! Departures index over a catalogue snapshot.
//!
//! The enumerator repeatedly asks "which segments leave city X between
//! these two instants?". Grouping the snapshot by origin and sorting each
//! group by departure turns that into two binary searches.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{City, DomainError, Segment};

/// Segments grouped by origin city, each group sorted by departure.
#[derive(Debug, Default)]
pub struct CatalogueIndex {
    /// Map from city -> segments departing it, earliest first.
    departures: HashMap<City, Vec<Arc<Segment>>>,

    /// Total number of indexed segments.
    segment_count: usize,
}

impl CatalogueIndex {
    /// Build the index from a flat snapshot.
    ///
    /// Segments with equal departures keep their snapshot order.
    ///
    /// # Errors
    ///
    /// Every segment must have a departure time; callers drop unscheduled
    /// segments before indexing. The first one found is reported as
    /// [`DomainError::MissingDeparture`].
    pub fn build(segments: Vec<Segment>) -> Result<Self, DomainError> {
        let segment_count = segments.len();
        let mut departures: HashMap<City, Vec<Arc<Segment>>> = HashMap::new();

        for segment in segments {
            if segment.departure.is_none() {
                return Err(DomainError::MissingDeparture(segment.id));
            }
            departures
                .entry(segment.origin.clone())
                .or_default()
                .push(Arc::new(segment));
        }

        for group in departures.values_mut() {
            group.sort_by_key(|s| s.departure);
        }

        Ok(Self {
            departures,
            segment_count,
        })
    }

    /// All segments departing `city`, earliest first.
    pub fn departures_from(&self, city: &City) -> &[Arc<Segment>] {
        self.departures
            .get(city)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Segments departing `city` with `from <= departure <= until`.
    pub fn departures_between(
        &self,
        city: &City,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> &[Arc<Segment>] {
        let group = self.departures_from(city);
        let start = group.partition_point(|s| s.departure < Some(from));
        let end = group.partition_point(|s| s.departure <= Some(until));
        if start >= end {
            return &[];
        }
        &group[start..end]
    }

    /// Number of cities with at least one departure.
    pub fn city_count(&self) -> usize {
        self.departures.len()
    }

    /// Number of indexed segments.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Returns true if nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.segment_count == 0
    }
}
