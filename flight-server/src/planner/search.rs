//! Itinerary search entry point.
//!
//! Takes a catalogue snapshot from the inventory, indexes it, enumerates
//! paths best-first, then buckets, tags and optionally sorts the results.

use tracing::debug;

use crate::domain::{City, DomainError, Itinerary};
use crate::inventory::{DepartureWindow, Inventory, InventoryError, SegmentFilter};

use super::catalogue_index::CatalogueIndex;
use super::classify::{classify, select_buckets};
use super::config::SearchConfig;
use super::deadline::Deadline;
use super::enumerate::PathEnumerator;
use super::sort::{SortOrder, sort_by_price};

/// Error from itinerary search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// The inventory could not be read
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// The catalogue snapshot broke an itinerary invariant
    #[error("inconsistent catalogue: {0}")]
    Catalogue(#[from] DomainError),

    /// Search timed out
    #[error("search timed out")]
    Timeout,
}

/// Request for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// City the trip starts from.
    pub origin: City,

    /// City the trip ends in.
    pub destination: City,

    /// Required transit city, if any.
    pub via: Option<City>,

    /// Explicit price ordering, replacing cheapest/fastest placement.
    pub sort: Option<SortOrder>,

    /// Every leg must have at least this many free seats (zero means one).
    pub min_seats: u32,

    /// Every leg must depart inside this window.
    pub departure_window: Option<DepartureWindow>,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(origin: City, destination: City) -> Self {
        Self {
            origin,
            destination,
            via: None,
            sort: None,
            min_seats: 1,
            departure_window: None,
        }
    }

    pub fn with_via(mut self, via: City) -> Self {
        self.via = Some(via);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_min_seats(mut self, min_seats: u32) -> Self {
        self.min_seats = min_seats;
        self
    }

    pub fn with_departure_window(mut self, window: DepartureWindow) -> Self {
        self.departure_window = Some(window);
        self
    }

    /// Validate the search request.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.origin == self.destination {
            return Err(SearchError::InvalidRequest(
                "origin and destination must differ".to_string(),
            ));
        }

        if let Some(via) = &self.via {
            if via == &self.origin || via == &self.destination {
                return Err(SearchError::InvalidRequest(
                    "transit city must differ from origin and destination".to_string(),
                ));
            }
        }

        if self.departure_window.is_some_and(|w| !w.is_valid()) {
            return Err(SearchError::InvalidRequest(
                "departure window ends before it starts".to_string(),
            ));
        }

        Ok(())
    }

    /// Filter for the catalogue snapshot. The city pair is left open: any
    /// segment may be part of a path.
    pub fn segment_filter(&self) -> SegmentFilter {
        SegmentFilter {
            id: None,
            route: None,
            min_seats: self.min_seats,
            departure_window: self.departure_window,
        }
    }
}

/// Result of itinerary search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// One-leg itineraries.
    pub direct: Vec<Itinerary>,

    /// Two-leg itineraries through the transit city, or a single
    /// best-effort path when `fallback` is set.
    ///
    /// A search without a transit city leaves this empty whenever any
    /// direct flight exists, even if a connection is cheaper or faster.
    /// Connections are only surfaced as the fallback in that case.
    pub connecting: Vec<Itinerary>,

    /// True when `connecting` does not match the request's shape.
    pub fallback: bool,

    /// Number of candidates popped during enumeration.
    pub explored: usize,
}

impl SearchOutcome {
    /// Returns true if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.connecting.is_empty()
    }
}

/// Itinerary planner over an inventory.
pub struct Planner<'a, I: Inventory> {
    inventory: &'a I,
    config: &'a SearchConfig,
}

impl<'a, I: Inventory> Planner<'a, I> {
    /// Create a new planner.
    pub fn new(inventory: &'a I, config: &'a SearchConfig) -> Self {
        Self { inventory, config }
    }

    /// Search with the configured deadline.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        self.search_until(request, Deadline::after(self.config.deadline()))
    }

    /// Search, giving up once `deadline` passes.
    pub fn search_until(
        &self,
        request: &SearchRequest,
        deadline: Deadline,
    ) -> Result<SearchOutcome, SearchError> {
        request.validate()?;

        let snapshot = self.inventory.find_segments(&request.segment_filter())?;
        let fetched = snapshot.len();

        // Unscheduled segments cannot start or continue a path
        let scheduled: Vec<_> = snapshot
            .into_iter()
            .filter(|s| s.departure.is_some())
            .collect();
        if scheduled.len() < fetched {
            debug!(
                skipped = fetched - scheduled.len(),
                "ignoring segments without a departure time"
            );
        }

        let index = CatalogueIndex::build(scheduled)?;
        debug!(
            cities = index.city_count(),
            segments = index.segment_count(),
            "indexed catalogue snapshot"
        );
        let enumeration = PathEnumerator::new(&index, self.config).enumerate(
            &request.origin,
            &request.destination,
            request.via.as_ref(),
            &deadline,
        )?;
        let explored = enumeration.explored;

        let buckets = select_buckets(enumeration, request.via.as_ref());
        let (mut direct, mut connecting) = if buckets.fallback {
            (buckets.direct, buckets.connecting)
        } else {
            (classify(buckets.direct), classify(buckets.connecting))
        };

        if let Some(order) = request.sort {
            sort_by_price(&mut direct, order);
            sort_by_price(&mut connecting, order);
        }

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            direct = direct.len(),
            connecting = connecting.len(),
            fallback = buckets.fallback,
            explored,
            "search complete"
        );

        Ok(SearchOutcome {
            direct,
            connecting,
            fallback: buckets.fallback,
            explored,
        })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
