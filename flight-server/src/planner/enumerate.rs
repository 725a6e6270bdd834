//! Best-first itinerary enumeration.
//!
//! A Dijkstra-style search over the catalogue index that does not stop at
//! the first arrival. Every simple path from the origin to the destination
//! whose connections fit the layover window is collected, because the
//! cheapest and the fastest itinerary are generally different paths.
//!
//! Candidates pop in order of (duration, total price, push order). A path
//! that reaches the destination is never extended further.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::domain::{City, Itinerary};

use super::catalogue_index::CatalogueIndex;
use super::config::SearchConfig;
use super::deadline::Deadline;
use super::search::SearchError;

/// Heap entry: a partial itinerary plus its ordering keys.
#[derive(Debug)]
struct Candidate {
    itinerary: Itinerary,
    duration_secs: i64,
    price: u64,
    seq: u64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest; reversed so the shortest pops first
        other
            .duration_secs
            .cmp(&self.duration_secs)
            .then_with(|| other.price.cmp(&self.price))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of candidates with FIFO tie-breaking.
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<Candidate>,
    next_seq: u64,
}

impl Frontier {
    fn push(&mut self, itinerary: Itinerary) {
        let candidate = Candidate {
            duration_secs: itinerary.duration().num_seconds(),
            price: itinerary.total_price(),
            seq: self.next_seq,
            itinerary,
        };
        self.next_seq += 1;
        self.heap.push(candidate);
    }

    fn pop(&mut self) -> Option<Itinerary> {
        self.heap.pop().map(|c| c.itinerary)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Everything one enumeration found.
#[derive(Debug, Default)]
pub struct Enumeration {
    /// Paths that reached the destination and passed the transit check,
    /// in pop order.
    pub accepted: Vec<Itinerary>,

    /// The first path that reached the destination but skipped the
    /// required transit city.
    pub first_unqualified: Option<Itinerary>,

    /// Number of candidates popped.
    pub explored: usize,
}

/// Enumerates itineraries over one catalogue snapshot.
pub struct PathEnumerator<'a> {
    index: &'a CatalogueIndex,
    config: &'a SearchConfig,
}

impl<'a> PathEnumerator<'a> {
    /// Create a new enumerator.
    pub fn new(index: &'a CatalogueIndex, config: &'a SearchConfig) -> Self {
        Self { index, config }
    }

    /// Collect every qualifying path from `origin` to `destination`.
    ///
    /// With `via` set, a path is accepted only if one of its legs lands in
    /// `via`; others are dropped on arrival and never retried.
    ///
    /// # Errors
    ///
    /// [`SearchError::Timeout`] if `deadline` passes before the queue drains.
    /// No partial result is returned in that case.
    pub fn enumerate(
        &self,
        origin: &City,
        destination: &City,
        via: Option<&City>,
        deadline: &Deadline,
    ) -> Result<Enumeration, SearchError> {
        let mut frontier = Frontier::default();
        for segment in self.index.departures_from(origin) {
            frontier.push(Itinerary::single(segment.clone())?);
        }

        let interval = self.config.check_interval();
        let max_layover = self.config.max_layover();
        let mut result = Enumeration::default();

        while let Some(path) = frontier.pop() {
            if result.explored % interval == 0 && deadline.is_expired() {
                warn!(
                    explored = result.explored,
                    queued = frontier.len(),
                    "search deadline exceeded"
                );
                return Err(SearchError::Timeout);
            }
            result.explored += 1;

            if path.destination() == destination {
                match via {
                    Some(via) if !path.lands_in(via) => {
                        trace!(legs = path.leg_count(), %via, "dropping path that skips transit city");
                        if result.first_unqualified.is_none() {
                            result.first_unqualified = Some(path);
                        }
                    }
                    _ => result.accepted.push(path),
                }
                continue;
            }

            let last = path.last_leg();
            let earliest = last.arrival;
            // Near the end of time nothing can depart later than MAX_UTC
            let latest = earliest
                .checked_add_signed(max_layover)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);

            for next in self
                .index
                .departures_between(&last.destination, earliest, latest)
            {
                if path.contains_segment(&next.id) {
                    continue;
                }
                frontier.push(path.extended(next.clone()));
            }
        }

        debug!(
            %origin,
            %destination,
            accepted = result.accepted.len(),
            explored = result.explored,
            "enumeration complete"
        );

        Ok(result)
    }
}
