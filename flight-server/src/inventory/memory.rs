//! In-memory inventory store.
//!
//! Holds the whole catalogue behind one `RwLock`. Reads share the lock;
//! the conditional seat decrement takes the write guard so the availability
//! check and the subtraction cannot interleave with another buyer.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::domain::{Segment, SegmentId};

use super::{Inventory, InventoryError, SeatUpdate, SegmentFilter};

/// Inventory store backed by a map in process memory.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    segments: RwLock<BTreeMap<SegmentId, Segment>>,
}

impl InMemoryInventory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `segments`.
    ///
    /// # Errors
    ///
    /// Fails on the first segment that is invalid or duplicates an earlier id.
    pub fn with_segments(
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<Self, InventoryError> {
        let store = Self::new();
        for segment in segments {
            store.insert(segment)?;
        }
        Ok(store)
    }

    /// Load a catalogue from a JSON file containing an array of segments.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        let path = path.as_ref();
        let load_error = |message: String| InventoryError::Load {
            path: path.display().to_string(),
            message,
        };

        let json = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let segments: Vec<Segment> =
            serde_json::from_str(&json).map_err(|e| load_error(e.to_string()))?;

        let store = Self::with_segments(segments)?;
        info!(path = %path.display(), segments = store.len()?, "loaded flight catalogue");
        Ok(store)
    }

    /// Add a segment to the catalogue.
    pub fn insert(&self, segment: Segment) -> Result<(), InventoryError> {
        segment.validate()?;

        let mut segments = self.write()?;
        if segments.contains_key(&segment.id) {
            return Err(InventoryError::Duplicate(segment.id));
        }
        segments.insert(segment.id, segment);
        Ok(())
    }

    /// Number of stored segments.
    pub fn len(&self) -> Result<usize, InventoryError> {
        Ok(self.read()?.len())
    }

    /// Returns true if the catalogue is empty.
    pub fn is_empty(&self) -> Result<bool, InventoryError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<SegmentId, Segment>>, InventoryError> {
        self.segments
            .read()
            .map_err(|_| InventoryError::Unavailable("segment lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<SegmentId, Segment>>, InventoryError> {
        self.segments
            .write()
            .map_err(|_| InventoryError::Unavailable("segment lock poisoned".to_string()))
    }
}

impl Inventory for InMemoryInventory {
    fn find_segments(&self, filter: &SegmentFilter) -> Result<Vec<Segment>, InventoryError> {
        let segments = self.read()?;

        let found: Vec<Segment> = match filter.id {
            Some(id) => segments
                .get(&id)
                .filter(|s| filter.matches(s))
                .cloned()
                .into_iter()
                .collect(),
            None => segments
                .values()
                .filter(|s| filter.matches(s))
                .cloned()
                .collect(),
        };

        debug!(matched = found.len(), total = segments.len(), "filtered segments");
        Ok(found)
    }

    fn get_segment(&self, id: &SegmentId) -> Result<Option<Segment>, InventoryError> {
        Ok(self.read()?.get(id).cloned())
    }

    fn decrement_seats(&self, id: &SegmentId, count: u32) -> Result<SeatUpdate, InventoryError> {
        let mut segments = self.write()?;

        match segments.get_mut(id) {
            Some(segment) if segment.seats >= count => {
                segment.seats -= count;
                Ok(SeatUpdate::Applied)
            }
            _ => Ok(SeatUpdate::Rejected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::City;
    use chrono::{DateTime, Utc};
    use std::io::Write;
    use uuid::Uuid;

    fn city(s: &str) -> City {
        City::parse(s).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn segment(n: u128, from: &str, to: &str, seats: u32) -> Segment {
        Segment {
            id: SegmentId::from_uuid(Uuid::from_u128(n)),
            origin: city(from),
            destination: city(to),
            seats,
            price: Some(20),
            departure: Some(at(0)),
            arrival: at(3600),
        }
    }

    #[test]
    fn insert_and_get() {
        let store = InMemoryInventory::new();
        let seg = segment(1, "A", "B", 5);
        store.insert(seg.clone()).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.get_segment(&seg.id).unwrap(), Some(seg));
        assert_eq!(
            store
                .get_segment(&SegmentId::from_uuid(Uuid::from_u128(9)))
                .unwrap(),
            None
        );
    }

    #[test]
    fn insert_rejects_duplicates_and_invalid_segments() {
        let store = InMemoryInventory::new();
        store.insert(segment(1, "A", "B", 5)).unwrap();

        assert!(matches!(
            store.insert(segment(1, "A", "C", 5)),
            Err(InventoryError::Duplicate(_))
        ));

        let mut bad = segment(2, "A", "B", 5);
        bad.departure = Some(at(4000));
        assert!(matches!(
            store.insert(bad),
            Err(InventoryError::InvalidSegment(_))
        ));
    }

    #[test]
    fn find_applies_filter() {
        let store = InMemoryInventory::with_segments(vec![
            segment(1, "A", "B", 5),
            segment(2, "B", "C", 1),
            segment(3, "A", "C", 0),
        ])
        .unwrap();

        let all = store.find_segments(&SegmentFilter::default()).unwrap();
        assert_eq!(all.len(), 2);

        let roomy = store
            .find_segments(&SegmentFilter {
                min_seats: 2,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(roomy.len(), 1);
        assert_eq!(roomy[0].origin, city("A"));

        let by_id = store
            .find_segments(&SegmentFilter {
                id: Some(SegmentId::from_uuid(Uuid::from_u128(2))),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_id.len(), 1);
    }

    #[test]
    fn decrement_is_conditional() {
        let seg = segment(1, "A", "B", 5);
        let store = InMemoryInventory::with_segments(vec![seg.clone()]).unwrap();

        assert_eq!(store.decrement_seats(&seg.id, 3).unwrap(), SeatUpdate::Applied);
        assert_eq!(store.get_segment(&seg.id).unwrap().unwrap().seats, 2);

        assert_eq!(store.decrement_seats(&seg.id, 3).unwrap(), SeatUpdate::Rejected);
        assert_eq!(store.get_segment(&seg.id).unwrap().unwrap().seats, 2);

        assert_eq!(store.decrement_seats(&seg.id, 2).unwrap(), SeatUpdate::Applied);
        assert_eq!(store.get_segment(&seg.id).unwrap().unwrap().seats, 0);
    }

    #[test]
    fn decrement_missing_segment_is_rejected() {
        let store = InMemoryInventory::new();
        let id = SegmentId::from_uuid(Uuid::from_u128(1));
        assert_eq!(store.decrement_seats(&id, 1).unwrap(), SeatUpdate::Rejected);
    }

    #[test]
    fn concurrent_decrements_never_oversell() {
        let seg = segment(1, "A", "B", 10);
        let store = InMemoryInventory::with_segments(vec![seg.clone()]).unwrap();

        let applied: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| store.decrement_seats(&seg.id, 3).unwrap()))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|update| *update == SeatUpdate::Applied)
                .count()
        });

        // Only three buyers of 3 fit in 10 seats.
        assert_eq!(applied, 3);
        assert_eq!(store.get_segment(&seg.id).unwrap().unwrap().seats, 1);
    }

    #[test]
    fn load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "00000000-0000-0000-0000-000000000001", "origin": "A", "destination": "B",
                  "seats": 5, "price": 100, "departure": "2024-03-15T10:00:00Z",
                  "arrival": "2024-03-15T11:00:00Z"}},
                {{"id": "00000000-0000-0000-0000-000000000002", "origin": "B", "destination": "C",
                  "seats": 2, "price": null, "departure": null,
                  "arrival": "2024-03-15T14:00:00Z"}}
            ]"#
        )
        .unwrap();

        let store = InMemoryInventory::from_json_file(file.path()).unwrap();
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = InMemoryInventory::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, InventoryError::Load { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = InMemoryInventory::from_json_file("/nonexistent/flights.json").unwrap_err();
        assert!(matches!(err, InventoryError::Load { .. }));
    }
}
