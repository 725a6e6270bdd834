//! Seat purchase.
//!
//! The seat check here is only a fast path for a helpful error message. The
//! authoritative guard is the inventory's conditional decrement, so two
//! buyers racing for the last seats cannot both succeed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{City, Segment, SegmentId};
use crate::inventory::{Inventory, InventoryError, SeatUpdate};

/// Error from a purchase.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PurchaseError {
    /// Invalid purchase request
    #[error("invalid purchase request: {0}")]
    InvalidRequest(String),

    /// No such segment
    #[error("segment {0} not found")]
    NotFound(SegmentId),

    /// Not enough free seats
    #[error("segment {id} has {available} seats left, {requested} requested")]
    InsufficientInventory {
        id: SegmentId,
        requested: u32,
        available: u32,
    },

    /// The inventory could not be read or written
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Proof of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub segment_id: SegmentId,
    pub origin: City,
    pub destination: City,
    pub departure: Option<DateTime<Utc>>,
    pub arrival: DateTime<Utc>,

    /// Seats bought
    pub quantity: u32,

    /// Per-seat price times quantity; absent if the segment is unpriced
    pub price: Option<u64>,
}

impl Receipt {
    /// Receipt for `quantity` seats on `segment`.
    pub fn for_purchase(segment: &Segment, quantity: u32) -> Self {
        Self {
            segment_id: segment.id,
            origin: segment.origin.clone(),
            destination: segment.destination.clone(),
            departure: segment.departure,
            arrival: segment.arrival,
            quantity,
            price: segment
                .price
                .map(|per_seat| u64::from(per_seat) * u64::from(quantity)),
        }
    }
}

/// Sells seats out of an inventory.
pub struct Booking<'a, I: Inventory> {
    inventory: &'a I,
}

impl<'a, I: Inventory> Booking<'a, I> {
    pub fn new(inventory: &'a I) -> Self {
        Self { inventory }
    }

    /// Buy `quantity` seats on segment `id`.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::InvalidRequest`] if `quantity` is zero
    /// - [`PurchaseError::NotFound`] if the segment does not exist
    /// - [`PurchaseError::InsufficientInventory`] if fewer than `quantity`
    ///   seats are free, either up front or by the time the decrement runs
    pub fn buy(&self, id: &SegmentId, quantity: u32) -> Result<Receipt, PurchaseError> {
        if quantity == 0 {
            return Err(PurchaseError::InvalidRequest(
                "seat count must be at least one".to_string(),
            ));
        }

        let segment = self
            .inventory
            .get_segment(id)?
            .ok_or(PurchaseError::NotFound(*id))?;

        if quantity > segment.seats {
            return Err(PurchaseError::InsufficientInventory {
                id: *id,
                requested: quantity,
                available: segment.seats,
            });
        }

        match self.inventory.decrement_seats(id, quantity)? {
            SeatUpdate::Applied => {
                info!(segment = %id, quantity, "seats sold");
                Ok(Receipt::for_purchase(&segment, quantity))
            }
            SeatUpdate::Rejected => {
                warn!(segment = %id, quantity, "seat decrement rejected after check");
                Err(self.explain_rejection(id, quantity)?)
            }
        }
    }

    /// Work out why a conditional decrement changed nothing.
    fn explain_rejection(&self, id: &SegmentId, quantity: u32) -> Result<PurchaseError, InventoryError> {
        Ok(match self.inventory.get_segment(id)? {
            None => PurchaseError::NotFound(*id),
            Some(current) => PurchaseError::InsufficientInventory {
                id: *id,
                requested: quantity,
                available: current.seats,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{InMemoryInventory, SegmentFilter};
    use std::sync::Mutex;
    use uuid::Uuid;

    fn city(s: &str) -> City {
        City::parse(s).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn segment(n: u128, seats: u32, price: Option<u32>) -> Segment {
        Segment {
            id: SegmentId::from_uuid(Uuid::from_u128(n)),
            origin: city("A"),
            destination: city("B"),
            seats,
            price,
            departure: Some(at(1000)),
            arrival: at(2000),
        }
    }

    fn seats_left(inventory: &InMemoryInventory, id: &SegmentId) -> u32 {
        inventory.get_segment(id).unwrap().unwrap().seats
    }

    #[test]
    fn purchase_decrements_and_prices_receipt() {
        let flight = segment(1, 5, Some(20));
        let id = flight.id;
        let inventory = InMemoryInventory::with_segments([flight]).unwrap();
        let booking = Booking::new(&inventory);

        let receipt = booking.buy(&id, 3).unwrap();

        assert_eq!(receipt.quantity, 3);
        assert_eq!(receipt.price, Some(60));
        assert_eq!(receipt.segment_id, id);
        assert_eq!(receipt.origin, city("A"));
        assert_eq!(receipt.destination, city("B"));
        assert_eq!(seats_left(&inventory, &id), 2);

        // The second buyer asks for more than is left
        let second = booking.buy(&id, 3);
        assert!(matches!(
            second,
            Err(PurchaseError::InsufficientInventory {
                requested: 3,
                available: 2,
                ..
            })
        ));
        assert_eq!(seats_left(&inventory, &id), 2);
    }

    #[test]
    fn concurrent_buyers_never_oversell() {
        let flight = segment(1, 5, Some(20));
        let id = flight.id;
        let inventory = InMemoryInventory::with_segments([flight]).unwrap();

        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..2)
                .map(|_| s.spawn(|| Booking::new(&inventory).buy(&id, 3)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let sold = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(sold, 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(PurchaseError::InsufficientInventory { .. })
        )));
        assert_eq!(seats_left(&inventory, &id), 2);
    }

    #[test]
    fn buying_every_seat_is_allowed() {
        let flight = segment(1, 4, Some(10));
        let id = flight.id;
        let inventory = InMemoryInventory::with_segments([flight]).unwrap();

        let receipt = Booking::new(&inventory).buy(&id, 4).unwrap();

        assert_eq!(receipt.price, Some(40));
        assert_eq!(seats_left(&inventory, &id), 0);
    }

    #[test]
    fn unpriced_segment_has_no_receipt_price() {
        let flight = segment(1, 4, None);
        let id = flight.id;
        let inventory = InMemoryInventory::with_segments([flight]).unwrap();

        let receipt = Booking::new(&inventory).buy(&id, 2).unwrap();

        assert_eq!(receipt.price, None);
        assert_eq!(receipt.quantity, 2);
    }

    #[test]
    fn receipt_price_does_not_overflow() {
        let receipt = Receipt::for_purchase(&segment(1, u32::MAX, Some(u32::MAX)), u32::MAX);
        assert_eq!(
            receipt.price,
            Some(u64::from(u32::MAX) * u64::from(u32::MAX))
        );
    }

    #[test]
    fn zero_seats_is_invalid() {
        let flight = segment(1, 4, Some(10));
        let id = flight.id;
        let inventory = InMemoryInventory::with_segments([flight]).unwrap();

        let result = Booking::new(&inventory).buy(&id, 0);

        assert!(matches!(result, Err(PurchaseError::InvalidRequest(_))));
        assert_eq!(seats_left(&inventory, &id), 4);
    }

    #[test]
    fn unknown_segment_is_not_found() {
        let inventory = InMemoryInventory::new();
        let id = SegmentId::from_uuid(Uuid::from_u128(7));

        let result = Booking::new(&inventory).buy(&id, 1);

        assert!(matches!(result, Err(PurchaseError::NotFound(missing)) if missing == id));
    }

    /// Store whose reads lag behind its writes: every lookup returns the
    /// snapshot it was built with, while decrements see `live_seats`.
    struct StaleInventory {
        snapshot: Segment,
        live_seats: Mutex<Option<u32>>,
    }

    impl Inventory for StaleInventory {
        fn find_segments(&self, _: &SegmentFilter) -> Result<Vec<Segment>, InventoryError> {
            Ok(vec![self.snapshot.clone()])
        }

        fn get_segment(&self, id: &SegmentId) -> Result<Option<Segment>, InventoryError> {
            Ok((self.snapshot.id == *id).then(|| self.snapshot.clone()))
        }

        fn decrement_seats(&self, _: &SegmentId, count: u32) -> Result<SeatUpdate, InventoryError> {
            let mut live = self.live_seats.lock().unwrap();
            match *live {
                Some(seats) if seats >= count => {
                    *live = Some(seats - count);
                    Ok(SeatUpdate::Applied)
                }
                _ => Ok(SeatUpdate::Rejected),
            }
        }
    }

    #[test]
    fn rejected_decrement_reports_insufficient_inventory() {
        let inventory = StaleInventory {
            snapshot: segment(1, 5, Some(20)),
            live_seats: Mutex::new(Some(1)),
        };
        let id = inventory.snapshot.id;

        let result = Booking::new(&inventory).buy(&id, 3);

        // The stale read said 5 seats; the decrement still refused
        assert!(matches!(
            result,
            Err(PurchaseError::InsufficientInventory { requested: 3, .. })
        ));
        assert_eq!(*inventory.live_seats.lock().unwrap(), Some(1));
    }

    /// Store where the segment disappears between lookup and decrement.
    struct VanishingInventory {
        snapshot: Segment,
        reads: Mutex<usize>,
    }

    impl Inventory for VanishingInventory {
        fn find_segments(&self, _: &SegmentFilter) -> Result<Vec<Segment>, InventoryError> {
            Ok(Vec::new())
        }

        fn get_segment(&self, _: &SegmentId) -> Result<Option<Segment>, InventoryError> {
            let mut reads = self.reads.lock().unwrap();
            *reads += 1;
            Ok((*reads == 1).then(|| self.snapshot.clone()))
        }

        fn decrement_seats(&self, _: &SegmentId, _: u32) -> Result<SeatUpdate, InventoryError> {
            Ok(SeatUpdate::Rejected)
        }
    }

    #[test]
    fn rejected_decrement_on_vanished_segment_is_not_found() {
        let inventory = VanishingInventory {
            snapshot: segment(1, 5, Some(20)),
            reads: Mutex::new(0),
        };
        let id = inventory.snapshot.id;

        let result = Booking::new(&inventory).buy(&id, 1);

        assert!(matches!(result, Err(PurchaseError::NotFound(_))));
    }

    #[test]
    fn inventory_failure_propagates() {
        struct Down;

        impl Inventory for Down {
            fn find_segments(&self, _: &SegmentFilter) -> Result<Vec<Segment>, InventoryError> {
                Err(InventoryError::Unavailable("down".to_string()))
            }
            fn get_segment(&self, _: &SegmentId) -> Result<Option<Segment>, InventoryError> {
                Err(InventoryError::Unavailable("down".to_string()))
            }
            fn decrement_seats(&self, _: &SegmentId, _: u32) -> Result<SeatUpdate, InventoryError> {
                Err(InventoryError::Unavailable("down".to_string()))
            }
        }

        let result = Booking::new(&Down).buy(&SegmentId::from_uuid(Uuid::from_u128(1)), 1);

        assert!(matches!(result, Err(PurchaseError::Inventory(_))));
    }
}
