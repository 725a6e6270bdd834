//! Flight segment identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when parsing an invalid segment identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid segment id: {reason}")]
pub struct InvalidSegmentId {
    reason: &'static str,
}

/// Identity of a single flight segment in the catalogue.
///
/// Wraps a UUID. Two segments with the same origin, destination and times
/// are still different segments if their ids differ; paths use the id to
/// avoid boarding the same segment twice.
///
/// # Examples
///
/// ```
/// use flight_server::domain::SegmentId;
///
/// let id = SegmentId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
/// assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
///
/// assert!(SegmentId::parse("not-a-uuid").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(Uuid);

impl SegmentId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        SegmentId(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        SegmentId(uuid)
    }

    /// Parse an identifier from its hyphenated UUID form.
    ///
    /// The nil UUID is rejected: it is never assigned to a segment.
    pub fn parse(s: &str) -> Result<Self, InvalidSegmentId> {
        let uuid = Uuid::parse_str(s.trim()).map_err(|_| InvalidSegmentId {
            reason: "must be a UUID",
        })?;

        if uuid.is_nil() {
            return Err(InvalidSegmentId {
                reason: "nil UUID is not a segment id",
            });
        }

        Ok(SegmentId(uuid))
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentId({})", self.0)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
