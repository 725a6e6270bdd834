//! Inventory store error types.

use crate::domain::{DomainError, SegmentId};

/// Errors from an inventory store.
///
/// Callers treat these as opaque upstream failures and propagate them
/// unchanged.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InventoryError {
    /// A segment with this identity is already stored
    #[error("segment {0} already exists")]
    Duplicate(SegmentId),

    /// The segment breaks a domain invariant
    #[error("invalid segment: {0}")]
    InvalidSegment(#[from] DomainError),

    /// A catalogue file could not be read or parsed
    #[error("failed to load catalogue from {path}: {message}")]
    Load { path: String, message: String },

    /// The store cannot serve requests
    #[error("inventory unavailable: {0}")]
    Unavailable(String),
}
