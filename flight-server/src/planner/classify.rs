//! Result classification for search results.
//!
//! Splits enumerated paths into the bucket the caller asked for, falls back
//! to a single best-effort path when that bucket is empty, and tags the
//! cheapest and fastest entries of a genuine bucket.

use crate::domain::{Category, City, Itinerary};

use super::enumerate::Enumeration;

/// Search results split by shape.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    /// One-leg itineraries (searches without a transit city).
    pub direct: Vec<Itinerary>,

    /// Two-leg itineraries through the transit city, or the single
    /// best-effort path when `fallback` is set.
    pub connecting: Vec<Itinerary>,

    /// True when `connecting` holds a best-effort substitute rather than
    /// a path matching the request.
    pub fallback: bool,
}

/// Select the result bucket for a search.
///
/// - Without a transit city, the direct bucket holds every one-leg path.
/// - With a transit city, the connecting bucket holds every two-leg path
///   (each of which lands in the transit city, or it would not have been
///   accepted).
///
/// If the preferred bucket is empty, the first accepted path is returned
/// alone in `connecting` with `fallback` set. When nothing was accepted at
/// all, the first path that reached the destination while skipping the
/// transit city is used instead. This drops the transit constraint without
/// saying which constraint was dropped; the flag is the only signal.
pub fn select_buckets(enumeration: Enumeration, via: Option<&City>) -> Buckets {
    let (preferred, rest): (Vec<_>, Vec<_>) =
        enumeration.accepted.into_iter().partition(|path| match via {
            None => path.is_direct(),
            Some(_) => path.connection_count() == 1,
        });

    if !preferred.is_empty() {
        return match via {
            None => Buckets {
                direct: preferred,
                ..Default::default()
            },
            Some(_) => Buckets {
                connecting: preferred,
                ..Default::default()
            },
        };
    }

    // Nothing matched, so `rest` is every accepted path in pop order
    let best_effort = rest.into_iter().next().or(enumeration.first_unqualified);

    Buckets {
        direct: Vec::new(),
        fallback: best_effort.is_some(),
        connecting: best_effort.into_iter().collect(),
    }
}

/// Tag and reorder one bucket.
///
/// The entry with the lowest total price is tagged cheapest and the entry
/// with the shortest duration fastest; on ties the earlier entry wins. If
/// one entry wins both it is tagged [`Category::CheapestAndFastest`].
///
/// The fastest entry is moved to index 0 and the cheapest to index 1 (when
/// distinct); everything else keeps its relative order.
pub fn classify(mut bucket: Vec<Itinerary>) -> Vec<Itinerary> {
    let Some((fastest, cheapest)) = find_winners(&bucket) else {
        return bucket;
    };

    if fastest == cheapest {
        bucket[fastest].set_category(Category::CheapestAndFastest);
    } else {
        bucket[fastest].set_category(Category::Fastest);
        bucket[cheapest].set_category(Category::Cheapest);
    }

    place_winners_first(bucket, fastest, cheapest)
}

/// Indices of the (fastest, cheapest) entries, first occurrence on ties.
fn find_winners(bucket: &[Itinerary]) -> Option<(usize, usize)> {
    let first = bucket.first()?;

    let mut fastest = (0, first.duration());
    let mut cheapest = (0, first.total_price());

    for (i, path) in bucket.iter().enumerate().skip(1) {
        if path.duration() < fastest.1 {
            fastest = (i, path.duration());
        }
        if path.total_price() < cheapest.1 {
            cheapest = (i, path.total_price());
        }
    }

    Some((fastest.0, cheapest.0))
}

/// Build a new list with `items[fastest]` first, `items[cheapest]` second
/// (unless it is the same entry) and the remainder in original order.
pub fn place_winners_first<T>(items: Vec<T>, fastest: usize, cheapest: usize) -> Vec<T> {
    let mut first = None;
    let mut second = None;
    let mut rest = Vec::with_capacity(items.len());

    for (i, item) in items.into_iter().enumerate() {
        if i == fastest {
            first = Some(item);
        } else if i == cheapest {
            second = Some(item);
        } else {
            rest.push(item);
        }
    }

    let mut ordered = Vec::with_capacity(rest.len() + 2);
    ordered.extend(first);
    ordered.extend(second);
    ordered.extend(rest);
    ordered
}
