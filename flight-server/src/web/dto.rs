//! Data transfer objects for web requests and responses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::Receipt;
use crate::domain::{Category, City, Itinerary, Segment};
use crate::inventory::DepartureWindow;
use crate::planner::{SearchError, SearchOutcome, SearchRequest, SortOrder};

/// Query string of a flight search.
#[derive(Debug, Deserialize)]
pub struct SearchFlightsRequest {
    /// Origin city
    #[serde(rename = "city-from")]
    pub city_from: String,

    /// Destination city
    #[serde(rename = "city-to")]
    pub city_to: String,

    /// Optional transit city
    #[serde(rename = "city-via")]
    pub city_via: Option<String>,

    /// Optional price ordering ("asc" or "desc")
    pub arrange: Option<String>,

    /// Seats needed on every leg
    pub quantity: Option<u32>,

    /// Earliest departure (RFC 3339)
    #[serde(rename = "take-off")]
    pub take_off: Option<String>,

    /// Latest departure (RFC 3339)
    pub arrival: Option<String>,
}

impl SearchFlightsRequest {
    /// Parse into a planner request.
    pub fn to_search_request(&self) -> Result<SearchRequest, SearchError> {
        let origin = parse_city("city-from", &self.city_from)?;
        let destination = parse_city("city-to", &self.city_to)?;
        let mut request = SearchRequest::new(origin, destination);

        if let Some(via) = self.city_via.as_deref().filter(|v| !v.trim().is_empty()) {
            request = request.with_via(parse_city("city-via", via)?);
        }

        if let Some(arrange) = &self.arrange {
            let order: SortOrder = arrange
                .parse()
                .map_err(|e| SearchError::InvalidRequest(format!("arrange: {e}")))?;
            request = request.with_sort(order);
        }

        if let Some(quantity) = self.quantity {
            request = request.with_min_seats(quantity);
        }

        match (&self.take_off, &self.arrival) {
            (Some(from), Some(until)) => {
                let window = DepartureWindow::new(
                    parse_instant("take-off", from)?,
                    parse_instant("arrival", until)?,
                );
                request = request.with_departure_window(window);
            }
            (None, None) => {}
            _ => {
                return Err(SearchError::InvalidRequest(
                    "take-off and arrival must be given together".to_string(),
                ));
            }
        }

        Ok(request)
    }
}

fn parse_city(field: &str, raw: &str) -> Result<City, SearchError> {
    City::parse(raw).map_err(|e| SearchError::InvalidRequest(format!("{field}: {e}")))
}

fn parse_instant(field: &str, raw: &str) -> Result<DateTime<Utc>, SearchError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| SearchError::InvalidRequest(format!("{field}: {e}")))
}

/// A flight segment in search results.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// Segment identity, used to buy seats
    pub id: String,

    pub origin: String,
    pub destination: String,

    /// Free seats at search time
    pub seats: u32,

    /// Per-seat price
    pub price: Option<u32>,

    pub departure: Option<String>,
    pub arrival: String,

    /// Time in the air in seconds, if the departure is known
    pub flight_time_secs: Option<i64>,
}

/// An itinerary option.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// Flights in travel order
    pub legs: Vec<SegmentResult>,

    /// Departure from origin
    pub departure: String,

    /// Arrival at destination
    pub arrival: String,

    /// Door-to-door duration in seconds
    pub duration_secs: i64,

    /// Sum of leg prices
    pub total_price: u64,

    pub category: Category,
}

/// Response for flight search.
#[derive(Debug, Serialize)]
pub struct SearchFlightsResponse {
    pub direct: Vec<ItineraryResult>,
    pub connecting: Vec<ItineraryResult>,

    /// True when `connecting` is a best-effort substitute
    pub fallback: bool,
}

/// Body of a seat purchase.
#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    /// Seats to buy
    pub quantity: u32,
}

/// Response for a seat purchase.
#[derive(Debug, Serialize)]
pub struct ReceiptResult {
    pub segment_id: String,
    pub origin: String,
    pub destination: String,
    pub departure: Option<String>,
    pub arrival: String,
    pub quantity: u32,

    /// Total paid
    pub price: Option<u64>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl SegmentResult {
    /// Create from a domain Segment.
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            id: segment.id.to_string(),
            origin: segment.origin.to_string(),
            destination: segment.destination.to_string(),
            seats: segment.seats,
            price: segment.price,
            departure: segment.departure.as_ref().map(format_time),
            arrival: format_time(&segment.arrival),
            flight_time_secs: segment.flight_time().map(|d| d.num_seconds()),
        }
    }
}

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            legs: itinerary
                .legs()
                .iter()
                .map(|leg| SegmentResult::from_segment(leg))
                .collect(),
            departure: format_time(&itinerary.departure()),
            arrival: format_time(&itinerary.arrival()),
            duration_secs: itinerary.duration().num_seconds(),
            total_price: itinerary.total_price(),
            category: itinerary.category(),
        }
    }
}

impl SearchFlightsResponse {
    /// Create from a planner outcome.
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        Self {
            direct: outcome.direct.iter().map(ItineraryResult::from_itinerary).collect(),
            connecting: outcome
                .connecting
                .iter()
                .map(ItineraryResult::from_itinerary)
                .collect(),
            fallback: outcome.fallback,
        }
    }
}

impl ReceiptResult {
    /// Create from a booking Receipt.
    pub fn from_receipt(receipt: &Receipt) -> Self {
        Self {
            segment_id: receipt.segment_id.to_string(),
            origin: receipt.origin.to_string(),
            destination: receipt.destination.to_string(),
            departure: receipt.departure.as_ref().map(format_time),
            arrival: format_time(&receipt.arrival),
            quantity: receipt.quantity,
            price: receipt.price,
        }
    }
}

/// Format an instant as RFC 3339 with whole seconds, e.g. "2024-03-15T10:00:00Z".
fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
