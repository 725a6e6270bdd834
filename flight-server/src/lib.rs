//! Flight itinerary search server.
//!
//! A web application that answers: "How can I fly from this city to that
//! one, and which option is cheapest and which is fastest?"

pub mod booking;
pub mod domain;
pub mod inventory;
pub mod planner;
pub mod web;
