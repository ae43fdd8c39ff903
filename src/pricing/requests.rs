//! Request DTOs for pricing API endpoints.
//!
//! A full package quote takes a [`QuoteRequest`](super::quote::QuoteRequest) as is.

use chrono::NaiveDate;
use serde::Deserialize;

use super::models::{GuestComposition, HotelEntry, Tour};

/// Request to price a single hotel leg
#[derive(Debug, Deserialize)]
pub struct HotelLegRequest {
    pub entry: HotelEntry,
    /// Needed for estimate mode and transfers when the leg has no allocations.
    #[serde(default)]
    pub guests: GuestComposition,
}

/// Request to price one tour
#[derive(Debug, Deserialize)]
pub struct TourCostRequest {
    pub tour: Tour,
    #[serde(default)]
    pub guests: GuestComposition,
}

/// Request to split a stay into month segments
#[derive(Debug, Deserialize)]
pub struct SegmentsRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}
