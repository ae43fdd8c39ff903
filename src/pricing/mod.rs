//! Pricing engine for multi-hotel travel packages.
//!
//! Prices hotel legs (rooms, breakfast, airport transfers) and guided tours
//! into one itemized breakdown. The engine is pure computation over the
//! catalog records and draft passed in; `routes` exposes it over HTTP/JSON.

pub mod calculators;
pub mod models;
pub mod policy;
pub mod quote;
pub mod rates;
pub mod requests;
pub mod responses;
pub mod rooms;
pub mod routes;
pub mod segments;
pub mod tours;
pub mod transport;
pub mod warnings;

// Re-export commonly used items
pub use calculators::round_money;
pub use models::{GuestComposition, HotelEntry, HotelRecord, RoomAllocation, RoomType, Tour, TourKind, VehicleTier};
pub use quote::{calculate_quote, PriceBreakdown, QuoteEngine, QuoteRequest};
pub use rates::{DirectRates, GuestClass, RateLookup};
pub use routes::router;
pub use transport::TransportationData;
pub use warnings::PricingWarning;
