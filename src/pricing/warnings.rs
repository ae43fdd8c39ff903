//! Data-quality diagnostics raised while pricing.
//!
//! Nothing in the engine fails a quote. When catalog data is missing or
//! malformed the affected component is priced at zero and a warning is both
//! logged and returned with the breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::VehicleTier;
use super::transport::TransferLeg;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingWarning {
    InvertedDates {
        hotel: String,
    },
    StayTooLong {
        hotel: String,
        nights: u32,
        limit: u32,
    },
    UnknownRoomType {
        hotel: String,
        room_type_id: Uuid,
    },
    NoRoomTypes {
        hotel: String,
    },
    MissingBreakfastPrice {
        hotel: String,
    },
    MissingTransportation {
        hotel: String,
    },
    UnknownAirport {
        hotel: String,
        requested: String,
        used: String,
    },
    MissingTransferPrice {
        hotel: String,
        vehicle: VehicleTier,
        leg: TransferLeg,
    },
    AmountOverflow {
        scope: String,
        component: String,
    },
}

impl std::fmt::Display for PricingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingWarning::InvertedDates { hotel } => {
                write!(f, "{}: check-out precedes check-in, priced as zero nights", hotel)
            }
            PricingWarning::StayTooLong { hotel, nights, limit } => {
                write!(
                    f,
                    "{}: stay of {} nights exceeds the {} night limit, priced as zero nights",
                    hotel, nights, limit
                )
            }
            PricingWarning::UnknownRoomType { hotel, room_type_id } => {
                write!(f, "{}: allocation references unknown room type {}", hotel, room_type_id)
            }
            PricingWarning::NoRoomTypes { hotel } => {
                write!(f, "{}: no room types to estimate accommodation", hotel)
            }
            PricingWarning::MissingBreakfastPrice { hotel } => {
                write!(f, "{}: breakfast requested but no breakfast price", hotel)
            }
            PricingWarning::MissingTransportation { hotel } => {
                write!(f, "{}: transfer requested but no transportation data", hotel)
            }
            PricingWarning::UnknownAirport { hotel, requested, used } => {
                write!(f, "{}: airport '{}' not listed, using '{}'", hotel, requested, used)
            }
            PricingWarning::MissingTransferPrice { hotel, vehicle, leg } => {
                write!(
                    f,
                    "{}: no {} price for {}",
                    hotel,
                    leg.as_str(),
                    vehicle.as_str()
                )
            }
            PricingWarning::AmountOverflow { scope, component } => {
                write!(f, "{}: {} is too large to represent, priced as zero", scope, component)
            }
        }
    }
}

/// Log a warning and keep it for the caller.
pub(crate) fn record(warnings: &mut Vec<PricingWarning>, warning: PricingWarning) {
    tracing::warn!("Pricing degraded: {}", warning);
    warnings.push(warning);
}

/// Unwrap a checked amount, pricing an overflowed component at zero.
pub(crate) fn or_overflow(
    amount: Option<Decimal>,
    scope: &str,
    component: &str,
    warnings: &mut Vec<PricingWarning>,
) -> Decimal {
    amount.unwrap_or_else(|| {
        record(
            warnings,
            PricingWarning::AmountOverflow {
                scope: scope.to_string(),
                component: component.to_string(),
            },
        );
        Decimal::ZERO
    })
}
