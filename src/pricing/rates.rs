//! Nightly rate resolution with monthly overrides.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculators::non_negative;
use super::models::RoomType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestClass {
    Adult,
    Child,
}

/// Catalog prices a monthly rate is resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateInputs {
    pub base: Decimal,
    pub seasonal: Option<Decimal>,
}

impl RateInputs {
    pub fn for_month(room: &RoomType, month: u32, class: GuestClass) -> Self {
        let seasonal = room.monthly_override(month).and_then(|rate| match class {
            GuestClass::Adult => rate.adult,
            GuestClass::Child => rate.child,
        });
        let base = match class {
            GuestClass::Adult => room.adult_price,
            GuestClass::Child => room.child_price,
        };
        Self { base, seasonal }
    }

    /// A seasonal price wins only when it is present and strictly positive.
    pub fn resolve(&self) -> Decimal {
        let seasonal = self.seasonal.filter(|price| *price > Decimal::ZERO);
        non_negative(seasonal.unwrap_or(self.base))
    }
}

/// Nightly price for a room type in a given month (1-12).
///
/// A monthly override wins only when it is present and strictly positive;
/// otherwise the base price for the class applies.
pub fn resolve_month_rate(room: &RoomType, month: u32, class: GuestClass) -> Decimal {
    RateInputs::for_month(room, month, class).resolve()
}

/// Nightly price for a room type on a given date.
pub fn resolve_nightly_rate(room: &RoomType, date: NaiveDate, class: GuestClass) -> Decimal {
    resolve_month_rate(room, date.month(), class)
}

/// Source of nightly rates for the room cost calculator.
///
/// Implementations must return exactly what [`resolve_month_rate`] would for
/// the room type they are handed; they may only differ in how often they
/// compute it.
pub trait RateLookup: Send + Sync {
    fn month_rate(&self, room: &RoomType, month: u32, class: GuestClass) -> Decimal;
}

/// Resolves every lookup directly from the room type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRates;

impl RateLookup for DirectRates {
    fn month_rate(&self, room: &RoomType, month: u32, class: GuestClass) -> Decimal {
        resolve_month_rate(room, month, class)
    }
}

impl<T: RateLookup + ?Sized> RateLookup for &T {
    fn month_rate(&self, room: &RoomType, month: u32, class: GuestClass) -> Decimal {
        (**self).month_rate(room, month, class)
    }
}
