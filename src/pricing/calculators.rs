//! Money helpers shared by every cost calculator.
//!
//! Amounts are accumulated at full precision and only rounded when a value is
//! surfaced (sub-totals, aggregates, the grand total).

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Number of decimal places used for surfaced amounts.
pub const MONEY_PLACES: u32 = 2;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use travel_quote::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Clamp a source price or computed amount to zero.
pub fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Prepare an accumulated amount for display: clamp, round to cents and
/// always carry two decimal places.
pub fn surface(amount: Decimal) -> Decimal {
    let mut surfaced = round_money(non_negative(amount), MONEY_PLACES);
    surfaced.rescale(MONEY_PLACES);
    surfaced
}

/// `price × quantity`, with negative prices treated as zero.
///
/// `None` when the product does not fit in a `Decimal`.
pub fn times(price: Decimal, quantity: u32) -> Option<Decimal> {
    non_negative(price).checked_mul(Decimal::from(quantity))
}

/// Sum of `amounts`, or `None` once the running total overflows.
pub fn checked_total<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}
