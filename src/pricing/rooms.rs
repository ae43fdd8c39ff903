//! Accommodation and breakfast pricing for one hotel leg.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculators::times;
use super::models::{GuestComposition, HotelEntry, RoomType};
use super::policy::{band_charge, AgeBand, BandCharge, CostCategory};
use super::rates::{GuestClass, RateLookup};
use super::segments::{MonthSegment, StayDates, MAX_STAY_NIGHTS};
use super::warnings::{or_overflow, record, PricingWarning};

/// Cost of every room of one type on a leg, for itemized display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeLine {
    pub room_type_id: Uuid,
    pub label: String,
    pub rooms: u32,
    pub adults: u32,
    pub children_under_3: u32,
    pub children_3_to_6: u32,
    pub children_6_to_12: u32,
    pub cost: Decimal,
}

/// Result of accommodation pricing for one hotel leg
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomCostResult {
    pub nights: u32,
    pub segments: Vec<MonthSegment>,
    /// Priced allocations, or the implied count in estimate mode.
    pub room_count: u32,
    pub estimated: bool,
    pub room_cost: Decimal,
    pub breakfast_cost: Decimal,
    pub total_cost: Decimal,
    pub lines: Vec<RoomTypeLine>,
    pub warnings: Vec<PricingWarning>,
}

/// Price rooms and breakfast for a hotel leg.
///
/// Each allocation is one room. The adult rate is charged per room-night and
/// children are charged per head according to the accommodation policy.
/// Without allocations the leg is estimated from `package_guests`: one room
/// of the first room type per two adults.
pub fn calculate_room_cost<R: RateLookup + ?Sized>(
    entry: &HotelEntry,
    package_guests: &GuestComposition,
    rates: &R,
) -> RoomCostResult {
    let hotel = entry.hotel.name.as_str();
    let stay = StayDates::new(entry.check_in, entry.check_out);

    let mut result = RoomCostResult {
        nights: stay.nights(),
        segments: stay.segments(),
        ..Default::default()
    };

    if stay.is_inverted() {
        record(
            &mut result.warnings,
            PricingWarning::InvertedDates {
                hotel: hotel.to_string(),
            },
        );
    }

    if stay.is_too_long() {
        record(
            &mut result.warnings,
            PricingWarning::StayTooLong {
                hotel: hotel.to_string(),
                nights: stay.requested_nights(),
                limit: MAX_STAY_NIGHTS,
            },
        );
    }

    let room_cost = if entry.rooms.is_empty() {
        estimate_rooms(entry, package_guests, rates, &mut result)
    } else {
        price_allocations(entry, rates, &mut result)
    };

    if room_cost.is_none() {
        for line in &mut result.lines {
            line.cost = Decimal::ZERO;
        }
    }
    result.room_cost = or_overflow(room_cost, hotel, "accommodation", &mut result.warnings);

    result.breakfast_cost = breakfast_cost(entry, result.room_count, result.nights, &mut result.warnings);
    result.total_cost = or_overflow(
        result.room_cost.checked_add(result.breakfast_cost),
        hotel,
        "rooms and breakfast",
        &mut result.warnings,
    );

    tracing::debug!(
        "Room cost for {}: {} nights, {} rooms, room {} breakfast {}",
        hotel,
        result.nights,
        result.room_count,
        result.room_cost,
        result.breakfast_cost
    );

    result
}

/// Price every allocation as one room; `None` when the total overflows.
fn price_allocations<R: RateLookup + ?Sized>(
    entry: &HotelEntry,
    rates: &R,
    result: &mut RoomCostResult,
) -> Option<Decimal> {
    let mut total = Some(Decimal::ZERO);

    for allocation in &entry.rooms {
        let Some(room_type) = entry.hotel.room_type(allocation.room_type_id) else {
            record(
                &mut result.warnings,
                PricingWarning::UnknownRoomType {
                    hotel: entry.hotel.name.clone(),
                    room_type_id: allocation.room_type_id,
                },
            );
            continue;
        };

        let occupants = GuestComposition::new(
            allocation.adults,
            allocation.children_under_3,
            allocation.children_3_to_6,
            allocation.children_6_to_12,
        );
        let cost = stay_cost(room_type, 1, &occupants, &result.segments, rates);
        add_line(&mut result.lines, room_type, 1, &occupants, cost.unwrap_or_default());
        total = total.zip(cost).and_then(|(sum, cost)| sum.checked_add(cost));
        result.room_count = result.room_count.saturating_add(1);
    }

    total
}

fn estimate_rooms<R: RateLookup + ?Sized>(
    entry: &HotelEntry,
    guests: &GuestComposition,
    rates: &R,
    result: &mut RoomCostResult,
) -> Option<Decimal> {
    result.estimated = true;
    let implied_rooms = guests.adults.div_ceil(2);
    if implied_rooms == 0 {
        return Some(Decimal::ZERO);
    }

    let Some(room_type) = entry.hotel.room_types.first() else {
        record(
            &mut result.warnings,
            PricingWarning::NoRoomTypes {
                hotel: entry.hotel.name.clone(),
            },
        );
        return Some(Decimal::ZERO);
    };

    let cost = stay_cost(room_type, implied_rooms, guests, &result.segments, rates);
    add_line(&mut result.lines, room_type, implied_rooms, guests, cost.unwrap_or_default());
    result.room_count = implied_rooms;
    cost
}

/// Accrue `rooms` rooms of one type plus charged children over every month segment.
fn stay_cost<R: RateLookup + ?Sized>(
    room_type: &RoomType,
    rooms: u32,
    occupants: &GuestComposition,
    segments: &[MonthSegment],
    rates: &R,
) -> Option<Decimal> {
    segments.iter().try_fold(Decimal::ZERO, |total, segment| {
        let nights = Decimal::from(segment.nights);
        let adult_rate = rates.month_rate(room_type, segment.month, GuestClass::Adult);
        let child_rate = rates.month_rate(room_type, segment.month, GuestClass::Child);

        let mut cost = times(adult_rate, rooms)?.checked_mul(nights)?;
        for band in AgeBand::ALL {
            let count = occupants.count(band);
            if count == 0 {
                continue;
            }
            let rate = match band_charge(CostCategory::Accommodation, band) {
                BandCharge::Free => continue,
                BandCharge::ChargedAsAdult => adult_rate,
                BandCharge::ChargedAtBandRate => child_rate,
            };
            cost = cost.checked_add(times(rate, count)?.checked_mul(nights)?)?;
        }
        total.checked_add(cost)
    })
}

fn add_line(
    lines: &mut Vec<RoomTypeLine>,
    room_type: &RoomType,
    rooms: u32,
    occupants: &GuestComposition,
    cost: Decimal,
) {
    match lines.iter_mut().find(|line| line.room_type_id == room_type.id) {
        Some(line) => {
            line.rooms = line.rooms.saturating_add(rooms);
            line.adults = line.adults.saturating_add(occupants.adults);
            line.children_under_3 = line.children_under_3.saturating_add(occupants.children_under_3);
            line.children_3_to_6 = line.children_3_to_6.saturating_add(occupants.children_3_to_6);
            line.children_6_to_12 = line.children_6_to_12.saturating_add(occupants.children_6_to_12);
            line.cost = line.cost.saturating_add(cost);
        }
        None => lines.push(RoomTypeLine {
            room_type_id: room_type.id,
            label: room_type.label.clone(),
            rooms,
            adults: occupants.adults,
            children_under_3: occupants.children_under_3,
            children_3_to_6: occupants.children_3_to_6,
            children_6_to_12: occupants.children_6_to_12,
            cost,
        }),
    }
}

/// Breakfast is billed per room per night, not per guest.
fn breakfast_cost(
    entry: &HotelEntry,
    room_count: u32,
    nights: u32,
    warnings: &mut Vec<PricingWarning>,
) -> Decimal {
    if !entry.include_breakfast || room_count == 0 || nights == 0 {
        return Decimal::ZERO;
    }

    match entry.hotel.breakfast_price.filter(|price| *price > Decimal::ZERO) {
        Some(price) => {
            let cost = times(price, room_count).and_then(|per_night| per_night.checked_mul(Decimal::from(nights)));
            or_overflow(cost, &entry.hotel.name, "breakfast", warnings)
        }
        None => {
            record(
                warnings,
                PricingWarning::MissingBreakfastPrice {
                    hotel: entry.hotel.name.clone(),
                },
            );
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{HotelRecord, MonthlyRate, RoomAllocation, VehicleTier};
    use crate::pricing::rates::DirectRates;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn double_room() -> RoomType {
        let mut monthly_prices = vec![MonthlyRate::default(); 12];
        monthly_prices[5].adult = Some(dec!(150));
        RoomType {
            id: Uuid::from_u128(1),
            label: "Double".to_string(),
            adult_price: dec!(100),
            child_price: dec!(40),
            monthly_prices,
        }
    }

    fn single_room() -> RoomType {
        RoomType {
            id: Uuid::from_u128(2),
            label: "Single".to_string(),
            adult_price: dec!(70),
            child_price: dec!(0),
            monthly_prices: vec![],
        }
    }

    fn entry(check_in: NaiveDate, check_out: NaiveDate, rooms: Vec<RoomAllocation>) -> HotelEntry {
        HotelEntry {
            hotel: HotelRecord {
                id: Uuid::from_u128(10),
                name: "Sea View".to_string(),
                room_types: vec![double_room(), single_room()],
                transportation: None,
                breakfast_price: Some(dec!(12)),
                airports: vec![],
            },
            check_in: Some(check_in),
            check_out: Some(check_out),
            rooms,
            include_breakfast: false,
            airport: None,
            include_reception: false,
            include_farewell: false,
            vehicle: VehicleTier::Vito,
        }
    }

    fn allocation(room_type_id: Uuid, adults: u32, c3: u32, c36: u32, c612: u32) -> RoomAllocation {
        RoomAllocation {
            room_type_id,
            adults,
            children_under_3: c3,
            children_3_to_6: c36,
            children_6_to_12: c612,
        }
    }

    fn no_guests() -> GuestComposition {
        GuestComposition::default()
    }

    #[test]
    fn test_single_month_base_rate() {
        // $100/night, 3 nights, 1 room, 1 adult
        let leg = entry(
            date(2024, 5, 1),
            date(2024, 5, 4),
            vec![allocation(Uuid::from_u128(1), 1, 0, 0, 0)],
        );
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.room_cost, dec!(300));
        assert_eq!(result.nights, 3);
        assert_eq!(result.room_count, 1);
        assert!(!result.estimated);
    }

    #[test]
    fn test_month_straddling_override() {
        // May 30 -> June 3: 2 nights at 100, 2 nights at 150
        let leg = entry(
            date(2024, 5, 30),
            date(2024, 6, 3),
            vec![allocation(Uuid::from_u128(1), 2, 0, 0, 0)],
        );
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.room_cost, dec!(500));
        assert_eq!(result.segments.len(), 2);
    }

    #[test]
    fn test_segmentation_is_lossless_without_override() {
        let leg = entry(
            date(2024, 1, 20),
            date(2024, 4, 5),
            vec![allocation(Uuid::from_u128(2), 1, 0, 0, 0)],
        );
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.room_cost, dec!(70) * Decimal::from(result.nights));
    }

    #[test]
    fn test_children_bands_at_hotel() {
        // under-3 and 3-6 stay free, each 6-12 child pays the child rate
        let leg = entry(
            date(2024, 5, 1),
            date(2024, 5, 3),
            vec![allocation(Uuid::from_u128(1), 2, 1, 1, 2)],
        );
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.room_cost, dec!(100) * dec!(2) + dec!(40) * dec!(2) * dec!(2));
    }

    #[test]
    fn test_lines_group_by_room_type() {
        let leg = entry(
            date(2024, 5, 1),
            date(2024, 5, 2),
            vec![
                allocation(Uuid::from_u128(1), 2, 0, 0, 0),
                allocation(Uuid::from_u128(2), 1, 0, 0, 0),
                allocation(Uuid::from_u128(1), 2, 0, 0, 1),
            ],
        );
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].label, "Double");
        assert_eq!(result.lines[0].rooms, 2);
        assert_eq!(result.lines[0].adults, 4);
        assert_eq!(result.lines[0].cost, dec!(240));
        assert_eq!(result.lines[1].cost, dec!(70));
        assert_eq!(result.room_cost, dec!(310));
    }

    #[test]
    fn test_unknown_room_type_is_skipped() {
        let leg = entry(
            date(2024, 5, 1),
            date(2024, 5, 3),
            vec![
                allocation(Uuid::from_u128(99), 2, 0, 0, 0),
                allocation(Uuid::from_u128(2), 1, 0, 0, 0),
            ],
        );
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.room_cost, dec!(140));
        assert_eq!(result.room_count, 1);
        assert!(matches!(
            result.warnings.as_slice(),
            [PricingWarning::UnknownRoomType { .. }]
        ));
    }

    #[test]
    fn test_breakfast_per_room_per_night() {
        let mut leg = entry(
            date(2024, 5, 1),
            date(2024, 5, 4),
            vec![
                allocation(Uuid::from_u128(1), 2, 0, 0, 0),
                allocation(Uuid::from_u128(1), 2, 0, 0, 2),
            ],
        );
        leg.include_breakfast = true;
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.breakfast_cost, dec!(12) * dec!(2) * dec!(3));
        assert_eq!(result.total_cost, result.room_cost + result.breakfast_cost);
    }

    #[test]
    fn test_breakfast_without_price_warns() {
        let mut leg = entry(
            date(2024, 5, 1),
            date(2024, 5, 2),
            vec![allocation(Uuid::from_u128(1), 1, 0, 0, 0)],
        );
        leg.include_breakfast = true;
        leg.hotel.breakfast_price = None;
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.breakfast_cost, dec!(0));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_estimate_mode_implies_rooms() {
        let mut leg = entry(date(2024, 5, 1), date(2024, 5, 3), vec![]);
        leg.include_breakfast = true;
        let guests = GuestComposition::new(3, 0, 0, 0);
        let result = calculate_room_cost(&leg, &guests, &DirectRates);
        assert!(result.estimated);
        assert_eq!(result.room_count, 2);
        assert_eq!(result.room_cost, dec!(100) * dec!(2) * dec!(2));
        assert_eq!(result.breakfast_cost, dec!(12) * dec!(2) * dec!(2));
    }

    #[test]
    fn test_estimate_mode_without_room_types() {
        let mut leg = entry(date(2024, 5, 1), date(2024, 5, 3), vec![]);
        leg.hotel.room_types.clear();
        let result = calculate_room_cost(&leg, &GuestComposition::new(2, 0, 0, 0), &DirectRates);
        assert_eq!(result.room_cost, dec!(0));
        assert!(matches!(
            result.warnings.as_slice(),
            [PricingWarning::NoRoomTypes { .. }]
        ));
    }

    #[test]
    fn test_inverted_dates_cost_nothing() {
        let mut leg = entry(
            date(2024, 5, 10),
            date(2024, 5, 1),
            vec![allocation(Uuid::from_u128(1), 2, 0, 0, 0)],
        );
        leg.include_breakfast = true;
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.nights, 0);
        assert_eq!(result.total_cost, dec!(0));
        assert!(matches!(
            result.warnings.as_slice(),
            [PricingWarning::InvertedDates { .. }]
        ));
    }

    #[test]
    fn test_missing_dates_cost_nothing() {
        let mut leg = entry(
            date(2024, 5, 1),
            date(2024, 5, 3),
            vec![allocation(Uuid::from_u128(1), 2, 0, 0, 0)],
        );
        leg.check_out = None;
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.total_cost, dec!(0));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_result_is_reproducible() {
        let leg = entry(
            date(2024, 5, 25),
            date(2024, 7, 2),
            vec![allocation(Uuid::from_u128(1), 2, 0, 1, 1)],
        );
        let first = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        let second = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_overflowing_rate_degrades_to_zero() {
        let mut leg = entry(
            date(2024, 5, 1),
            date(2024, 5, 4),
            vec![
                allocation(Uuid::from_u128(1), 2, 0, 0, 0),
                allocation(Uuid::from_u128(2), 1, 0, 0, 0),
            ],
        );
        leg.hotel.room_types[0].adult_price = Decimal::MAX;
        leg.hotel.room_types[0].monthly_prices.clear();
        leg.include_breakfast = true;

        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.room_cost, dec!(0));
        assert!(result.lines.iter().all(|line| line.cost.is_zero()));
        assert_eq!(result.breakfast_cost, dec!(12) * dec!(2) * dec!(3));
        assert_eq!(result.total_cost, result.breakfast_cost);
        assert!(matches!(
            result.warnings.as_slice(),
            [PricingWarning::AmountOverflow { .. }]
        ));
    }

    #[test]
    fn test_overflowing_breakfast_degrades_to_zero() {
        let mut leg = entry(
            date(2024, 5, 1),
            date(2024, 5, 4),
            vec![allocation(Uuid::from_u128(2), 1, 0, 0, 0)],
        );
        leg.include_breakfast = true;
        leg.hotel.breakfast_price = Some(Decimal::MAX);

        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.room_cost, dec!(210));
        assert_eq!(result.breakfast_cost, dec!(0));
        assert_eq!(result.total_cost, dec!(210));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_over_long_stay_is_zero_nights() {
        let leg = entry(
            NaiveDate::MIN,
            NaiveDate::MAX,
            vec![allocation(Uuid::from_u128(1), 2, 0, 0, 0)],
        );
        let result = calculate_room_cost(&leg, &no_guests(), &DirectRates);
        assert_eq!(result.nights, 0);
        assert!(result.segments.is_empty());
        assert_eq!(result.total_cost, dec!(0));
        assert!(matches!(
            result.warnings.as_slice(),
            [PricingWarning::StayTooLong { limit: MAX_STAY_NIGHTS, .. }]
        ));
    }
}
