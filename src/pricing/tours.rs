//! Guided tour pricing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculators::{non_negative, times};
use super::models::{GuestComposition, Tour, TourKind};
use super::policy::{band_charge, AgeBand, BandCharge, CostCategory};
use super::warnings::{or_overflow, PricingWarning};

/// Priced tour for itemized display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourCostLine {
    pub tour_id: Uuid,
    pub name: String,
    pub kind: TourKind,
    pub cost: Decimal,
}

/// Cost of one tour for the party, or `None` when it overflows.
///
/// VIP tours are one flat price per vehicle; capacity is not enforced.
/// Group tours charge adults and 6-12 children the tour price, 3-6 children
/// the children price when the tour has one, and under-3 nothing.
pub fn calculate_tour_cost(tour: &Tour, guests: &GuestComposition) -> Option<Decimal> {
    match tour.kind {
        TourKind::Vip => Some(non_negative(tour.price)),
        TourKind::Group => group_cost(tour, guests),
    }
}

fn group_cost(tour: &Tour, guests: &GuestComposition) -> Option<Decimal> {
    let children_price = tour.children_price.filter(|price| *price > Decimal::ZERO);

    AgeBand::ALL
        .iter()
        .try_fold(times(tour.price, guests.adults)?, |cost, band| {
            let count = guests.count(*band);
            let charge = match (band_charge(CostCategory::Tour, *band), children_price) {
                (BandCharge::Free, _) | (BandCharge::ChargedAtBandRate, None) => return Some(cost),
                (BandCharge::ChargedAsAdult, _) => times(tour.price, count)?,
                (BandCharge::ChargedAtBandRate, Some(price)) => times(price, count)?,
            };
            cost.checked_add(charge)
        })
}

/// Price a tour for display; an overflowing cost is zero with a warning.
pub fn price_tour(tour: &Tour, guests: &GuestComposition, warnings: &mut Vec<PricingWarning>) -> TourCostLine {
    TourCostLine {
        tour_id: tour.id,
        name: tour.name.clone(),
        kind: tour.kind,
        cost: or_overflow(calculate_tour_cost(tour, guests), &tour.name, "tour", warnings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tour(kind: TourKind, price: Decimal, children_price: Option<Decimal>) -> Tour {
        Tour {
            id: Uuid::from_u128(7),
            name: "Bosphorus cruise".to_string(),
            kind,
            price,
            children_price,
            vehicle_type: None,
            vehicle_capacity: None,
        }
    }

    #[test]
    fn test_vip_ignores_headcount() {
        let vip = tour(TourKind::Vip, dec!(200), None);
        let one = calculate_tour_cost(&vip, &GuestComposition::new(1, 0, 0, 0));
        let eight = calculate_tour_cost(&vip, &GuestComposition::new(8, 2, 2, 2));
        assert_eq!(one, Some(dec!(200)));
        assert_eq!(eight, Some(dec!(200)));
    }

    #[test]
    fn test_vip_capacity_not_enforced() {
        let mut vip = tour(TourKind::Vip, dec!(200), None);
        vip.vehicle_type = Some("Vito".to_string());
        vip.vehicle_capacity = Some(4);
        assert_eq!(calculate_tour_cost(&vip, &GuestComposition::new(9, 0, 0, 0)), Some(dec!(200)));
    }

    #[test]
    fn test_group_older_children_pay_adult_price() {
        let group = tour(TourKind::Group, dec!(30), None);
        let cost = calculate_tour_cost(&group, &GuestComposition::new(4, 0, 0, 1));
        assert_eq!(cost, Some(dec!(150)));
    }

    #[test]
    fn test_group_scales_linearly() {
        let group = tour(TourKind::Group, dec!(30), None);
        for paying in 0..6u32 {
            let guests = GuestComposition::new(paying, 0, 0, 0);
            assert_eq!(calculate_tour_cost(&group, &guests), Some(dec!(30) * Decimal::from(paying)));
        }
    }

    #[test]
    fn test_group_young_children_free_without_children_price() {
        let group = tour(TourKind::Group, dec!(30), None);
        let cost = calculate_tour_cost(&group, &GuestComposition::new(2, 0, 3, 0));
        assert_eq!(cost, Some(dec!(60)));
    }

    #[test]
    fn test_group_young_children_with_children_price() {
        let group = tour(TourKind::Group, dec!(30), Some(dec!(15)));
        let cost = calculate_tour_cost(&group, &GuestComposition::new(2, 0, 3, 0));
        assert_eq!(cost, Some(dec!(105)));
    }

    #[test]
    fn test_group_zero_children_price_means_free() {
        let group = tour(TourKind::Group, dec!(30), Some(dec!(0)));
        let cost = calculate_tour_cost(&group, &GuestComposition::new(2, 0, 3, 0));
        assert_eq!(cost, Some(dec!(60)));
    }

    #[test]
    fn test_infants_never_charged() {
        let group = tour(TourKind::Group, dec!(30), Some(dec!(15)));
        let vip = tour(TourKind::Vip, dec!(200), None);
        let with_infants = GuestComposition::new(2, 4, 0, 0);
        let without = GuestComposition::new(2, 0, 0, 0);
        assert_eq!(calculate_tour_cost(&group, &with_infants), calculate_tour_cost(&group, &without));
        assert_eq!(calculate_tour_cost(&vip, &with_infants), calculate_tour_cost(&vip, &without));
    }

    #[test]
    fn test_negative_price_clamped() {
        let group = tour(TourKind::Group, dec!(-30), None);
        assert_eq!(calculate_tour_cost(&group, &GuestComposition::new(2, 0, 0, 0)), Some(dec!(0)));
        let vip = tour(TourKind::Vip, dec!(-200), None);
        assert_eq!(calculate_tour_cost(&vip, &GuestComposition::new(2, 0, 0, 0)), Some(dec!(0)));
    }

    #[test]
    fn test_price_tour_line() {
        let mut warnings = Vec::new();
        let line = price_tour(&tour(TourKind::Vip, dec!(200), None), &GuestComposition::default(), &mut warnings);
        assert_eq!(line.kind, TourKind::Vip);
        assert_eq!(line.cost, dec!(200));
        assert_eq!(line.name, "Bosphorus cruise");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_group_overflow_is_none() {
        let group = tour(TourKind::Group, Decimal::MAX, None);
        assert_eq!(calculate_tour_cost(&group, &GuestComposition::new(2, 0, 0, 0)), None);
        assert_eq!(calculate_tour_cost(&group, &GuestComposition::new(1, 0, 0, 1)), None);
        assert_eq!(calculate_tour_cost(&group, &GuestComposition::new(1, 0, 0, 0)), Some(Decimal::MAX));
    }

    #[test]
    fn test_price_tour_overflow_degrades_to_zero() {
        let mut warnings = Vec::new();
        let group = tour(TourKind::Group, Decimal::MAX, None);
        let line = price_tour(&group, &GuestComposition::new(3, 0, 0, 0), &mut warnings);
        assert_eq!(line.cost, dec!(0));
        assert!(matches!(
            warnings.as_slice(),
            [PricingWarning::AmountOverflow { .. }]
        ));
    }
}
