//! Children age-band charging policy.
//!
//! The same three bands are charged differently depending on what is being
//! priced. Hotel accommodation lets the two youngest bands stay free and
//! bills 6–12 at the room's child rate; tours bill 6–12 exactly like adults
//! and 3–6 at the tour's children price (free when it has none). The table
//! below is the single place those rules live.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Under3,
    From3To6,
    From6To12,
}

impl AgeBand {
    pub const ALL: [AgeBand; 3] = [AgeBand::Under3, AgeBand::From3To6, AgeBand::From6To12];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Accommodation,
    Tour,
    Transport,
}

/// How a band is billed within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandCharge {
    Free,
    ChargedAsAdult,
    /// Charged at the category's own child/band rate (room child price, tour children price).
    ChargedAtBandRate,
}

impl BandCharge {
    pub fn is_chargeable(&self) -> bool {
        !matches!(self, BandCharge::Free)
    }
}

const POLICY: [(CostCategory, AgeBand, BandCharge); 9] = [
    (CostCategory::Accommodation, AgeBand::Under3, BandCharge::Free),
    (CostCategory::Accommodation, AgeBand::From3To6, BandCharge::Free),
    (CostCategory::Accommodation, AgeBand::From6To12, BandCharge::ChargedAtBandRate),
    (CostCategory::Tour, AgeBand::Under3, BandCharge::Free),
    (CostCategory::Tour, AgeBand::From3To6, BandCharge::ChargedAtBandRate),
    (CostCategory::Tour, AgeBand::From6To12, BandCharge::ChargedAsAdult),
    (CostCategory::Transport, AgeBand::Under3, BandCharge::Free),
    (CostCategory::Transport, AgeBand::From3To6, BandCharge::ChargedAsAdult),
    (CostCategory::Transport, AgeBand::From6To12, BandCharge::ChargedAsAdult),
];

/// Look up the charge rule for a band within a cost category.
pub fn band_charge(category: CostCategory, band: AgeBand) -> BandCharge {
    POLICY
        .iter()
        .find(|(c, b, _)| *c == category && *b == band)
        .map(|(_, _, charge)| *charge)
        .unwrap_or(BandCharge::Free)
}

/// Number of children in a composition that a category bills at all.
pub fn chargeable_children(category: CostCategory, guests: &super::models::GuestComposition) -> u32 {
    AgeBand::ALL
        .iter()
        .filter(|band| band_charge(category, **band).is_chargeable())
        .map(|band| guests.count(*band))
        .fold(0, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::GuestComposition;

    #[test]
    fn test_accommodation_policy() {
        assert_eq!(band_charge(CostCategory::Accommodation, AgeBand::Under3), BandCharge::Free);
        assert_eq!(band_charge(CostCategory::Accommodation, AgeBand::From3To6), BandCharge::Free);
        assert_eq!(
            band_charge(CostCategory::Accommodation, AgeBand::From6To12),
            BandCharge::ChargedAtBandRate
        );
    }

    #[test]
    fn test_tour_policy() {
        assert_eq!(band_charge(CostCategory::Tour, AgeBand::Under3), BandCharge::Free);
        assert_eq!(
            band_charge(CostCategory::Tour, AgeBand::From3To6),
            BandCharge::ChargedAtBandRate
        );
        assert_eq!(
            band_charge(CostCategory::Tour, AgeBand::From6To12),
            BandCharge::ChargedAsAdult
        );
    }

    #[test]
    fn test_categories_disagree_on_older_children() {
        // 6-12 pay a special rate at the hotel but the adult price on tours
        assert_ne!(
            band_charge(CostCategory::Accommodation, AgeBand::From6To12),
            band_charge(CostCategory::Tour, AgeBand::From6To12)
        );
    }

    #[test]
    fn test_every_category_band_pair_is_listed() {
        for category in [CostCategory::Accommodation, CostCategory::Tour, CostCategory::Transport] {
            for band in AgeBand::ALL {
                assert!(POLICY.iter().any(|(c, b, _)| *c == category && *b == band));
            }
        }
    }

    #[test]
    fn test_chargeable_children_for_transport() {
        let guests = GuestComposition::new(2, 1, 1, 1);
        assert_eq!(chargeable_children(CostCategory::Transport, &guests), 2);
        assert_eq!(chargeable_children(CostCategory::Accommodation, &guests), 1);
    }
}
