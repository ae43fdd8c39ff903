//! Catalog and draft models consumed by the quotation engine.
//!
//! Everything here is a plain serializable value: catalog records are
//! supplied by the caller on every request, and a draft package is simply a
//! `QuoteRequest` that can be saved and restored by whoever owns the form.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::policy::AgeBand;
use super::transport::TransportationData;

/// Vehicle tier used for airport transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleTier {
    #[default]
    Vito,
    Sprinter,
    Bus,
}

impl VehicleTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleTier::Vito => "vito",
            VehicleTier::Sprinter => "sprinter",
            VehicleTier::Bus => "bus",
        }
    }

    /// Parse a tier name as it appears in catalog blobs ("Vito", "sprinter", ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vito" => Some(VehicleTier::Vito),
            "sprinter" => Some(VehicleTier::Sprinter),
            "bus" => Some(VehicleTier::Bus),
            _ => None,
        }
    }
}

/// Seasonal override for one calendar month. `None` or zero means "no override".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRate {
    #[serde(default)]
    pub adult: Option<Decimal>,
    #[serde(default)]
    pub child: Option<Decimal>,
}

/// Room type from the hotel catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: Uuid,
    pub label: String,
    pub adult_price: Decimal,
    #[serde(default)]
    pub child_price: Decimal,
    /// Index 0 is January. Shorter tables simply have no override for the missing months.
    #[serde(default)]
    pub monthly_prices: Vec<MonthlyRate>,
}

impl RoomType {
    pub fn monthly_override(&self, month: u32) -> Option<&MonthlyRate> {
        if !(1..=12).contains(&month) {
            return None;
        }
        self.monthly_prices.get((month - 1) as usize)
    }
}

/// Hotel record from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub room_types: Vec<RoomType>,
    /// Tagged `{shape, data}` or a raw legacy catalog blob.
    #[serde(default, deserialize_with = "super::transport::deserialize_transportation")]
    pub transportation: Option<TransportationData>,
    #[serde(default)]
    pub breakfast_price: Option<Decimal>,
    #[serde(default)]
    pub airports: Vec<String>,
}

impl HotelRecord {
    pub fn room_type(&self, id: Uuid) -> Option<&RoomType> {
        self.room_types.iter().find(|room| room.id == id)
    }
}

/// One room instance assigned to a subset of the party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomAllocation {
    pub room_type_id: Uuid,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children_under_3: u32,
    #[serde(default)]
    pub children_3_to_6: u32,
    #[serde(default)]
    pub children_6_to_12: u32,
}

/// Guest counts by age band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestComposition {
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children_under_3: u32,
    #[serde(default)]
    pub children_3_to_6: u32,
    #[serde(default)]
    pub children_6_to_12: u32,
}

impl GuestComposition {
    pub fn new(adults: u32, children_under_3: u32, children_3_to_6: u32, children_6_to_12: u32) -> Self {
        Self {
            adults,
            children_under_3,
            children_3_to_6,
            children_6_to_12,
        }
    }

    /// Sum the occupants of every allocation, saturating at `u32::MAX`.
    pub fn from_allocations(rooms: &[RoomAllocation]) -> Self {
        rooms.iter().fold(Self::default(), |acc, room| Self {
            adults: acc.adults.saturating_add(room.adults),
            children_under_3: acc.children_under_3.saturating_add(room.children_under_3),
            children_3_to_6: acc.children_3_to_6.saturating_add(room.children_3_to_6),
            children_6_to_12: acc.children_6_to_12.saturating_add(room.children_6_to_12),
        })
    }

    /// Band-wise maximum; the same party moves between legs, so counts are not added.
    pub fn merge_max(self, other: Self) -> Self {
        Self {
            adults: self.adults.max(other.adults),
            children_under_3: self.children_under_3.max(other.children_under_3),
            children_3_to_6: self.children_3_to_6.max(other.children_3_to_6),
            children_6_to_12: self.children_6_to_12.max(other.children_6_to_12),
        }
    }

    pub fn count(&self, band: AgeBand) -> u32 {
        match band {
            AgeBand::Under3 => self.children_under_3,
            AgeBand::From3To6 => self.children_3_to_6,
            AgeBand::From6To12 => self.children_6_to_12,
        }
    }

    pub fn headcount(&self) -> u32 {
        self.adults
            .saturating_add(self.children_under_3)
            .saturating_add(self.children_3_to_6)
            .saturating_add(self.children_6_to_12)
    }

    pub fn is_empty(&self) -> bool {
        self.headcount() == 0
    }
}

/// One hotel's portion of a package, with its own dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelEntry {
    pub hotel: HotelRecord,
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub rooms: Vec<RoomAllocation>,
    #[serde(default)]
    pub include_breakfast: bool,
    #[serde(default)]
    pub airport: Option<String>,
    #[serde(default)]
    pub include_reception: bool,
    #[serde(default)]
    pub include_farewell: bool,
    #[serde(default)]
    pub vehicle: VehicleTier,
}

impl HotelEntry {
    /// Occupants of this leg, falling back to the package composition in estimate mode.
    pub fn guests(&self, package: &GuestComposition) -> GuestComposition {
        if self.rooms.is_empty() {
            *package
        } else {
            GuestComposition::from_allocations(&self.rooms)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourKind {
    #[serde(alias = "Group")]
    Group,
    #[serde(alias = "VIP", alias = "Vip")]
    Vip,
}

/// Tour from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: Uuid,
    pub name: String,
    pub kind: TourKind,
    pub price: Decimal,
    /// Group tours only.
    #[serde(default)]
    pub children_price: Option<Decimal>,
    /// VIP tours only; informational.
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub vehicle_capacity: Option<u32>,
}
