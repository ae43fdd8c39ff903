//! Airport reception/farewell pricing.
//!
//! Hotel catalogs carry transfer prices in one of three shapes that grew over
//! time. They are normalized into [`TransportationData`] once, and each shape
//! has its own resolver.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::calculators::{non_negative, times};
use super::models::VehicleTier;
use super::warnings::{or_overflow, record, PricingWarning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferLeg {
    Reception,
    Farewell,
}

impl TransferLeg {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferLeg::Reception => "reception",
            TransferLeg::Farewell => "farewell",
        }
    }
}

/// Reception and farewell price for one vehicle tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferPrices {
    #[serde(default)]
    pub reception: Option<Decimal>,
    #[serde(default)]
    pub farewell: Option<Decimal>,
}

impl TransferPrices {
    pub fn leg(&self, leg: TransferLeg) -> Option<Decimal> {
        match leg {
            TransferLeg::Reception => self.reception,
            TransferLeg::Farewell => self.farewell,
        }
    }
}

pub type TierPrices = BTreeMap<VehicleTier, TransferPrices>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportTransfer {
    pub airport: String,
    #[serde(default)]
    pub tiers: TierPrices,
}

/// Transfer pricing attached to a hotel record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum TransportationData {
    /// Per-airport table of tier prices, in catalog order.
    Indexed(Vec<AirportTransfer>),
    /// Airport-agnostic tier prices.
    SingleTier(TierPrices),
    /// Legacy per-person round-trip price with no tiers.
    FlatPerPerson(Decimal),
}

/// What the draft asks for on one hotel leg.
#[derive(Debug, Clone, Copy)]
pub struct TransferSelection<'a> {
    pub hotel: &'a str,
    pub airport: Option<&'a str>,
    pub vehicle: VehicleTier,
    pub include_reception: bool,
    pub include_farewell: bool,
    /// Adults plus chargeable children; only the flat per-person shape uses it.
    pub headcount: u32,
}

impl TransferSelection<'_> {
    fn legs(&self) -> impl Iterator<Item = TransferLeg> {
        [
            (TransferLeg::Reception, self.include_reception),
            (TransferLeg::Farewell, self.include_farewell),
        ]
        .into_iter()
        .filter(|(_, included)| *included)
        .map(|(leg, _)| leg)
    }
}

/// Result of transfer pricing for one leg
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportCostResult {
    pub reception_cost: Decimal,
    pub farewell_cost: Decimal,
    pub total_cost: Decimal,
    /// Airport entry actually priced (indexed shape only).
    pub airport: Option<String>,
    pub warnings: Vec<PricingWarning>,
}

impl TransportCostResult {
    fn set(&mut self, leg: TransferLeg, amount: Decimal) {
        let amount = non_negative(amount);
        match leg {
            TransferLeg::Reception => self.reception_cost = amount,
            TransferLeg::Farewell => self.farewell_cost = amount,
        }
    }
}

/// Price reception/farewell for one hotel leg.
///
/// Never fails: a requested leg without a usable price costs zero and is
/// reported through `warnings`.
pub fn resolve_transport_cost(
    data: Option<&TransportationData>,
    selection: &TransferSelection<'_>,
) -> TransportCostResult {
    let mut result = TransportCostResult::default();

    if !selection.include_reception && !selection.include_farewell {
        return result;
    }

    match data {
        None => record(
            &mut result.warnings,
            PricingWarning::MissingTransportation {
                hotel: selection.hotel.to_string(),
            },
        ),
        Some(TransportationData::Indexed(airports)) => resolve_indexed(airports, selection, &mut result),
        Some(TransportationData::SingleTier(tiers)) => resolve_tiers(tiers, selection, &mut result),
        Some(TransportationData::FlatPerPerson(price)) => resolve_flat(*price, selection, &mut result),
    }

    result.total_cost = or_overflow(
        result.reception_cost.checked_add(result.farewell_cost),
        selection.hotel,
        "transfers",
        &mut result.warnings,
    );

    result
}

fn resolve_indexed(
    airports: &[AirportTransfer],
    selection: &TransferSelection<'_>,
    result: &mut TransportCostResult,
) {
    let requested = selection.airport.map(str::trim).filter(|name| !name.is_empty());

    let matched = requested.and_then(|name| {
        airports
            .iter()
            .find(|entry| entry.airport == name)
            .or_else(|| {
                airports
                    .iter()
                    .find(|entry| entry.airport.trim().eq_ignore_ascii_case(name))
            })
    });

    let entry = match (matched, airports.first()) {
        (Some(entry), _) => entry,
        (None, Some(first)) => {
            if let Some(name) = requested {
                record(
                    &mut result.warnings,
                    PricingWarning::UnknownAirport {
                        hotel: selection.hotel.to_string(),
                        requested: name.to_string(),
                        used: first.airport.clone(),
                    },
                );
            }
            first
        }
        (None, None) => {
            record(
                &mut result.warnings,
                PricingWarning::MissingTransportation {
                    hotel: selection.hotel.to_string(),
                },
            );
            return;
        }
    };

    result.airport = Some(entry.airport.clone());
    resolve_tiers(&entry.tiers, selection, result);
}

fn resolve_tiers(tiers: &TierPrices, selection: &TransferSelection<'_>, result: &mut TransportCostResult) {
    let prices = tiers.get(&selection.vehicle);

    for leg in selection.legs() {
        match prices.and_then(|p| p.leg(leg)) {
            Some(price) => result.set(leg, price),
            None => record(
                &mut result.warnings,
                PricingWarning::MissingTransferPrice {
                    hotel: selection.hotel.to_string(),
                    vehicle: selection.vehicle,
                    leg,
                },
            ),
        }
    }
}

/// The flat price covers a round trip, so each one-way leg is half of it.
fn resolve_flat(price: Decimal, selection: &TransferSelection<'_>, result: &mut TransportCostResult) {
    let round_trip = or_overflow(
        times(price, selection.headcount),
        selection.hotel,
        "per-person transfer",
        &mut result.warnings,
    );
    let one_way = round_trip / Decimal::TWO;

    for leg in selection.legs() {
        result.set(leg, one_way);
    }
}

impl TransportationData {
    /// Normalize a raw catalog blob into one of the three shapes.
    ///
    /// Accepted inputs:
    /// - `[{"airport": "IST", "vito": {"reception": 40, "farewell": 40}}, ...]`
    ///   or `{"airports": [...]}` (indexed)
    /// - `{"vito": {...}, "sprinter": {...}, "bus": {...}}` (single tier table)
    /// - `20`, `"20.00"` or `{"price": 20}` (flat per person)
    ///
    /// Returns `None` for anything else.
    pub fn from_catalog_value(value: &Value) -> Option<Self> {
        if let Some(price) = parse_decimal(value) {
            return Some(TransportationData::FlatPerPerson(price));
        }

        if let Some(entries) = value.as_array() {
            return parse_airports(entries).map(TransportationData::Indexed);
        }

        let object = value.as_object()?;

        if let Some(entries) = object.get("airports").and_then(Value::as_array) {
            return parse_airports(entries).map(TransportationData::Indexed);
        }

        let tiers = parse_tiers(value);
        if !tiers.is_empty() {
            return Some(TransportationData::SingleTier(tiers));
        }

        ["price", "price_per_person", "pricePerPerson"]
            .iter()
            .find_map(|key| object.get(*key).and_then(parse_decimal))
            .map(TransportationData::FlatPerPerson)
    }
}

/// Read a hotel's transportation field in the tagged `{shape, data}` form or
/// any raw catalog shape [`TransportationData::from_catalog_value`] accepts.
///
/// An unrecognized blob reads as no transportation data.
pub fn deserialize_transportation<'de, D>(deserializer: D) -> Result<Option<TransportationData>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match TransportationData::deserialize(&value) {
        Ok(data) => Ok(Some(data)),
        Err(_) => Ok(TransportationData::from_catalog_value(&value)),
    }
}

fn parse_airports(entries: &[Value]) -> Option<Vec<AirportTransfer>> {
    let airports: Vec<AirportTransfer> = entries
        .iter()
        .filter_map(|entry| {
            let name = entry
                .get("airport")
                .or_else(|| entry.get("name"))
                .and_then(Value::as_str)?;
            let tiers = entry.get("tiers").map(parse_tiers).unwrap_or_else(|| parse_tiers(entry));
            Some(AirportTransfer {
                airport: name.to_string(),
                tiers,
            })
        })
        .collect();

    if airports.is_empty() {
        None
    } else {
        Some(airports)
    }
}

fn parse_tiers(value: &Value) -> TierPrices {
    let Some(object) = value.as_object() else {
        return TierPrices::new();
    };

    object
        .iter()
        .filter_map(|(key, prices)| {
            let tier = VehicleTier::parse(key)?;
            let prices = TransferPrices {
                reception: prices.get("reception").and_then(parse_decimal),
                farewell: prices.get("farewell").and_then(parse_decimal),
            };
            Some((tier, prices))
        })
        .collect()
}

/// Numbers may arrive as JSON numbers or strings.
fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(text) => Decimal::from_str(text.trim()).ok(),
        _ => None,
    }
}
