//! Package quotation: every hotel leg and every selected tour in one breakdown.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculators::{checked_total, round_money, surface, MONEY_PLACES};
use super::models::{GuestComposition, HotelEntry, Tour};
use super::policy::{chargeable_children, CostCategory};
use super::rates::{DirectRates, RateLookup};
use super::rooms::{calculate_room_cost, RoomTypeLine};
use super::segments::MonthSegment;
use super::tours::{price_tour, TourCostLine};
use super::transport::{resolve_transport_cost, TransferSelection};
use super::warnings::{or_overflow, PricingWarning};

/// Scope named in overflow warnings raised for package-level sums.
const PACKAGE: &str = "package";

/// Draft package as handed over by the booking form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub hotels: Vec<HotelEntry>,
    #[serde(default)]
    pub tours: Vec<Tour>,
    /// Package-level guests; derived from the room allocations when absent.
    #[serde(default)]
    pub guests: Option<GuestComposition>,
    /// Price typed by an operator. Advisory only.
    #[serde(default)]
    pub manual_price: Option<Decimal>,
}

impl QuoteRequest {
    /// Package composition used for tours and estimate-mode legs.
    pub fn package_guests(&self) -> GuestComposition {
        self.guests.unwrap_or_else(|| {
            self.hotels
                .iter()
                .map(|entry| GuestComposition::from_allocations(&entry.rooms))
                .fold(GuestComposition::default(), GuestComposition::merge_max)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportCost {
    pub reception: Decimal,
    pub farewell: Decimal,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airport: Option<String>,
}

/// Itemized cost of one hotel leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelCostBreakdown {
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub nights: u32,
    pub segments: Vec<MonthSegment>,
    pub room_count: u32,
    pub estimated: bool,
    pub rooms: Vec<RoomTypeLine>,
    pub room_cost: Decimal,
    pub breakfast_cost: Decimal,
    pub transport: TransportCost,
    pub subtotal: Decimal,
}

/// Full price breakdown for a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub hotels: Vec<HotelCostBreakdown>,
    /// Sum of every leg's transfers; already inside each leg subtotal.
    pub transportation: Decimal,
    pub tours: Decimal,
    pub tour_lines: Vec<TourCostLine>,
    pub total: Decimal,
    pub manual_price: Option<Decimal>,
    /// `manual_price - total`, when a manual price was typed.
    pub discrepancy: Option<Decimal>,
    pub warnings: Vec<PricingWarning>,
}

/// A hotel leg priced on its own, with the diagnostics it raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelLegQuote {
    pub leg: HotelCostBreakdown,
    pub warnings: Vec<PricingWarning>,
}

struct PricedLeg {
    breakdown: HotelCostBreakdown,
    subtotal: Decimal,
    transport: Decimal,
    warnings: Vec<PricingWarning>,
}

/// Quotation engine over a source of nightly rates.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine<R = DirectRates> {
    rates: R,
}

impl<R: RateLookup> QuoteEngine<R> {
    pub fn new(rates: R) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &R {
        &self.rates
    }

    /// Price a package. Pure: identical requests give identical breakdowns.
    pub fn calculate(&self, request: &QuoteRequest) -> PriceBreakdown {
        let guests = request.package_guests();
        let mut warnings = Vec::new();

        let mut hotels = Vec::with_capacity(request.hotels.len());
        let mut subtotals = Vec::with_capacity(request.hotels.len());
        let mut transfers = Vec::with_capacity(request.hotels.len());

        for entry in &request.hotels {
            let priced = self.price_leg(entry, &guests);
            subtotals.push(priced.subtotal);
            transfers.push(priced.transport);
            warnings.extend(priced.warnings);
            hotels.push(priced.breakdown);
        }

        let tour_lines: Vec<TourCostLine> = request
            .tours
            .iter()
            .map(|tour| price_tour(tour, &guests, &mut warnings))
            .collect();

        let hotels_total = or_overflow(checked_total(subtotals), PACKAGE, "hotel legs", &mut warnings);
        let transportation = or_overflow(checked_total(transfers), PACKAGE, "transfers", &mut warnings);
        let tours = or_overflow(
            checked_total(tour_lines.iter().map(|line| line.cost)),
            PACKAGE,
            "tours",
            &mut warnings,
        );

        let total = surface(or_overflow(
            hotels_total.checked_add(tours),
            PACKAGE,
            "total",
            &mut warnings,
        ));
        let discrepancy = request
            .manual_price
            .and_then(|manual| manual.checked_sub(total))
            .map(|difference| round_money(difference, MONEY_PLACES));

        if let Some(difference) = discrepancy.filter(|d| !d.is_zero()) {
            tracing::info!(
                "Manual price differs from computed total {} by {}",
                total,
                difference
            );
        }

        PriceBreakdown {
            hotels,
            transportation: surface(transportation),
            tours: surface(tours),
            tour_lines: tour_lines
                .into_iter()
                .map(|line| TourCostLine {
                    cost: surface(line.cost),
                    ..line
                })
                .collect(),
            total,
            manual_price: request.manual_price,
            discrepancy,
            warnings,
        }
    }

    /// Price a single hotel leg against the given package guests.
    pub fn price_hotel_leg(&self, entry: &HotelEntry, guests: &GuestComposition) -> HotelLegQuote {
        let priced = self.price_leg(entry, guests);
        HotelLegQuote {
            leg: priced.breakdown,
            warnings: priced.warnings,
        }
    }

    fn price_leg(&self, entry: &HotelEntry, package_guests: &GuestComposition) -> PricedLeg {
        let rooms = calculate_room_cost(entry, package_guests, &self.rates);

        let occupants = entry.guests(package_guests);
        let selection = TransferSelection {
            hotel: &entry.hotel.name,
            airport: entry.airport.as_deref(),
            vehicle: entry.vehicle,
            include_reception: entry.include_reception,
            include_farewell: entry.include_farewell,
            headcount: occupants
                .adults
                .saturating_add(chargeable_children(CostCategory::Transport, &occupants)),
        };
        let transport = resolve_transport_cost(entry.hotel.transportation.as_ref(), &selection);

        let mut warnings = rooms.warnings;
        warnings.extend(transport.warnings);

        let subtotal = or_overflow(
            checked_total([rooms.room_cost, rooms.breakfast_cost, transport.total_cost]),
            &entry.hotel.name,
            "leg subtotal",
            &mut warnings,
        );

        tracing::debug!(
            "Hotel leg {}: room {} breakfast {} transport {} subtotal {}",
            entry.hotel.name,
            rooms.room_cost,
            rooms.breakfast_cost,
            transport.total_cost,
            subtotal
        );

        PricedLeg {
            breakdown: HotelCostBreakdown {
                hotel_id: entry.hotel.id,
                hotel_name: entry.hotel.name.clone(),
                check_in: entry.check_in,
                check_out: entry.check_out,
                nights: rooms.nights,
                segments: rooms.segments,
                room_count: rooms.room_count,
                estimated: rooms.estimated,
                rooms: rooms
                    .lines
                    .into_iter()
                    .map(|line| RoomTypeLine {
                        cost: surface(line.cost),
                        ..line
                    })
                    .collect(),
                room_cost: surface(rooms.room_cost),
                breakfast_cost: surface(rooms.breakfast_cost),
                transport: TransportCost {
                    reception: surface(transport.reception_cost),
                    farewell: surface(transport.farewell_cost),
                    total: surface(transport.total_cost),
                    airport: transport.airport,
                },
                subtotal: surface(subtotal),
            },
            subtotal,
            transport: transport.total_cost,
            warnings,
        }
    }
}

/// Price a package with rates resolved directly from the catalog.
pub fn calculate_quote(request: &QuoteRequest) -> PriceBreakdown {
    QuoteEngine::new(DirectRates).calculate(request)
}
