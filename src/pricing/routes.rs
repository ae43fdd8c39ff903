//! Pricing route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::cache::CacheStats;
use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::surface;
use super::quote::{HotelLegQuote, PriceBreakdown, QuoteRequest};
use super::requests::{HotelLegRequest, SegmentsRequest, TourCostRequest};
use super::responses::SegmentsResponse;
use super::segments::{count_nights, segment_nights, MAX_STAY_NIGHTS};
use super::tours::{price_tour, TourCostLine};

/// Pricing API routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/quote", post(quote))
        .route("/api/pricing/hotel-leg", post(hotel_leg))
        .route("/api/pricing/tour", post(tour))
        .route("/api/pricing/segments", post(segments))
        .route("/api/pricing/cache/stats", get(cache_stats))
        .route("/api/pricing/cache/invalidate", post(invalidate_cache))
}

/// Price a full package draft
async fn quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<PriceBreakdown>> {
    let Json(request) = payload?;
    let breakdown = state.engine.calculate(&request);
    tracing::debug!(
        "Quoted {} hotel legs and {} tours: total {}",
        breakdown.hotels.len(),
        breakdown.tour_lines.len(),
        breakdown.total
    );
    Ok(Json(breakdown))
}

/// Price one hotel leg on its own
async fn hotel_leg(
    State(state): State<AppState>,
    payload: std::result::Result<Json<HotelLegRequest>, JsonRejection>,
) -> Result<Json<HotelLegQuote>> {
    let Json(request) = payload?;
    Ok(Json(state.engine.price_hotel_leg(&request.entry, &request.guests)))
}

/// Price one tour for a party
async fn tour(payload: std::result::Result<Json<TourCostRequest>, JsonRejection>) -> Result<Json<TourCostLine>> {
    let Json(request) = payload?;
    // overflow warnings are already logged; the line carries no diagnostics
    let line = price_tour(&request.tour, &request.guests, &mut Vec::new());
    Ok(Json(TourCostLine {
        cost: surface(line.cost),
        ..line
    }))
}

/// Split a stay into per-month night counts
async fn segments(
    payload: std::result::Result<Json<SegmentsRequest>, JsonRejection>,
) -> Result<Json<SegmentsResponse>> {
    let Json(request) = payload?;
    let nights = count_nights(request.check_in, request.check_out);
    if nights > MAX_STAY_NIGHTS {
        return Err(AppError::BadRequest(format!(
            "stay of {} nights exceeds the {} night limit",
            nights, MAX_STAY_NIGHTS
        )));
    }
    Ok(Json(SegmentsResponse {
        nights,
        segments: segment_nights(request.check_in, request.check_out),
    }))
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.engine.rates().stats())
}

async fn invalidate_cache(State(state): State<AppState>) -> Json<CacheStats> {
    state.engine.rates().invalidate_all();
    Json(state.engine.rates().stats())
}
