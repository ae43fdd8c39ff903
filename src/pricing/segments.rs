//! Splitting a stay into per-calendar-month night counts.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Longest stay the engine will price, about ten years.
pub const MAX_STAY_NIGHTS: u32 = 3660;

/// Nights of a stay that fall in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSegment {
    pub year: i32,
    pub month: u32,
    pub nights: u32,
}

/// Whole nights between check-in and check-out (check-out exclusive).
///
/// Inverted or empty ranges are a zero-night stay.
pub fn count_nights(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// Walk the stay night by night and bucket each night by its (year, month).
///
/// Segments come back in chronological order, one per month touched.
/// `check_in >= check_out` yields an empty list.
pub fn segment_nights(check_in: NaiveDate, check_out: NaiveDate) -> Vec<MonthSegment> {
    let mut segments: Vec<MonthSegment> = Vec::new();

    for night in check_in.iter_days().take_while(|day| *day < check_out) {
        match segments.last_mut() {
            Some(last) if last.year == night.year() && last.month == night.month() => {
                last.nights += 1;
            }
            _ => segments.push(MonthSegment {
                year: night.year(),
                month: night.month(),
                nights: 1,
            }),
        }
    }

    segments
}

/// Optional check-in/check-out pair as entered on a draft form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StayDates {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl StayDates {
    pub fn new(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> Self {
        Self { check_in, check_out }
    }

    /// Segments for the stay; a half-filled pair or an over-long stay is a
    /// zero-night stay.
    pub fn segments(&self) -> Vec<MonthSegment> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) if !self.is_too_long() => segment_nights(check_in, check_out),
            _ => Vec::new(),
        }
    }

    pub fn nights(&self) -> u32 {
        if self.is_too_long() {
            return 0;
        }
        self.requested_nights()
    }

    /// Night count as entered, before the stay length limit applies.
    pub fn requested_nights(&self) -> u32 {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => count_nights(check_in, check_out),
            _ => 0,
        }
    }

    pub fn is_too_long(&self) -> bool {
        self.requested_nights() > MAX_STAY_NIGHTS
    }

    /// True when both dates are present but check-out is not after check-in.
    pub fn is_inverted(&self) -> bool {
        matches!((self.check_in, self.check_out), (Some(a), Some(b)) if b < a)
    }
}
