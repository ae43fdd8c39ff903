//! In-memory caching using moka
//!
//! Memoizes nightly rate lookups. Catalog records arrive with every request,
//! so the key carries the prices a rate is resolved from as well as the room
//! type, month and guest class: a room type sent with new prices never reads
//! a rate resolved from the old ones.

use moka::sync::Cache;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::pricing::models::RoomType;
use crate::pricing::rates::{GuestClass, RateInputs, RateLookup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RateKey {
    room_type_id: Uuid,
    month: u32,
    class: GuestClass,
    inputs: RateInputs,
}

/// Memoized nightly rates
#[derive(Clone)]
pub struct RateCache {
    rates: Cache<RateKey, Decimal>,
}

impl RateCache {
    /// Create a new cache with the given capacity and TTL
    pub fn new(max_capacity: u64, time_to_live: Duration) -> Self {
        Self {
            rates: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(time_to_live)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        self.rates.run_pending_tasks();
        CacheStats {
            rates_size: self.rates.entry_count(),
        }
    }

    /// Drop every memoized rate
    pub fn invalidate_all(&self) {
        self.rates.invalidate_all();
        info!("Rate cache invalidated");
    }
}

impl Default for RateCache {
    fn default() -> Self {
        // 10k entries, 5 min TTL
        Self::new(10_000, Duration::from_secs(5 * 60))
    }
}

impl RateLookup for RateCache {
    fn month_rate(&self, room: &RoomType, month: u32, class: GuestClass) -> Decimal {
        let inputs = RateInputs::for_month(room, month, class);
        let key = RateKey {
            room_type_id: room.id,
            month,
            class,
            inputs,
        };

        if let Some(rate) = self.rates.get(&key) {
            debug!("Cache HIT for rate {} month {} {:?}", room.id, month, class);
            return rate;
        }

        debug!("Cache MISS for rate {} month {} {:?}", room.id, month, class);
        let rate = inputs.resolve();
        self.rates.insert(key, rate);
        rate
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub rates_size: u64,
}
