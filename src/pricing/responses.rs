//! Response DTOs for pricing API endpoints.

use serde::Serialize;

use super::segments::MonthSegment;

/// Response for stay segmentation
#[derive(Debug, Serialize)]
pub struct SegmentsResponse {
    pub nights: u32,
    pub segments: Vec<MonthSegment>,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
