use serde::{Deserialize, Serialize};
use crate::models::domain::{CategoryCount, DecodedLocation, EventSummary};

/// Response for the event list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<EventSummary>,
    pub total_candidates: usize,
}

/// Response for explore-by-location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationEventsResponse {
    pub location: DecodedLocation,
    pub events: Vec<EventSummary>,
}

/// Response for the slug builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugResponse {
    pub slug: String,
    pub path: String,
}

/// Category counts for upcoming events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCountsResponse {
    pub categories: Vec<CategoryCount>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
