//! EventHub Algo - featured event ranking and location slugs for the EventHub explore pages
//!
//! The core is two pure components: a tiered selector that builds the
//! personalised "featured events" feed, and a codec that turns city/state
//! pairs into URL slugs and validates slugs against a geographic dataset.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{GeoDataset, LocationSlugCodec, PriorityTier, TieredSelector, create_location_slug};
pub use crate::models::{Event, UserLocationPreference, InterestSet, DecodedLocation, EventSummary};
