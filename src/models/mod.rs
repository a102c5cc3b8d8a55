// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Event, UserLocationPreference, InterestSet, UserProfile, DecodedLocation, EventSummary, CategoryCount};
pub use requests::{FeaturedEventsQuery, LocalEventsQuery, PopularEventsQuery, SearchEventsQuery, EncodeSlugRequest, effective_limit};
pub use responses::{EventsResponse, LocationEventsResponse, SlugResponse, CategoryCountsResponse, HealthResponse, ErrorResponse};
