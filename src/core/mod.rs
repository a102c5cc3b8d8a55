// Core algorithm exports
pub mod geo;
pub mod location;
pub mod selector;
pub mod slug;

pub use geo::{GeoDataset, GeoError, ResolvedLocation};
pub use location::{matches_location, matches_interest, location_label, LocationMatchMode};
pub use selector::{PriorityTier, TierBuckets, TieredSelector};
pub use slug::{create_location_slug, location_path, LocationSlugCodec};
