//! City/state location slugs for the explore-by-location pages.
//!
//! Slugs use the two-field `city-state` scheme: lowercase words joined by
//! hyphens, e.g. `new-york-new-york`. The country is not part of the slug and
//! comes from configuration. Because hyphens also separate words inside a
//! name, decoding searches for the city/state boundary against the reference
//! dataset.

use crate::core::geo::GeoDataset;
use crate::models::DecodedLocation;

/// Separator between words (and between city and state)
pub const SLUG_DELIMITER: char = '-';

/// City and state need at least one word each
const MIN_SLUG_PARTS: usize = 2;

/// Lowercase a name and join its words with hyphens
fn slugify(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Capitalize the first letter of every word
fn title_case(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compare a dataset name against slug words
///
/// The slug form comparison covers names that contain hyphens themselves.
fn name_matches(name: &str, parts: &[&str]) -> bool {
    title_case(parts).to_lowercase() == name.trim().to_lowercase()
        || slugify(name) == parts.join("-")
}

/// Build the slug for a city/state pair
///
/// Returns an empty string when either field is blank.
pub fn create_location_slug(city: &str, state: &str) -> String {
    let (city, state) = (city.trim(), state.trim());
    if city.is_empty() || state.is_empty() {
        return String::new();
    }

    slugify(&format!("{} {}", city, state))
}

/// Router path of the explore page for a slug
pub fn location_path(slug: &str) -> String {
    format!("/explore/{}", urlencoding::encode(slug))
}

/// Encodes and decodes location slugs for one configured country
#[derive(Debug, Clone)]
pub struct LocationSlugCodec {
    country: String,
}

impl LocationSlugCodec {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn encode(&self, city: &str, state: &str) -> String {
        create_location_slug(city, state)
    }

    /// Decode a slug and validate it against the reference dataset
    ///
    /// Tries the longest possible state name first; the first boundary whose
    /// trailing words name a real state wins, and the leading words must then
    /// name a city of that state. Never fails: unknown places return
    /// [`DecodedLocation::invalid`].
    pub fn decode(&self, slug: &str, geo: &GeoDataset) -> DecodedLocation {
        let normalized = slug.trim().to_lowercase();
        let parts: Vec<&str> = normalized
            .split(SLUG_DELIMITER)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() < MIN_SLUG_PARTS {
            return DecodedLocation::invalid();
        }

        let Some(country) = geo.country(&self.country) else {
            tracing::warn!("Configured slug country {} is missing from the geo dataset", self.country);
            return DecodedLocation::invalid();
        };

        let split = (1..parts.len()).find_map(|boundary| {
            let (city_parts, state_parts) = parts.split_at(boundary);
            country
                .states
                .iter()
                .find(|state| name_matches(&state.name, state_parts))
                .map(|state| (city_parts, state))
        });

        let Some((city_parts, state)) = split else {
            tracing::debug!("No state found for location slug {}", slug);
            return DecodedLocation::invalid();
        };

        match state.cities.iter().find(|city| name_matches(&city.name, city_parts)) {
            Some(city) => DecodedLocation::valid(
                city.name.clone(),
                state.name.clone(),
                country.name.clone(),
            ),
            None => {
                tracing::debug!("City {} not found in {}", title_case(city_parts), state.name);
                DecodedLocation::invalid()
            }
        }
    }
}
