use crate::models::{Event, InterestSet, UserLocationPreference};
use serde::Deserialize;

/// How an event's location is compared against a user's home location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMatchMode {
    /// City and state must both be equal
    #[default]
    CityAndState,
    /// City alone decides
    CityOnly,
}

#[inline]
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Blank strings count as absent
#[inline]
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Case-insensitive comparison of two optional fields; two absent values are equal
#[inline]
fn same_optional(a: Option<&str>, b: Option<&str>) -> bool {
    match (present(a), present(b)) {
        (Some(a), Some(b)) => normalize(a) == normalize(b),
        (None, None) => true,
        _ => false,
    }
}

/// Check if an event takes place at the user's home location
///
/// A preference without a city never matches.
#[inline]
pub fn matches_location(
    event: &Event,
    preference: &UserLocationPreference,
    mode: LocationMatchMode,
) -> bool {
    let Some(city) = present(preference.city.as_deref()) else {
        return false;
    };

    if normalize(city) != normalize(&event.city) {
        return false;
    }

    match mode {
        LocationMatchMode::CityOnly => true,
        LocationMatchMode::CityAndState => {
            same_optional(preference.state.as_deref(), event.state.as_deref())
        }
    }
}

/// Check if the event's category is one of the user's interests
#[inline]
pub fn matches_interest(event: &Event, interests: Option<&InterestSet>) -> bool {
    interests.is_some_and(|set| set.contains(&event.category))
}

/// Human readable "City, State, Country" label, skipping missing parts
pub fn location_label(city: Option<&str>, state: Option<&str>, country: Option<&str>) -> String {
    [city, state, country]
        .into_iter()
        .filter_map(present)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(", ")
}
