use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upcoming event as read from the event store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub category: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "registrationCount", default)]
    pub registration_count: u32,
}

/// Home location of a user; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLocationPreference {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl UserLocationPreference {
    pub fn new(city: &str, state: &str) -> Self {
        Self {
            city: Some(city.to_string()),
            state: Some(state.to_string()),
            country: None,
        }
    }
}

/// Category tags a user is interested in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestSet(HashSet<String>);

impl InterestSet {
    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for InterestSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// User profile document from the profile store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<UserLocationPreference>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl UserProfile {
    /// Helper to get the interests as a set, `None` when the user picked none
    pub fn interest_set(&self) -> Option<InterestSet> {
        if self.interests.is_empty() {
            None
        } else {
            Some(self.interests.iter().cloned().collect())
        }
    }
}

/// Result of decoding a location slug
///
/// The invalid sentinel has every field set to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "isValid")]
    pub is_valid: bool,
}

impl DecodedLocation {
    pub fn valid(city: String, state: String, country: String) -> Self {
        Self {
            city: Some(city),
            state: Some(state),
            country: Some(country),
            is_valid: true,
        }
    }

    pub fn invalid() -> Self {
        Self {
            city: None,
            state: None,
            country: None,
            is_valid: false,
        }
    }
}

/// Event as rendered on the explore pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub city: String,
    pub state: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "locationLabel")]
    pub location_label: String,
    #[serde(rename = "startDate")]
    pub start_date: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "registrationCount")]
    pub registration_count: u32,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            slug: event.slug.clone(),
            category: event.category.clone(),
            city: event.city.clone(),
            state: event.state.clone(),
            country: event.country.clone(),
            location_label: crate::core::location::location_label(
                Some(&event.city),
                event.state.as_deref(),
                event.country.as_deref(),
            ),
            start_date: event.start_date,
            registration_count: event.registration_count,
        }
    }
}

/// Number of upcoming events in a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
