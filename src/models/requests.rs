use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Query for the featured events feed
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeaturedEventsQuery {
    #[validate(length(min = 1, max = 64), custom(function = "validate_user_id"))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

/// User ids are opaque tokens of `[A-Za-z0-9_.-]`
fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-');
    if user_id.chars().all(allowed) {
        Ok(())
    } else {
        Err(ValidationError::new("user_id_charset"))
    }
}

/// Query for events in a given city/state
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocalEventsQuery {
    #[validate(length(min = 1))]
    pub city: String,
    pub state: Option<String>,
    pub limit: Option<i64>,
}

/// Query for the popular events feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularEventsQuery {
    pub country: Option<String>,
    pub limit: Option<i64>,
}

/// Title search query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEventsQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

/// Request to build a location slug
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EncodeSlugRequest {
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
}

/// Clamp a client supplied limit into `0..=max`, falling back to `default`
///
/// Negative values become zero rather than an error.
pub fn effective_limit(requested: Option<i64>, default: usize, max: usize) -> usize {
    match requested {
        Some(limit) => usize::try_from(limit.max(0)).unwrap_or(max).min(max),
        None => default.min(max),
    }
}
