use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the reference dataset
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Failed to read geo dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse geo dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    #[serde(rename = "isoCode")]
    pub iso_code: String,
    #[serde(default)]
    pub cities: Vec<City>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(rename = "isoCode")]
    pub iso_code: String,
    #[serde(default)]
    pub states: Vec<State>,
}

/// Canonical names of a place found in the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Read-only country → state → city hierarchy
///
/// Loaded once at startup and shared between workers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoDataset {
    pub countries: Vec<Country>,
}

#[inline]
fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl GeoDataset {
    pub fn from_json_str(json: &str) -> Result<Self, GeoError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the dataset from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GeoError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let dataset = Self::from_json_str(&raw)?;

        tracing::debug!(
            "Loaded geo dataset from {} ({} countries)",
            path.as_ref().display(),
            dataset.countries.len()
        );

        Ok(dataset)
    }

    /// Find a country by display name or ISO code
    pub fn country(&self, name_or_code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| same_name(&c.name, name_or_code) || same_name(&c.iso_code, name_or_code))
    }

    /// States of a country, empty when the country is unknown
    pub fn states_of(&self, country: &str) -> &[State] {
        self.country(country).map(|c| c.states.as_slice()).unwrap_or(&[])
    }

    /// Find a state of a country by display name or ISO code
    pub fn state(&self, country: &str, state: &str) -> Option<&State> {
        self.states_of(country)
            .iter()
            .find(|s| same_name(&s.name, state) || same_name(&s.iso_code, state))
    }

    /// Cities of a state, empty when either is unknown
    pub fn cities_of(&self, country: &str, state: &str) -> &[City] {
        self.state(country, state).map(|s| s.cities.as_slice()).unwrap_or(&[])
    }

    /// Validate a place and return its canonical names
    pub fn resolve(&self, city: &str, state: &str, country: &str) -> Option<ResolvedLocation> {
        let country = self.country(country)?;
        let state = country
            .states
            .iter()
            .find(|s| same_name(&s.name, state) || same_name(&s.iso_code, state))?;
        let city = state.cities.iter().find(|c| same_name(&c.name, city))?;

        Some(ResolvedLocation {
            city: city.name.clone(),
            state: state.name.clone(),
            country: country.name.clone(),
        })
    }
}
