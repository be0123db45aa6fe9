//! Static district reference table.
//!
//! Read-only context for the district views; it never feeds the aggregators.
//! Stored on disk as a JSON array:
//! ```json
//! [
//!   {
//!     "name": "Thanjavur",
//!     "population": 2405890,
//!     "ruralPopulation": 1585324,
//!     "totalHouseholds": 620000,
//!     "description": "Rice bowl of Tamil Nadu",
//!     "keyIndustries": ["Agriculture"],
//!     "challenges": ["Seasonal flooding"]
//!   }
//! ]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::analyzers::utility::normalize_per_thousand;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictProfile {
    pub name: String,
    pub population: u64,
    pub rural_population: u64,
    #[serde(default)]
    pub total_households: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_industries: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
}

impl DistrictProfile {
    /// `applied` per 1000 rural residents; `None` without a rural population.
    pub fn applications_per_thousand_rural(&self, applied: u64) -> Option<f64> {
        normalize_per_thousand(applied as f64, self.rural_population as f64)
    }
}

/// Profiles keyed by district name, kept in file order for listing.
pub struct DistrictProfiles {
    profiles: Vec<DistrictProfile>,
    by_name: HashMap<String, usize>,
}

impl DistrictProfiles {
    pub fn from_profiles(profiles: Vec<DistrictProfile>) -> Self {
        let by_name = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
        Self { profiles, by_name }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let profiles: Vec<DistrictProfile> = serde_json::from_slice(bytes)?;
        Ok(Self::from_profiles(profiles))
    }

    /// Loads the table from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read(path)
            .with_context(|| format!("failed to read district profiles from {path}"))?;
        let table = Self::parse(&content)
            .with_context(|| format!("malformed district profiles in {path}"))?;

        debug!(path, districts = table.len(), "District profiles loaded");
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&DistrictProfile> {
        self.by_name.get(name).map(|&i| &self.profiles[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DistrictProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Formats a head count in lakhs (1 L = 100,000), one decimal.
pub fn format_lakhs(count: u64) -> String {
    format!("{:.1}L", count as f64 / 100_000.0)
}
