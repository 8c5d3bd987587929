use crate::completion_schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::loose::{resolve_text, Loose};

pub const DEFAULT_TRIP_THEME: &str = "not specified";
pub const DEFAULT_DAYS: &str = "flexible";
pub const DEFAULT_BUDGET: &str = "medium";
pub const DEFAULT_TRAVELER_TYPE: &str = "general";
pub const DEFAULT_HOME_CITY: &str = "not specified";

/// Preference record sent to `generate-destinations`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationRequest {
    pub trip_theme: Option<Loose>,
    pub days: Option<Loose>,
    pub budget: Option<Loose>,
    pub traveler_type: Option<Loose>,
    pub home_city: Option<Loose>,
}

impl DestinationRequest {
    pub fn trip_theme(&self) -> String {
        resolve_text(self.trip_theme.as_ref(), DEFAULT_TRIP_THEME)
    }

    /// Rendered as given; no numeric coercion happens on this flow.
    pub fn days(&self) -> String {
        resolve_text(self.days.as_ref(), DEFAULT_DAYS)
    }

    pub fn budget(&self) -> String {
        resolve_text(self.budget.as_ref(), DEFAULT_BUDGET)
    }

    pub fn traveler_type(&self) -> String {
        resolve_text(self.traveler_type.as_ref(), DEFAULT_TRAVELER_TYPE)
    }

    pub fn home_city(&self) -> String {
        resolve_text(self.home_city.as_ref(), DEFAULT_HOME_CITY)
    }
}

/// Travel universe destinations suggested for a set of user preferences.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[completion_schema(name = "DestinationSet", fallback = r#"{"destinations":[]}"#)]
pub struct DestinationSet {
    /// Four to five suggested destinations; empty when generation degraded
    pub destinations: Vec<Destination>,
}

/// One suggested travel universe.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Identifier unique within the set
    pub id: String,
    /// Short destination name
    pub title: String,
    /// City, country or universe-style place name
    pub location: String,
    /// Two to three word vibe
    pub vibe: String,
    /// One to two line description
    pub pitch: String,
    pub highlights: Vec<String>,
    /// Who this universe suits best
    pub ideal_for: String,
}

impl DestinationSet {
    /// Ids that appear more than once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for destination in &self.destinations {
            let id = destination.id.as_str();
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }
        duplicates
    }
}
