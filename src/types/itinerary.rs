use crate::completion_schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::loose::{provided_text, resolve_text, Loose};

pub const DEFAULT_EFFECTIVE_DAYS: u32 = 3;
pub const DEFAULT_DESTINATION: &str = "not specified";
pub const DEFAULT_COMPANION: &str = "not specified";
pub const DEFAULT_MODE: &str = "classic / not specified";
pub const DEFAULT_FLAVOR: &str = "none";
pub const DEFAULT_DETAIL: &str = "none";

/// How the trip was described by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Planner {
    /// A single free-text prompt.
    Freeform,
    /// Destination, companion and day count picked from a form.
    Structured,
}

/// Body of a `generate-itineraries` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryRequest {
    pub planner: Option<Loose>,
    pub destination: Option<Loose>,
    pub companion: Option<Loose>,
    pub days: Option<Loose>,
    pub prompt: Option<Loose>,
    pub mode: Option<Loose>,
    pub flavor: Option<Loose>,
    pub detail: Option<Loose>,
}

impl ItineraryRequest {
    /// Only the exact string `"freeform"` selects the free-text planner.
    pub fn planner(&self) -> Planner {
        match self.planner.as_ref().map(|value| &value.0) {
            Some(serde_json::Value::String(kind)) if kind == "freeform" => Planner::Freeform,
            _ => Planner::Structured,
        }
    }

    pub fn destination(&self) -> String {
        resolve_text(self.destination.as_ref(), DEFAULT_DESTINATION)
    }

    pub fn companion(&self) -> String {
        resolve_text(self.companion.as_ref(), DEFAULT_COMPANION)
    }

    /// Whole number of days to plan for.
    ///
    /// Numeric strings are accepted. Anything that does not read as a
    /// number of at least one day resolves to [`DEFAULT_EFFECTIVE_DAYS`].
    pub fn effective_days(&self) -> u32 {
        self.days
            .as_ref()
            .and_then(Loose::as_number)
            .map(f64::floor)
            .filter(|days| *days >= 1.0)
            .map(|days| days.min(u32::MAX as f64) as u32)
            .unwrap_or(DEFAULT_EFFECTIVE_DAYS)
    }

    /// The caller's own words, if any were given.
    pub fn prompt(&self) -> Option<String> {
        provided_text(self.prompt.as_ref())
    }

    pub fn mode(&self) -> String {
        resolve_text(self.mode.as_ref(), DEFAULT_MODE)
    }

    pub fn flavor(&self) -> String {
        resolve_text(self.flavor.as_ref(), DEFAULT_FLAVOR)
    }

    pub fn detail(&self) -> String {
        resolve_text(self.detail.as_ref(), DEFAULT_DETAIL)
    }

    /// `flavor` is "multiverse" and `mode` is anything but "classic", both
    /// compared case-insensitively. A missing mode is not "classic".
    pub fn is_multiverse(&self) -> bool {
        let flavor = provided_text(self.flavor.as_ref()).unwrap_or_default();
        let mode = provided_text(self.mode.as_ref()).unwrap_or_default();
        flavor.to_lowercase() == "multiverse" && mode.to_lowercase() != "classic"
    }
}

/// Generated itineraries for a trip; `null` when the completion could not be recovered.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[completion_schema(name = "ItineraryBundle", fallback = r#"{"itineraries":null}"#)]
pub struct ItineraryBundle {
    pub itineraries: Option<Itineraries>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Itineraries {
    /// The main itinerary, always at least one day
    pub single: Vec<DayPlan>,
    /// Three parallel variants, only for multiverse requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiverse: Option<MultiverseItineraries>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MultiverseItineraries {
    /// Grounded and achievable
    pub realistic: Vec<DayPlan>,
    /// Unconstrained and premium
    pub dream: Vec<DayPlan>,
    /// Mood-driven, matching the requested flavor
    pub vibe: Vec<DayPlan>,
}

/// One day of an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DayPlan {
    pub title: String,
    /// Three to five concise activities
    pub items: Vec<String>,
}

impl MultiverseItineraries {
    /// Names of variants that came back without any days.
    pub fn empty_variants(&self) -> Vec<&'static str> {
        [
            ("realistic", &self.realistic),
            ("dream", &self.dream),
            ("vibe", &self.vibe),
        ]
        .into_iter()
        .filter(|(_, days)| days.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
