use crate::types::{ItineraryRequest, Planner};

/// System and user instructions for one itinerary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryPrompts {
    pub system: String,
    pub user: String,
}

/// Render both instructions from the derived request values.
pub fn build_itinerary_prompts(request: &ItineraryRequest) -> ItineraryPrompts {
    let system = build_itinerary_system_prompt(request.is_multiverse(), request.effective_days());

    let user = format!(
        "{}\n\n{}\n\nGenerate the itineraries JSON now.",
        describe_trip(request),
        describe_creative_settings(request),
    );

    ItineraryPrompts {
        system,
        user: user.trim().to_string(),
    }
}

/// Role, output schema and business rules, with the derived flags interpolated.
pub fn build_itinerary_system_prompt(is_multiverse: bool, effective_days: u32) -> String {
    format!(
        r#"
You are the itinerary engine for "Travel Multiverse", a playful trip planning website.

Respond with strict JSON only. Do not add commentary, explanations, markdown or code fences before or after the JSON.

Output format:
{{
  "itineraries": {{
    "single": [
      {{ "title": "Day 1 - short theme", "items": ["Activity 1", "Activity 2", "Activity 3"] }}
    ],
    "multiverse": {{
      "realistic": [{{ "title": "Day 1 - short theme", "items": ["Activity 1", "Activity 2", "Activity 3"] }}],
      "dream": [{{ "title": "Day 1 - short theme", "items": ["Activity 1", "Activity 2", "Activity 3"] }}],
      "vibe": [{{ "title": "Day 1 - short theme", "items": ["Activity 1", "Activity 2", "Activity 3"] }}]
    }}
  }}
}}

Rules:
1. "single" is mandatory and must contain at least 1 day.
2. isMultiverse = {is_multiverse}. When isMultiverse is true, fill all three "multiverse" variants: "realistic" is grounded and achievable, "dream" ignores budget limits and goes premium, "vibe" follows the mood of the requested flavor and tone. When isMultiverse is false, leave "multiverse" out.
3. Every day has 3-5 concise items.
4. Keep the tone friendly and energetic, never cliché.
5. Plan {effective_days} days, matching that count as closely as possible.
"#
    )
    .trim()
    .to_string()
}

/// Base description of the trip, branching on the planner kind.
pub fn describe_trip(request: &ItineraryRequest) -> String {
    match request.planner() {
        Planner::Freeform => format!(
            "The traveler described the trip in their own words: \"{}\"",
            request.prompt().unwrap_or_default()
        ),
        Planner::Structured => {
            let mut lines = vec![
                "Trip details:".to_string(),
                format!("- Destination: {}", request.destination()),
                format!("- Travel companion: {}", request.companion()),
                format!("- Days: {}", request.effective_days()),
            ];
            if let Some(notes) = request.prompt() {
                lines.push(format!("- Extra notes: {notes}"));
            }
            lines.join("\n")
        }
    }
}

pub fn describe_creative_settings(request: &ItineraryRequest) -> String {
    format!(
        "Creative settings:\n- Mode: {}\n- Flavor: {}\n- Detail level: {}",
        request.mode(),
        request.flavor(),
        request.detail(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> ItineraryRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_structured_multiverse_prompt() {
        let prompts = build_itinerary_prompts(&request(json!({
            "planner": "structured",
            "destination": "Tokyo",
            "companion": "partner",
            "days": "4",
            "mode": "creative",
            "flavor": "multiverse"
        })));

        assert!(prompts.system.contains("isMultiverse = true"));
        assert!(prompts.system.contains("Plan 4 days"));
        assert!(prompts.user.contains("- Destination: Tokyo"));
        assert!(prompts.user.contains("- Travel companion: partner"));
        assert!(prompts.user.contains("- Days: 4"));
        assert!(!prompts.user.contains("Extra notes"));
        assert!(prompts.user.contains("- Mode: creative"));
        assert!(prompts.user.contains("- Flavor: multiverse"));
        assert!(prompts.user.ends_with("Generate the itineraries JSON now."));
    }

    #[test]
    fn test_system_prompt_rules() {
        let system = build_itinerary_system_prompt(false, 3);

        assert!(system.contains("isMultiverse = false"));
        assert!(system.contains("Plan 3 days"));
        assert!(system.contains("strict JSON only"));
        assert!(system.contains("\"single\" is mandatory"));
        assert!(system.contains("\"realistic\""));
        assert!(system.contains("\"dream\""));
        assert!(system.contains("\"vibe\""));
        assert!(system.contains("3-5 concise items"));
        assert!(system.contains("never cliché"));
    }

    #[test]
    fn test_system_prompt_uses_derived_days() {
        let prompts = build_itinerary_prompts(&request(json!({ "days": "soon" })));
        assert!(prompts.system.contains("Plan 3 days"));
        assert!(!prompts.system.contains("NaN"));
        assert!(prompts.user.contains("- Days: 3"));
    }

    #[test]
    fn test_freeform_quotes_prompt() {
        let trip = describe_trip(&request(json!({
            "planner": "freeform",
            "prompt": "A rainy week in Scotland with whisky and castles",
            "destination": "ignored"
        })));

        assert!(trip.contains("\"A rainy week in Scotland with whisky and castles\""));
        assert!(!trip.contains("Destination"));
    }

    #[test]
    fn test_structured_extra_notes_only_when_present() {
        let with_notes = describe_trip(&request(json!({ "prompt": "vegetarian food" })));
        assert!(with_notes.contains("- Extra notes: vegetarian food"));

        let without = describe_trip(&request(json!({ "prompt": "" })));
        assert!(!without.contains("Extra notes"));
    }

    #[test]
    fn test_creative_defaults() {
        let settings = describe_creative_settings(&ItineraryRequest::default());
        assert!(settings.contains("- Mode: classic / not specified"));
        assert!(settings.contains("- Flavor: none"));
        assert!(settings.contains("- Detail level: none"));
    }
}
