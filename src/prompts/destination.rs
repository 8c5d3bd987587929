use crate::types::DestinationRequest;

/// Render the single instruction used by the destination flow.
pub fn build_destination_prompt(request: &DestinationRequest) -> String {
    format!(
        r#"
You are a smart travel planner for a website called "Travel Multiverse".

Given user preferences, generate 4–5 travel universe destinations.

Respond ONLY with valid JSON in this format:

{{
  "destinations": [
    {{
      "id": "unique-id",
      "title": "Short destination name",
      "location": "City, Country or Universe style name",
      "vibe": "2-3 words vibe",
      "pitch": "1-2 line description",
      "highlights": ["Highlight1", "Highlight2", "Highlight3"],
      "idealFor": "Who is this universe ideal for?"
    }}
  ]
}}

User preferences:
- Trip theme: {}
- Days: {}
- Budget: {}
- Traveler type: {}
- Home city: {}
"#,
        request.trip_theme(),
        request.days(),
        request.budget(),
        request.traveler_type(),
        request.home_city(),
    )
    .trim()
    .to_string()
}
