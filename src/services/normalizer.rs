//! Recovery of JSON documents from completion text.
//!
//! The completion service is told to answer with bare JSON, but its output is
//! treated as untrusted input: it may be wrapped in prose or code fences, be
//! truncated, or not be JSON at all. Recovery never fails; an unusable
//! completion becomes the endpoint's fallback document.

use serde_json::Value;
use tracing::{error, warn};

use crate::schemas::{validate_structured_payload, CompletionSchema, SchemaPolicy};

/// Substituted for an empty completion.
pub const EMPTY_COMPLETION: &str = "{}";

/// How a completion ended up in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// The completion parsed and is returned as-is.
    Parsed,
    /// The completion was not a JSON object; the fallback was returned.
    Fallback,
    /// The completion parsed but violated its schema under [`SchemaPolicy::Strict`].
    SchemaRejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub value: Value,
    pub outcome: NormalizeOutcome,
}

impl Normalized {
    pub fn is_degraded(&self) -> bool {
        self.outcome != NormalizeOutcome::Parsed
    }
}

/// Best-effort brace slicing.
///
/// When `text` does not already start with `{`, returns the span from the
/// first `{` to the last `}` inclusive, which drops leading prose and trailing
/// code-fence markers. Text without such a pair is returned unchanged. This
/// only strips noise around the object: invalid or truncated JSON inside the
/// braces is not repaired.
pub fn extract_json_object(text: &str) -> &str {
    if text.starts_with('{') {
        return text;
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

/// Parse a completion into JSON, or `None` when it cannot be parsed.
pub fn normalize_completion(raw: &str) -> Option<Value> {
    let text = if raw.is_empty() { EMPTY_COMPLETION } else { raw };
    let candidate = extract_json_object(text.trim());

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Some(value),
        Err(err) => {
            error!(
                target: "travel_multiverse::normalizer",
                error = %err,
                text = %candidate,
                "JSON parse error"
            );
            None
        }
    }
}

/// Normalize a completion for the document type `T`.
///
/// Non-object results are replaced with `T::fallback()`. Schema violations
/// are logged and, under [`SchemaPolicy::Strict`], also replaced.
pub fn normalize_document<T: CompletionSchema>(raw: &str, policy: SchemaPolicy) -> Normalized {
    let schema = T::schema();

    let value = match normalize_completion(raw) {
        Some(value) if value.is_object() => value,
        Some(other) => {
            warn!(
                target: "travel_multiverse::normalizer",
                schema = schema.schema_name(),
                payload = %other,
                "completion is JSON but not an object"
            );
            return fallback::<T>(NormalizeOutcome::Fallback);
        }
        None => return fallback::<T>(NormalizeOutcome::Fallback),
    };

    if let Err(err) = validate_structured_payload(schema, &value) {
        warn!(
            target: "travel_multiverse::normalizer",
            schema = schema.schema_name(),
            policy = ?policy,
            error = %err,
            "completion does not match response schema"
        );
        if policy == SchemaPolicy::Strict {
            return fallback::<T>(NormalizeOutcome::SchemaRejected);
        }
    }

    Normalized {
        value,
        outcome: NormalizeOutcome::Parsed,
    }
}

fn fallback<T: CompletionSchema>(outcome: NormalizeOutcome) -> Normalized {
    Normalized {
        value: T::fallback(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DestinationSet, ItineraryBundle};
    use serde_json::json;

    const FENCED: &str = "```json\n{\"destinations\":[{\"id\":\"a\",\"title\":\"X\",\"location\":\"Y\",\"vibe\":\"chill\",\"pitch\":\"p\",\"highlights\":[\"a\",\"b\"],\"idealFor\":\"couples\"}]}\n```";

    #[test]
    fn test_extract_passes_clean_json_through() {
        assert_eq!(extract_json_object("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_extract_strips_prose_and_fences() {
        assert_eq!(
            extract_json_object("Sure! Here you go:\n{\"a\":{\"b\":2}}\nEnjoy"),
            "{\"a\":{\"b\":2}}"
        );
        assert_eq!(extract_json_object("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_extract_without_brace_pair() {
        assert_eq!(extract_json_object("no json here"), "no json here");
        assert_eq!(extract_json_object("only { open"), "only { open");
        assert_eq!(extract_json_object("} reversed {"), "} reversed {");
    }

    #[test]
    fn test_round_trip_embedded_object() {
        let embedded = json!({
            "destinations": [],
            "nested": { "list": [1, 2, 3], "flag": true, "text": "a } b" }
        });
        for (prefix, suffix) in [
            ("", ""),
            ("Here is the JSON:\n", ""),
            ("```json\n", "\n```"),
            ("  noise ", " trailing words "),
        ] {
            let raw = format!("{prefix}{embedded}{suffix}");
            assert_eq!(normalize_completion(&raw), Some(embedded.clone()), "{raw}");
        }
    }

    #[test]
    fn test_empty_completion_is_empty_object() {
        assert_eq!(normalize_completion(""), Some(json!({})));
    }

    #[test]
    fn test_unparseable_completion() {
        assert_eq!(normalize_completion("   "), None);
        assert_eq!(normalize_completion("I cannot help with that."), None);
        assert_eq!(normalize_completion("{\"destinations\": [ {\"id\": "), None);
        assert_eq!(normalize_completion("prefix {\"a\": 1}} suffix"), None);
    }

    #[test]
    fn test_fenced_destinations_parsed() {
        let normalized = normalize_document::<DestinationSet>(FENCED, SchemaPolicy::PassThrough);
        assert_eq!(normalized.outcome, NormalizeOutcome::Parsed);
        assert_eq!(normalized.value["destinations"][0]["idealFor"], "couples");
    }

    #[test]
    fn test_destination_fallback() {
        for raw in [
            "nothing useful",
            "{ broken",
            "{\"destinations\": [}",
            "[1, 2]",
            "42",
            "\"just text\"",
        ] {
            let normalized = normalize_document::<DestinationSet>(raw, SchemaPolicy::PassThrough);
            assert_eq!(normalized.value, json!({ "destinations": [] }), "{raw}");
            assert_eq!(normalized.outcome, NormalizeOutcome::Fallback);
            assert!(normalized.is_degraded());
        }
    }

    #[test]
    fn test_itinerary_fallback_is_null() {
        let normalized = normalize_document::<ItineraryBundle>("oops", SchemaPolicy::PassThrough);
        assert_eq!(normalized.value, json!({ "itineraries": null }));
        assert!(normalized.value["itineraries"].is_null());
    }

    #[test]
    fn test_schema_violation_pass_through() {
        let raw = r#"{"places": ["Lisbon"]}"#;
        let normalized = normalize_document::<DestinationSet>(raw, SchemaPolicy::PassThrough);
        assert_eq!(normalized.outcome, NormalizeOutcome::Parsed);
        assert_eq!(normalized.value, json!({ "places": ["Lisbon"] }));
    }

    #[test]
    fn test_schema_violation_strict() {
        let raw = r#"{"itineraries": {"single": "Day 1"}}"#;
        let normalized = normalize_document::<ItineraryBundle>(raw, SchemaPolicy::Strict);
        assert_eq!(normalized.outcome, NormalizeOutcome::SchemaRejected);
        assert_eq!(normalized.value, json!({ "itineraries": null }));
    }

    #[test]
    fn test_strict_accepts_valid_document() {
        let normalized = normalize_document::<DestinationSet>(FENCED, SchemaPolicy::Strict);
        assert_eq!(normalized.outcome, NormalizeOutcome::Parsed);
    }
}
