use std::str::FromStr;

use crate::{error::TravelError, schemas::SchemaHandle};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// What to do with a completion that parses as JSON but violates its schema.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaPolicy {
    /// Log the violation and return the parsed document untouched.
    #[default]
    PassThrough,
    /// Replace the document with the endpoint fallback.
    Strict,
}

impl FromStr for SchemaPolicy {
    type Err = TravelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pass-through" | "passthrough" | "pass_through" => Ok(SchemaPolicy::PassThrough),
            "strict" => Ok(SchemaPolicy::Strict),
            other => Err(TravelError::Config(format!(
                "unknown schema policy `{other}` (expected `pass-through` or `strict`)"
            ))),
        }
    }
}

/// Check a parsed completion against its response schema.
///
/// The error names at most [`MAX_SCHEMA_ERRORS`] violations, each located by
/// the JSON pointer of the offending value (`/` for the document itself).
pub fn validate_structured_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> Result<(), TravelError> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            TravelError::Validation(format!(
                "`{}` response schema does not compile: {err}",
                schema.schema_name()
            ))
        })?;

    let Err(errors) = validator.validate(payload) else {
        return Ok(());
    };

    let mut violations: Vec<String> = errors
        .take(MAX_SCHEMA_ERRORS + 1)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let location = if pointer.is_empty() { "/" } else { pointer.as_str() };
            format!("at {location}: {error}")
        })
        .collect();

    if violations.len() > MAX_SCHEMA_ERRORS {
        violations.truncate(MAX_SCHEMA_ERRORS);
        violations.push("more violations omitted".to_string());
    }

    Err(TravelError::Validation(format!(
        "completion violates `{}`: {}",
        schema.schema_name(),
        violations.join("; ")
    )))
}
