//! The two request pipelines: build the prompt, invoke the completion
//! service once, normalize the completion.
//!
//! Only completion-service failures are returned as errors. Anything wrong
//! with the completion text is absorbed by normalization.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    config::GenerationConfig,
    error::Result,
    prompts::{build_destination_prompt, build_itinerary_prompts},
    services::{
        completion::{ChatMessage, CompletionRequest, CompletionService},
        normalizer::{normalize_document, NormalizeOutcome, Normalized},
    },
    types::{DestinationRequest, DestinationSet, ItineraryBundle, ItineraryRequest},
};

const MIN_DESTINATIONS: usize = 4;
const MAX_DESTINATIONS: usize = 5;

pub async fn generate_destinations(
    service: &dyn CompletionService,
    config: &GenerationConfig,
    request: &DestinationRequest,
) -> Result<Normalized> {
    let started = Instant::now();
    let prompt = build_destination_prompt(request);
    debug!(
        target: "travel_multiverse::generation",
        model = %config.destination_model,
        prompt_len = prompt.len(),
        "generating destinations"
    );

    let raw = service
        .complete(CompletionRequest::instruction(
            config.destination_model.as_str(),
            prompt,
        ))
        .await?;

    let normalized = normalize_document::<DestinationSet>(&raw, config.schema_policy);
    if normalized.outcome == NormalizeOutcome::Parsed {
        check_destination_contract(&normalized);
    }

    info!(
        target: "travel_multiverse::generation",
        outcome = ?normalized.outcome,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "destinations generated"
    );
    Ok(normalized)
}

pub async fn generate_itineraries(
    service: &dyn CompletionService,
    config: &GenerationConfig,
    request: &ItineraryRequest,
) -> Result<Normalized> {
    let started = Instant::now();
    let is_multiverse = request.is_multiverse();
    let prompts = build_itinerary_prompts(request);
    debug!(
        target: "travel_multiverse::generation",
        model = %config.itinerary_model,
        is_multiverse,
        effective_days = request.effective_days(),
        "generating itineraries"
    );

    let raw = service
        .complete(CompletionRequest::messages(
            config.itinerary_model.as_str(),
            vec![
                ChatMessage::system(prompts.system),
                ChatMessage::user(prompts.user),
            ],
        ))
        .await?;

    let normalized = normalize_document::<ItineraryBundle>(&raw, config.schema_policy);
    if normalized.outcome == NormalizeOutcome::Parsed {
        check_itinerary_contract(&normalized, is_multiverse);
    }

    info!(
        target: "travel_multiverse::generation",
        outcome = ?normalized.outcome,
        is_multiverse,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "itineraries generated"
    );
    Ok(normalized)
}

/// Log content that breaks the documented destination contract. The
/// response itself is left untouched.
fn check_destination_contract(normalized: &Normalized) {
    let Ok(set) = serde_json::from_value::<DestinationSet>(normalized.value.clone()) else {
        return;
    };
    for issue in destination_contract_issues(&set) {
        warn!(target: "travel_multiverse::generation", "{issue}");
    }
}

fn check_itinerary_contract(normalized: &Normalized, is_multiverse: bool) {
    let Ok(bundle) = serde_json::from_value::<ItineraryBundle>(normalized.value.clone()) else {
        return;
    };
    for issue in itinerary_contract_issues(&bundle, is_multiverse) {
        warn!(target: "travel_multiverse::generation", is_multiverse, "{issue}");
    }
}

fn destination_contract_issues(set: &DestinationSet) -> Vec<String> {
    let mut issues = Vec::new();

    let count = set.destinations.len();
    if !(MIN_DESTINATIONS..=MAX_DESTINATIONS).contains(&count) {
        issues.push(format!(
            "expected {MIN_DESTINATIONS}-{MAX_DESTINATIONS} destinations, got {count}"
        ));
    }

    let duplicates = set.duplicate_ids();
    if !duplicates.is_empty() {
        issues.push(format!("destination ids are not unique: {duplicates:?}"));
    }

    issues
}

fn itinerary_contract_issues(bundle: &ItineraryBundle, is_multiverse: bool) -> Vec<String> {
    let Some(itineraries) = &bundle.itineraries else {
        return vec!["completion returned no itineraries".to_string()];
    };

    let mut issues = Vec::new();
    if itineraries.single.is_empty() {
        issues.push("single itinerary has no days".to_string());
    }

    match (&itineraries.multiverse, is_multiverse) {
        (Some(variants), true) => {
            let empty = variants.empty_variants();
            if !empty.is_empty() {
                issues.push(format!("multiverse variants left empty: {empty:?}"));
            }
        }
        (None, true) => issues.push("multiverse requested but not returned".to_string()),
        (Some(_), false) => {
            issues.push("multiverse returned without being requested".to_string())
        }
        (None, false) => {}
    }

    issues
}
