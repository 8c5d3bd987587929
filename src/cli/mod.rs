use crate::{
    config::ServiceConfig,
    server,
    services::{generate_destinations, generate_itineraries, OpenAIClient},
    types::{DestinationRequest, ItineraryRequest, Loose},
};
use clap::{Arg, ArgMatches, Command};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line flags that stand in for configuration environment variables.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "api-key"),
    ("OPENAI_BASE_URL", "base-url"),
    ("TRAVEL_DESTINATION_MODEL", "destination-model"),
    ("TRAVEL_ITINERARY_MODEL", "itinerary-model"),
    ("TRAVEL_REQUEST_TIMEOUT_SECS", "timeout"),
    ("TRAVEL_SCHEMA_POLICY", "schema-policy"),
    ("TRAVEL_LISTEN_ADDR", "addr"),
];

/// CLI entry point for the travel-multiverse binary
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = build_command().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        anyhow::bail!("a subcommand is required");
    };

    let config = ServiceConfig::from_lookup(|key| {
        flag_override(sub, key).or_else(|| env::var(key).ok())
    })?;
    info!("Base URL: {}", config.base_url);

    match name {
        "serve" => server::serve(&config).await?,
        "destinations" => {
            let request = destination_request(sub);
            let client = OpenAIClient::from_config(&config);
            let normalized = generate_destinations(&client, &config.generation, &request).await?;
            if normalized.is_degraded() {
                warn!("completion could not be recovered: {:?}", normalized.outcome);
            }
            println!("{}", serde_json::to_string_pretty(&normalized.value)?);
        }
        "itinerary" => {
            let request = itinerary_request(sub);
            let client = OpenAIClient::from_config(&config);
            let normalized = generate_itineraries(&client, &config.generation, &request).await?;
            if normalized.is_degraded() {
                warn!("completion could not be recovered: {:?}", normalized.outcome);
            }
            println!("{}", serde_json::to_string_pretty(&normalized.value)?);
        }
        other => anyhow::bail!("unknown subcommand `{other}`"),
    }

    Ok(())
}

fn build_command() -> Command {
    Command::new("travel-multiverse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate travel destinations and itineraries with an LLM")
        .subcommand_required(true)
        .arg(global_flag("api-key", 'k', "KEY", "OpenAI API key (or set OPENAI_API_KEY)"))
        .arg(global_flag(
            "base-url",
            'u',
            "URL",
            "Completion API base URL (or set OPENAI_BASE_URL)",
        ))
        .arg(global_flag(
            "timeout",
            't',
            "SECONDS",
            "Completion request timeout in seconds (or set TRAVEL_REQUEST_TIMEOUT_SECS)",
        ))
        .arg(
            Arg::new("schema-policy")
                .long("schema-policy")
                .value_name("POLICY")
                .global(true)
                .value_parser(["pass-through", "strict"])
                .help("What to do with completions that violate the response schema"),
        )
        .arg(
            Arg::new("destination-model")
                .long("destination-model")
                .value_name("MODEL")
                .global(true)
                .help("Model used for destination suggestions"),
        )
        .arg(
            Arg::new("itinerary-model")
                .long("itinerary-model")
                .value_name("MODEL")
                .global(true)
                .help("Model used for itineraries"),
        )
        .subcommand(
            Command::new("serve").about("Run the HTTP service").arg(
                Arg::new("addr")
                    .short('a')
                    .long("addr")
                    .value_name("HOST:PORT")
                    .help("Listen address (or set TRAVEL_LISTEN_ADDR)"),
            ),
        )
        .subcommand(
            Command::new("destinations")
                .about("Suggest destinations once and print the JSON")
                .arg(text_arg("theme", "Trip theme"))
                .arg(text_arg("days", "Number of days"))
                .arg(text_arg("budget", "Budget level"))
                .arg(text_arg("traveler", "Traveler type"))
                .arg(text_arg("home-city", "Home city")),
        )
        .subcommand(
            Command::new("itinerary")
                .about("Generate itineraries once and print the JSON")
                .arg(
                    Arg::new("planner")
                        .long("planner")
                        .value_parser(["freeform", "structured"])
                        .default_value("structured")
                        .help("How the trip is described"),
                )
                .arg(text_arg("destination", "Destination"))
                .arg(text_arg("companion", "Travel companion"))
                .arg(text_arg("days", "Number of days"))
                .arg(text_arg("prompt", "Free-text description or extra notes"))
                .arg(text_arg("mode", "Creative mode, e.g. classic or creative"))
                .arg(text_arg("flavor", "Flavor, e.g. multiverse"))
                .arg(text_arg("detail", "Detail level")),
        )
}

fn global_flag(id: &'static str, short: char, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .short(short)
        .long(id)
        .value_name(value_name)
        .global(true)
        .help(help)
}

fn text_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).value_name("TEXT").help(help)
}

fn flag_override(matches: &ArgMatches, key: &str) -> Option<String> {
    let (_, id) = ENV_OVERRIDES.iter().find(|(env_key, _)| *env_key == key)?;
    matches.try_get_one::<String>(id).ok().flatten().cloned()
}

fn loose_arg(matches: &ArgMatches, id: &str) -> Option<Loose> {
    matches
        .try_get_one::<String>(id)
        .ok()
        .flatten()
        .map(|value| Loose::from(value.as_str()))
}

fn destination_request(matches: &ArgMatches) -> DestinationRequest {
    DestinationRequest {
        trip_theme: loose_arg(matches, "theme"),
        days: loose_arg(matches, "days"),
        budget: loose_arg(matches, "budget"),
        traveler_type: loose_arg(matches, "traveler"),
        home_city: loose_arg(matches, "home-city"),
    }
}

fn itinerary_request(matches: &ArgMatches) -> ItineraryRequest {
    ItineraryRequest {
        planner: loose_arg(matches, "planner"),
        destination: loose_arg(matches, "destination"),
        companion: loose_arg(matches, "companion"),
        days: loose_arg(matches, "days"),
        prompt: loose_arg(matches, "prompt"),
        mode: loose_arg(matches, "mode"),
        flavor: loose_arg(matches, "flavor"),
        detail: loose_arg(matches, "detail"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_flags_override_environment_keys() {
        let matches = build_command()
            .try_get_matches_from([
                "travel-multiverse",
                "serve",
                "--api-key",
                "sk-cli",
                "--addr",
                "0.0.0.0:9000",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        assert_eq!(flag_override(sub, "OPENAI_API_KEY").as_deref(), Some("sk-cli"));
        assert_eq!(
            flag_override(sub, "TRAVEL_LISTEN_ADDR").as_deref(),
            Some("0.0.0.0:9000")
        );
        assert_eq!(flag_override(sub, "OPENAI_BASE_URL"), None);
    }

    #[test]
    fn test_itinerary_request_from_flags() {
        let matches = build_command()
            .try_get_matches_from([
                "travel-multiverse",
                "itinerary",
                "--destination",
                "Tokyo",
                "--days",
                "4",
                "--flavor",
                "multiverse",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let request = itinerary_request(sub);

        assert_eq!(request.destination(), "Tokyo");
        assert_eq!(request.effective_days(), 4);
        assert!(request.is_multiverse());
    }
}
