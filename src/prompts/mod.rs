//! Instruction text sent to the completion service.
//!
//! Builders are pure functions of the request: the same record always renders
//! the same text, and every missing field renders its default token.

pub mod destination;
pub mod itinerary;

pub use destination::build_destination_prompt;
pub use itinerary::{
    build_itinerary_prompts, build_itinerary_system_prompt, describe_creative_settings,
    describe_trip, ItineraryPrompts,
};
