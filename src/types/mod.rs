pub mod destination;
pub mod itinerary;
pub mod loose;

pub use destination::{Destination, DestinationRequest, DestinationSet};
pub use itinerary::{
    DayPlan, Itineraries, ItineraryBundle, ItineraryRequest, MultiverseItineraries, Planner,
};
pub use loose::Loose;
