pub mod completion;
pub mod generation;
pub mod normalizer;
pub mod openai_client;

pub use completion::{ChatMessage, CompletionInput, CompletionRequest, CompletionService, Role};
pub use generation::{generate_destinations, generate_itineraries};
pub use normalizer::{
    extract_json_object, normalize_completion, normalize_document, NormalizeOutcome, Normalized,
};
pub use openai_client::{extract_output_text, OpenAIClient};
