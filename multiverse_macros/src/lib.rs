//! Procedural macros for travel-multiverse response documents.

mod completion_schema;
mod schema_extraction;

use proc_macro::TokenStream;

/// Attach a cached JSON schema and a degraded-state fallback document to a
/// top-level response struct.
///
/// ```ignore
/// #[completion_schema(name = "DestinationSet", fallback = r#"{"destinations":[]}"#)]
/// pub struct DestinationSet { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn completion_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    completion_schema::completion_schema(attr, item)
}
