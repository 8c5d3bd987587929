use schemars::schema::{RootSchema, Schema, SchemaObject};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Cached JSON schema handle associated with a response document type.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    schema_json: Arc<Value>,
}

impl SchemaHandle {
    pub fn from_root_schema(
        schema_name: &'static str,
        type_name: &'static str,
        root: RootSchema,
    ) -> Self {
        // An empty schema accepts every document, which degrades to pass-through.
        let schema_json = serde_json::to_value(root).unwrap_or_else(|err| {
            tracing::warn!(
                target: "travel_multiverse::schema",
                schema = schema_name,
                error = %err,
                "failed to serialize completion schema"
            );
            Value::Object(serde_json::Map::new())
        });

        Self {
            schema_name,
            type_name,
            schema_json: Arc::new(schema_json),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }
}

/// A top-level document the completion service is asked to produce.
///
/// Implemented through `#[completion_schema]`, which also records the
/// fallback document returned when a completion cannot be recovered.
pub trait CompletionSchema: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;

    /// Fixed document substituted when the completion is unusable.
    fn fallback() -> Value;
}

/// Copy the doc comments collected by `#[completion_schema]` into the
/// generated schema. Descriptions already set by `schemars` win.
pub fn apply_doc_comments(
    root: &mut RootSchema,
    title: &'static str,
    description: Option<&'static str>,
    field_docs: &[(&'static str, &'static str)],
) {
    let document = &mut root.schema;
    let metadata = document.metadata();
    metadata.title.get_or_insert_with(|| title.to_string());
    if let Some(description) = description {
        metadata
            .description
            .get_or_insert_with(|| description.to_string());
    }

    let Some(object) = document.object.as_mut() else {
        return;
    };
    for (field, doc) in field_docs {
        if let Some(Schema::Object(property)) = object.properties.get_mut(*field) {
            describe_if_missing(property, doc);
        }
    }
}

fn describe_if_missing(property: &mut SchemaObject, doc: &str) {
    property
        .metadata()
        .description
        .get_or_insert_with(|| doc.to_string());
}
