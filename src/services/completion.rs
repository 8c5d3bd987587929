use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Either one instruction string or an ordered list of role-tagged messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CompletionInput {
    Instruction(String),
    Messages(Vec<ChatMessage>),
}

/// One call to the completion service. Serializes as the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub input: CompletionInput,
}

impl CompletionRequest {
    pub fn instruction(model: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: CompletionInput::Instruction(instruction.into()),
        }
    }

    pub fn messages(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            input: CompletionInput::Messages(messages),
        }
    }
}

/// Text-completion capability the pipelines delegate generation to.
///
/// Implementations make exactly one attempt. An empty completion is a valid
/// result, not an error.
#[async_trait]
pub trait CompletionService: Send + Sync + std::fmt::Debug {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instruction_body() {
        let request = CompletionRequest::instruction("gpt-4.1-mini", "Plan a trip");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "model": "gpt-4.1-mini", "input": "Plan a trip" })
        );
    }

    #[test]
    fn test_messages_body_keeps_order() {
        let request = CompletionRequest::messages(
            "gpt-4.1",
            vec![ChatMessage::system("rules"), ChatMessage::user("trip")],
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4.1",
                "input": [
                    { "role": "system", "content": "rules" },
                    { "role": "user", "content": "trip" }
                ]
            })
        );
    }
}
