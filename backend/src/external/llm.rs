//! Provider-neutral interface to a hosted generative model

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Author of one conversational turn, as the model API names it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One role-tagged message in a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContent {
    pub role: Role,
    pub text: String,
}

impl ChatContent {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A single generation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<ChatContent>,
    /// Constrains the reply content type, e.g. `application/json`
    pub response_mime_type: Option<String>,
}

impl GenerateRequest {
    /// A one-shot prompt outside any conversation
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![ChatContent::user(text)],
            ..Self::default()
        }
    }

    pub fn with_json_response(mut self) -> Self {
        self.response_mime_type = Some("application/json".to_string());
        self
    }
}

/// Hosted model returning the reply text of one generation call
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> AppResult<String>;
}
