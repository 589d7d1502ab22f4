//! External API integrations

pub mod gemini;
pub mod llm;

pub use gemini::GeminiClient;
pub use llm::{ChatContent, GenerateRequest, LlmClient, Role};
