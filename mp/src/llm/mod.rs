//! LLM client module
//!
//! The scheduling "algorithm" lives out of process: this module issues the
//! one generation request and hands back raw JSON text.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;

pub use client::{GenerateClient, GenerateRequest};
pub use error::LlmError;
pub use gemini::GeminiClient;

use crate::config::LlmConfig;

/// Create a generation client based on the provider specified in config
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn GenerateClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => Ok(Arc::new(GeminiClient::from_config(config)?)),
        other => Err(LlmError::InvalidResponse(format!(
            "Unknown LLM provider: '{}'. Supported: gemini",
            other
        ))),
    }
}
