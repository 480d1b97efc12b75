//! # AI Provider Factory
//!
//! Builds a boxed `AiProvider` from a `ProviderConfig`, so the CLI and the
//! tests construct providers the same way.

use crate::{
    errors::PromptError,
    providers::ai::{
        gemini::{gemini_api_url, GeminiProvider},
        openai::{OpenAiProvider, OPENAI_CHAT_COMPLETIONS_URL},
        AiProvider,
    },
    types::ProviderConfig,
};
use tracing::info;

/// Creates the provider named by `config.provider` (`openai` or `gemini`).
///
/// When no `api_url` is configured the public endpoint for the provider is
/// used. Gemini always needs a key; OpenAI-compatible servers may not.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, PromptError> {
    let provider: Box<dyn AiProvider> = match config.provider.to_lowercase().as_str() {
        "openai" => {
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| OPENAI_CHAT_COMPLETIONS_URL.to_string());
            info!("Configuring OpenAI provider with URL: {}", api_url);
            Box::new(OpenAiProvider::new(
                api_url,
                config.api_key.clone(),
                config.model.clone(),
                config.temperature,
            )?)
        }
        "gemini" => {
            let api_key = config.api_key.clone().ok_or(PromptError::MissingApiKey)?;
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| gemini_api_url(&config.model));
            info!("Configuring Gemini provider with URL: {}", api_url);
            Box::new(GeminiProvider::new(api_url, api_key, config.temperature)?)
        }
        other => return Err(PromptError::UnsupportedProvider(other.to_string())),
    };

    Ok(provider)
}
