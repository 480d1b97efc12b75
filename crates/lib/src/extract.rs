//! # Structured Extraction
//!
//! Sends the raw bulletin text to an `AiProvider` together with the schema of
//! the bulletin's engine family and wraps the answer in an `ExtractedBulletin`.

use crate::{
    engine::EngineType, errors::ExtractError, prompts::EXTRACTION_SYSTEM_PROMPT,
    providers::ai::AiProvider, types::ExtractedBulletin,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Options for a single extraction call.
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    pub system_prompt: String,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            system_prompt: EXTRACTION_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Runs the function-calling request for one document.
///
/// Whitespace-only text is rejected before any request is made.
#[instrument(skip(ai_provider, text, options), fields(chars = text.len()))]
pub async fn call_extraction(
    ai_provider: &dyn AiProvider,
    text: &str,
    source_name: &str,
    engine: EngineType,
    options: &ExtractionOptions,
) -> Result<ExtractedBulletin, ExtractError> {
    if text.trim().is_empty() {
        warn!("'{}' produced no text. Skipping LLM call.", source_name);
        return Err(ExtractError::EmptyDocument(source_name.to_string()));
    }

    let schema = engine.schema();
    info!(
        "Extracting '{}' with the {} schema '{}'.",
        source_name, engine, schema.name
    );

    let data = ai_provider
        .call_function(&options.system_prompt, text, &schema)
        .await?;

    if !data.is_object() {
        return Err(ExtractError::UnexpectedShape(json_kind(&data).to_string()));
    }

    Ok(ExtractedBulletin {
        source_name: source_name.to_string(),
        engine,
        data,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
