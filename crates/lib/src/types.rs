use crate::engine::EngineType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The settings needed to build an AI provider.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider ("openai" or "gemini").
    pub provider: String,
    /// The API URL. When unset the provider's public endpoint is used.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
}

/// The structured answer the LLM produced for one bulletin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedBulletin {
    /// File name the text was taken from.
    pub source_name: String,
    pub engine: EngineType,
    /// The function-call arguments exactly as returned, shaped by the engine's schema.
    pub data: Value,
}
