use crate::{errors::PromptError, providers::ai::AiProvider, schemas::FunctionSchema};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::Debug;
use tracing::info;

/// Builds the `generateContent` URL for a Gemini model.
pub fn gemini_api_url(model: &str) -> String {
    format!("https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent")
}

// --- Gemini-specific response structures ---

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    /// Absent when the candidate was blocked (e.g. `finishReason: "SAFETY"`).
    #[serde(default)]
    content: ContentResponse,
}

#[derive(Deserialize, Debug, Default)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PartResponse {
    #[serde(default)]
    function_call: Option<FunctionCallResponse>,
}

#[derive(Deserialize, Debug)]
struct FunctionCallResponse {
    name: String,
    #[serde(default)]
    args: Value,
}

// --- Gemini Provider implementation ---

/// A provider for interacting with the Google Gemini API.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    temperature: f32,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider`.
    pub fn new(api_url: String, api_key: String, temperature: f32) -> Result<Self, PromptError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            temperature,
        })
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn call_function(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        function: &FunctionSchema,
    ) -> Result<Value, PromptError> {
        let request_body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "role": "user", "parts": [{ "text": user_prompt }] }],
            "tools": [{ "functionDeclarations": [function.to_gemini_declaration()] }],
            "toolConfig": {
                "functionCallingConfig": {
                    "mode": "ANY",
                    "allowedFunctionNames": [function.name]
                }
            },
            "generationConfig": { "temperature": self.temperature }
        });

        info!("Calling '{}' via Gemini.", function.name);

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(format!("{status}: {error_text}")));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;

        gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.function_call)
                    .find(|call| call.name == function.name)
            })
            .map(|call| call.args)
            .ok_or_else(|| PromptError::MissingFunctionCall(function.name.clone()))
    }
}
