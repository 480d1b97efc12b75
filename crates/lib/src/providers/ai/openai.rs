use crate::{errors::PromptError, providers::ai::AiProvider, schemas::FunctionSchema};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use tracing::{debug, info};

pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    tools: Vec<ToolDefinition<'a>>,
    tool_choice: ToolChoice<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ToolDefinition<'a> {
    r#type: &'a str,
    function: &'a FunctionSchema,
}

#[derive(Serialize)]
struct ToolChoice<'a> {
    r#type: &'a str,
    function: ToolChoiceFunction<'a>,
}

#[derive(Serialize)]
struct ToolChoiceFunction<'a> {
    name: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
    /// Legacy `functions` API shape, still returned by some compatible servers.
    #[serde(default)]
    function_call: Option<FunctionCall>,
}

#[derive(Deserialize, Debug)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize, Debug)]
struct FunctionCall {
    name: String,
    arguments: String,
}

// --- OpenAI Provider implementation ---

/// A provider for the OpenAI chat completions API or any server speaking it.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: String,
        temperature: f32,
    ) -> Result<Self, PromptError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            temperature,
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn call_function(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        function: &FunctionSchema,
    ) -> Result<Value, PromptError> {
        let request_body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            tools: vec![ToolDefinition {
                r#type: "function",
                function,
            }],
            tool_choice: ToolChoice {
                r#type: "function",
                function: ToolChoiceFunction {
                    name: &function.name,
                },
            },
        };

        info!(
            "Calling '{}' on model '{}' ({} chars of input).",
            function.name,
            self.model,
            user_prompt.len()
        );

        let mut request_builder = self.client.post(&self.api_url);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(format!("{status}: {error_text}")));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;

        let call = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| {
                let ResponseMessage {
                    tool_calls,
                    function_call,
                } = choice.message;
                tool_calls
                    .into_iter()
                    .flatten()
                    .map(|call| call.function)
                    .find(|call| call.name == function.name)
                    .or(function_call)
            })
            .ok_or_else(|| PromptError::MissingFunctionCall(function.name.clone()))?;

        debug!("Function '{}' returned {} bytes of arguments.", call.name, call.arguments.len());
        Ok(serde_json::from_str(&call.arguments)?)
    }
}
