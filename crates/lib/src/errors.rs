use thiserror::Error;

/// Errors raised while talking to an AI provider.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("The model did not call the function '{0}'")]
    MissingFunctionCall(String),
    #[error("Function call arguments are not valid JSON: {0}")]
    InvalidArguments(#[from] serde_json::Error),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),
}

/// Errors raised by the extraction step for a single document.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No text could be extracted from '{0}'")]
    EmptyDocument(String),
    #[error("LLM call failed: {0}")]
    Prompt(#[from] PromptError),
    #[error("Extraction result is not a JSON object (got {0})")]
    UnexpectedShape(String),
    #[error("Unknown engine type: {0}")]
    UnknownEngine(String),
}
