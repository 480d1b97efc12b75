//! # Default Prompt Templates

/// The default system prompt for the structured-extraction call. The raw PDF
/// text is sent unchanged as the user prompt.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are a pdf data extractor.";
