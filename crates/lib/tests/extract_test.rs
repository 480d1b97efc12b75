//! # Extraction Call Tests

use anyhow::Result;
use bulletin::{
    call_extraction,
    schemas::{CFM_FUNCTION_NAME, LEAP_FUNCTION_NAME},
    EngineType, ExtractError, ExtractionOptions,
};
use bulletin_test_utils::{sample_cfm_arguments, MockAiProvider};
use serde_json::json;

#[tokio::test]
async fn test_extraction_sends_text_with_engine_schema() -> Result<()> {
    // --- 1. Arrange ---
    let ai_provider = MockAiProvider::new();
    ai_provider.add_response(CFM_FUNCTION_NAME, sample_cfm_arguments());

    // --- 2. Act ---
    let extracted = call_extraction(
        &ai_provider,
        "SERVICE BULLETIN CFM56-5B 72-0931",
        "cfm_72-0931.pdf",
        EngineType::Cfm,
        &ExtractionOptions::default(),
    )
    .await?;

    // --- 3. Assert ---
    assert_eq!(extracted.engine, EngineType::Cfm);
    assert_eq!(extracted.source_name, "cfm_72-0931.pdf");
    assert_eq!(extracted.data, sample_cfm_arguments());

    let calls = ai_provider.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].system_prompt, "You are a pdf data extractor.");
    assert_eq!(calls[0].user_prompt, "SERVICE BULLETIN CFM56-5B 72-0931");
    assert_eq!(calls[0].function_name, CFM_FUNCTION_NAME);
    Ok(())
}

#[tokio::test]
async fn test_extraction_uses_custom_system_prompt() -> Result<()> {
    let ai_provider = MockAiProvider::new();
    ai_provider.add_response(LEAP_FUNCTION_NAME, json!({"documentInfo": {}}));
    let options = ExtractionOptions {
        system_prompt: "Extract LEAP data.".to_string(),
    };

    call_extraction(&ai_provider, "text", "leap.pdf", EngineType::Leap, &options).await?;

    let calls = ai_provider.get_calls();
    assert_eq!(calls[0].system_prompt, "Extract LEAP data.");
    assert_eq!(calls[0].function_name, LEAP_FUNCTION_NAME);
    Ok(())
}

#[tokio::test]
async fn test_empty_text_is_rejected_without_calling_the_model() {
    let ai_provider = MockAiProvider::new();

    let result = call_extraction(
        &ai_provider,
        "  \n\t ",
        "scan.pdf",
        EngineType::Leap,
        &ExtractionOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(ExtractError::EmptyDocument(name)) if name == "scan.pdf"));
    assert!(ai_provider.get_calls().is_empty());
}

#[tokio::test]
async fn test_non_object_answer_is_rejected() {
    let ai_provider = MockAiProvider::new();
    ai_provider.add_response(CFM_FUNCTION_NAME, json!(["not", "an", "object"]));

    let result = call_extraction(
        &ai_provider,
        "text",
        "cfm.pdf",
        EngineType::Cfm,
        &ExtractionOptions::default(),
    )
    .await;

    match result {
        Err(ExtractError::UnexpectedShape(kind)) => assert_eq!(kind, "an array"),
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_provider_errors_are_wrapped() {
    let ai_provider = MockAiProvider::new();

    let result = call_extraction(
        &ai_provider,
        "text",
        "cfm.pdf",
        EngineType::Cfm,
        &ExtractionOptions::default(),
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ExtractError::Prompt(_)));
    assert!(err.to_string().starts_with("LLM call failed"));
}
