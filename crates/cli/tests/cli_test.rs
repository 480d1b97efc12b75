//! # `bulletin` CLI Integration Tests

use anyhow::Result;
use assert_cmd::Command;
use bulletin::{
    schemas::{CFM_FUNCTION_NAME, LEAP_FUNCTION_NAME},
    EngineSelection, ExtractionOptions, MetadataStyle,
};
use bulletin_cli::{process_files, ExtractSettings};
use bulletin_sheets::ExportFormat;
use bulletin_test_utils::{build_text_pdf, sample_cfm_arguments, sample_leap_arguments, MockAiProvider};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// --- Helpers ---

fn bulletin_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bulletin").unwrap();
    cmd.env_remove("OPENAI_API_KEY").env_remove("GEMINI_API_KEY");
    cmd
}

fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_text_pdf(pages)).unwrap();
    path
}

fn settings(out_dir: &Path, fail_fast: bool) -> ExtractSettings {
    ExtractSettings {
        engine: EngineSelection::Auto,
        out_dir: out_dir.to_path_buf(),
        formats: vec![ExportFormat::Json],
        metadata_style: MetadataStyle::Labeled,
        options: ExtractionOptions::default(),
        fail_fast,
    }
}

fn tool_call_response(function_name: &str, arguments: &Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": function_name, "arguments": arguments.to_string() }
                }]
            }
        }]
    }))
}

// --- Binary Tests ---

#[test]
fn test_help_lists_subcommands() {
    bulletin_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract").and(predicate::str::contains("schema")));
}

#[test]
fn test_schema_prints_cfm_function() -> Result<()> {
    let output = bulletin_cmd().args(["schema", "cfm"]).output()?;

    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(schema["name"], CFM_FUNCTION_NAME);
    assert_eq!(schema["parameters"]["type"], "object");
    Ok(())
}

#[test]
fn test_schema_gemini_declaration_has_no_type_unions() {
    bulletin_cmd()
        .args(["schema", "leap", "--gemini"])
        .assert()
        .success()
        .stdout(predicate::str::contains(LEAP_FUNCTION_NAME))
        .stdout(predicate::str::contains("\"nullable\": true"))
        .stdout(predicate::str::contains("\"null\"").not());
}

#[test]
fn test_extract_requires_files() {
    bulletin_cmd().arg("extract").assert().failure();
}

#[test]
fn test_unknown_engine_is_rejected() {
    bulletin_cmd()
        .args(["extract", "--engine", "ge90", "a.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ge90"));
}

#[test]
fn test_missing_config_file_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let pdf = write_pdf(dir.path(), "cfm_sb.pdf", &["text"]);

    bulletin_cmd()
        .current_dir(dir.path())
        .arg("extract")
        .arg(&pdf)
        .args(["--config", "missing.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yml"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_extract_writes_workbook_and_json() -> Result<()> {
    // --- 1. Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(tool_call_response(CFM_FUNCTION_NAME, &sample_cfm_arguments()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let pdf = write_pdf(dir.path(), "cfm_72-0931.pdf", &["CFM56-5B SERVICE BULLETIN 72-0931"]);
    let out_dir = dir.path().join("out");
    let config_path = dir.path().join("bulletin.yml");
    std::fs::write(
        &config_path,
        format!(
            "provider: openai\napi_url: {}/v1/chat/completions\napi_key: test-key\nformats: [xlsx, json]\n",
            server.uri()
        ),
    )?;

    // --- 2. Act ---
    let assert = bulletin_cmd()
        .current_dir(dir.path())
        .arg("extract")
        .arg(&pdf)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert();

    // --- 3. Assert ---
    assert
        .success()
        .stdout(predicate::str::contains("✅"))
        .stdout(predicate::str::contains("1 succeeded, 0 failed"));

    let xlsx = std::fs::read(out_dir.join("cfm_72-0931_CFM.xlsx"))?;
    assert!(xlsx.starts_with(b"PK"));
    let dumped: Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("cfm_72-0931_CFM.json"))?)?;
    assert_eq!(dumped, sample_cfm_arguments());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_file_is_reported_and_exit_code_is_non_zero() -> Result<()> {
    // --- 1. Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(tool_call_response(LEAP_FUNCTION_NAME, &sample_leap_arguments()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let broken = dir.path().join("broken.pdf");
    std::fs::write(&broken, b"not a pdf at all")?;
    let good = write_pdf(dir.path(), "leap_sb.pdf", &["LEAP-1A"]);
    let config_path = dir.path().join("custom.yml");
    std::fs::write(
        &config_path,
        format!(
            "api_url: {}/v1/chat/completions\napi_key: test-key\nformats: [json]\noutput_dir: results\n",
            server.uri()
        ),
    )?;

    // --- 2. Act ---
    let assert = bulletin_cmd()
        .current_dir(dir.path())
        .arg("extract")
        .arg(&broken)
        .arg(&good)
        .arg("--config")
        .arg(&config_path)
        .assert();

    // --- 3. Assert ---
    assert
        .failure()
        .stderr(predicate::str::contains("❌").and(predicate::str::contains("broken.pdf")))
        .stdout(predicate::str::contains("1 succeeded, 1 failed"));
    assert!(dir.path().join("results").join("leap_sb_LEAP.json").exists());
    Ok(())
}

// --- Library Tests ---

#[tokio::test]
async fn test_process_files_continues_after_failure() -> Result<()> {
    // --- 1. Arrange ---
    let ai_provider = MockAiProvider::new();
    ai_provider.add_response(LEAP_FUNCTION_NAME, sample_leap_arguments());
    let dir = tempfile::tempdir()?;
    let empty = write_pdf(dir.path(), "scanned.pdf", &[""]);
    let good = write_pdf(dir.path(), "leap_sb.pdf", &["LEAP-1A SB"]);
    let out_dir = dir.path().join("out");

    // --- 2. Act ---
    let summary = process_files(&ai_provider, &[empty.clone(), good], &settings(&out_dir, false)).await;

    // --- 3. Assert ---
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].file, empty);
    assert!(summary.failed[0].message.contains("scanned.pdf"));
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.written, vec![out_dir.join("leap_sb_LEAP.json")]);
    // The empty document never reached the model.
    assert_eq!(ai_provider.get_calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_process_files_fail_fast_stops_early() -> Result<()> {
    let ai_provider = MockAiProvider::new();
    ai_provider.add_response(CFM_FUNCTION_NAME, sample_cfm_arguments());
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("cfm_missing.pdf");
    let good = write_pdf(dir.path(), "cfm_good.pdf", &["CFM56"]);

    let summary = process_files(
        &ai_provider,
        &[missing, good],
        &settings(&dir.path().join("out"), true),
    )
    .await;

    assert!(!summary.is_success());
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.skipped, 1);
    assert!(ai_provider.get_calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_same_file_name_in_different_directories_keeps_both_outputs() -> Result<()> {
    // --- 1. Arrange ---
    let ai_provider = MockAiProvider::new();
    ai_provider.add_response(CFM_FUNCTION_NAME, sample_cfm_arguments());
    let dir = tempfile::tempdir()?;
    std::fs::create_dir_all(dir.path().join("a"))?;
    std::fs::create_dir_all(dir.path().join("b"))?;
    let first = write_pdf(&dir.path().join("a"), "cfm_sb.pdf", &["CFM56 first"]);
    let second = write_pdf(&dir.path().join("b"), "cfm_sb.pdf", &["CFM56 second"]);
    let out_dir = dir.path().join("out");

    // --- 2. Act ---
    let summary = process_files(&ai_provider, &[first, second], &settings(&out_dir, false)).await;

    // --- 3. Assert ---
    assert_eq!(summary.succeeded, 2);
    assert_eq!(
        summary.written,
        vec![out_dir.join("cfm_sb_CFM.json"), out_dir.join("cfm_sb_CFM_2.json")]
    );
    assert!(summary.written.iter().all(|p| p.exists()));
    Ok(())
}
