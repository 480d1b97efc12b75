//! # `bulletin-cli` Library Crate
//!
//! Command handling for the `bulletin` binary: read service-bulletin PDFs,
//! extract their content through a forced LLM function call and write the
//! resulting tables to disk.

pub mod config;

use crate::config::get_config;
use anyhow::{anyhow, Context, Result};
use bulletin::{
    call_extraction, flatten_bulletin,
    providers::{ai::AiProvider, factory::create_provider},
    EngineSelection, EngineType, ExtractError, ExtractionOptions, MetadataStyle,
};
use bulletin_pdf::{extract_text_from_path, PdfTextError};
use bulletin_sheets::{export_as, output_stem, unique_stem, ExportFormat, SheetError};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// --- CLI Argument Structs ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract service bulletins into spreadsheets
    Extract(ExtractArgs),
    /// Print the function-calling schema of an engine family
    Schema(SchemaArgs),
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// The service-bulletin PDF files to process.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Engine family: `auto` (guessed from the file name), `cfm` or `leap`.
    #[arg(long, default_value = "auto")]
    pub engine: EngineSelection,
    /// Directory for the generated files. Overrides `output_dir`.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Comma-separated output formats: xlsx, csv, json. Overrides `formats`.
    #[arg(long, value_delimiter = ',', value_parser = parse_format)]
    pub format: Option<Vec<ExportFormat>>,
    /// Metadata layout: `labeled` or `raw`. Overrides `metadata_style`.
    #[arg(long)]
    pub metadata: Option<MetadataStyle>,
    /// The model name. Overrides `model`.
    #[arg(long)]
    pub model: Option<String>,
    /// Path to a YAML config file (defaults to `./bulletin.yml` if present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Stop at the first file that fails.
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// `cfm` or `leap`.
    pub engine: EngineType,
    /// Print the declaration in the form sent to Gemini.
    #[arg(long)]
    pub gemini: bool,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: SheetError| e.to_string())
}

// --- Processing Types ---

/// Everything needed to process files once the provider is built.
#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub engine: EngineSelection,
    pub out_dir: PathBuf,
    pub formats: Vec<ExportFormat>,
    pub metadata_style: MetadataStyle,
    pub options: ExtractionOptions,
    pub fail_fast: bool,
}

#[derive(Error, Debug)]
pub enum FileError {
    #[error(transparent)]
    Pdf(#[from] PdfTextError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Export(#[from] SheetError),
}

#[derive(Debug)]
pub struct FileFailure {
    pub file: PathBuf,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: Vec<FileFailure>,
    /// Files never attempted because of `--fail-fast`.
    pub skipped: usize,
    pub written: Vec<PathBuf>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

// --- Public Entrypoint ---

/// The main entry point for the `bulletin` library.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract(args) => handle_extract(args).await,
        Commands::Schema(args) => handle_schema(args),
    }
}

// --- Command Handlers ---

async fn handle_extract(args: ExtractArgs) -> Result<()> {
    info!("Starting 'extract' command with args: {:?}", args);
    let mut app_config =
        get_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(model) = &args.model {
        app_config.model = model.clone();
    }

    let settings = ExtractSettings {
        engine: args.engine,
        out_dir: args.out_dir.clone().unwrap_or(app_config.output_dir.clone()),
        formats: args.format.clone().unwrap_or(app_config.formats.clone()),
        metadata_style: args.metadata.unwrap_or(app_config.metadata_style),
        options: ExtractionOptions {
            system_prompt: app_config.system_prompt.clone(),
        },
        fail_fast: args.fail_fast,
    };
    if settings.formats.is_empty() {
        return Err(anyhow!("No output formats selected"));
    }

    let ai_provider = create_provider(&app_config.provider_config())
        .context("Failed to configure the AI provider")?;

    println!(
        "🔎 Extracting {} file(s) with {} model '{}'...",
        args.files.len(),
        app_config.provider,
        app_config.model
    );
    let summary = process_files(ai_provider.as_ref(), &args.files, &settings).await;

    if summary.is_success() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} of {} file(s) failed",
            summary.failed.len(),
            args.files.len()
        ))
    }
}

fn handle_schema(args: SchemaArgs) -> Result<()> {
    let schema = args.engine.schema();
    let output = if args.gemini {
        serde_json::to_string_pretty(&schema.to_gemini_declaration())?
    } else {
        serde_json::to_string_pretty(&schema)?
    };
    println!("{output}");
    Ok(())
}

// --- Batch Processing ---

/// Processes `files` one after another. A failing file is reported and
/// skipped; with `fail_fast` the remaining files are not attempted. Inputs
/// that would share an output name get a numbered suffix.
pub async fn process_files(
    ai_provider: &dyn AiProvider,
    files: &[PathBuf],
    settings: &ExtractSettings,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut used_stems = HashSet::new();

    for (index, file) in files.iter().enumerate() {
        match process_file(ai_provider, file, settings, &mut used_stems).await {
            Ok(written) => {
                println!("✅ {} → {} file(s)", file.display(), written.len());
                summary.succeeded += 1;
                summary.written.extend(written);
            }
            Err(e) => {
                error!("Failed to process '{}': {:?}", file.display(), e);
                eprintln!("❌ {}: {}", file.display(), e);
                summary.failed.push(FileFailure {
                    file: file.clone(),
                    message: e.to_string(),
                });
                if settings.fail_fast {
                    summary.skipped = files.len() - index - 1;
                    break;
                }
            }
        }
    }

    let mut line = format!(
        "Done: {} succeeded, {} failed",
        summary.succeeded,
        summary.failed.len()
    );
    if summary.skipped > 0 {
        line.push_str(&format!(", {} skipped", summary.skipped));
    }
    println!("{line}.");

    summary
}

/// Runs the whole pipeline for one PDF and returns the files written.
///
/// The output stem is claimed in `used_stems` so no later file in the same
/// batch overwrites these outputs.
#[instrument(skip(ai_provider, settings, used_stems), fields(path = %path.display()))]
pub async fn process_file(
    ai_provider: &dyn AiProvider,
    path: &Path,
    settings: &ExtractSettings,
    used_stems: &mut HashSet<String>,
) -> Result<Vec<PathBuf>, FileError> {
    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let text = extract_text_from_path(path)?;
    let engine = settings.engine.resolve(&source_name);
    info!("Processing '{}' as {}.", source_name, engine);

    let extracted =
        call_extraction(ai_provider, &text, &source_name, engine, &settings.options).await?;
    let flattened = flatten_bulletin(&extracted, settings.metadata_style);

    let base_stem = output_stem(&source_name, engine);
    let stem = unique_stem(&base_stem, used_stems);
    if stem != base_stem {
        warn!(
            "'{}' already produced output in this run. Writing '{}' instead.",
            base_stem, stem
        );
    }
    used_stems.insert(stem.clone());

    Ok(export_as(
        &extracted,
        &flattened,
        &settings.out_dir,
        &stem,
        &settings.formats,
    )?)
}
