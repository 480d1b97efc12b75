//! # bulletin: Service-Bulletin Extraction Core
//!
//! This crate holds everything between "raw PDF text" and "tables ready to be
//! written": the function-calling schemas for each engine family, the AI
//! providers that run the forced function call, and the flattening of the
//! returned JSON into metadata and parts tables.
//!
//! Reading PDFs lives in `bulletin-pdf`; writing workbooks lives in
//! `bulletin-sheets`.

pub mod engine;
pub mod errors;
pub mod extract;
pub mod flatten;
pub mod prompts;
pub mod providers;
pub mod schemas;
pub mod types;

pub use engine::{EngineSelection, EngineType};
pub use errors::{ExtractError, PromptError};
pub use extract::{call_extraction, ExtractionOptions};
pub use flatten::{flatten_bulletin, Cell, FlattenedBulletin, MetadataStyle, Table};
pub use schemas::FunctionSchema;
pub use types::{ExtractedBulletin, ProviderConfig};
