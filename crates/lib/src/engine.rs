//! Engine-family selection. The family decides which schema is sent to the
//! LLM and how the answer is flattened.

use crate::errors::ExtractError;
use crate::schemas::{cfm_schema, leap_schema, FunctionSchema};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Cfm,
    Leap,
}

impl EngineType {
    /// Guesses the family from a file name: anything mentioning `cfm` is CFM,
    /// everything else is treated as LEAP.
    pub fn from_filename(name: &str) -> Self {
        if name.to_lowercase().contains("cfm") {
            EngineType::Cfm
        } else {
            EngineType::Leap
        }
    }

    pub fn schema(&self) -> FunctionSchema {
        match self {
            EngineType::Cfm => cfm_schema(),
            EngineType::Leap => leap_schema(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineType::Cfm => "CFM",
            EngineType::Leap => "LEAP",
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineType {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cfm" => Ok(EngineType::Cfm),
            "leap" => Ok(EngineType::Leap),
            other => Err(ExtractError::UnknownEngine(other.to_string())),
        }
    }
}

/// How the engine family is chosen for each input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineSelection {
    #[default]
    Auto,
    Fixed(EngineType),
}

impl EngineSelection {
    pub fn resolve(&self, file_name: &str) -> EngineType {
        match self {
            EngineSelection::Auto => EngineType::from_filename(file_name),
            EngineSelection::Fixed(engine) => *engine,
        }
    }
}

impl FromStr for EngineSelection {
    type Err = ExtractError;

    /// Accepts `auto` or any engine name understood by `EngineType`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(EngineSelection::Auto);
        }
        s.parse().map(EngineSelection::Fixed)
    }
}
