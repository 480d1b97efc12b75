pub mod gemini;
pub mod openai;

use crate::{errors::PromptError, schemas::FunctionSchema};
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// Providers force the model to answer by calling exactly one function and
/// hand back that call's arguments, so the caller always receives data shaped
/// by the supplied schema (or an error).
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends the prompts with `function` as the only callable tool and returns
    /// the parsed arguments of the resulting call.
    async fn call_function(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        function: &FunctionSchema,
    ) -> Result<Value, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
