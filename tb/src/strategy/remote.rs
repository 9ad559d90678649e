//! Remote-model breakdown strategy
//!
//! Builds a natural-language prompt from the task descriptor, asks a
//! chat-completion model for a JSON step list, and validates the reply
//! into a [`Breakdown`]. Transport-level retries live in the client;
//! content-validation failures here are terminal for the call, and a
//! partial breakdown is never returned.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{BreakdownStrategy, StrategyError};
use crate::config::ResolvedLlmConfig;
use crate::domain::{Breakdown, Step, TaskDescriptor};
use crate::llm::{CompletionRequest, LlmClient, Message, OpenAiClient};

const SYSTEM_PROMPT: &str = "You are a senior software engineer who breaks development tasks into \
     small, ordered, actionable steps. Each step names the files it is likely to touch. \
     You respond with JSON only.";

/// Breakdown strategy backed by a remote completion service
pub struct RemoteModelStrategy {
    llm: Arc<dyn LlmClient>,
    max_tokens: u32,
}

impl std::fmt::Debug for RemoteModelStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteModelStrategy")
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl RemoteModelStrategy {
    /// Create the strategy from resolved configuration.
    ///
    /// Fails with a configuration error when the credential is missing;
    /// this strategy cannot be used without one.
    pub fn from_config(config: &ResolvedLlmConfig) -> Result<Self, StrategyError> {
        if config.api_key.trim().is_empty() {
            return Err(StrategyError::Configuration(
                "the remote strategy requires an API key".to_string(),
            ));
        }

        let client = OpenAiClient::from_config(config)?;
        Ok(Self {
            llm: Arc::new(client),
            max_tokens: config.max_tokens,
        })
    }

    /// Wrap an existing client (tests inject a mock through this).
    pub fn with_client(llm: Arc<dyn LlmClient>, max_tokens: u32) -> Self {
        Self { llm, max_tokens }
    }

    /// User section of the prompt: the task, plus the reply contract.
    fn build_user_prompt(task: &TaskDescriptor) -> String {
        let scope = if task.scope.is_empty() {
            "(not specified)"
        } else {
            &task.scope
        };

        format!(
            "Break down this development task into steps.\n\n\
             Task: {}\n\
             Category: {}\n\
             Scope: {}\n\n\
             Return a JSON object with a \"steps\" array. Each step must have:\n\
             - \"id\": integer position, starting at 1\n\
             - \"title\": short imperative title\n\
             - \"description\": one or two sentences explaining the step\n\
             - \"files\": array of file paths the step is likely to touch (may be empty)\n\n\
             Produce between 3 and 7 steps. Order them so prerequisite artifacts \
             (for example data models) come before the things that depend on them \
             (controllers, routes, tests).",
            task.description, task.category, scope
        )
    }

    /// Validate and coerce the model's JSON reply into a breakdown.
    ///
    /// Steps are renumbered by position so the id invariant holds even
    /// when the model numbers them oddly; a step without a numeric id is
    /// still rejected. Non-string entries in `files` are dropped.
    fn parse_breakdown(task: &TaskDescriptor, content: &str) -> Result<Breakdown, StrategyError> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| StrategyError::ResponseShape(format!("reply is not valid JSON: {}", e)))?;

        let raw_steps = value
            .get("steps")
            .and_then(|steps| steps.as_array())
            .ok_or_else(|| StrategyError::ResponseShape("reply has no \"steps\" array".to_string()))?;

        if raw_steps.is_empty() {
            return Err(StrategyError::EmptyResult);
        }

        let mut steps = Vec::with_capacity(raw_steps.len());
        for (idx, raw) in raw_steps.iter().enumerate() {
            let position = idx + 1;

            if !raw.get("id").map(serde_json::Value::is_number).unwrap_or(false) {
                return Err(StrategyError::ResponseShape(format!(
                    "step {position} has no numeric \"id\""
                )));
            }

            let title = non_empty_string(raw.get("title")).ok_or_else(|| {
                StrategyError::ResponseShape(format!("step {position} has an empty \"title\""))
            })?;

            let description = non_empty_string(raw.get("description")).ok_or_else(|| {
                StrategyError::ResponseShape(format!("step {position} has an empty \"description\""))
            })?;

            let files = raw
                .get("files")
                .and_then(|files| files.as_array())
                .ok_or_else(|| StrategyError::ResponseShape(format!("step {position} has no \"files\" array")))?
                .iter()
                .filter_map(|file| file.as_str().map(str::to_string))
                .collect();

            steps.push(Step {
                id: position as u32,
                title,
                description,
                files,
            });
        }

        Ok(Breakdown::new(task.description.clone(), steps))
    }
}

fn non_empty_string(value: Option<&serde_json::Value>) -> Option<String> {
    value
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl BreakdownStrategy for RemoteModelStrategy {
    async fn analyze(&self, task: &TaskDescriptor) -> Result<Breakdown, StrategyError> {
        debug!(category = %task.category, "analyze: called");
        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            messages: vec![Message::user(Self::build_user_prompt(task))],
            max_tokens: self.max_tokens,
        };

        let response = self.llm.complete(request).await?;
        let content = response
            .content
            .ok_or_else(|| StrategyError::ResponseShape("empty response from model".to_string()))?;

        let breakdown = Self::parse_breakdown(task, &content)?;
        info!(steps = breakdown.steps.len(), "analyze: breakdown validated");
        Ok(breakdown)
    }

    fn name(&self) -> &'static str {
        "remote-model"
    }
}
