//! Taskbreak - break development tasks into ordered, actionable steps
//!
//! Taskbreak takes a free-text description of a development task,
//! classifies it into a coarse category, and produces an ordered list of
//! steps (title, description, candidate file paths). Breakdowns come from
//! one of two interchangeable strategies: fixed per-category templates
//! (offline, deterministic) or a remote chat-completion model.
//!
//! # Pipeline
//!
//! raw text -> [`classifier`] -> [`domain::TaskDescriptor`] ->
//! [`orchestrator::Orchestrator`] -> selected [`strategy`] ->
//! [`domain::Breakdown`] -> [`format`]
//!
//! # Modules
//!
//! - [`classifier`] - keyword rules and scope extraction
//! - [`strategy`] - the breakdown contract plus both implementations
//! - [`llm`] - chat-completion client with retry and backoff
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod classifier;
pub mod cli;
pub mod config;
pub mod domain;
pub mod format;
pub mod llm;
pub mod orchestrator;
pub mod strategy;

// Re-export commonly used types
pub use classifier::classify;
pub use config::{Config, LlmConfig, ResolvedLlmConfig};
pub use domain::{Breakdown, Step, TaskCategory, TaskDescriptor};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAiClient};
pub use orchestrator::Orchestrator;
pub use strategy::{BreakdownStrategy, RemoteModelStrategy, StrategyError, TemplateStrategy};
