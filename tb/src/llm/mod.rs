//! Chat-completion client for the remote breakdown strategy
//!
//! The client is stateless between calls; retries, backoff, and error
//! classification live here so strategies only see typed errors.

pub mod client;
mod error;
mod openai;
mod transport;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAiClient;
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
pub use types::{CompletionRequest, CompletionResponse, Message, Role};
