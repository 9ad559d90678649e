//! Breakdown strategies
//!
//! A strategy turns a classified task into an ordered step list. The
//! template strategy computes it locally and never suspends; the remote
//! strategy waits on a completion service. Callers hold a
//! `dyn BreakdownStrategy` and await the result either way, so the two
//! are interchangeable.

mod error;
mod remote;
mod template;

pub use error::StrategyError;
pub use remote::RemoteModelStrategy;
pub use template::TemplateStrategy;

use async_trait::async_trait;

use crate::domain::{Breakdown, TaskDescriptor};

/// Contract for producing a breakdown from a task descriptor
#[async_trait]
pub trait BreakdownStrategy: Send + Sync {
    /// Produce an ordered breakdown for the task.
    ///
    /// Implementations must not mutate the descriptor, and must either
    /// return at least one step or fail with a descriptive error - an
    /// empty step list is never returned silently.
    async fn analyze(&self, task: &TaskDescriptor) -> Result<Breakdown, StrategyError>;

    /// Short name for logging and display.
    fn name(&self) -> &'static str;
}
