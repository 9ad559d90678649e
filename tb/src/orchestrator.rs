//! Strategy selection seam
//!
//! The orchestrator holds exactly one strategy and forwards analysis to
//! it, so callers depend on the breakdown contract rather than on a
//! concrete strategy choice.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Breakdown, TaskDescriptor};
use crate::strategy::{BreakdownStrategy, StrategyError, TemplateStrategy};

/// Dispatches breakdown requests to the held strategy
pub struct Orchestrator {
    strategy: Arc<dyn BreakdownStrategy>,
}

impl Orchestrator {
    pub fn new(strategy: Arc<dyn BreakdownStrategy>) -> Self {
        Self { strategy }
    }

    /// Run the held strategy against a classified task.
    ///
    /// Errors pass through untranslated, and the completion mode is
    /// whatever the strategy uses - nothing is added here.
    pub async fn analyze(&self, task: &TaskDescriptor) -> Result<Breakdown, StrategyError> {
        debug!(strategy = self.strategy.name(), "analyze: dispatching");
        self.strategy.analyze(task).await
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(Arc::new(TemplateStrategy::new()))
    }
}
