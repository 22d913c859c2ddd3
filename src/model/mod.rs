//! Model collaborators
//!
//! A [`ModelClient`] takes a prompt and returns raw text. The orchestrator
//! knows nothing about transports; it only distinguishes error kinds:
//!
//! - transient (`Timeout`, `RateLimited`): the client is expected to retry
//!   these itself (see [`Retrying`]) and only surface them once exhausted
//! - terminal (`Authentication`, `QuotaExceeded`): never worth retrying
//!
//! Whatever reaches the orchestrator ends the game.

mod baseline;
mod interactive;
mod retry;
mod scripted;

pub use baseline::{BaselineModel, ResponseStyle};
pub use interactive::StdinModel;
pub use retry::Retrying;
pub use scripted::ScriptedModel;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Model request timed out: {0}")]
    Timeout(String),

    #[error("Model rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Model authentication failed: {0}")]
    Authentication(String),

    #[error("Model quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("Model request failed: {0}")]
    Other(String),
}

impl ModelError {
    /// Worth retrying after a delay
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::RateLimited(_))
    }

    /// Retrying can never help
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Authentication(_) | Self::QuotaExceeded(_))
    }
}

/// Usage metrics for one model call
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub reasoning_tokens: u32,
    pub total_tokens: u32,
    pub cost_usd: f64,
    pub latency_ms: u64,
}

/// A text-generating model
pub trait ModelClient {
    /// Generate a response for `prompt`
    ///
    /// # Errors
    ///
    /// Returns `ModelError` when no response could be produced.
    fn generate(&mut self, prompt: &str) -> Result<String, ModelError>;

    /// Identifier recorded in game metadata
    fn model_name(&self) -> &str;

    /// Usage of the most recent call, if the client tracks it
    fn usage(&self) -> Option<UsageStats> {
        None
    }
}

impl<M: ModelClient + ?Sized> ModelClient for Box<M> {
    fn generate(&mut self, prompt: &str) -> Result<String, ModelError> {
        (**self).generate(prompt)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn usage(&self) -> Option<UsageStats> {
        (**self).usage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classes() {
        assert!(ModelError::Timeout("30s".into()).is_transient());
        assert!(ModelError::RateLimited("429".into()).is_transient());
        assert!(ModelError::Authentication("bad key".into()).is_terminal());
        assert!(ModelError::QuotaExceeded("no credits".into()).is_terminal());

        let other = ModelError::Other("500".into());
        assert!(!other.is_transient());
        assert!(!other.is_terminal());
    }

    #[test]
    fn boxed_clients_delegate() {
        let mut model: Box<dyn ModelClient> =
            Box::new(ScriptedModel::new("scripted", ["CRANE"]));
        assert_eq!(model.model_name(), "scripted");
        assert_eq!(model.generate("prompt").unwrap(), "CRANE");
    }
}
