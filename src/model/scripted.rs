//! Replays a fixed sequence of responses

use super::{ModelClient, ModelError, UsageStats};
use std::collections::VecDeque;

/// A model that answers from a script
///
/// Each call pops the next scripted reply. Running past the end yields
/// `ModelError::Other`. Every prompt received is kept for inspection.
#[derive(Debug, Clone)]
pub struct ScriptedModel {
    name: String,
    replies: VecDeque<Result<String, ModelError>>,
    prompts: Vec<String>,
    usage: Option<UsageStats>,
}

impl ScriptedModel {
    /// Script of successful replies
    pub fn new<I, S>(name: impl Into<String>, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(name, replies.into_iter().map(|r| Ok(r.into())))
    }

    /// Script mixing replies and errors
    pub fn with_results<I>(name: impl Into<String>, replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, ModelError>>,
    {
        Self {
            name: name.into(),
            replies: replies.into_iter().collect(),
            prompts: Vec::new(),
            usage: None,
        }
    }

    /// Report these usage figures for every successful call
    #[must_use]
    pub const fn with_usage(mut self, usage: UsageStats) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Prompts received so far, in order
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Replies not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl ModelClient for ScriptedModel {
    fn generate(&mut self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.push(prompt.to_string());
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Other("script exhausted".into())))
    }

    fn model_name(&self) -> &str {
        &self.name
    }

    fn usage(&self) -> Option<UsageStats> {
        self.usage
    }
}
