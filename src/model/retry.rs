//! Bounded retry for transient model errors

use super::{ModelClient, ModelError, UsageStats};
use std::time::Duration;

/// Wraps a client and retries timeouts and rate limits with exponential backoff
///
/// Terminal and generic errors pass straight through. After `max_retries`
/// retries the last transient error is returned.
pub struct Retrying<C> {
    inner: C,
    max_retries: u32,
    base_delay: Duration,
    sleep: fn(Duration),
}

impl<C: ModelClient> Retrying<C> {
    /// Retry up to `max_retries` times, waiting `base_delay`, then twice that, ...
    #[must_use]
    pub fn new(inner: C, max_retries: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            sleep: std::thread::sleep,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> C {
        self.inner
    }

    fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)))
    }
}

impl<C: ModelClient> ModelClient for Retrying<C> {
    fn generate(&mut self, prompt: &str) -> Result<String, ModelError> {
        let mut retry = 0;
        loop {
            match self.inner.generate(prompt) {
                Err(e) if e.is_transient() && retry < self.max_retries => {
                    retry += 1;
                    let delay = self.delay_for(retry);
                    log::warn!(
                        "{e} (retry {retry}/{} in {delay:?})",
                        self.max_retries
                    );
                    (self.sleep)(delay);
                }
                other => return other,
            }
        }
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn usage(&self) -> Option<UsageStats> {
        self.inner.usage()
    }
}
