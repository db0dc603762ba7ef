//! Assistant configuration.

use std::time::Duration;

use crate::error::{AssistantError, Result};

/// Default limit for the categorization call.
pub const DEFAULT_CATEGORIZE_TIMEOUT: Duration = Duration::from_secs(30);

/// Behaviour of [`YogaAssistant::ask`](crate::YogaAssistant::ask).
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    /// How long categorization may take before falling back to `General`.
    pub categorize_timeout: Duration,
    /// Prefix answers with a `**Topic:** <category>` header.
    pub show_topic: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self { categorize_timeout: DEFAULT_CATEGORIZE_TIMEOUT, show_topic: true }
    }
}

impl AssistantConfig {
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }
}

/// Builder for [`AssistantConfig`].
#[derive(Debug, Clone, Default)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    pub fn categorize_timeout(mut self, timeout: Duration) -> Self {
        self.config.categorize_timeout = timeout;
        self
    }

    pub fn show_topic(mut self, show: bool) -> Self {
        self.config.show_topic = show;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Config`] if `categorize_timeout` is zero.
    pub fn build(self) -> Result<AssistantConfig> {
        if self.config.categorize_timeout.is_zero() {
            return Err(AssistantError::Config("categorize_timeout must be greater than zero".into()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AssistantConfig::builder().build().unwrap();
        assert_eq!(config.categorize_timeout, Duration::from_secs(30));
        assert!(config.show_topic);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = AssistantConfig::builder().categorize_timeout(Duration::ZERO).build();
        assert!(matches!(result, Err(AssistantError::Config(_))));
    }
}
