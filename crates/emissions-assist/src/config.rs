//! Assistant configuration
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::AssistError;
use crate::rulebook::Rulebook;

/// Default pause before the assistant's reply appears
const DEFAULT_REPLY_DELAY_MS: u64 = 1000;

fn default_reply_delay_ms() -> u64 {
    DEFAULT_REPLY_DELAY_MS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Simulated processing time before a reply is shown
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    /// Rulebook to use instead of the built-in one
    #[serde(default)]
    pub rules_path: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            rules_path: None,
        }
    }
}

impl AssistantConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, AssistError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssistError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Rulebook named by `rules_path`, or the built-in one
    pub fn rulebook(&self) -> Result<Arc<Rulebook>, AssistError> {
        match &self.rules_path {
            Some(path) => Ok(Arc::new(Rulebook::load(path)?)),
            None => Ok(Rulebook::builtin()),
        }
    }
}
