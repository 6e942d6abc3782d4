//! Tunables for the navigation history, loadable from TOML.

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::{
  history::DEFAULT_HISTORY_LIMIT,
  messages::DEFAULT_MESSAGE_HISTORY,
};

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid history configuration: {0}")]
  Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HistoryConfig {
  limit:           usize,
  message_history: usize,
}

impl Default for HistoryConfig {
  fn default() -> Self {
    Self {
      limit:           DEFAULT_HISTORY_LIMIT,
      message_history: DEFAULT_MESSAGE_HISTORY,
    }
  }
}

impl HistoryConfig {
  pub fn new(limit: usize, message_history: usize) -> Self {
    Self {
      limit,
      message_history,
    }
  }

  pub fn from_toml(text: &str) -> Result<Self> {
    Ok(toml::from_str(text)?)
  }

  /// Snapshots retained per window. Floored at one: a zero-entry history
  /// could not even hold the position a jump leaves behind.
  pub fn limit(&self) -> usize {
    self.limit.max(1)
  }

  /// Status messages retained for the message history view.
  pub fn message_history(&self) -> usize {
    self.message_history.max(1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_the_documented_capacity() {
    let config = HistoryConfig::default();
    assert_eq!(config.limit(), 100);
    assert_eq!(config.message_history(), 256);
  }

  #[test]
  fn parses_partial_toml_over_defaults() {
    let config = HistoryConfig::from_toml("limit = 30\n").unwrap();
    assert_eq!(config.limit(), 30);
    assert_eq!(config.message_history(), 256);
  }

  #[test]
  fn rejects_unknown_fields() {
    assert!(HistoryConfig::from_toml("histroy-limit = 30\n").is_err());
  }

  #[test]
  fn zero_limit_is_floored() {
    let config = HistoryConfig::from_toml("limit = 0\nmessage-history = 0\n").unwrap();
    assert_eq!(config.limit(), 1);
    assert_eq!(config.message_history(), 1);
  }
}
