//! Transient status messages surfaced by the navigation commands.

use std::collections::VecDeque;

use serde::{
  Deserialize,
  Serialize,
};

pub const DEFAULT_MESSAGE_HISTORY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
  Info,
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub id:     u64,
  pub level:  MessageLevel,
  pub source: Option<String>,
  pub text:   String,
}

/// Holds the one currently displayed message plus a bounded backlog.
///
/// Messages are non-blocking by design: publishing replaces the active slot,
/// dismissal blanks it, and nothing ever waits on the user.
#[derive(Debug, Clone)]
pub struct MessageCenter {
  active:          Option<Message>,
  history:         VecDeque<Message>,
  next_message_id: u64,
  history_limit:   usize,
}

impl Default for MessageCenter {
  fn default() -> Self {
    Self::with_limit(DEFAULT_MESSAGE_HISTORY)
  }
}

impl MessageCenter {
  pub fn with_limit(history_limit: usize) -> Self {
    Self {
      active:          None,
      history:         VecDeque::new(),
      next_message_id: 1,
      history_limit:   history_limit.max(1),
    }
  }

  pub fn active(&self) -> Option<&Message> {
    self.active.as_ref()
  }

  pub fn history_len(&self) -> usize {
    self.history.len()
  }

  pub fn history(&self) -> impl Iterator<Item = &Message> {
    self.history.iter()
  }

  pub fn publish(
    &mut self,
    level: MessageLevel,
    source: Option<String>,
    text: impl Into<String>,
  ) -> Message {
    let message = Message {
      id: self.next_message_id,
      level,
      source,
      text: text.into(),
    };
    self.next_message_id = self.next_message_id.saturating_add(1);

    self.active = Some(message.clone());
    self.history.push_back(message.clone());
    while self.history.len() > self.history_limit {
      self.history.pop_front();
    }
    message
  }

  pub fn info(&mut self, source: Option<String>, text: impl Into<String>) -> Message {
    self.publish(MessageLevel::Info, source, text)
  }

  pub fn warning(&mut self, source: Option<String>, text: impl Into<String>) -> Message {
    self.publish(MessageLevel::Warning, source, text)
  }

  pub fn error(&mut self, source: Option<String>, text: impl Into<String>) -> Message {
    self.publish(MessageLevel::Error, source, text)
  }

  /// Blank the status line without touching the backlog.
  pub fn dismiss_active(&mut self) -> Option<Message> {
    self.active.take()
  }

  pub fn clear(&mut self) {
    self.active = None;
    self.history.clear();
  }
}
