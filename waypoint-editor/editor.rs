//! A single editor window: the document table, focus, and the surfaces the
//! navigation commands act on.
//!
//! This is intentionally small. Text, rendering, and input dispatch live in
//! the host; what the navigation layer needs is who owns the documents, which
//! one has focus, and a way to apply a jump result.

use std::collections::BTreeMap;

use thiserror::Error;
use waypoint_lib::{
  config::HistoryConfig,
  document::{
    DocumentId,
    Documents,
  },
  messages::MessageCenter,
  selection::Selection,
  store::ContextId,
};

use crate::view::ViewState;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
  #[error("document {0:?} is not open")]
  UnknownDocument(DocumentId),
}

#[derive(Debug)]
pub struct Editor {
  context:   ContextId,
  documents: Documents,
  views:     BTreeMap<DocumentId, ViewState>,
  focused:   Option<DocumentId>,
  messages:  MessageCenter,
}

impl Editor {
  pub fn new(context: ContextId) -> Self {
    Self {
      context,
      documents: Documents::default(),
      views: BTreeMap::new(),
      focused: None,
      messages: MessageCenter::default(),
    }
  }

  pub fn with_config(context: ContextId, config: &HistoryConfig) -> Self {
    Self {
      messages: MessageCenter::with_limit(config.message_history()),
      ..Self::new(context)
    }
  }

  pub fn context(&self) -> ContextId {
    self.context
  }

  pub fn documents(&self) -> &Documents {
    &self.documents
  }

  pub fn documents_mut(&mut self) -> &mut Documents {
    &mut self.documents
  }

  pub fn messages(&self) -> &MessageCenter {
    &self.messages
  }

  pub fn messages_mut(&mut self) -> &mut MessageCenter {
    &mut self.messages
  }

  pub fn focused(&self) -> Option<DocumentId> {
    self.focused
  }

  pub fn view(&self, doc: DocumentId) -> Option<&ViewState> {
    self.views.get(&doc)
  }

  /// Open a regular document. The first one opened takes focus.
  pub fn open_document(&mut self, name: impl Into<String>) -> DocumentId {
    let id = self.documents.open(name);
    self.views.insert(id, ViewState::default());
    if self.focused.is_none() {
      self.focused = Some(id);
    }
    id
  }

  /// Open a widget-style panel. Widgets can take focus but never enter the
  /// navigation history.
  pub fn open_widget(&mut self, name: impl Into<String>) -> DocumentId {
    let id = self.documents.open_transient(name);
    self.views.insert(id, ViewState::default());
    id
  }

  pub fn focus(&mut self, doc: DocumentId) -> Result<()> {
    if !self.documents.contains(doc) {
      return Err(EditorError::UnknownDocument(doc));
    }
    self.focused = Some(doc);
    Ok(())
  }

  pub fn set_selection(&mut self, doc: DocumentId, selection: Selection) -> Result<()> {
    let document = self
      .documents
      .get_mut(doc)
      .ok_or(EditorError::UnknownDocument(doc))?;
    document.set_selection(selection);
    Ok(())
  }

  /// Apply a jump result: focus the target document, replace its live
  /// selection, and scroll the first range into view.
  pub fn apply_jump(&mut self, doc: DocumentId, selection: Selection) -> Result<()> {
    self.focus(doc)?;
    if let Some(primary) = selection.primary()
      && let Some(view) = self.views.get_mut(&doc)
    {
      view.reveal(primary);
    }
    self.set_selection(doc, selection)
  }

  /// First half of closing a document: mark it so late move and deactivation
  /// events are ignored. The navigation history's `remove_view` runs between
  /// the two halves.
  pub fn begin_close_document(&mut self, doc: DocumentId) -> Result<()> {
    let document = self
      .documents
      .get_mut(doc)
      .ok_or(EditorError::UnknownDocument(doc))?;
    document.begin_close();
    Ok(())
  }

  /// Second half of closing: drop the document and its view state. Focus
  /// falls to any remaining document.
  pub fn finish_close_document(&mut self, doc: DocumentId) -> Result<()> {
    self
      .documents
      .close(doc)
      .ok_or(EditorError::UnknownDocument(doc))?;
    self.views.remove(&doc);
    if self.focused == Some(doc) {
      self.focused = self.documents.ids().next();
    }
    Ok(())
  }
}
