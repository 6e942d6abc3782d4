//! Documents as the history engine sees them: a stable identity, a live
//! selection, and keyed region-set storage.
//!
//! The engine never owns a document. It records [`DocumentId`]s and resolves
//! them through [`Documents`], the host-owned table, checking existence on
//! every access. A snapshot taken against a document that has since closed
//! resolves to nothing until `remove_view` prunes it.
//!
//! Region sets are stored verbatim. A full editor host rebases stored offsets
//! as the text is edited; this host has no text buffer, so stored selections
//! go stale when content changes.

use std::{
  borrow::Cow,
  collections::BTreeMap,
  num::NonZeroUsize,
};

use crate::selection::Selection;

/// Stable identity of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(NonZeroUsize);

impl DocumentId {
  pub const fn new(id: NonZeroUsize) -> Self {
    Self(id)
  }

  pub const fn get(self) -> NonZeroUsize {
    self.0
  }
}

impl From<NonZeroUsize> for DocumentId {
  fn from(value: NonZeroUsize) -> Self {
    Self::new(value)
  }
}

/// Key into a document's named region storage.
///
/// Keys are handed out by the history engine from a 64-bit counter that never
/// wraps, so a key is never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionKey(u64);

impl RegionKey {
  pub const fn new(key: u64) -> Self {
    Self(key)
  }

  pub const fn get(self) -> u64 {
    self.0
  }
}

#[derive(Debug)]
pub struct Document {
  id:           DocumentId,
  display_name: String,
  selection:    Selection,
  regions:      BTreeMap<RegionKey, Selection>,
  transient:    bool,
  closing:      bool,
}

impl Document {
  pub fn new(id: DocumentId) -> Self {
    Self {
      id,
      display_name: String::new(),
      selection: Selection::point(0),
      regions: BTreeMap::new(),
      transient: false,
      closing: false,
    }
  }

  /// A transient document backs a widget-style panel (prompt, picker) that
  /// never participates in navigation history.
  pub fn new_transient(id: DocumentId) -> Self {
    Self {
      transient: true,
      ..Self::new(id)
    }
  }

  pub fn id(&self) -> DocumentId {
    self.id
  }

  pub fn display_name(&self) -> Cow<'_, str> {
    if self.display_name.is_empty() {
      Cow::Borrowed("<untitled>")
    } else {
      Cow::Borrowed(self.display_name.as_str())
    }
  }

  pub fn set_display_name(&mut self, name: impl Into<String>) {
    self.display_name = name.into();
  }

  pub fn current_selection(&self) -> &Selection {
    &self.selection
  }

  pub fn set_selection(&mut self, selection: Selection) {
    self.selection = selection;
  }

  pub fn transient(&self) -> bool {
    self.transient
  }

  /// Whether teardown has begun. Events that arrive for a closing document
  /// are dropped instead of recorded.
  pub fn is_closing(&self) -> bool {
    self.closing
  }

  pub fn begin_close(&mut self) {
    self.closing = true;
  }

  pub fn store_region_set(&mut self, key: RegionKey, selection: Selection) {
    self.regions.insert(key, selection);
  }

  /// The selection stored under `key`, or the empty selection when the key is
  /// unknown.
  pub fn region_set(&self, key: RegionKey) -> Selection {
    self.regions.get(&key).cloned().unwrap_or_default()
  }

  pub fn release_region_set(&mut self, key: RegionKey) {
    self.regions.remove(&key);
  }

  pub fn region_count(&self) -> usize {
    self.regions.len()
  }
}

/// The host-owned table of open documents.
#[derive(Debug)]
pub struct Documents {
  slots:   BTreeMap<DocumentId, Document>,
  next_id: NonZeroUsize,
}

impl Default for Documents {
  fn default() -> Self {
    Self {
      slots:   BTreeMap::new(),
      next_id: NonZeroUsize::MIN,
    }
  }
}

impl Documents {
  pub fn open(&mut self, name: impl Into<String>) -> DocumentId {
    let id = self.next_document_id();
    let mut document = Document::new(id);
    document.set_display_name(name);
    self.slots.insert(id, document);
    id
  }

  pub fn open_transient(&mut self, name: impl Into<String>) -> DocumentId {
    let id = self.next_document_id();
    let mut document = Document::new_transient(id);
    document.set_display_name(name);
    self.slots.insert(id, document);
    id
  }

  fn next_document_id(&mut self) -> DocumentId {
    let id = DocumentId::new(self.next_id);
    self.next_id = self.next_id.checked_add(1).unwrap_or(self.next_id);
    id
  }

  pub fn get(&self, id: DocumentId) -> Option<&Document> {
    self.slots.get(&id)
  }

  pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
    self.slots.get_mut(&id)
  }

  pub fn contains(&self, id: DocumentId) -> bool {
    self.slots.contains_key(&id)
  }

  /// Remove the document from the table, dropping its region storage.
  pub fn close(&mut self, id: DocumentId) -> Option<Document> {
    self.slots.remove(&id)
  }

  pub fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
    self.slots.keys().copied()
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }
}
