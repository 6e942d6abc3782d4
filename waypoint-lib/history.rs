//! Navigation history: the jump-back / jump-forward state machine.

use std::collections::VecDeque;

use crate::{
  document::{
    DocumentId,
    Documents,
    RegionKey,
  },
  selection::Selection,
};

/// Default number of snapshots a history retains.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// One historical navigation point: which document the user was in, and the
/// key its selection was stored under in that document's region storage.
///
/// The selection itself lives with the document so that a host capable of
/// rebasing regions across edits keeps the recorded offsets valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
  pub document: DocumentId,
  pub key:      RegionKey,
}

/// Result of a jump request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpOutcome {
  /// The requested direction is exhausted; nothing changed.
  NoHistory,
  /// Focus `document`, replace its live selection with `selection`, and
  /// scroll it into view.
  Jumped {
    document:  DocumentId,
    selection: Selection,
  },
}

impl JumpOutcome {
  #[inline]
  pub fn is_jump(&self) -> bool {
    matches!(self, Self::Jumped { .. })
  }
}

/// Ordered history of selection snapshots for one window.
///
/// `entries[0]` is the most recent position, with older positions behind it.
/// The cursor marks the entry currently being viewed after a jump; `None` is
/// the live, uncaptured present (the user has not jumped, or has navigated
/// all the way forward again).
///
/// Behavior, in the order the operations compose:
///  * Pushing while the cursor sits in the past first discards every entry
///    newer than the cursor (the abandoned "future" of the old branch), then
///    records at the front.
///  * A push identical to the newest entry of the same document is dropped,
///    so repeated trivial motion does not pile up.
///  * The history is bounded; the oldest entries past the limit are evicted
///    and their region storage released.
///
/// Entries hold non-owning [`DocumentId`]s. A document can close while
/// snapshots still reference it; those snapshots resolve to the empty
/// selection until [`remove_view`](Self::remove_view) prunes them.
#[derive(Debug)]
pub struct NavigationHistory {
  entries:     VecDeque<Snapshot>,
  cursor:      Option<usize>,
  key_counter: u64,
  limit:       usize,
}

impl Default for NavigationHistory {
  fn default() -> Self {
    Self::with_limit(DEFAULT_HISTORY_LIMIT)
  }
}

impl NavigationHistory {
  pub fn with_limit(limit: usize) -> Self {
    Self {
      entries:     VecDeque::new(),
      cursor:      None,
      key_counter: 0,
      limit:       limit.max(1),
    }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Index of the entry currently being viewed; `None` at the live position.
  #[inline]
  pub fn cursor(&self) -> Option<usize> {
    self.cursor
  }

  #[inline]
  pub fn limit(&self) -> usize {
    self.limit
  }

  pub fn entries(&self) -> impl Iterator<Item = &Snapshot> {
    self.entries.iter()
  }

  /// Record the document's live selection as the newest entry.
  ///
  /// No-op when the document is gone or its live selection is empty.
  pub fn push_selection(&mut self, docs: &mut Documents, doc: DocumentId) {
    let Some(document) = docs.get(doc) else {
      return;
    };
    let selection = document.current_selection().clone();
    if selection.is_empty() {
      return;
    }

    // A jump left the cursor in the past and the user moved again: drop the
    // abandoned future before recording the new branch.
    if self.cursor.is_some() {
      self.clear_before_cursor(docs);
    }

    if let Some(first) = self.entries.front()
      && first.document == doc
    {
      let stored = docs
        .get(doc)
        .map(|document| document.region_set(first.key))
        .unwrap_or_default();
      if stored == selection {
        return;
      }
    }

    let key = self.generate_key();
    if let Some(document) = docs.get_mut(doc) {
      document.store_region_set(key, selection);
    }
    self.entries.push_front(Snapshot { document: doc, key });
    tracing::trace!(
      "recorded snapshot {:?} for {:?}, {} entries",
      key,
      doc,
      self.entries.len()
    );
    self.trim(docs);
    self.assert_cursor_in_bounds();
  }

  /// Step one entry into the past.
  ///
  /// From the live position this first records the active document's current
  /// selection, so the spot being left stays reachable by a later
  /// jump-forward. The push may be dropped (empty or duplicate selection);
  /// the cursor still lands on the newest entry, which from here on stands
  /// for the position being left.
  pub fn jump_back(&mut self, docs: &mut Documents, active: DocumentId) -> JumpOutcome {
    let cursor = match self.cursor {
      Some(cursor) => cursor,
      None => {
        self.push_selection(docs, active);
        if self.entries.is_empty() {
          // Nothing was ever recorded; keep the cursor at the live position.
          return JumpOutcome::NoHistory;
        }
        self.cursor = Some(0);
        0
      },
    };

    if cursor == self.entries.len() - 1 {
      // Already viewing the oldest entry.
      return JumpOutcome::NoHistory;
    }

    let cursor = cursor + 1;
    self.cursor = Some(cursor);
    self.assert_cursor_in_bounds();
    self.resolve(docs, self.entries[cursor])
  }

  /// Step one entry back toward the present.
  pub fn jump_forward(&mut self, docs: &mut Documents) -> JumpOutcome {
    match self.cursor {
      // No jump has happened, or we are already viewing the newest entry.
      None | Some(0) => JumpOutcome::NoHistory,
      Some(cursor) => {
        let cursor = cursor - 1;
        self.cursor = Some(cursor);
        self.assert_cursor_in_bounds();
        self.resolve(docs, self.entries[cursor])
      },
    }
  }

  /// Drop every snapshot referencing `doc`, called as the document closes.
  ///
  /// The scan runs back to front so the cursor can shift in step with the
  /// indices it points into: a removal at or before the cursor pulls it one
  /// slot toward the present, and removing the entry under a cursor already
  /// at the front leaves the history at the live position.
  ///
  /// Region storage is not touched; the closing document owns it and takes
  /// it down wholesale.
  pub fn remove_view(&mut self, doc: DocumentId) {
    let mut index = self.entries.len();
    while index > 0 {
      index -= 1;
      if self.entries[index].document != doc {
        continue;
      }
      self.entries.remove(index);
      if let Some(cursor) = self.cursor
        && cursor >= index
      {
        self.cursor = cursor.checked_sub(1);
      }
    }
    self.assert_cursor_in_bounds();
  }

  /// Evict entries past the capacity limit, oldest first, releasing their
  /// region storage on documents that still exist.
  fn trim(&mut self, docs: &mut Documents) {
    while self.entries.len() > self.limit {
      let Some(evicted) = self.entries.pop_back() else {
        break;
      };
      tracing::trace!("evicted snapshot {:?} of {:?}", evicted.key, evicted.document);
      release(docs, evicted);
    }
  }

  /// Discard the abandoned future: every entry newer than the cursor. The
  /// cursor returns to the live position.
  fn clear_before_cursor(&mut self, docs: &mut Documents) {
    let Some(cursor) = self.cursor.take() else {
      return;
    };
    for _ in 0..cursor {
      let Some(dropped) = self.entries.pop_front() else {
        break;
      };
      release(docs, dropped);
    }
  }

  fn generate_key(&mut self) -> RegionKey {
    // Never wraps, so a key is never reused no matter how much branch
    // discarding has churned the history.
    self.key_counter += 1;
    RegionKey::new(self.key_counter)
  }

  fn resolve(&self, docs: &Documents, snapshot: Snapshot) -> JumpOutcome {
    let selection = match docs.get(snapshot.document) {
      Some(document) => document.region_set(snapshot.key),
      None => {
        tracing::warn!("jump target {:?} no longer exists", snapshot.document);
        Selection::empty()
      },
    };
    JumpOutcome::Jumped {
      document: snapshot.document,
      selection,
    }
  }

  fn assert_cursor_in_bounds(&self) {
    debug_assert!(
      self.cursor.is_none_or(|cursor| cursor < self.entries.len()),
      "history cursor out of bounds"
    );
  }
}

fn release(docs: &mut Documents, snapshot: Snapshot) {
  if let Some(document) = docs.get_mut(snapshot.document) {
    document.release_region_set(snapshot.key);
  }
}
