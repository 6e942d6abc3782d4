//! Editor events that feed the navigation history.
//!
//! The adapter decides *when* a movement is worth remembering: coarse
//! motions and focus changes push a snapshot, fine-grained caret movement
//! does not, and a jump's own side effects never do.

use waypoint_lib::{
  document::DocumentId,
  store::HistoryStore,
};

use crate::editor::Editor;

/// Coarse classification of a movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
  /// Viewport-sized motion (page up / page down).
  ByPages,
  /// Line- or character-sized caret motion; never recorded.
  ByLines,
  /// The caret was dropped somewhere with the mouse.
  DragSelect,
  /// Motion to the start of the document.
  ToStart,
  /// Motion to the end of the document.
  ToEnd,
  /// A definition-style jump to wherever a symbol lives.
  GotoDefinition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
  /// The caret moved within `document`.
  Moved {
    document: DocumentId,
    kind:     MoveKind,
  },
  /// `document` lost focus.
  Deactivated { document: DocumentId },
  /// `document` is about to close.
  PreClose { document: DocumentId },
}

/// Routes editor events into the window's navigation history.
#[derive(Debug, Default)]
pub struct HistoryUpdater;

impl HistoryUpdater {
  pub fn handle(&self, store: &HistoryStore, editor: &mut Editor, event: EditorEvent) {
    match event {
      EditorEvent::Moved { document, kind } => self.on_moved(store, editor, document, kind),
      EditorEvent::Deactivated { document } => self.on_deactivated(store, editor, document),
      EditorEvent::PreClose { document } => self.on_pre_close(store, editor, document),
    }
  }

  fn on_moved(&self, store: &HistoryStore, editor: &mut Editor, document: DocumentId, kind: MoveKind) {
    if is_widget(editor, document) {
      return;
    }
    let push = match kind {
      MoveKind::ByPages | MoveKind::ToStart | MoveKind::ToEnd | MoveKind::GotoDefinition => true,
      // A drag in a background document reaches us again as a deactivation
      // of the focused one; only the in-focus drag records here.
      MoveKind::DragSelect => editor.focused() == Some(document),
      MoveKind::ByLines => false,
    };
    if push {
      self.push(store, editor, document);
    }
  }

  fn on_deactivated(&self, store: &HistoryStore, editor: &mut Editor, document: DocumentId) {
    if store.is_jumping() {
      tracing::debug!("jump in progress, deactivation of {:?} not recorded", document);
      return;
    }
    if is_widget(editor, document) || is_closing(editor, document) {
      return;
    }
    self.push(store, editor, document);
  }

  fn on_pre_close(&self, store: &HistoryStore, editor: &mut Editor, document: DocumentId) {
    if is_widget(editor, document) {
      return;
    }
    let _ = editor.begin_close_document(document);
    let history = store.history(editor.context());
    history.lock().remove_view(document);
    // A jump that was tearing down this document can no longer clear its own
    // flag through the normal path.
    store.force_unlock();
  }

  fn push(&self, store: &HistoryStore, editor: &mut Editor, document: DocumentId) {
    let history = store.history(editor.context());
    history
      .lock()
      .push_selection(editor.documents_mut(), document);
  }
}

fn is_widget(editor: &Editor, document: DocumentId) -> bool {
  editor
    .documents()
    .get(document)
    .is_some_and(|doc| doc.transient())
}

fn is_closing(editor: &Editor, document: DocumentId) -> bool {
  editor
    .documents()
    .get(document)
    .is_none_or(|doc| doc.is_closing())
}

#[cfg(test)]
mod tests {
  use std::num::NonZeroUsize;

  use waypoint_lib::{
    selection::Selection,
    store::ContextId,
  };

  use super::*;

  fn fixtures() -> (HistoryStore, Editor, HistoryUpdater) {
    let store = HistoryStore::default();
    let editor = Editor::new(ContextId::new(NonZeroUsize::new(1).unwrap()));
    (store, editor, HistoryUpdater)
  }

  fn history_len(store: &HistoryStore, editor: &Editor) -> usize {
    store.history(editor.context()).lock().len()
  }

  #[test]
  fn coarse_moves_push_fine_moves_do_not() {
    let (store, mut editor, updater) = fixtures();
    let doc = editor.open_document("a.rs");

    editor.set_selection(doc, Selection::point(10)).unwrap();
    updater.handle(&store, &mut editor, EditorEvent::Moved {
      document: doc,
      kind:     MoveKind::ByPages,
    });
    assert_eq!(history_len(&store, &editor), 1);

    editor.set_selection(doc, Selection::point(11)).unwrap();
    updater.handle(&store, &mut editor, EditorEvent::Moved {
      document: doc,
      kind:     MoveKind::ByLines,
    });
    assert_eq!(history_len(&store, &editor), 1);

    editor.set_selection(doc, Selection::point(90)).unwrap();
    updater.handle(&store, &mut editor, EditorEvent::Moved {
      document: doc,
      kind:     MoveKind::GotoDefinition,
    });
    assert_eq!(history_len(&store, &editor), 2);
  }

  #[test]
  fn drag_select_pushes_only_in_the_focused_document() {
    let (store, mut editor, updater) = fixtures();
    let a = editor.open_document("a.rs");
    let b = editor.open_document("b.rs");
    assert_eq!(editor.focused(), Some(a));

    editor.set_selection(b, Selection::point(5)).unwrap();
    updater.handle(&store, &mut editor, EditorEvent::Moved {
      document: b,
      kind:     MoveKind::DragSelect,
    });
    assert_eq!(history_len(&store, &editor), 0);

    editor.set_selection(a, Selection::point(5)).unwrap();
    updater.handle(&store, &mut editor, EditorEvent::Moved {
      document: a,
      kind:     MoveKind::DragSelect,
    });
    assert_eq!(history_len(&store, &editor), 1);
  }

  #[test]
  fn deactivation_pushes_unless_a_jump_is_running() {
    let (store, mut editor, updater) = fixtures();
    let doc = editor.open_document("a.rs");
    editor.set_selection(doc, Selection::point(10)).unwrap();

    {
      let _guard = store.begin_jump();
      updater.handle(&store, &mut editor, EditorEvent::Deactivated { document: doc });
      assert_eq!(history_len(&store, &editor), 0);
    }

    updater.handle(&store, &mut editor, EditorEvent::Deactivated { document: doc });
    assert_eq!(history_len(&store, &editor), 1);
  }

  #[test]
  fn widgets_never_enter_history() {
    let (store, mut editor, updater) = fixtures();
    let _file = editor.open_document("a.rs");
    let widget = editor.open_widget("prompt");
    editor.focus(widget).unwrap();
    editor.set_selection(widget, Selection::point(3)).unwrap();

    updater.handle(&store, &mut editor, EditorEvent::Moved {
      document: widget,
      kind:     MoveKind::ByPages,
    });
    updater.handle(&store, &mut editor, EditorEvent::Deactivated { document: widget });
    assert_eq!(history_len(&store, &editor), 0);
  }

  #[test]
  fn closing_documents_stop_recording_deactivations() {
    let (store, mut editor, updater) = fixtures();
    let doc = editor.open_document("a.rs");
    editor.set_selection(doc, Selection::point(10)).unwrap();
    editor.begin_close_document(doc).unwrap();

    updater.handle(&store, &mut editor, EditorEvent::Deactivated { document: doc });
    assert_eq!(history_len(&store, &editor), 0);
  }

  #[test]
  fn pre_close_scrubs_the_document_and_unsticks_the_flag() {
    let (store, mut editor, updater) = fixtures();
    let a = editor.open_document("a.rs");
    let b = editor.open_document("b.rs");

    editor.set_selection(a, Selection::point(1)).unwrap();
    updater.handle(&store, &mut editor, EditorEvent::Moved {
      document: a,
      kind:     MoveKind::ByPages,
    });
    editor.set_selection(b, Selection::point(2)).unwrap();
    updater.handle(&store, &mut editor, EditorEvent::Moved {
      document: b,
      kind:     MoveKind::ByPages,
    });
    assert_eq!(history_len(&store, &editor), 2);

    let guard = store.begin_jump();
    std::mem::forget(guard);

    updater.handle(&store, &mut editor, EditorEvent::PreClose { document: b });
    editor.finish_close_document(b).unwrap();

    assert!(!store.is_jumping());
    assert!(editor.documents().get(b).is_none());
    let history = store.history(editor.context());
    assert!(
      history
        .lock()
        .entries()
        .all(|snapshot| snapshot.document != b)
    );
  }
}
