//! The two user-facing navigation commands: jump back and jump forward.

use waypoint_lib::{
  document::DocumentId,
  history::JumpOutcome,
  store::HistoryStore,
};

use crate::editor::{
  Editor,
  Result,
};

/// Source tag for status messages published here.
const MESSAGE_SOURCE: &str = "navigation";

/// Jump to the previous position in the window's history.
pub fn jump_back(store: &HistoryStore, editor: &mut Editor) -> Result<()> {
  let Some(active) = editor.focused() else {
    return Ok(());
  };
  if is_widget(editor, active) {
    return Ok(());
  }

  let history = store.history(editor.context());
  let outcome = history.lock().jump_back(editor.documents_mut(), active);
  apply(store, editor, outcome, "Already at the earliest position")
}

/// Return toward the position the last jump back departed from.
pub fn jump_forward(store: &HistoryStore, editor: &mut Editor) -> Result<()> {
  let Some(active) = editor.focused() else {
    return Ok(());
  };
  if is_widget(editor, active) {
    return Ok(());
  }

  let history = store.history(editor.context());
  let outcome = history.lock().jump_forward(editor.documents_mut());
  apply(store, editor, outcome, "Already at the newest position")
}

fn apply(
  store: &HistoryStore,
  editor: &mut Editor,
  outcome: JumpOutcome,
  exhausted: &str,
) -> Result<()> {
  match outcome {
    JumpOutcome::NoHistory => {
      editor
        .messages_mut()
        .info(Some(MESSAGE_SOURCE.into()), exhausted);
      Ok(())
    },
    JumpOutcome::Jumped {
      document,
      selection,
    } => {
      // Focus and selection changes below fire the same editor events that
      // normally record history; the guard keeps them out. It drops on the
      // error path too.
      let _guard = store.begin_jump();
      editor.apply_jump(document, selection)?;
      editor.messages_mut().dismiss_active();
      Ok(())
    },
  }
}

fn is_widget(editor: &Editor, document: DocumentId) -> bool {
  editor
    .documents()
    .get(document)
    .is_some_and(|doc| doc.transient())
}
