//! Process-scoped registry of per-window navigation histories.
//!
//! One [`HistoryStore`] is owned by the process and handed to both the event
//! adapter and the jump commands; there are no module globals. Each window
//! ([`ContextId`]) gets its own independently locked [`NavigationHistory`],
//! created lazily on first access. Cross-context operations never occur, so
//! per-context locking is the whole concurrency story.
//!
//! The store also carries the jump-in-progress flag. Applying a jump changes
//! focus and selection, which fires the same editor events that normally
//! record history; while the flag is raised those events are skipped so a
//! jump cannot pollute the history it is walking. The flag is only ever
//! raised through the RAII [`JumpGuard`], which clears it on every exit path.

use std::{
  num::NonZeroUsize,
  sync::{
    Arc,
    atomic::{
      AtomicBool,
      Ordering,
    },
  },
};

use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::{
  config::HistoryConfig,
  history::NavigationHistory,
};

/// Identity of one top-level editing context (a window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(NonZeroUsize);

impl ContextId {
  pub const fn new(id: NonZeroUsize) -> Self {
    Self(id)
  }

  pub const fn get(self) -> NonZeroUsize {
    self.0
  }
}

impl From<NonZeroUsize> for ContextId {
  fn from(value: NonZeroUsize) -> Self {
    Self::new(value)
  }
}

#[derive(Debug)]
pub struct HistoryStore {
  config:    HistoryConfig,
  histories: Mutex<HashMap<ContextId, Arc<Mutex<NavigationHistory>>>>,
  jumping:   AtomicBool,
}

impl Default for HistoryStore {
  fn default() -> Self {
    Self::new(HistoryConfig::default())
  }
}

impl HistoryStore {
  pub fn new(config: HistoryConfig) -> Self {
    Self {
      config,
      histories: Mutex::new(HashMap::new()),
      jumping: AtomicBool::new(false),
    }
  }

  pub fn config(&self) -> HistoryConfig {
    self.config
  }

  /// The window's history, created empty on first access. Never fails.
  pub fn history(&self, context: ContextId) -> Arc<Mutex<NavigationHistory>> {
    let mut histories = self.histories.lock();
    histories
      .entry(context)
      .or_insert_with(|| Arc::new(Mutex::new(NavigationHistory::with_limit(self.config.limit()))))
      .clone()
  }

  /// Drop a closed window's history so the registry does not grow without
  /// bound over the process lifetime.
  pub fn remove(&self, context: ContextId) -> bool {
    self.histories.lock().remove(&context).is_some()
  }

  pub fn len(&self) -> usize {
    self.histories.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.histories.lock().is_empty()
  }

  /// True while a jump is mutating focus and selection. Event hooks must not
  /// record history while this holds.
  pub fn is_jumping(&self) -> bool {
    self.jumping.load(Ordering::Acquire)
  }

  /// Raise the jump flag for the lifetime of the returned guard.
  pub fn begin_jump(&self) -> JumpGuard<'_> {
    self.jumping.store(true, Ordering::Release);
    JumpGuard { store: self }
  }

  /// Clear a flag that a torn-down jump can no longer clear itself, e.g.
  /// when the jump's target document is closed out from under it.
  pub fn force_unlock(&self) {
    self.jumping.store(false, Ordering::Release);
  }
}

/// Scope guard for the jump-in-progress flag.
#[derive(Debug)]
pub struct JumpGuard<'a> {
  store: &'a HistoryStore,
}

impl Drop for JumpGuard<'_> {
  fn drop(&mut self) {
    self.store.jumping.store(false, Ordering::Release);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn context(id: usize) -> ContextId {
    ContextId::new(NonZeroUsize::new(id).unwrap())
  }

  #[test]
  fn histories_are_created_lazily_and_shared() {
    let store = HistoryStore::default();
    assert!(store.is_empty());

    let first = store.history(context(1));
    let again = store.history(context(1));
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(store.len(), 1);

    store.history(context(2));
    assert_eq!(store.len(), 2);
  }

  #[test]
  fn contexts_get_independent_histories() {
    let store = HistoryStore::default();
    let one = store.history(context(1));
    let two = store.history(context(2));
    assert!(!Arc::ptr_eq(&one, &two));
  }

  #[test]
  fn remove_evicts_a_context() {
    let store = HistoryStore::default();
    store.history(context(1));
    assert!(store.remove(context(1)));
    assert!(!store.remove(context(1)));
    assert!(store.is_empty());
  }

  #[test]
  fn configured_limit_reaches_new_histories() {
    let store = HistoryStore::new(HistoryConfig::new(7, 16));
    let history = store.history(context(1));
    assert_eq!(history.lock().limit(), 7);
  }

  #[test]
  fn jump_guard_clears_the_flag_on_every_path() {
    let store = HistoryStore::default();
    assert!(!store.is_jumping());

    {
      let _guard = store.begin_jump();
      assert!(store.is_jumping());
    }
    assert!(!store.is_jumping());

    let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
      let _guard = store.begin_jump();
      panic!("jump blew up");
    }));
    assert!(caught.is_err());
    assert!(!store.is_jumping());
  }

  #[test]
  fn force_unlock_clears_a_stuck_flag() {
    let store = HistoryStore::default();
    let guard = store.begin_jump();
    std::mem::forget(guard);
    assert!(store.is_jumping());

    store.force_unlock();
    assert!(!store.is_jumping());
  }
}
