use waypoint_lib::selection::Range;

/// Per-document view state owned by the window.
///
/// The history engine asks one thing of a view: after a jump, the restored
/// selection is scrolled into sight. `revealed` records that target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
  pub revealed: Option<Range>,
}

impl ViewState {
  pub fn reveal(&mut self, range: Range) {
    self.revealed = Some(range);
  }
}
