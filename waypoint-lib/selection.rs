//! Caret positions and multi-caret selections.
//!
//! [`Range`] is a single caret or highlighted span; [`Selection`] is an
//! ordered sequence of them. The history engine treats a selection as an
//! opaque comparable value: ranges stay in the order the host produced them
//! (caret order is meaningful) and are never merged or normalized, and two
//! selections are equal only when they have the same length and the same
//! pairwise offsets.
//!
//! A selection may be empty. The engine refuses to record empty selections,
//! but a host's live selection can legitimately be empty, for example while a
//! document is being torn down.

use smallvec::{
  SmallVec,
  smallvec,
};

/// A single caret or highlighted span, in document-relative char offsets.
///
/// `anchor` is the fixed end and `head` the moving end; `anchor == head` is a
/// bare caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
  pub anchor: usize,
  pub head:   usize,
}

impl Range {
  pub fn new(anchor: usize, head: usize) -> Self {
    Self { anchor, head }
  }

  #[inline]
  pub fn point(head: usize) -> Self {
    Self::new(head, head)
  }

  /// Start of the range, regardless of direction.
  #[inline]
  #[must_use]
  pub fn from(&self) -> usize {
    std::cmp::min(self.anchor, self.head)
  }

  /// End of the range, regardless of direction.
  #[inline]
  #[must_use]
  pub fn to(&self) -> usize {
    std::cmp::max(self.anchor, self.head)
  }

  /// When the head and anchor coincide, the range is a bare caret.
  #[inline]
  #[must_use]
  pub fn is_caret(&self) -> bool {
    self.anchor == self.head
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
  ranges: SmallVec<[Range; 1]>,
}

impl Selection {
  pub fn new(ranges: SmallVec<[Range; 1]>) -> Self {
    Self { ranges }
  }

  pub fn empty() -> Self {
    Self::default()
  }

  pub fn point(pos: usize) -> Self {
    Self {
      ranges: smallvec![Range::point(pos)],
    }
  }

  pub fn single(anchor: usize, head: usize) -> Self {
    Self {
      ranges: smallvec![Range::new(anchor, head)],
    }
  }

  pub fn ranges(&self) -> &[Range] {
    &self.ranges
  }

  /// First range in caret order. `None` for an empty selection.
  pub fn primary(&self) -> Option<Range> {
    self.ranges.first().copied()
  }

  pub fn len(&self) -> usize {
    self.ranges.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ranges.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Range> {
    self.ranges.iter()
  }

  pub fn push(&mut self, range: Range) {
    self.ranges.push(range);
  }
}

impl From<Range> for Selection {
  fn from(range: Range) -> Self {
    Self {
      ranges: smallvec![range],
    }
  }
}

impl FromIterator<Range> for Selection {
  fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
    Self {
      ranges: iter.into_iter().collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn equality_is_pairwise_and_ordered() {
    let a: Selection = [Range::point(5), Range::point(15)].into_iter().collect();
    let b: Selection = [Range::point(5), Range::point(15)].into_iter().collect();
    let reversed: Selection = [Range::point(15), Range::point(5)].into_iter().collect();

    assert_eq!(a, b);
    assert_ne!(a, reversed);
    assert_ne!(a, Selection::point(5));
  }

  #[test]
  fn overlapping_ranges_are_kept_verbatim() {
    let mut selection = Selection::single(0, 10);
    selection.push(Range::new(5, 8));
    assert_eq!(selection.len(), 2);
    assert_eq!(selection.ranges()[1], Range::new(5, 8));
  }

  #[test]
  fn primary_is_first_by_caret_order() {
    let selection: Selection = [Range::new(20, 10), Range::point(3)].into_iter().collect();
    assert_eq!(selection.primary(), Some(Range::new(20, 10)));
    assert_eq!(Selection::empty().primary(), None);
  }

  #[test]
  fn range_bounds_ignore_direction() {
    let backward = Range::new(7, 2);
    assert_eq!(backward.from(), 2);
    assert_eq!(backward.to(), 7);
    assert!(!backward.is_caret());
    assert!(Range::point(4).is_caret());
  }
}
