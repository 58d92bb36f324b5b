//! [`RelationMatrix`] — a many-to-many mapping toggled one cell at a time.
//!
//! The mapping is keyed one way (row → ordered set of columns), which is how
//! the CPL matrices are read and edited. A reverse index (column → rows) is
//! kept in step on every toggle, so column totals are a lookup rather than a
//! scan over all rows.

use std::collections::{BTreeMap, BTreeSet};

// ─── Matrix ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMatrix<R, C> {
  /// Row → columns in insertion order. Rows never hold an empty list.
  rows:    BTreeMap<R, Vec<C>>,
  /// Column → rows containing it. Mirrors `rows` exactly.
  columns: BTreeMap<C, BTreeSet<R>>,
}

impl<R, C> Default for RelationMatrix<R, C> {
  fn default() -> Self { Self { rows: BTreeMap::new(), columns: BTreeMap::new() } }
}

impl<R: Ord + Clone, C: Ord + Clone> RelationMatrix<R, C> {
  pub fn new() -> Self { Self::default() }

  /// Build a matrix from `(row, column)` pairs. Repeated pairs are linked
  /// once.
  pub fn from_pairs(pairs: impl IntoIterator<Item = (R, C)>) -> Self {
    let mut matrix = Self::new();
    for (row, col) in pairs {
      if !matrix.has(&row, &col) {
        matrix.link(row, col);
      }
    }
    matrix
  }

  /// Flip the `(row, col)` cell and return its new state.
  ///
  /// Toggling the same cell twice restores the previous state.
  pub fn toggle(&mut self, row: R, col: C) -> bool {
    if self.has(&row, &col) {
      self.unlink(&row, &col);
      false
    } else {
      self.link(row, col);
      true
    }
  }

  /// Whether `row` is linked to `col`. A missing row is an empty set.
  pub fn has(&self, row: &R, col: &C) -> bool {
    self.columns.get(col).is_some_and(|rows| rows.contains(row))
  }

  /// Number of columns linked to `row`.
  pub fn row_count(&self, row: &R) -> usize { self.rows.get(row).map_or(0, Vec::len) }

  /// Number of rows linked to `col`.
  pub fn col_count(&self, col: &C) -> usize { self.columns.get(col).map_or(0, BTreeSet::len) }

  /// Number of linked cells.
  pub fn total_count(&self) -> usize { self.rows.values().map(Vec::len).sum() }

  /// Columns linked to `row`, in the order they were linked.
  pub fn row(&self, row: &R) -> &[C] { self.rows.get(row).map(Vec::as_slice).unwrap_or_default() }

  /// Rows linked to `col`, in key order.
  pub fn rows_for<'a>(&'a self, col: &C) -> impl Iterator<Item = &'a R> + use<'a, R, C> {
    self.columns.get(col).into_iter().flatten()
  }

  /// All non-empty rows with their columns.
  pub fn rows(&self) -> impl Iterator<Item = (&R, &[C])> {
    self.rows.iter().map(|(r, cs)| (r, cs.as_slice()))
  }

  /// Every linked `(row, column)` pair.
  pub fn pairs(&self) -> impl Iterator<Item = (&R, &C)> {
    self.rows.iter().flat_map(|(r, cs)| cs.iter().map(move |c| (r, c)))
  }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Unlink every column from `row`; returns how many links were dropped.
  pub fn clear_row(&mut self, row: &R) -> usize {
    let Some(cols) = self.rows.remove(row) else {
      return 0;
    };
    for col in &cols {
      self.drop_reverse(col, row);
    }
    cols.len()
  }

  /// Unlink `col` from every row; returns how many links were dropped.
  pub fn clear_col(&mut self, col: &C) -> usize {
    let Some(rows) = self.columns.remove(col) else {
      return 0;
    };
    for row in &rows {
      self.drop_forward(row, col);
    }
    rows.len()
  }

  fn link(&mut self, row: R, col: C) {
    self.columns.entry(col.clone()).or_default().insert(row.clone());
    self.rows.entry(row).or_default().push(col);
  }

  fn unlink(&mut self, row: &R, col: &C) {
    self.drop_forward(row, col);
    self.drop_reverse(col, row);
  }

  fn drop_forward(&mut self, row: &R, col: &C) {
    if let Some(cols) = self.rows.get_mut(row) {
      cols.retain(|c| c != col);
      if cols.is_empty() {
        self.rows.remove(row);
      }
    }
  }

  fn drop_reverse(&mut self, col: &C, row: &R) {
    if let Some(rows) = self.columns.get_mut(col) {
      rows.remove(row);
      if rows.is_empty() {
        self.columns.remove(col);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  type Matrix = RelationMatrix<&'static str, &'static str>;

  /// Column count computed the slow way, over every row.
  fn scanned_col_count(m: &Matrix, col: &&'static str) -> usize {
    m.rows().filter(|(_, cs)| cs.contains(col)).count()
  }

  #[test]
  fn first_toggle_links_a_cell() {
    let mut m = Matrix::new();
    assert!(m.toggle("CPL-1", "BK-1"));
    assert!(m.has(&"CPL-1", &"BK-1"));
    assert_eq!(m.row_count(&"CPL-1"), 1);
    assert_eq!(m.col_count(&"BK-1"), 1);
    assert_eq!(m.total_count(), 1);
  }

  #[test]
  fn toggling_twice_restores_state() {
    let mut m = Matrix::from_pairs([("CPL-1", "BK-2"), ("CPL-2", "BK-1")]);
    let before = m.clone();
    for (r, c) in [("CPL-1", "BK-1"), ("CPL-1", "BK-2"), ("CPL-9", "BK-9")] {
      let was = m.has(&r, &c);
      m.toggle(r, c);
      assert_ne!(m.has(&r, &c), was);
      m.toggle(r, c);
      assert_eq!(m.has(&r, &c), was);
    }
    assert_eq!(m, before);
  }

  #[test]
  fn absent_row_is_empty() {
    let m = Matrix::new();
    assert!(!m.has(&"CPL-1", &"BK-1"));
    assert_eq!(m.row_count(&"CPL-1"), 0);
    assert_eq!(m.col_count(&"BK-1"), 0);
    assert!(m.row(&"CPL-1").is_empty());
    assert!(m.is_empty());
  }

  #[test]
  fn counts_agree_with_membership() {
    let rows = ["CPL-1", "CPL-2", "CPL-3"];
    let cols = ["BK-1", "BK-2", "BK-3", "BK-4"];
    let mut m = Matrix::new();
    // A deterministic but irregular toggle sequence, including repeats.
    for i in 0..40usize {
      m.toggle(rows[(i * 7) % 3], cols[(i * 5 + i / 3) % 4]);
    }

    for r in &rows {
      let listed = cols.iter().filter(|c| m.has(r, c)).count();
      assert_eq!(m.row_count(r), listed);
    }
    for c in &cols {
      assert_eq!(m.col_count(c), scanned_col_count(&m, c));
    }
    let sum: usize = rows.iter().map(|r| m.row_count(r)).sum();
    assert_eq!(m.total_count(), sum);
    assert_eq!(m.pairs().count(), sum);
  }

  #[test]
  fn row_keeps_insertion_order_without_duplicates() {
    let m = Matrix::from_pairs([
      ("CPL-7", "BK-5"),
      ("CPL-7", "BK-3"),
      ("CPL-7", "BK-5"),
      ("CPL-7", "BK-6"),
    ]);
    assert_eq!(m.row(&"CPL-7"), ["BK-5", "BK-3", "BK-6"]);
  }

  #[test]
  fn rows_for_and_clear_row() {
    let mut m = Matrix::from_pairs([("A", "X"), ("B", "X"), ("B", "Y")]);
    let linked: Vec<_> = m.rows_for(&"X").copied().collect();
    assert_eq!(linked, ["A", "B"]);

    assert_eq!(m.clear_row(&"B"), 2);
    assert_eq!(m.col_count(&"X"), 1);
    assert_eq!(m.col_count(&"Y"), 0);
    assert_eq!(m.clear_row(&"B"), 0);
  }

  #[test]
  fn clear_col_drops_every_link_to_it() {
    let mut m = Matrix::from_pairs([("A", "X"), ("B", "X"), ("B", "Y"), ("C", "X")]);
    assert_eq!(m.clear_col(&"X"), 3);
    assert_eq!(m.col_count(&"X"), 0);
    assert!(!m.has(&"B", &"X"));
    assert_eq!(m.row(&"B"), ["Y"]);
    assert_eq!(m.row_count(&"A"), 0);
    assert_eq!(m.total_count(), 1);
    assert_eq!(m.rows().count(), 1);
    assert_eq!(m.clear_col(&"X"), 0);
  }
}
