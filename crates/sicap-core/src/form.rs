//! Form dialogs — the "Add/Edit X" modals and the delete confirmation.
//!
//! A [`FormDialog`] stages edits to one record in a [`Draft`]. Nothing reaches
//! the [`EntityStore`] until [`FormDialog::submit`], and a submit with blank
//! required fields is inert: the dialog stays open and nothing is written.

use std::{borrow::Borrow, collections::HashSet};

use tracing::debug;

use crate::store::{EntityStore, OwnedKey, Record};

// ─── Draft ───────────────────────────────────────────────────────────────────

/// The editable field set of one record type.
pub trait Draft: Clone {
  type Record: Record;

  /// Seed a draft from an existing record (edit mode).
  fn from_record(record: &Self::Record) -> Self;

  /// Whether every required field is filled in.
  fn is_complete(&self) -> bool;

  /// Build a new record from this draft (create mode).
  fn create(&self) -> Self::Record;

  /// Write this draft's fields onto `record` (edit mode). Must leave the
  /// record's key untouched.
  fn apply(&self, record: &mut Self::Record);
}

/// `true` if `value` has any non-whitespace content.
pub fn filled(value: &str) -> bool { !value.trim().is_empty() }

// ─── Dialog ──────────────────────────────────────────────────────────────────

/// What [`FormDialog::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
  /// No dialog was open.
  NotOpen,
  /// Required fields were blank; the dialog stays open.
  Inert,
  Created,
  /// Carries the number of records patched; `0` if the record vanished
  /// while the dialog was open.
  Updated(usize),
}

pub enum FormDialog<D: Draft> {
  Closed,
  Create { draft: D },
  /// The key is fixed when the dialog opens and cannot be edited.
  Edit { key: OwnedKey<D::Record>, draft: D },
}

impl<D: Draft> Default for FormDialog<D> {
  fn default() -> Self { Self::Closed }
}

impl<D: Draft> FormDialog<D> {
  /// Open in create mode with `draft` as the initial field values.
  pub fn open_create(&mut self, draft: D) { *self = Self::Create { draft }; }

  /// Open in edit mode, seeded from `record`.
  pub fn open_edit(&mut self, record: &D::Record) {
    *self = Self::Edit {
      key:   record.key().to_owned(),
      draft: D::from_record(record),
    };
  }

  pub fn is_open(&self) -> bool { !matches!(self, Self::Closed) }

  pub fn is_editing(&self) -> bool { matches!(self, Self::Edit { .. }) }

  pub fn draft(&self) -> Option<&D> {
    match self {
      Self::Closed => None,
      Self::Create { draft } | Self::Edit { draft, .. } => Some(draft),
    }
  }

  pub fn draft_mut(&mut self) -> Option<&mut D> {
    match self {
      Self::Closed => None,
      Self::Create { draft } | Self::Edit { draft, .. } => Some(draft),
    }
  }

  /// Whether the submit button would be enabled.
  pub fn can_submit(&self) -> bool { self.draft().is_some_and(D::is_complete) }

  /// Discard the draft.
  pub fn cancel(&mut self) { *self = Self::Closed; }

  /// Commit the draft to `store` and close, unless the draft is incomplete.
  pub fn submit(&mut self, store: &mut EntityStore<D::Record>) -> Submission {
    if !self.is_open() {
      return Submission::NotOpen;
    }
    if !self.can_submit() {
      return Submission::Inert;
    }
    match std::mem::take(self) {
      Self::Closed => Submission::NotOpen,
      Self::Create { draft } => {
        store.add(draft.create());
        debug!(total = store.len(), "record created");
        Submission::Created
      }
      Self::Edit { key, draft } => {
        let key: &<D::Record as Record>::Key = key.borrow();
        let patched = store.update(key, |record| draft.apply(record));
        debug!(patched, "record updated");
        Submission::Updated(patched)
      }
    }
  }
}

// ─── Delete confirmation ─────────────────────────────────────────────────────

/// The "are you sure?" step before a delete.
pub struct DeletePrompt<R: Record> {
  pending: Option<OwnedKey<R>>,
}

impl<R: Record> Default for DeletePrompt<R> {
  fn default() -> Self { Self { pending: None } }
}

impl<R: Record> DeletePrompt<R> {
  pub fn request(&mut self, record: &R) { self.pending = Some(record.key().to_owned()); }

  pub fn pending(&self) -> Option<&R::Key> { self.pending.as_ref().map(Borrow::borrow) }

  pub fn is_pending(&self) -> bool { self.pending.is_some() }

  pub fn cancel(&mut self) { self.pending = None; }

  /// Take the pending key, for deletes that also touch other state.
  pub fn take(&mut self) -> Option<OwnedKey<R>> { self.pending.take() }

  /// Remove the pending record from `store`; returns how many were removed.
  pub fn confirm(&mut self, store: &mut EntityStore<R>) -> usize {
    match self.pending.take() {
      Some(key) => store.remove(key.borrow()),
      None => 0,
    }
  }
}

// ─── Code suggestion ─────────────────────────────────────────────────────────

/// How a category formats its codes: a prefix followed by a number,
/// optionally zero-padded (`S3`, `KU1`, `BK-04`, `PL-02`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePattern<'a> {
  pub prefix: &'a str,
  /// Minimum digit count; `0` means no padding.
  pub width:  usize,
}

impl<'a> CodePattern<'a> {
  pub const fn plain(prefix: &'a str) -> Self { Self { prefix, width: 0 } }

  pub const fn padded(prefix: &'a str, width: usize) -> Self { Self { prefix, width } }

  pub fn format(&self, n: usize) -> String {
    format!("{}{:0width$}", self.prefix, n, width = self.width)
  }

  /// The first code `prefix1`, `prefix2`, … not present in `existing`.
  pub fn next_unused<'s>(&self, existing: impl IntoIterator<Item = &'s str>) -> String {
    let taken: HashSet<&str> = existing.into_iter().collect();
    let mut n = 1;
    loop {
      let code = self.format(n);
      if !taken.contains(code.as_str()) {
        return code;
      }
      n += 1;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::{Course, RecordId},
    options::{CourseNature, Semester},
  };

  #[derive(Debug, Clone, Default)]
  struct NameDraft {
    code: String,
    name: String,
  }

  impl Draft for NameDraft {
    type Record = Course;

    fn from_record(c: &Course) -> Self { Self { code: c.code.clone(), name: c.name.clone() } }

    fn is_complete(&self) -> bool { filled(&self.code) && filled(&self.name) }

    fn create(&self) -> Course {
      Course {
        code:           self.code.trim().into(),
        name:           self.name.trim().into(),
        credits:        3,
        semester:       Semester::One,
        nature:         CourseNature::Mandatory,
        description:    String::new(),
        curriculum_id:  RecordId::new(),
        knowledge_area: None,
        outcomes:       Vec::new(),
        lecturers:      Vec::new(),
      }
    }

    fn apply(&self, c: &mut Course) { c.name = self.name.trim().into(); }
  }

  #[test]
  fn suggests_first_unused_code() {
    let p = CodePattern::plain("S");
    assert_eq!(p.next_unused(["S1", "S2"]), "S3");
    assert_eq!(p.next_unused(["S2"]), "S1");
    assert_eq!(p.next_unused([]), "S1");
    assert_eq!(CodePattern::padded("BK-", 2).next_unused(["BK-01", "BK-02"]), "BK-03");
    assert_eq!(CodePattern::padded("PL-", 2).format(12), "PL-12");
  }

  #[test]
  fn create_commits_and_closes() {
    let mut store = EntityStore::new();
    let mut dialog = FormDialog::<NameDraft>::default();
    dialog.open_create(NameDraft { code: "INF101".into(), name: "Pemrograman Dasar".into() });
    assert!(dialog.is_open());
    assert_eq!(dialog.submit(&mut store), Submission::Created);
    assert!(!dialog.is_open());
    assert_eq!(store.len(), 1);
  }

  #[test]
  fn blank_required_field_is_inert() {
    let mut store = EntityStore::new();
    let mut dialog = FormDialog::<NameDraft>::default();
    dialog.open_create(NameDraft { code: "INF101".into(), name: "   ".into() });
    assert!(!dialog.can_submit());
    assert_eq!(dialog.submit(&mut store), Submission::Inert);
    assert!(dialog.is_open());
    assert!(store.is_empty());
  }

  #[test]
  fn edit_keeps_key_and_cancel_discards() {
    let mut store = EntityStore::new();
    let mut dialog = FormDialog::<NameDraft>::default();
    dialog.open_create(NameDraft { code: "INF101".into(), name: "Old".into() });
    dialog.submit(&mut store);

    let record = store.get("INF101").unwrap().clone();
    dialog.open_edit(&record);
    assert!(dialog.is_editing());
    {
      let draft = dialog.draft_mut().unwrap();
      draft.name = "New".into();
      // Changing the code in the draft has no effect on the key.
      draft.code = "XXX".into();
    }
    assert_eq!(dialog.submit(&mut store), Submission::Updated(1));
    assert_eq!(store.get("INF101").unwrap().name, "New");
    assert!(store.get("XXX").is_none());

    dialog.open_edit(store.get("INF101").unwrap());
    dialog.draft_mut().unwrap().name = "Discarded".into();
    dialog.cancel();
    assert_eq!(store.get("INF101").unwrap().name, "New");
    assert_eq!(dialog.submit(&mut store), Submission::NotOpen);
  }

  #[test]
  fn delete_prompt_confirms_once() {
    let mut store = EntityStore::new();
    let mut dialog = FormDialog::<NameDraft>::default();
    dialog.open_create(NameDraft { code: "INF101".into(), name: "A".into() });
    dialog.submit(&mut store);

    let mut prompt = DeletePrompt::<Course>::default();
    prompt.request(store.get("INF101").unwrap());
    assert_eq!(prompt.pending(), Some("INF101"));
    assert_eq!(prompt.confirm(&mut store), 1);
    assert!(!prompt.is_pending());
    assert_eq!(prompt.confirm(&mut store), 0);
    assert!(store.is_empty());
  }
}
