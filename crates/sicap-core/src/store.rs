//! [`EntityStore`] — an ordered, in-memory collection of one record type.
//!
//! Every operation is total: adding never checks for duplicate business keys,
//! and updating or removing a missing key is a no-op. Callers that care can
//! inspect the returned counts.

use serde::{Deserialize, Serialize};

use crate::entity::{
  CoreCompetency, Course, CourseOutcome, Curriculum, GraduateProfile, KnowledgeArea,
  LearningOutcome, LearningPlan, Lecturer, RecordId,
};

// ─── Record ──────────────────────────────────────────────────────────────────

/// A record addressable by a key.
///
/// Most entities are keyed by [`RecordId`]; courses are keyed by their code.
pub trait Record {
  type Key: PartialEq + ToOwned + ?Sized;

  fn key(&self) -> &Self::Key;
}

/// The owned form of a record's key, e.g. `String` for a course.
pub type OwnedKey<R> = <<R as Record>::Key as ToOwned>::Owned;

macro_rules! keyed_by_id {
  ($($ty:ty),+ $(,)?) => {
    $(
      impl Record for $ty {
        type Key = RecordId;

        fn key(&self) -> &RecordId { &self.id }
      }
    )+
  };
}

keyed_by_id!(
  Curriculum,
  GraduateProfile,
  CoreCompetency,
  LearningOutcome,
  KnowledgeArea,
  Lecturer,
  CourseOutcome,
  LearningPlan,
);

impl Record for Course {
  type Key = str;

  fn key(&self) -> &str { &self.code }
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityStore<T> {
  records: Vec<T>,
}

impl<T> Default for EntityStore<T> {
  fn default() -> Self { Self { records: Vec::new() } }
}

impl<T> FromIterator<T> for EntityStore<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self { records: iter.into_iter().collect() }
  }
}

impl<T: Record> EntityStore<T> {
  pub fn new() -> Self { Self::default() }

  pub fn from_records(records: Vec<T>) -> Self { Self { records } }

  /// Append `record`. Duplicate keys are accepted.
  pub fn add(&mut self, record: T) { self.records.push(record); }

  /// Apply `patch` to every record whose key equals `key`.
  ///
  /// Returns the number of records patched; `0` means the key was absent.
  pub fn update(&mut self, key: &T::Key, mut patch: impl FnMut(&mut T)) -> usize {
    let mut patched = 0;
    for record in self.records.iter_mut().filter(|r| r.key() == key) {
      patch(record);
      patched += 1;
    }
    patched
  }

  /// Replace every record whose key equals `key` with a clone of `record`.
  pub fn replace(&mut self, key: &T::Key, record: T) -> usize
  where
    T: Clone,
  {
    self.update(key, |r| *r = record.clone())
  }

  /// Remove every record whose key equals `key`; returns how many were removed.
  pub fn remove(&mut self, key: &T::Key) -> usize {
    let before = self.records.len();
    self.records.retain(|r| r.key() != key);
    before - self.records.len()
  }

  /// The first record with `key`.
  pub fn get(&self, key: &T::Key) -> Option<&T> { self.records.iter().find(|r| r.key() == key) }

  pub fn contains_key(&self, key: &T::Key) -> bool { self.get(key).is_some() }

  /// Index of the first record with `key`.
  pub fn position(&self, key: &T::Key) -> Option<usize> {
    self.records.iter().position(|r| r.key() == key)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, T> { self.records.iter() }

  pub fn as_slice(&self) -> &[T] { &self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

impl<'a, T> IntoIterator for &'a EntityStore<T> {
  type IntoIter = std::slice::Iter<'a, T>;
  type Item = &'a T;

  fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::options::{CourseNature, Semester};

  fn course(code: &str, name: &str) -> Course {
    Course {
      code:           code.into(),
      name:           name.into(),
      credits:        3,
      semester:       Semester::One,
      nature:         CourseNature::Mandatory,
      description:    "Pengantar konsep pemrograman komputer".into(),
      curriculum_id:  RecordId::new(),
      knowledge_area: Some(RecordId::new()),
      outcomes:       vec![RecordId::new(), RecordId::new()],
      lecturers:      Vec::new(),
    }
  }

  #[test]
  fn update_changes_only_the_patched_field() {
    let original = course("INF101", "Pemrograman Dasar");
    let mut store = EntityStore::from_records(vec![original.clone()]);

    let patched = store.update("INF101", |c| c.name = "New Name".into());
    assert_eq!(patched, 1);

    let only = &store.as_slice()[0];
    assert_eq!(only.name, "New Name");
    assert_eq!(only.code, original.code);
    assert_eq!(only.credits, original.credits);
    assert_eq!(only.semester, original.semester);
    assert_eq!(only.description, original.description);
    assert_eq!(only.knowledge_area, original.knowledge_area);
    assert_eq!(only.outcomes, original.outcomes);
  }

  #[test]
  fn update_missing_key_is_noop() {
    let mut store = EntityStore::from_records(vec![course("INF101", "Pemrograman Dasar")]);
    let before = store.clone();
    assert_eq!(store.update("XXX999", |c| c.name.clear()), 0);
    assert_eq!(store, before);
  }

  #[test]
  fn add_accepts_duplicate_codes() {
    let mut store = EntityStore::new();
    store.add(course("INF101", "A"));
    store.add(course("INF101", "B"));
    assert_eq!(store.len(), 2);
    // Both duplicates are patched and removed together.
    assert_eq!(store.update("INF101", |c| c.credits = 4), 2);
    assert_eq!(store.remove("INF101"), 2);
    assert!(store.is_empty());
  }

  #[test]
  fn remove_preserves_order_of_the_rest() {
    let mut store: EntityStore<Course> = ["A1", "B2", "C3"]
      .into_iter()
      .map(|c| course(c, c))
      .collect();
    assert_eq!(store.remove("B2"), 1);
    assert_eq!(store.remove("B2"), 0);
    let codes: Vec<_> = store.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, ["A1", "C3"]);
    assert_eq!(store.position("C3"), Some(1));
  }

  #[test]
  fn replace_swaps_whole_record() {
    let mut store = EntityStore::from_records(vec![course("INF101", "Old")]);
    let mut replacement = course("INF101", "Replaced");
    replacement.credits = 2;
    assert_eq!(store.replace("INF101", replacement.clone()), 1);
    assert_eq!(store.get("INF101"), Some(&replacement));
  }

  #[test]
  fn id_keyed_records() {
    let id = RecordId::new();
    let mut store = EntityStore::new();
    store.add(Lecturer {
      id,
      nip: "198001012005011001".into(),
      name: "Dr. Ahmad".into(),
      email: None,
      specialty: None,
      rank: None,
    });
    assert!(store.contains_key(&id));
    assert!(!store.contains_key(&RecordId::new()));
  }
}
