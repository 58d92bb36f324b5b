//! Curriculum entities — the records held by each entity store.
//!
//! Field shapes follow the OBE (outcome-based education) model used by
//! Indonesian study programmes: a curriculum owns graduate profiles, core
//! competencies (KUL), learning outcomes (CPL) and knowledge areas (Bahan
//! Kajian); courses (Mata Kuliah) tie one knowledge area to several
//! outcomes.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error,
  options::{AssessmentForm, Aspect, CourseNature, PlanStatus, Semester, TeachingMethod},
};

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Opaque record identifier. Fresh ids are random v4 UUIDs, so two records
/// created in the same instant never collide.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
  pub fn new() -> Self { Self(Uuid::new_v4()) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for RecordId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for RecordId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl FromStr for RecordId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self(Uuid::parse_str(s)?)) }
}

// ─── Curriculum ──────────────────────────────────────────────────────────────

/// The root container. Several curricula may be active at the same time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
  pub id:             RecordId,
  pub name:           String,
  pub effective_year: i32,
  pub is_active:      bool,
  pub created_at:     Option<DateTime<Utc>>,
}

impl Curriculum {
  /// A fresh, inactive copy named `"<name> (Copy)"` effective in `year`.
  pub fn duplicate(&self, year: i32) -> Self {
    Self {
      id:             RecordId::new(),
      name:           format!("{} (Copy)", self.name),
      effective_year: year,
      is_active:      false,
      created_at:     Some(Utc::now()),
    }
  }
}

// ─── Graduate profile ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduateProfile {
  pub id:            RecordId,
  /// `PL-01`, `PL-02`, …
  pub code:          String,
  /// e.g. "Software Engineer".
  pub title:         String,
  pub description:   String,
  /// Reference the profile was drawn from (KKNI level, professional body).
  pub source:        String,
  pub curriculum_id: RecordId,
}

// ─── Competencies and outcomes ───────────────────────────────────────────────

/// Kompetensi Utama Lulusan — source of the aspect taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreCompetency {
  pub id:            RecordId,
  /// `S1`, `P1`, `KU1`, `KK1`, …
  pub code:          String,
  pub description:   String,
  pub aspect:        Aspect,
  pub curriculum_id: RecordId,
}

/// Capaian Pembelajaran Lulusan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningOutcome {
  pub id:            RecordId,
  pub code:          String,
  pub description:   String,
  pub aspect:        Aspect,
  pub curriculum_id: RecordId,
}

/// Bahan Kajian — a subject-matter domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArea {
  pub id:            RecordId,
  /// `BK-01`, `BK-02`, …
  pub code:          String,
  pub name:          String,
  pub aspect:        Aspect,
  /// Free-text field of study, e.g. "Sistem Informasi".
  pub domain:        String,
  pub curriculum_id: RecordId,
}

// ─── Course ──────────────────────────────────────────────────────────────────

/// Mata Kuliah. The course code is the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
  pub code:           String,
  pub name:           String,
  /// Credit hours (SKS).
  pub credits:        u8,
  pub semester:       Semester,
  pub nature:         CourseNature,
  pub description:    String,
  pub curriculum_id:  RecordId,
  /// Exactly one knowledge area once saved through a form.
  pub knowledge_area: Option<RecordId>,
  /// Linked learning outcomes; at least two once saved through a form.
  pub outcomes:       Vec<RecordId>,
  pub lecturers:      Vec<RecordId>,
}

// ─── Lecturer ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
  pub id:        RecordId,
  /// National employee number (NIP).
  pub nip:       String,
  pub name:      String,
  pub email:     Option<String>,
  pub specialty: Option<String>,
  /// Asisten Ahli, Lektor, Lektor Kepala, Guru Besar.
  pub rank:      Option<String>,
}

// ─── Course outcome (CPMK) ───────────────────────────────────────────────────

/// Capaian Pembelajaran Mata Kuliah — a course-level outcome tied to one CPL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOutcome {
  pub id:          RecordId,
  /// `M1`, `M2`, …
  pub code:        String,
  pub description: String,
  /// Share of the course grade, in percent.
  pub weight:      f64,
  pub course_code: String,
  pub outcome_id:  RecordId,
}

// ─── Learning plan (RPS) ─────────────────────────────────────────────────────

/// One weekly meeting of a learning plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
  /// Meeting number, 1 through 16.
  pub week:          u8,
  pub learning_form: TeachingMethod,
  /// Estimated duration in minutes.
  pub minutes:       u16,
  pub assessment:    Option<AssessmentForm>,
  /// Share of the final grade assessed in this meeting, in percent.
  pub weight:        f64,
}

/// Rencana Pembelajaran Semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPlan {
  pub id:              RecordId,
  pub course_code:     String,
  pub version:         u32,
  pub drafted_on:      NaiveDate,
  pub lecturer:        String,
  pub coordinator:     Option<String>,
  pub head_of_program: Option<String>,
  pub status:          PlanStatus,
  pub sessions:        Vec<Session>,
}

impl LearningPlan {
  /// Sum of session assessment weights.
  pub fn total_weight(&self) -> f64 { self.sessions.iter().map(|s| s.weight).sum() }

  /// Sum of session durations, in minutes.
  pub fn total_minutes(&self) -> u32 {
    self.sessions.iter().map(|s| u32::from(s.minutes)).sum()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn record_ids_are_unique_and_parse_back() {
    let a = RecordId::new();
    let b = RecordId::new();
    assert_ne!(a, b);
    let parsed: RecordId = a.to_string().parse().unwrap();
    assert_eq!(parsed, a);
    assert!("not-a-uuid".parse::<RecordId>().is_err());
  }

  #[test]
  fn duplicate_curriculum_is_inactive_copy() {
    let original = Curriculum {
      id:             RecordId::new(),
      name:           "Kurikulum OBE 2024".into(),
      effective_year: 2024,
      is_active:      true,
      created_at:     None,
    };
    let copy = original.duplicate(2026);
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, "Kurikulum OBE 2024 (Copy)");
    assert_eq!(copy.effective_year, 2026);
    assert!(!copy.is_active);
    assert!(copy.created_at.is_some());
  }

  #[test]
  fn plan_totals() {
    let plan = LearningPlan {
      id:              RecordId::new(),
      course_code:     "INF101".into(),
      version:         1,
      drafted_on:      NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
      lecturer:        "Dr. Ahmad".into(),
      coordinator:     None,
      head_of_program: None,
      status:          PlanStatus::Draft,
      sessions:        vec![
        Session {
          week:          1,
          learning_form: TeachingMethod::Ceramah,
          minutes:       150,
          assessment:    None,
          weight:        0.0,
        },
        Session {
          week:          8,
          learning_form: TeachingMethod::Praktikum,
          minutes:       100,
          assessment:    Some(AssessmentForm::Uts),
          weight:        30.0,
        },
      ],
    };
    assert_eq!(plan.total_minutes(), 250);
    assert_eq!(plan.total_weight(), 30.0);
  }
}
