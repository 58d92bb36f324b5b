//! Closed option tables — every select/filter list in the dashboard.
//!
//! Each table is an enum whose variants carry a stable `value` (the string
//! used in filters and on disk) and a human-readable `label`. Because the
//! set is closed, an unknown value can only enter through [`Choice::parse`],
//! which rejects it with [`Error::UnknownOption`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A member of a closed option table.
pub trait Choice: Sized + Copy + 'static {
  /// Name of the table, used in error messages.
  const KIND: &'static str;

  /// The stable option key, e.g. `"KU"`.
  fn value(self) -> &'static str;

  /// The display label, e.g. `"KU - Keterampilan Umum"`.
  fn label(self) -> &'static str;

  /// Every option in declaration order.
  fn all() -> Vec<Self>;

  /// Parse an option key.
  fn parse(value: &str) -> Result<Self>;

  /// The option following `self`, wrapping around at the end of the table.
  fn cycle(self) -> Self
  where
    Self: PartialEq,
  {
    let all = Self::all();
    let pos = all.iter().position(|c| *c == self).unwrap_or(0);
    all[(pos + 1) % all.len()]
  }
}

macro_rules! impl_choice {
  ($ty:ty, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
    impl Choice for $ty {
      const KIND: &'static str = $kind;

      fn value(self) -> &'static str { self.into() }

      fn label(self) -> &'static str {
        match self {
          $(Self::$variant => $label,)+
        }
      }

      fn all() -> Vec<Self> { <Self as IntoEnumIterator>::iter().collect() }

      fn parse(value: &str) -> Result<Self> {
        <Self as FromStr>::from_str(value).map_err(|_| Error::UnknownOption {
          kind:  $kind,
          value: value.to_owned(),
        })
      }
    }
  };
}

// ─── Aspect ──────────────────────────────────────────────────────────────────

/// The competency aspect shared by KUL, CPL and Bahan Kajian.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
  EnumIter, EnumString, IntoStaticStr,
)]
pub enum Aspect {
  /// Sikap.
  #[serde(rename = "S")]
  #[strum(serialize = "S")]
  Attitude,
  /// Pengetahuan.
  #[serde(rename = "P")]
  #[strum(serialize = "P")]
  Knowledge,
  /// Keterampilan Umum.
  #[serde(rename = "KU")]
  #[strum(serialize = "KU")]
  GeneralSkill,
  /// Keterampilan Khusus.
  #[serde(rename = "KK")]
  #[strum(serialize = "KK")]
  SpecificSkill,
}

impl_choice!(Aspect, "aspect", {
  Attitude      => "S - Sikap",
  Knowledge     => "P - Pengetahuan",
  GeneralSkill  => "KU - Keterampilan Umum",
  SpecificSkill => "KK - Keterampilan Khusus",
});

impl Aspect {
  /// The label without the code prefix, used for badges.
  pub fn short_label(self) -> &'static str {
    match self {
      Self::Attitude => "Sikap",
      Self::Knowledge => "Pengetahuan",
      Self::GeneralSkill => "Keterampilan Umum",
      Self::SpecificSkill => "Keterampilan Khusus",
    }
  }
}

// ─── Course nature ───────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
  EnumIter, EnumString, IntoStaticStr,
)]
pub enum CourseNature {
  #[default]
  #[serde(rename = "Wajib")]
  #[strum(serialize = "Wajib")]
  Mandatory,
  #[serde(rename = "Pilihan")]
  #[strum(serialize = "Pilihan")]
  Elective,
}

impl_choice!(CourseNature, "course nature", {
  Mandatory => "Wajib",
  Elective  => "Pilihan",
});

// ─── Semester ────────────────────────────────────────────────────────────────

/// Study semester, 1 through 8. Serialised as its number.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize,
  Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Semester {
  #[default]
  #[strum(serialize = "1")]
  One = 1,
  #[strum(serialize = "2")]
  Two = 2,
  #[strum(serialize = "3")]
  Three = 3,
  #[strum(serialize = "4")]
  Four = 4,
  #[strum(serialize = "5")]
  Five = 5,
  #[strum(serialize = "6")]
  Six = 6,
  #[strum(serialize = "7")]
  Seven = 7,
  #[strum(serialize = "8")]
  Eight = 8,
}

impl_choice!(Semester, "semester", {
  One   => "Semester 1",
  Two   => "Semester 2",
  Three => "Semester 3",
  Four  => "Semester 4",
  Five  => "Semester 5",
  Six   => "Semester 6",
  Seven => "Semester 7",
  Eight => "Semester 8",
});

impl Semester {
  pub fn number(self) -> u8 { self as u8 }
}

impl TryFrom<u8> for Semester {
  type Error = Error;

  fn try_from(n: u8) -> Result<Self> {
    Self::iter()
      .find(|s| s.number() == n)
      .ok_or(Error::SemesterOutOfRange(n))
  }
}

impl From<Semester> for u8 {
  fn from(s: Semester) -> Self { s.number() }
}

// ─── Curriculum status ───────────────────────────────────────────────────────

/// Filter key for the curriculum list; derived from the `is_active` flag.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter,
  EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CurriculumStatus {
  Active,
  Archive,
}

impl_choice!(CurriculumStatus, "curriculum status", {
  Active  => "Aktif",
  Archive => "Arsip",
});

impl CurriculumStatus {
  pub fn of(is_active: bool) -> Self {
    if is_active { Self::Active } else { Self::Archive }
  }
}

// ─── Learning plan status ────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
  EnumIter, EnumString, IntoStaticStr,
)]
pub enum PlanStatus {
  #[default]
  #[serde(rename = "Draft")]
  #[strum(serialize = "Draft")]
  Draft,
  #[serde(rename = "Menunggu Validasi")]
  #[strum(serialize = "Menunggu Validasi")]
  AwaitingValidation,
  #[serde(rename = "Terbit")]
  #[strum(serialize = "Terbit")]
  Published,
}

impl_choice!(PlanStatus, "plan status", {
  Draft              => "Draft",
  AwaitingValidation => "Menunggu Validasi",
  Published          => "Terbit",
});

// ─── Teaching method ─────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
  EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TeachingMethod {
  #[default]
  Ceramah,
  Diskusi,
  Praktikum,
  Presentasi,
  Project,
  StudiKasus,
  Demonstrasi,
  Collaborative,
  ProblemBased,
}

impl_choice!(TeachingMethod, "teaching method", {
  Ceramah       => "Ceramah",
  Diskusi       => "Diskusi",
  Praktikum     => "Praktikum",
  Presentasi    => "Presentasi",
  Project       => "Project Based Learning",
  StudiKasus    => "Studi Kasus",
  Demonstrasi   => "Demonstrasi",
  Collaborative => "Collaborative Learning",
  ProblemBased  => "Problem Based Learning",
});

// ─── Assessment form ─────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter,
  EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssessmentForm {
  Uts,
  Uas,
  Tugas,
  Kuis,
  Praktikum,
  Project,
  Presentasi,
  Portofolio,
  UnjukKerja,
}

impl_choice!(AssessmentForm, "assessment form", {
  Uts        => "UTS",
  Uas        => "UAS",
  Tugas      => "Tugas",
  Kuis       => "Kuis",
  Praktikum  => "Praktikum",
  Project    => "Project",
  Presentasi => "Presentasi",
  Portofolio => "Portofolio",
  UnjukKerja => "Unjuk Kerja",
});

// ─── KKNI level ──────────────────────────────────────────────────────────────

/// Indonesian qualifications framework level, 1 through 9.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
  EnumIter, EnumString, IntoStaticStr,
)]
pub enum KkniLevel {
  #[strum(serialize = "1")]
  L1,
  #[strum(serialize = "2")]
  L2,
  #[strum(serialize = "3")]
  L3,
  #[strum(serialize = "4")]
  L4,
  #[strum(serialize = "5")]
  L5,
  #[strum(serialize = "6")]
  L6,
  #[strum(serialize = "7")]
  L7,
  #[strum(serialize = "8")]
  L8,
  #[strum(serialize = "9")]
  L9,
}

impl_choice!(KkniLevel, "KKNI level", {
  L1 => "Level 1",
  L2 => "Level 2",
  L3 => "Level 3",
  L4 => "Level 4",
  L5 => "Level 5",
  L6 => "Level 6",
  L7 => "Level 7",
  L8 => "Level 8",
  L9 => "Level 9",
});

/// `(value, label)` pairs for a table, in declaration order.
pub fn option_pairs<C: Choice>() -> Vec<(&'static str, &'static str)> {
  C::all().into_iter().map(|c| (c.value(), c.label())).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn aspect_values_and_labels() {
    assert_eq!(Aspect::GeneralSkill.value(), "KU");
    assert_eq!(Aspect::GeneralSkill.label(), "KU - Keterampilan Umum");
    assert_eq!(Aspect::parse("KK").unwrap(), Aspect::SpecificSkill);
    assert_eq!(Aspect::all().len(), 4);
  }

  #[test]
  fn unknown_option_is_rejected() {
    let err = Aspect::parse("X").unwrap_err();
    assert!(matches!(err, Error::UnknownOption { kind: "aspect", .. }));
  }

  #[test]
  fn semester_round_trips_through_number() {
    let s = Semester::try_from(5).unwrap();
    assert_eq!(s, Semester::Five);
    assert_eq!(s.label(), "Semester 5");
    assert!(Semester::try_from(0).is_err());
    assert!(Semester::try_from(9).is_err());
    assert_eq!(serde_json::to_string(&Semester::Three).unwrap(), "3");
    let parsed: Semester = serde_json::from_str("8").unwrap();
    assert_eq!(parsed, Semester::Eight);
  }

  #[test]
  fn plan_status_uses_original_wording() {
    assert_eq!(PlanStatus::AwaitingValidation.value(), "Menunggu Validasi");
    assert_eq!(
      serde_json::to_string(&PlanStatus::Published).unwrap(),
      "\"Terbit\""
    );
  }

  #[test]
  fn snake_case_tables() {
    assert_eq!(TeachingMethod::ProblemBased.value(), "problem_based");
    assert_eq!(AssessmentForm::parse("unjuk_kerja").unwrap(), AssessmentForm::UnjukKerja);
    assert_eq!(option_pairs::<KkniLevel>()[8], ("9", "Level 9"));
  }

  #[test]
  fn cycle_wraps() {
    assert_eq!(Aspect::SpecificSkill.cycle(), Aspect::Attitude);
    assert_eq!(CourseNature::Mandatory.cycle(), CourseNature::Elective);
  }
}
