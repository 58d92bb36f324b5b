//! KKM (minimum passing score) classification of dashboard chart data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The pass threshold, 0 through 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Kkm(u8);

impl Kkm {
  pub const DEFAULT: Kkm = Kkm(70);
  pub const MAX: u8 = 100;

  /// Values above 100 are clamped.
  pub fn new(value: u8) -> Self { Self(value.min(Self::MAX)) }

  pub fn value(self) -> u8 { self.0 }

  /// Shift by `delta`, saturating at both ends.
  pub fn adjust(self, delta: i16) -> Self {
    let shifted = (i16::from(self.0) + delta).clamp(0, i16::from(Self::MAX));
    Self(u8::try_from(shifted).unwrap_or(Self::MAX))
  }

  pub fn classify(self, score: f64) -> PassStatus {
    if score >= f64::from(self.0) { PassStatus::Pass } else { PassStatus::Fail }
  }
}

impl Default for Kkm {
  fn default() -> Self { Self::DEFAULT }
}

impl From<u8> for Kkm {
  fn from(value: u8) -> Self { Self::new(value) }
}

impl From<Kkm> for u8 {
  fn from(kkm: Kkm) -> Self { kkm.0 }
}

impl fmt::Display for Kkm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassStatus {
  Pass,
  Fail,
}

impl PassStatus {
  pub fn label(self) -> &'static str {
    match self {
      Self::Pass => "Lulus",
      Self::Fail => "Tidak Lulus",
    }
  }

  pub fn is_pass(self) -> bool { self == Self::Pass }
}

// ─── Chart series ────────────────────────────────────────────────────────────

/// One bar of a dashboard chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
  pub code:  String,
  pub name:  String,
  /// Percentage attainment or average score, 0 to 100.
  pub score: f64,
}

impl ScorePoint {
  pub fn new(code: impl Into<String>, name: impl Into<String>, score: f64) -> Self {
    Self { code: code.into(), name: name.into(), score }
  }
}

/// Pass/fail tally over one series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
  pub passing: usize,
  pub failing: usize,
}

impl Tally {
  pub fn total(&self) -> usize { self.passing + self.failing }
}

/// Classify every point of `series`, keeping series order.
pub fn classify_series(
  series: &[ScorePoint],
  kkm: Kkm,
) -> impl Iterator<Item = (&ScorePoint, PassStatus)> {
  series.iter().map(move |p| (p, kkm.classify(p.score)))
}

pub fn tally(scores: impl IntoIterator<Item = f64>, kkm: Kkm) -> Tally {
  scores.into_iter().fold(Tally::default(), |mut t, s| {
    match kkm.classify(s) {
      PassStatus::Pass => t.passing += 1,
      PassStatus::Fail => t.failing += 1,
    }
    t
  })
}

// ─── Student results ─────────────────────────────────────────────────────────

/// One student's scores in one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResult {
  /// Student number (NIM).
  pub nim:         String,
  pub name:        String,
  pub cohort:      i32,
  pub course_code: String,
  /// Score per CPMK code, in CPMK order.
  pub scores:      Vec<(String, f64)>,
}

impl StudentResult {
  /// Unweighted mean of the CPMK scores; `0` when there are none.
  pub fn final_score(&self) -> f64 {
    if self.scores.is_empty() {
      return 0.0;
    }
    self.scores.iter().map(|(_, s)| s).sum::<f64>() / self.scores.len() as f64
  }
}

/// Students under the threshold in one course.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BelowThreshold {
  pub below: usize,
  pub total: usize,
}

impl BelowThreshold {
  pub fn measure<'a>(results: impl IntoIterator<Item = &'a StudentResult>, kkm: Kkm) -> Self {
    let t = tally(results.into_iter().map(StudentResult::final_score), kkm);
    Self { below: t.failing, total: t.total() }
  }

  /// Share of students below the threshold, in percent; `0` for an empty
  /// course.
  pub fn percent(&self) -> f64 {
    if self.total == 0 { 0.0 } else { self.below as f64 * 100.0 / self.total as f64 }
  }
}

/// Historical below-threshold counts for one course and term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
  pub course_code: String,
  /// `"Sem 1"`, `"Sem 2"`, …
  pub term:        String,
  /// Academic period, e.g. `"2021/2022 Ganjil"`.
  pub period:      String,
  pub below:       usize,
  pub total:       usize,
}

impl TermRecord {
  pub fn as_measure(&self) -> BelowThreshold {
    BelowThreshold { below: self.below, total: self.total }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn result(scores: &[f64]) -> StudentResult {
    StudentResult {
      nim:         "2021001".into(),
      name:        "Ahmad Fauzi".into(),
      cohort:      2021,
      course_code: "INF101".into(),
      scores:      scores
        .iter()
        .enumerate()
        .map(|(i, s)| (format!("CPMK{}", i + 1), *s))
        .collect(),
    }
  }

  #[test]
  fn boundary_score_passes() {
    let kkm = Kkm::default();
    assert_eq!(kkm.value(), 70);
    assert_eq!(kkm.classify(70.0), PassStatus::Pass);
    assert_eq!(kkm.classify(69.99), PassStatus::Fail);
    assert_eq!(PassStatus::Fail.label(), "Tidak Lulus");
  }

  #[test]
  fn threshold_is_clamped() {
    assert_eq!(Kkm::new(250).value(), 100);
    assert_eq!(Kkm::new(95).adjust(10).value(), 100);
    assert_eq!(Kkm::new(3).adjust(-5).value(), 0);
    assert_eq!(Kkm::default().adjust(5).value(), 75);
    let parsed: Kkm = serde_json::from_str("180").unwrap();
    assert_eq!(parsed.value(), 100);
  }

  #[test]
  fn series_tally_moves_with_threshold() {
    let series = [
      ScorePoint::new("PL-01", "Software Engineer", 85.0),
      ScorePoint::new("PL-02", "Data Analyst", 78.0),
      ScorePoint::new("PL-05", "Project Manager", 68.0),
    ];
    let scores = || series.iter().map(|p| p.score);
    assert_eq!(tally(scores(), Kkm::new(70)), Tally { passing: 2, failing: 1 });
    assert_eq!(tally(scores(), Kkm::new(80)), Tally { passing: 1, failing: 2 });
    let statuses: Vec<_> = classify_series(&series, Kkm::new(78)).map(|(_, s)| s).collect();
    assert_eq!(statuses, [PassStatus::Pass, PassStatus::Pass, PassStatus::Fail]);
  }

  #[test]
  fn final_score_is_mean_of_cpmk() {
    assert_eq!(result(&[85.0, 78.0, 82.0, 88.0]).final_score(), 83.25);
    assert_eq!(result(&[]).final_score(), 0.0);
  }

  #[test]
  fn below_threshold_counts_students() {
    let results = [result(&[68.0, 65.0, 70.0]), result(&[90.0]), result(&[72.0, 75.0])];
    let m = BelowThreshold::measure(&results, Kkm::default());
    assert_eq!(m, BelowThreshold { below: 1, total: 3 });
    assert!((m.percent() - 33.333).abs() < 0.01);
    assert_eq!(BelowThreshold::measure([], Kkm::default()).percent(), 0.0);
  }
}
