//! Report tables for the "Laporan" page, derived from a [`Workspace`].

use std::collections::BTreeMap;

use crate::workspace::Workspace;

/// Which report table is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
  #[default]
  PerCourse,
  PerOutcome,
  PerYear,
}

impl ReportKind {
  pub const ALL: [ReportKind; 3] = [Self::PerCourse, Self::PerOutcome, Self::PerYear];

  pub fn label(self) -> &'static str {
    match self {
      Self::PerCourse => "Per Mata Kuliah",
      Self::PerOutcome => "Per CPL",
      Self::PerYear => "Per Tahun",
    }
  }

  pub fn next(self) -> Self {
    match self {
      Self::PerCourse => Self::PerOutcome,
      Self::PerOutcome => Self::PerYear,
      Self::PerYear => Self::PerCourse,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseRow {
  pub code:            String,
  pub name:            String,
  pub course_outcomes: usize,
  pub outcomes:        usize,
  /// Mean CPMK weight; `None` when the course has no CPMK.
  pub mean_weight:     Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRow {
  pub code:        String,
  pub description: String,
  /// Courses linked through the CPL → course matrix.
  pub courses:     usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRow {
  pub year:      i32,
  pub curricula: usize,
  pub outcomes:  usize,
  pub courses:   usize,
}

pub fn per_course(ws: &Workspace) -> Vec<CourseRow> {
  ws.courses
    .iter()
    .map(|course| {
      let weights: Vec<f64> = ws.course_outcomes_of(&course.code).map(|o| o.weight).collect();
      let mean_weight =
        (!weights.is_empty()).then(|| weights.iter().sum::<f64>() / weights.len() as f64);
      CourseRow {
        code: course.code.clone(),
        name: course.name.clone(),
        course_outcomes: weights.len(),
        outcomes: course.outcomes.len(),
        mean_weight,
      }
    })
    .collect()
}

pub fn per_outcome(ws: &Workspace) -> Vec<OutcomeRow> {
  ws.outcomes
    .iter()
    .map(|o| OutcomeRow {
      code:        o.code.clone(),
      description: o.description.clone(),
      courses:     ws.outcome_courses.row_count(&o.id),
    })
    .collect()
}

/// One row per effective year, oldest first.
pub fn per_year(ws: &Workspace) -> Vec<YearRow> {
  let mut years: BTreeMap<i32, YearRow> = BTreeMap::new();
  for c in &ws.curricula {
    let row = years.entry(c.effective_year).or_insert(YearRow {
      year:      c.effective_year,
      curricula: 0,
      outcomes:  0,
      courses:   0,
    });
    row.curricula += 1;
    row.outcomes += ws.outcomes.iter().filter(|o| o.curriculum_id == c.id).count();
    row.courses += ws.courses.iter().filter(|m| m.curriculum_id == c.id).count();
  }
  years.into_values().collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::{Course, CourseOutcome, Curriculum, LearningOutcome, RecordId},
    options::{Aspect, CourseNature, Semester},
  };

  fn workspace() -> Workspace {
    let mut ws = Workspace::new();
    let curriculum = Curriculum {
      id:             RecordId::new(),
      name:           "Kurikulum OBE 2024".into(),
      effective_year: 2024,
      is_active:      true,
      created_at:     None,
    };
    let cid = curriculum.id;
    ws.curricula.add(curriculum);
    ws.curricula.add(Curriculum {
      id:             RecordId::new(),
      name:           "Kurikulum KKNI 2020".into(),
      effective_year: 2020,
      is_active:      true,
      created_at:     None,
    });

    let cpl = LearningOutcome {
      id:            RecordId::new(),
      code:          "P1".into(),
      description:   "Menguasai konsep teoretis bidang TI".into(),
      aspect:        Aspect::Knowledge,
      curriculum_id: cid,
    };
    ws.courses.add(Course {
      code:           "INF101".into(),
      name:           "Pemrograman Dasar".into(),
      credits:        3,
      semester:       Semester::One,
      nature:         CourseNature::Mandatory,
      description:    String::new(),
      curriculum_id:  cid,
      knowledge_area: None,
      outcomes:       vec![cpl.id, RecordId::new()],
      lecturers:      Vec::new(),
    });
    for (code, weight) in [("M1", 20.0), ("M2", 30.0)] {
      ws.course_outcomes.add(CourseOutcome {
        id:          RecordId::new(),
        code:        code.into(),
        description: String::new(),
        weight,
        course_code: "INF101".into(),
        outcome_id:  cpl.id,
      });
    }
    ws.outcomes.add(cpl);
    ws.sync_outcome_courses();
    ws
  }

  #[test]
  fn course_rows_count_cpmk_and_cpl() {
    let ws = workspace();
    let rows = per_course(&ws);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].course_outcomes, 2);
    assert_eq!(rows[0].outcomes, 2);
    assert_eq!(rows[0].mean_weight, Some(25.0));
  }

  #[test]
  fn outcome_rows_follow_matrix() {
    let mut ws = workspace();
    assert_eq!(per_outcome(&ws)[0].courses, 1);
    let id = ws.outcomes.iter().next().unwrap().id;
    ws.toggle_outcome_course(id, "INF102");
    assert_eq!(per_outcome(&ws)[0].courses, 2);
  }

  #[test]
  fn year_rows_are_sorted() {
    let ws = workspace();
    let rows = per_year(&ws);
    let years: Vec<_> = rows.iter().map(|r| r.year).collect();
    assert_eq!(years, [2020, 2024]);
    assert_eq!(rows[1], YearRow { year: 2024, curricula: 1, outcomes: 1, courses: 1 });
    assert_eq!(rows[0].courses, 0);
  }

  #[test]
  fn kinds_cycle() {
    assert_eq!(ReportKind::PerYear.next(), ReportKind::PerCourse);
    assert_eq!(ReportKind::ALL.len(), 3);
  }
}
