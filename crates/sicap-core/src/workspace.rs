//! [`Workspace`] — every entity store and relation matrix the dashboard
//! edits, plus the score data its charts read.

use tracing::{debug, info};

use crate::{
  entity::{
    CoreCompetency, Course, CourseOutcome, Curriculum, GraduateProfile, KnowledgeArea,
    LearningOutcome, LearningPlan, Lecturer, RecordId,
  },
  kkm::{BelowThreshold, Kkm, ScorePoint, StudentResult, TermRecord},
  matrix::RelationMatrix,
  options::PlanStatus,
  store::EntityStore,
};

// ─── Scores ──────────────────────────────────────────────────────────────────

/// Chart inputs for the dashboard. Read-only; nothing in the UI edits them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
  /// Attainment percentage per graduate profile.
  pub profile_attainment: Vec<ScorePoint>,
  /// Average score per knowledge area.
  pub area_averages:      Vec<ScorePoint>,
  /// Average score per course.
  pub course_averages:    Vec<ScorePoint>,
  pub results:            Vec<StudentResult>,
  pub history:            Vec<TermRecord>,
}

impl Scoreboard {
  /// Distinct students in first-seen order, as `(nim, name)`.
  pub fn students(&self) -> Vec<(&str, &str)> {
    let mut seen: Vec<(&str, &str)> = Vec::new();
    for r in &self.results {
      if !seen.iter().any(|(nim, _)| *nim == r.nim) {
        seen.push((r.nim.as_str(), r.name.as_str()));
      }
    }
    seen
  }

  /// One student's final score per course, as chart points.
  pub fn student_finals(&self, nim: &str) -> Vec<ScorePoint> {
    self
      .results
      .iter()
      .filter(|r| r.nim == nim)
      .map(|r| ScorePoint::new(r.course_code.as_str(), r.name.as_str(), r.final_score()))
      .collect()
  }

  /// Students whose NIM or name contains `query`, ignoring case. A blank
  /// query matches everyone.
  pub fn find_students(&self, query: &str) -> Vec<(&str, &str)> {
    let needle = query.trim().to_lowercase();
    self
      .students()
      .into_iter()
      .filter(|(nim, name)| nim.contains(&needle) || name.to_lowercase().contains(&needle))
      .collect()
  }

  /// Mean score per CPMK of one course over every student who took it, in
  /// CPMK order. Each point's name is the number of students averaged.
  pub fn course_outcome_averages(&self, course_code: &str) -> Vec<ScorePoint> {
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();
    for result in self.results.iter().filter(|r| r.course_code == course_code) {
      for (code, score) in &result.scores {
        match sums.iter_mut().find(|(c, ..)| *c == code.as_str()) {
          Some((_, sum, n)) => {
            *sum += score;
            *n += 1;
          }
          None => sums.push((code.as_str(), *score, 1)),
        }
      }
    }
    sums
      .into_iter()
      .map(|(code, sum, n)| ScorePoint::new(code, format!("{n} mahasiswa"), sum / n as f64))
      .collect()
  }

  pub fn below_threshold(&self, course_code: &str, kkm: Kkm) -> BelowThreshold {
    BelowThreshold::measure(self.results.iter().filter(|r| r.course_code == course_code), kkm)
  }

  /// Recorded term history for one course, oldest first.
  pub fn history_for<'a>(&'a self, course_code: &'a str) -> impl Iterator<Item = &'a TermRecord> {
    self.history.iter().filter(move |t| t.course_code == course_code)
  }
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
  pub curricula:        usize,
  /// Names of the active curricula, in list order.
  pub active_curricula: Vec<String>,
  pub profiles:         usize,
  pub outcomes:         usize,
  pub courses:          usize,
  pub course_outcomes:  usize,
  pub plans:            usize,
  pub published_plans:  usize,
  /// Plans not yet published.
  pub draft_plans:      usize,
}

// ─── Workspace ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Workspace {
  pub curricula:        EntityStore<Curriculum>,
  pub profiles:         EntityStore<GraduateProfile>,
  pub competencies:     EntityStore<CoreCompetency>,
  pub outcomes:         EntityStore<LearningOutcome>,
  pub knowledge_areas:  EntityStore<KnowledgeArea>,
  pub courses:          EntityStore<Course>,
  pub lecturers:        EntityStore<Lecturer>,
  pub course_outcomes:  EntityStore<CourseOutcome>,
  pub plans:            EntityStore<LearningPlan>,
  /// CPL → Bahan Kajian.
  pub outcome_areas:    RelationMatrix<RecordId, RecordId>,
  /// CPL → Profil Lulusan.
  pub outcome_profiles: RelationMatrix<RecordId, RecordId>,
  /// CPL → course code.
  pub outcome_courses:  RelationMatrix<RecordId, String>,
  pub scores:           Scoreboard,
}

impl Workspace {
  pub fn new() -> Self { Self::default() }

  /// Rebuild the CPL → course matrix from each course's own outcome list.
  /// Afterwards the two are edited independently.
  pub fn sync_outcome_courses(&mut self) {
    self.outcome_courses = RelationMatrix::from_pairs(
      self
        .courses
        .iter()
        .flat_map(|c| c.outcomes.iter().map(move |o| (*o, c.code.clone()))),
    );
  }

  // ── Curricula ─────────────────────────────────────────────────────────

  /// Flip a curriculum's active flag. Other curricula are untouched, so
  /// several may be active at once. Returns the new flag, or `None` if the
  /// id is unknown.
  pub fn toggle_active(&mut self, id: &RecordId) -> Option<bool> {
    let mut state = None;
    self.curricula.update(id, |c| {
      c.is_active = !c.is_active;
      state = Some(c.is_active);
    });
    if let Some(active) = state {
      info!(%id, active, "curriculum status toggled");
    }
    state
  }

  /// Append an inactive copy of a curriculum effective in `year`.
  pub fn duplicate_curriculum(&mut self, id: &RecordId, year: i32) -> Option<RecordId> {
    let copy = self.curricula.get(id)?.duplicate(year);
    let new_id = copy.id;
    info!(source = %id, copy = %new_id, "curriculum duplicated");
    self.curricula.add(copy);
    Some(new_id)
  }

  /// The curriculum new records are filed under: the first active one,
  /// falling back to the first in the list.
  pub fn primary_curriculum(&self) -> Option<RecordId> {
    self
      .curricula
      .iter()
      .find(|c| c.is_active)
      .or_else(|| self.curricula.iter().next())
      .map(|c| c.id)
  }

  // ── Matrices ──────────────────────────────────────────────────────────

  pub fn toggle_outcome_area(&mut self, outcome: RecordId, area: RecordId) -> bool {
    let linked = self.outcome_areas.toggle(outcome, area);
    debug!(%outcome, %area, linked, "CPL-BK cell toggled");
    linked
  }

  pub fn toggle_outcome_profile(&mut self, outcome: RecordId, profile: RecordId) -> bool {
    let linked = self.outcome_profiles.toggle(outcome, profile);
    debug!(%outcome, %profile, linked, "CPL-PL cell toggled");
    linked
  }

  pub fn toggle_outcome_course(&mut self, outcome: RecordId, course: &str) -> bool {
    let linked = self.outcome_courses.toggle(outcome, course.to_owned());
    debug!(%outcome, course, linked, "CPL-MK cell toggled");
    linked
  }

  /// Delete a learning outcome and its matrix rows. Course outcome lists
  /// keep the stale id and render it as missing.
  pub fn remove_outcome(&mut self, id: &RecordId) -> usize {
    let removed = self.outcomes.remove(id);
    if removed > 0 {
      let links = self.outcome_areas.clear_row(id)
        + self.outcome_profiles.clear_row(id)
        + self.outcome_courses.clear_row(id);
      info!(%id, links, "learning outcome removed");
    }
    removed
  }

  /// Delete a course and its column in the CPL → course matrix, so a new
  /// course reusing the code starts unlinked. CPMK and plans keep the code.
  pub fn remove_course(&mut self, code: &str) -> usize {
    let removed = self.courses.remove(code);
    if removed > 0 {
      let links = self.outcome_courses.clear_col(&code.to_owned());
      info!(code, links, "course removed");
    }
    removed
  }

  /// Delete a knowledge area and its CPL → Bahan Kajian column.
  pub fn remove_area(&mut self, id: &RecordId) -> usize {
    let removed = self.knowledge_areas.remove(id);
    if removed > 0 {
      let links = self.outcome_areas.clear_col(id);
      info!(%id, links, "knowledge area removed");
    }
    removed
  }

  /// Delete a graduate profile and its CPL → Profil Lulusan column.
  pub fn remove_profile(&mut self, id: &RecordId) -> usize {
    let removed = self.profiles.remove(id);
    if removed > 0 {
      let links = self.outcome_profiles.clear_col(id);
      info!(%id, links, "graduate profile removed");
    }
    removed
  }

  // ── Lookups ───────────────────────────────────────────────────────────

  pub fn outcome(&self, id: &RecordId) -> Option<&LearningOutcome> { self.outcomes.get(id) }

  pub fn knowledge_area(&self, id: &RecordId) -> Option<&KnowledgeArea> {
    self.knowledge_areas.get(id)
  }

  /// CPMK of one course, in list order.
  pub fn course_outcomes_of<'a>(
    &'a self,
    course_code: &'a str,
  ) -> impl Iterator<Item = &'a CourseOutcome> {
    self.course_outcomes.iter().filter(move |o| o.course_code == course_code)
  }

  /// Codes of a course's linked outcomes; ids that no longer resolve are
  /// skipped.
  pub fn outcome_codes(&self, course: &Course) -> Vec<&str> {
    course
      .outcomes
      .iter()
      .filter_map(|id| self.outcome(id))
      .map(|o| o.code.as_str())
      .collect()
  }

  /// `(code, aspect)` pairs for learning-outcome code suggestion.
  pub fn outcome_code_pairs(&self) -> impl Iterator<Item = (&str, crate::options::Aspect)> {
    self.outcomes.iter().map(|o| (o.code.as_str(), o.aspect))
  }

  pub fn competency_code_pairs(&self) -> impl Iterator<Item = (&str, crate::options::Aspect)> {
    self.competencies.iter().map(|k| (k.code.as_str(), k.aspect))
  }

  // ── Dashboard ─────────────────────────────────────────────────────────

  pub fn stats(&self) -> DashboardStats {
    let published = self.plans.iter().filter(|p| p.status == PlanStatus::Published).count();
    DashboardStats {
      curricula:        self.curricula.len(),
      active_curricula: self
        .curricula
        .iter()
        .filter(|c| c.is_active)
        .map(|c| c.name.clone())
        .collect(),
      profiles:         self.profiles.len(),
      outcomes:         self.outcomes.len(),
      courses:          self.courses.len(),
      course_outcomes:  self.course_outcomes.len(),
      plans:            self.plans.len(),
      published_plans:  published,
      draft_plans:      self.plans.len() - published,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    kkm::{PassStatus, classify_series},
    options::{Aspect, CourseNature, Semester},
  };

  fn curriculum(name: &str, year: i32, active: bool) -> Curriculum {
    Curriculum {
      id:             RecordId::new(),
      name:           name.into(),
      effective_year: year,
      is_active:      active,
      created_at:     None,
    }
  }

  fn outcome(code: &str) -> LearningOutcome {
    LearningOutcome {
      id:            RecordId::new(),
      code:          code.into(),
      description:   String::new(),
      aspect:        Aspect::Knowledge,
      curriculum_id: RecordId::new(),
    }
  }

  fn course(code: &str, outcomes: Vec<RecordId>) -> Course {
    Course {
      code: code.into(),
      name: "Pemrograman Dasar".into(),
      credits: 3,
      semester: Semester::One,
      nature: CourseNature::Mandatory,
      description: String::new(),
      curriculum_id: RecordId::new(),
      knowledge_area: None,
      outcomes,
      lecturers: Vec::new(),
    }
  }

  #[test]
  fn several_curricula_can_be_active() {
    let mut ws = Workspace::new();
    let a = curriculum("Kurikulum OBE 2024", 2024, true);
    let b = curriculum("Kurikulum 2016", 2016, false);
    let b_id = b.id;
    ws.curricula.add(a);
    ws.curricula.add(b);

    assert_eq!(ws.toggle_active(&b_id), Some(true));
    assert_eq!(ws.stats().active_curricula.len(), 2);
    assert_eq!(ws.toggle_active(&RecordId::new()), None);
  }

  #[test]
  fn duplicate_appends_inactive_copy() {
    let mut ws = Workspace::new();
    let original = curriculum("Kurikulum KKNI 2020", 2020, true);
    let id = original.id;
    ws.curricula.add(original);

    let copy_id = ws.duplicate_curriculum(&id, 2026).unwrap();
    let copy = ws.curricula.get(&copy_id).unwrap();
    assert_eq!(copy.name, "Kurikulum KKNI 2020 (Copy)");
    assert!(!copy.is_active);
    assert_eq!(ws.curricula.len(), 2);
    assert_eq!(ws.primary_curriculum(), Some(id));
  }

  #[test]
  fn course_matrix_seeds_from_course_outcomes() {
    let mut ws = Workspace::new();
    let p1 = outcome("P1");
    let ku1 = outcome("KU1");
    ws.courses.add(course("INF101", vec![p1.id, ku1.id]));
    ws.outcomes.add(p1.clone());
    ws.outcomes.add(ku1.clone());
    ws.sync_outcome_courses();

    assert!(ws.outcome_courses.has(&p1.id, &"INF101".to_owned()));
    assert_eq!(ws.outcome_courses.col_count(&"INF101".to_owned()), 2);
    assert_eq!(ws.outcome_codes(ws.courses.get("INF101").unwrap()), ["P1", "KU1"]);

    // The matrix is independent of the course record afterwards.
    assert!(!ws.toggle_outcome_course(p1.id, "INF101"));
    assert_eq!(ws.courses.get("INF101").unwrap().outcomes.len(), 2);
  }

  #[test]
  fn removing_outcome_clears_its_rows() {
    let mut ws = Workspace::new();
    let cpl = outcome("S1");
    let id = cpl.id;
    ws.outcomes.add(cpl);
    ws.toggle_outcome_area(id, RecordId::new());
    ws.toggle_outcome_profile(id, RecordId::new());
    ws.toggle_outcome_course(id, "INF402");

    assert_eq!(ws.remove_outcome(&id), 1);
    assert!(ws.outcome_areas.is_empty());
    assert!(ws.outcome_profiles.is_empty());
    assert!(ws.outcome_courses.is_empty());
    assert_eq!(ws.remove_outcome(&id), 0);
  }

  #[test]
  fn removing_course_clears_its_column() {
    let mut ws = Workspace::new();
    let a = outcome("P1");
    let b = outcome("P2");
    ws.toggle_outcome_course(a.id, "INF101");
    ws.toggle_outcome_course(b.id, "INF101");
    ws.toggle_outcome_course(b.id, "INF102");
    ws.courses.add(course("INF101", Vec::new()));

    assert_eq!(ws.remove_course("INF101"), 1);
    assert_eq!(ws.outcome_courses.col_count(&"INF101".to_owned()), 0);
    assert_eq!(ws.outcome_courses.total_count(), 1);

    // A new course reusing the code starts with no links.
    ws.courses.add(course("INF101", Vec::new()));
    assert!(!ws.outcome_courses.has(&a.id, &"INF101".to_owned()));
    assert_eq!(ws.remove_course("INF999"), 0);
  }

  #[test]
  fn removing_area_and_profile_clears_columns() {
    let mut ws = Workspace::new();
    let cpl = outcome("KU1");
    let area = KnowledgeArea {
      id:            RecordId::new(),
      code:          "BK-01".into(),
      name:          "Algoritma".into(),
      aspect:        Aspect::Knowledge,
      domain:        String::new(),
      curriculum_id: RecordId::new(),
    };
    let profile = GraduateProfile {
      id:            RecordId::new(),
      code:          "PL-01".into(),
      title:         "Software Engineer".into(),
      description:   String::new(),
      source:        String::new(),
      curriculum_id: RecordId::new(),
    };
    ws.toggle_outcome_area(cpl.id, area.id);
    ws.toggle_outcome_profile(cpl.id, profile.id);
    let (area_id, profile_id) = (area.id, profile.id);
    ws.knowledge_areas.add(area);
    ws.profiles.add(profile);

    assert_eq!(ws.remove_area(&area_id), 1);
    assert_eq!(ws.remove_profile(&profile_id), 1);
    assert!(ws.outcome_areas.is_empty());
    assert!(ws.outcome_profiles.is_empty());
  }

  fn result(nim: &str, name: &str, course: &str, scores: &[f64]) -> StudentResult {
    StudentResult {
      nim:         nim.into(),
      name:        name.into(),
      cohort:      2021,
      course_code: course.into(),
      scores:      scores
        .iter()
        .enumerate()
        .map(|(i, s)| (format!("CPMK{}", i + 1), *s))
        .collect(),
    }
  }

  fn scores() -> Scoreboard {
    Scoreboard {
      results: vec![
        result("2021001", "Ahmad Fauzi", "INF101", &[80.0, 60.0, 90.0]),
        result("2021002", "Budi Santoso", "INF101", &[70.0, 64.0]),
        result("2021002", "Budi Santoso", "INF102", &[50.0]),
        result("2022001", "Eka Putra", "INF102", &[100.0]),
      ],
      ..Scoreboard::default()
    }
  }

  #[test]
  fn cpmk_averages_per_course() {
    let averages = scores().course_outcome_averages("INF101");
    let codes: Vec<_> = averages.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes, ["CPMK1", "CPMK2", "CPMK3"]);
    assert_eq!(averages[0].score, 75.0);
    assert_eq!(averages[1].score, 62.0);
    assert_eq!(averages[2].score, 90.0);
    assert_eq!(averages[0].name, "2 mahasiswa");
    assert_eq!(averages[2].name, "1 mahasiswa");

    let statuses: Vec<_> = classify_series(&averages, Kkm::default()).map(|(_, s)| s).collect();
    assert_eq!(statuses, [PassStatus::Pass, PassStatus::Fail, PassStatus::Pass]);
    assert!(scores().course_outcome_averages("INF999").is_empty());
  }

  #[test]
  fn students_found_by_nim_or_name() {
    let board = scores();
    assert_eq!(board.find_students("").len(), 3);
    assert_eq!(board.find_students("budi"), [("2021002", "Budi Santoso")]);
    assert_eq!(board.find_students("2022"), [("2022001", "Eka Putra")]);
    assert!(board.find_students("zzz").is_empty());
  }
}
