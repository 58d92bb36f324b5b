//! Form drafts for each entity, and the code each create form suggests.

use chrono::{NaiveDate, Utc};

use crate::{
  entity::{
    CoreCompetency, Course, CourseOutcome, Curriculum, GraduateProfile, KnowledgeArea,
    LearningOutcome, LearningPlan, Lecturer, RecordId, Session,
  },
  form::{CodePattern, Draft, filled},
  options::{Aspect, Choice, CourseNature, PlanStatus, Semester},
};

fn optional(value: &str) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// ─── Curriculum ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CurriculumDraft {
  pub name:           String,
  pub effective_year: i32,
}

impl CurriculumDraft {
  pub fn new(year: i32) -> Self { Self { name: String::new(), effective_year: year } }
}

impl Draft for CurriculumDraft {
  type Record = Curriculum;

  fn from_record(r: &Curriculum) -> Self {
    Self { name: r.name.clone(), effective_year: r.effective_year }
  }

  fn is_complete(&self) -> bool { filled(&self.name) }

  fn create(&self) -> Curriculum {
    Curriculum {
      id:             RecordId::new(),
      name:           self.name.trim().to_owned(),
      effective_year: self.effective_year,
      is_active:      false,
      created_at:     Some(Utc::now()),
    }
  }

  fn apply(&self, r: &mut Curriculum) {
    r.name = self.name.trim().to_owned();
    r.effective_year = self.effective_year;
  }
}

// ─── Graduate profile ────────────────────────────────────────────────────────

pub const PROFILE_CODES: CodePattern<'static> = CodePattern::padded("PL-", 2);

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
  pub code:          String,
  pub title:         String,
  pub description:   String,
  pub source:        String,
  pub curriculum_id: RecordId,
}

impl ProfileDraft {
  /// A blank draft with the next free `PL-NN` code.
  pub fn suggested<'a>(
    existing: impl IntoIterator<Item = &'a GraduateProfile>,
    curriculum_id: RecordId,
  ) -> Self {
    Self {
      code: PROFILE_CODES.next_unused(existing.into_iter().map(|p| p.code.as_str())),
      title: String::new(),
      description: String::new(),
      source: String::new(),
      curriculum_id,
    }
  }
}

impl Draft for ProfileDraft {
  type Record = GraduateProfile;

  fn from_record(r: &GraduateProfile) -> Self {
    Self {
      code:          r.code.clone(),
      title:         r.title.clone(),
      description:   r.description.clone(),
      source:        r.source.clone(),
      curriculum_id: r.curriculum_id,
    }
  }

  fn is_complete(&self) -> bool { filled(&self.code) && filled(&self.title) }

  fn create(&self) -> GraduateProfile {
    GraduateProfile {
      id:            RecordId::new(),
      code:          self.code.trim().to_owned(),
      title:         self.title.trim().to_owned(),
      description:   self.description.trim().to_owned(),
      source:        self.source.trim().to_owned(),
      curriculum_id: self.curriculum_id,
    }
  }

  fn apply(&self, r: &mut GraduateProfile) {
    r.code = self.code.trim().to_owned();
    r.title = self.title.trim().to_owned();
    r.description = self.description.trim().to_owned();
    r.source = self.source.trim().to_owned();
  }
}

// ─── Aspect-tagged statements (KUL, CPL) ─────────────────────────────────────

/// Shared draft for core competencies and learning outcomes; both carry a
/// code, a description and an aspect.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementDraft {
  pub code:          String,
  pub description:   String,
  pub aspect:        Aspect,
  pub curriculum_id: RecordId,
}

/// The next free `<aspect><n>` code among `existing` codes of that aspect.
pub fn next_aspect_code<'a>(
  aspect: Aspect,
  existing: impl IntoIterator<Item = (&'a str, Aspect)>,
) -> String {
  CodePattern::plain(aspect.value()).next_unused(
    existing
      .into_iter()
      .filter(|(_, a)| *a == aspect)
      .map(|(code, _)| code),
  )
}

impl StatementDraft {
  pub fn suggested<'a>(
    aspect: Aspect,
    existing: impl IntoIterator<Item = (&'a str, Aspect)>,
    curriculum_id: RecordId,
  ) -> Self {
    Self {
      code: next_aspect_code(aspect, existing),
      description: String::new(),
      aspect,
      curriculum_id,
    }
  }

  /// Switch aspect; in create mode the code follows the new aspect.
  pub fn set_aspect<'a>(
    &mut self,
    aspect: Aspect,
    existing: impl IntoIterator<Item = (&'a str, Aspect)>,
    creating: bool,
  ) {
    self.aspect = aspect;
    if creating {
      self.code = next_aspect_code(aspect, existing);
    }
  }
}

macro_rules! statement_draft {
  ($draft:ident, $record:ty) => {
    /// Draft for an aspect-tagged statement.
    #[derive(Debug, Clone, PartialEq)]
    pub struct $draft(pub StatementDraft);

    impl Draft for $draft {
      type Record = $record;

      fn from_record(r: &$record) -> Self {
        Self(StatementDraft {
          code:          r.code.clone(),
          description:   r.description.clone(),
          aspect:        r.aspect,
          curriculum_id: r.curriculum_id,
        })
      }

      fn is_complete(&self) -> bool { filled(&self.0.code) && filled(&self.0.description) }

      fn create(&self) -> $record {
        <$record>::from_statement(RecordId::new(), &self.0)
      }

      fn apply(&self, r: &mut $record) {
        r.code = self.0.code.trim().to_owned();
        r.description = self.0.description.trim().to_owned();
        r.aspect = self.0.aspect;
      }
    }
  };
}

impl CoreCompetency {
  fn from_statement(id: RecordId, s: &StatementDraft) -> Self {
    Self {
      id,
      code: s.code.trim().to_owned(),
      description: s.description.trim().to_owned(),
      aspect: s.aspect,
      curriculum_id: s.curriculum_id,
    }
  }
}

impl LearningOutcome {
  fn from_statement(id: RecordId, s: &StatementDraft) -> Self {
    Self {
      id,
      code: s.code.trim().to_owned(),
      description: s.description.trim().to_owned(),
      aspect: s.aspect,
      curriculum_id: s.curriculum_id,
    }
  }
}

statement_draft!(CompetencyDraft, CoreCompetency);
statement_draft!(OutcomeDraft, LearningOutcome);

// ─── Knowledge area ──────────────────────────────────────────────────────────

pub const KNOWLEDGE_AREA_CODES: CodePattern<'static> = CodePattern::padded("BK-", 2);

#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeAreaDraft {
  pub code:          String,
  pub name:          String,
  pub aspect:        Aspect,
  pub domain:        String,
  pub curriculum_id: RecordId,
}

impl KnowledgeAreaDraft {
  pub fn suggested<'a>(
    existing: impl IntoIterator<Item = &'a KnowledgeArea>,
    curriculum_id: RecordId,
  ) -> Self {
    Self {
      code: KNOWLEDGE_AREA_CODES.next_unused(existing.into_iter().map(|k| k.code.as_str())),
      name: String::new(),
      aspect: Aspect::Knowledge,
      domain: String::new(),
      curriculum_id,
    }
  }
}

impl Draft for KnowledgeAreaDraft {
  type Record = KnowledgeArea;

  fn from_record(r: &KnowledgeArea) -> Self {
    Self {
      code:          r.code.clone(),
      name:          r.name.clone(),
      aspect:        r.aspect,
      domain:        r.domain.clone(),
      curriculum_id: r.curriculum_id,
    }
  }

  fn is_complete(&self) -> bool {
    filled(&self.code) && filled(&self.name) && filled(&self.domain)
  }

  fn create(&self) -> KnowledgeArea {
    KnowledgeArea {
      id:            RecordId::new(),
      code:          self.code.trim().to_owned(),
      name:          self.name.trim().to_owned(),
      aspect:        self.aspect,
      domain:        self.domain.trim().to_owned(),
      curriculum_id: self.curriculum_id,
    }
  }

  fn apply(&self, r: &mut KnowledgeArea) {
    r.code = self.code.trim().to_owned();
    r.name = self.name.trim().to_owned();
    r.aspect = self.aspect;
    r.domain = self.domain.trim().to_owned();
  }
}

// ─── Course ──────────────────────────────────────────────────────────────────

/// Minimum number of learning outcomes a course must link.
pub const MIN_COURSE_OUTCOMES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
  pub code:           String,
  pub name:           String,
  pub credits:        u8,
  pub semester:       Semester,
  pub nature:         CourseNature,
  pub description:    String,
  pub curriculum_id:  RecordId,
  pub knowledge_area: Option<RecordId>,
  pub outcomes:       Vec<RecordId>,
  pub lecturers:      Vec<RecordId>,
}

impl CourseDraft {
  pub fn new(curriculum_id: RecordId) -> Self {
    Self {
      code: String::new(),
      name: String::new(),
      credits: 3,
      semester: Semester::One,
      nature: CourseNature::Mandatory,
      description: String::new(),
      curriculum_id,
      knowledge_area: None,
      outcomes: Vec::new(),
      lecturers: Vec::new(),
    }
  }

  /// Add or remove `outcome` from the selection.
  pub fn toggle_outcome(&mut self, outcome: RecordId) {
    if let Some(pos) = self.outcomes.iter().position(|o| *o == outcome) {
      self.outcomes.remove(pos);
    } else {
      self.outcomes.push(outcome);
    }
  }

  pub fn toggle_lecturer(&mut self, lecturer: RecordId) {
    if let Some(pos) = self.lecturers.iter().position(|l| *l == lecturer) {
      self.lecturers.remove(pos);
    } else {
      self.lecturers.push(lecturer);
    }
  }
}

impl Draft for CourseDraft {
  type Record = Course;

  fn from_record(r: &Course) -> Self {
    Self {
      code:           r.code.clone(),
      name:           r.name.clone(),
      credits:        r.credits,
      semester:       r.semester,
      nature:         r.nature,
      description:    r.description.clone(),
      curriculum_id:  r.curriculum_id,
      knowledge_area: r.knowledge_area,
      outcomes:       r.outcomes.clone(),
      lecturers:      r.lecturers.clone(),
    }
  }

  fn is_complete(&self) -> bool {
    filled(&self.code)
      && filled(&self.name)
      && self.knowledge_area.is_some()
      && self.outcomes.len() >= MIN_COURSE_OUTCOMES
  }

  fn create(&self) -> Course {
    Course {
      code:           self.code.trim().to_owned(),
      name:           self.name.trim().to_owned(),
      credits:        self.credits,
      semester:       self.semester,
      nature:         self.nature,
      description:    self.description.trim().to_owned(),
      curriculum_id:  self.curriculum_id,
      knowledge_area: self.knowledge_area,
      outcomes:       self.outcomes.clone(),
      lecturers:      self.lecturers.clone(),
    }
  }

  fn apply(&self, r: &mut Course) {
    r.name = self.name.trim().to_owned();
    r.credits = self.credits;
    r.semester = self.semester;
    r.nature = self.nature;
    r.description = self.description.trim().to_owned();
    r.knowledge_area = self.knowledge_area;
    r.outcomes = self.outcomes.clone();
    r.lecturers = self.lecturers.clone();
  }
}

// ─── Lecturer ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LecturerDraft {
  pub nip:       String,
  pub name:      String,
  pub email:     String,
  pub specialty: String,
  pub rank:      String,
}

impl Draft for LecturerDraft {
  type Record = Lecturer;

  fn from_record(r: &Lecturer) -> Self {
    Self {
      nip:       r.nip.clone(),
      name:      r.name.clone(),
      email:     r.email.clone().unwrap_or_default(),
      specialty: r.specialty.clone().unwrap_or_default(),
      rank:      r.rank.clone().unwrap_or_default(),
    }
  }

  fn is_complete(&self) -> bool { filled(&self.nip) && filled(&self.name) }

  fn create(&self) -> Lecturer {
    let mut lecturer = Lecturer {
      id:        RecordId::new(),
      nip:       String::new(),
      name:      String::new(),
      email:     None,
      specialty: None,
      rank:      None,
    };
    self.apply(&mut lecturer);
    lecturer
  }

  fn apply(&self, r: &mut Lecturer) {
    r.nip = self.nip.trim().to_owned();
    r.name = self.name.trim().to_owned();
    r.email = optional(&self.email);
    r.specialty = optional(&self.specialty);
    r.rank = optional(&self.rank);
  }
}

// ─── Course outcome (CPMK) ───────────────────────────────────────────────────

pub const COURSE_OUTCOME_CODES: CodePattern<'static> = CodePattern::plain("M");

#[derive(Debug, Clone, PartialEq)]
pub struct CourseOutcomeDraft {
  pub code:        String,
  pub description: String,
  pub weight:      f64,
  pub course_code: String,
  pub outcome_id:  Option<RecordId>,
}

impl CourseOutcomeDraft {
  /// A blank draft for `course_code` with the next free `M<n>` code among
  /// that course's outcomes.
  pub fn suggested<'a>(
    course_code: &str,
    existing: impl IntoIterator<Item = &'a CourseOutcome>,
  ) -> Self {
    let code = COURSE_OUTCOME_CODES.next_unused(
      existing
        .into_iter()
        .filter(|o| o.course_code == course_code)
        .map(|o| o.code.as_str()),
    );
    Self {
      code,
      description: String::new(),
      weight: 0.0,
      course_code: course_code.to_owned(),
      outcome_id: None,
    }
  }
}

impl Draft for CourseOutcomeDraft {
  type Record = CourseOutcome;

  fn from_record(r: &CourseOutcome) -> Self {
    Self {
      code:        r.code.clone(),
      description: r.description.clone(),
      weight:      r.weight,
      course_code: r.course_code.clone(),
      outcome_id:  Some(r.outcome_id),
    }
  }

  fn is_complete(&self) -> bool {
    filled(&self.code)
      && filled(&self.description)
      && filled(&self.course_code)
      && self.outcome_id.is_some()
  }

  fn create(&self) -> CourseOutcome {
    CourseOutcome {
      id:          RecordId::new(),
      code:        self.code.trim().to_owned(),
      description: self.description.trim().to_owned(),
      weight:      self.weight,
      course_code: self.course_code.trim().to_owned(),
      outcome_id:  self.outcome_id.unwrap_or_default(),
    }
  }

  fn apply(&self, r: &mut CourseOutcome) {
    r.code = self.code.trim().to_owned();
    r.description = self.description.trim().to_owned();
    r.weight = self.weight;
    r.course_code = self.course_code.trim().to_owned();
    if let Some(id) = self.outcome_id {
      r.outcome_id = id;
    }
  }
}

// ─── Learning plan (RPS) ─────────────────────────────────────────────────────

/// Number of weekly meetings in a semester.
pub const WEEKS_PER_SEMESTER: u8 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanDraft {
  pub course_code:     String,
  pub version:         u32,
  pub drafted_on:      NaiveDate,
  pub lecturer:        String,
  pub coordinator:     String,
  pub head_of_program: String,
  pub status:          PlanStatus,
  pub sessions:        Vec<Session>,
}

impl PlanDraft {
  pub fn new(today: NaiveDate) -> Self {
    Self {
      course_code: String::new(),
      version: 1,
      drafted_on: today,
      lecturer: String::new(),
      coordinator: String::new(),
      head_of_program: String::new(),
      status: PlanStatus::Draft,
      sessions: Vec::new(),
    }
  }

  /// Append the next week with default values, up to 16 meetings.
  pub fn add_session(&mut self) -> bool {
    let next = self.sessions.iter().map(|s| s.week).max().unwrap_or(0) + 1;
    if next > WEEKS_PER_SEMESTER {
      return false;
    }
    self.sessions.push(Session {
      week:          next,
      learning_form: Default::default(),
      minutes:       150,
      assessment:    None,
      weight:        0.0,
    });
    true
  }
}

impl Draft for PlanDraft {
  type Record = LearningPlan;

  fn from_record(r: &LearningPlan) -> Self {
    Self {
      course_code:     r.course_code.clone(),
      version:         r.version,
      drafted_on:      r.drafted_on,
      lecturer:        r.lecturer.clone(),
      coordinator:     r.coordinator.clone().unwrap_or_default(),
      head_of_program: r.head_of_program.clone().unwrap_or_default(),
      status:          r.status,
      sessions:        r.sessions.clone(),
    }
  }

  fn is_complete(&self) -> bool { filled(&self.course_code) && filled(&self.lecturer) }

  fn create(&self) -> LearningPlan {
    let mut plan = LearningPlan {
      id:              RecordId::new(),
      course_code:     String::new(),
      version:         self.version,
      drafted_on:      self.drafted_on,
      lecturer:        String::new(),
      coordinator:     None,
      head_of_program: None,
      status:          self.status,
      sessions:        Vec::new(),
    };
    self.apply(&mut plan);
    plan
  }

  fn apply(&self, r: &mut LearningPlan) {
    r.course_code = self.course_code.trim().to_owned();
    r.version = self.version;
    r.drafted_on = self.drafted_on;
    r.lecturer = self.lecturer.trim().to_owned();
    r.coordinator = optional(&self.coordinator);
    r.head_of_program = optional(&self.head_of_program);
    r.status = self.status;
    r.sessions = self.sessions.clone();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    form::{FormDialog, Submission},
    store::EntityStore,
  };

  fn outcome(code: &str, aspect: Aspect) -> LearningOutcome {
    LearningOutcome {
      id: RecordId::new(),
      code: code.into(),
      description: "x".into(),
      aspect,
      curriculum_id: RecordId::new(),
    }
  }

  #[test]
  fn aspect_code_skips_existing_codes_of_that_aspect() {
    let list = [
      outcome("S1", Aspect::Attitude),
      outcome("S2", Aspect::Attitude),
      outcome("P1", Aspect::Knowledge),
    ];
    let pairs = || list.iter().map(|o| (o.code.as_str(), o.aspect));
    assert_eq!(next_aspect_code(Aspect::Attitude, pairs()), "S3");
    assert_eq!(next_aspect_code(Aspect::Knowledge, pairs()), "P2");
    assert_eq!(next_aspect_code(Aspect::SpecificSkill, pairs()), "KK1");
  }

  #[test]
  fn switching_aspect_in_create_mode_resuggests() {
    let list = [outcome("KU1", Aspect::GeneralSkill)];
    let pairs = || list.iter().map(|o| (o.code.as_str(), o.aspect));
    let mut draft = StatementDraft::suggested(Aspect::Attitude, pairs(), RecordId::new());
    assert_eq!(draft.code, "S1");
    draft.set_aspect(Aspect::GeneralSkill, pairs(), true);
    assert_eq!(draft.code, "KU2");
    draft.set_aspect(Aspect::Attitude, pairs(), false);
    assert_eq!(draft.code, "KU2");
    assert_eq!(draft.aspect, Aspect::Attitude);
  }

  #[test]
  fn course_needs_one_area_and_two_outcomes() {
    let mut draft = CourseDraft::new(RecordId::new());
    draft.code = "INF999".into();
    draft.name = "Kapita Selekta".into();
    assert!(!draft.is_complete());

    draft.knowledge_area = Some(RecordId::new());
    let a = RecordId::new();
    draft.toggle_outcome(a);
    assert!(!draft.is_complete());
    draft.toggle_outcome(RecordId::new());
    assert!(draft.is_complete());
    draft.toggle_outcome(a);
    assert!(!draft.is_complete());
  }

  #[test]
  fn profile_suggestion_is_padded() {
    let curriculum = RecordId::new();
    let existing = [ProfileDraft {
      code:          "PL-01".into(),
      title:         "Software Engineer".into(),
      description:   String::new(),
      source:        String::new(),
      curriculum_id: curriculum,
    }
    .create()];
    let draft = ProfileDraft::suggested(&existing, curriculum);
    assert_eq!(draft.code, "PL-02");
    assert!(!draft.is_complete());
  }

  #[test]
  fn lecturer_blank_optionals_become_none() {
    let draft = LecturerDraft {
      nip: " 1980 ".into(),
      name: "Dr. Ahmad".into(),
      email: "  ".into(),
      specialty: "Basis Data".into(),
      rank: String::new(),
    };
    let lecturer = draft.create();
    assert_eq!(lecturer.nip, "1980");
    assert_eq!(lecturer.email, None);
    assert_eq!(lecturer.specialty.as_deref(), Some("Basis Data"));
  }

  #[test]
  fn plan_sessions_stop_at_sixteen() {
    let mut draft = PlanDraft::new(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    for _ in 0..WEEKS_PER_SEMESTER {
      assert!(draft.add_session());
    }
    assert!(!draft.add_session());
    assert_eq!(draft.sessions.last().unwrap().week, 16);
  }

  #[test]
  fn curriculum_dialog_round_trip() {
    let mut store = EntityStore::new();
    let mut dialog = FormDialog::<CurriculumDraft>::default();
    dialog.open_create(CurriculumDraft { name: "Kurikulum 2026".into(), effective_year: 2026 });
    assert_eq!(dialog.submit(&mut store), Submission::Created);
    let created = store.iter().next().unwrap().clone();
    assert!(!created.is_active);

    dialog.open_edit(&created);
    dialog.draft_mut().unwrap().effective_year = 2027;
    assert_eq!(dialog.submit(&mut store), Submission::Updated(1));
    assert_eq!(store.get(&created.id).unwrap().effective_year, 2027);
  }
}
