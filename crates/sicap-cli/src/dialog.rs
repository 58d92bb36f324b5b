//! Modal form state for the terminal: which entity form is open, which field
//! has focus, and how keystrokes edit each draft.

use sicap_core::{
  draft::{
    CompetencyDraft, CourseDraft, CourseOutcomeDraft, CurriculumDraft, KnowledgeAreaDraft,
    LecturerDraft, OutcomeDraft, PlanDraft, ProfileDraft, StatementDraft,
  },
  entity::{
    CoreCompetency, Course, CourseOutcome, Curriculum, GraduateProfile, KnowledgeArea,
    LearningOutcome, LearningPlan, Lecturer, RecordId,
  },
  form::{DeletePrompt, Draft, FormDialog, Submission},
  options::{Choice, TeachingMethod},
  workspace::Workspace,
};
use tracing::info;

// ─── Fields ───────────────────────────────────────────────────────────────────

/// One keystroke, already translated from the terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
  Char(char),
  Backspace,
  Next,
  Prev,
  Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
  pub label:    String,
  pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
  /// Free text; typing appends.
  Text,
  /// Left/right steps through a closed set or a number.
  Cycle,
  /// Several options; left/right moves the pick cursor, space toggles.
  Picks(Vec<Pick>),
  /// Weekly sessions; `+` appends, `-` drops the last.
  Sessions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
  pub label:    &'static str,
  pub value:    String,
  pub required: bool,
  pub kind:     FieldKind,
}

impl Field {
  fn text(label: &'static str, value: &str, required: bool) -> Self {
    Self { label, value: value.to_owned(), required, kind: FieldKind::Text }
  }

  fn cycle(label: &'static str, value: impl Into<String>, required: bool) -> Self {
    Self { label, value: value.into(), required, kind: FieldKind::Cycle }
  }

  fn picks(label: &'static str, picks: Vec<Pick>, required: bool) -> Self {
    let value = picks.iter().filter(|p| p.selected).count().to_string();
    Self { label, value, required, kind: FieldKind::Picks(picks) }
  }
}

/// Keystroke editing for one draft type.
pub trait Editable: Draft {
  fn fields(&self, ws: &Workspace) -> Vec<Field>;

  /// Apply `input` to field `field`. `pick` is the pick cursor for
  /// [`FieldKind::Picks`] fields.
  fn input(&mut self, field: usize, pick: usize, input: Input, ws: &Workspace, creating: bool);
}

fn edit_text(value: &mut String, input: Input) {
  match input {
    Input::Char(c) => value.push(c),
    Input::Backspace => {
      value.pop();
    }
    _ => {}
  }
}

fn edit_number(value: u32, input: Input, max: u32) -> u32 {
  match input {
    Input::Char(c) => match c.to_digit(10) {
      Some(d) => value.saturating_mul(10).saturating_add(d).min(max),
      None => value,
    },
    Input::Backspace => value / 10,
    Input::Next => value.saturating_add(1).min(max),
    Input::Prev => value.saturating_sub(1),
    Input::Toggle => value,
  }
}

fn edit_choice<C: Choice + PartialEq>(value: C, input: Input) -> C {
  match input {
    Input::Next | Input::Toggle => value.cycle(),
    Input::Prev => {
      let all = C::all();
      let pos = all.iter().position(|c| *c == value).unwrap_or(0);
      all[(pos + all.len() - 1) % all.len()]
    }
    _ => value,
  }
}

/// Step `current` through `options`, starting from the first when unset.
fn edit_ref<T: PartialEq + Clone>(current: Option<&T>, options: &[T], input: Input) -> Option<T> {
  if options.is_empty() {
    return current.cloned();
  }
  let pos = current.and_then(|c| options.iter().position(|o| o == c));
  let next = match (input, pos) {
    (Input::Next | Input::Toggle, Some(p)) => (p + 1) % options.len(),
    (Input::Prev, Some(p)) => (p + options.len() - 1) % options.len(),
    (Input::Prev, None) => options.len() - 1,
    (Input::Next | Input::Toggle, None) => 0,
    _ => return current.cloned(),
  };
  Some(options[next].clone())
}

fn outcome_picks(ws: &Workspace, selected: &[RecordId]) -> Vec<Pick> {
  ws.outcomes
    .iter()
    .map(|o| Pick { label: o.code.clone(), selected: selected.contains(&o.id) })
    .collect()
}

fn course_codes(ws: &Workspace) -> Vec<String> { ws.courses.iter().map(|c| c.code.clone()).collect() }

// ─── Editable impls ───────────────────────────────────────────────────────────

impl Editable for CurriculumDraft {
  fn fields(&self, _ws: &Workspace) -> Vec<Field> {
    vec![
      Field::text("Nama Kurikulum", &self.name, true),
      Field::cycle("Tahun Berlaku", self.effective_year.to_string(), true),
    ]
  }

  fn input(&mut self, field: usize, _pick: usize, input: Input, _ws: &Workspace, _creating: bool) {
    match field {
      0 => edit_text(&mut self.name, input),
      1 => {
        let year = u32::try_from(self.effective_year).unwrap_or_default();
        self.effective_year = i32::try_from(edit_number(year, input, 9999)).unwrap_or(i32::MAX);
      }
      _ => {}
    }
  }
}

impl Editable for ProfileDraft {
  fn fields(&self, _ws: &Workspace) -> Vec<Field> {
    vec![
      Field::text("Kode", &self.code, true),
      Field::text("Profil Lulusan", &self.title, true),
      Field::text("Deskripsi", &self.description, false),
      Field::text("Sumber", &self.source, false),
    ]
  }

  fn input(&mut self, field: usize, _pick: usize, input: Input, _ws: &Workspace, _creating: bool) {
    match field {
      0 => edit_text(&mut self.code, input),
      1 => edit_text(&mut self.title, input),
      2 => edit_text(&mut self.description, input),
      3 => edit_text(&mut self.source, input),
      _ => {}
    }
  }
}

fn statement_fields(s: &StatementDraft) -> Vec<Field> {
  vec![
    Field::cycle("Aspek", s.aspect.label(), true),
    Field::text("Kode", &s.code, true),
    Field::text("Deskripsi", &s.description, true),
  ]
}

fn statement_input<'a>(
  s: &mut StatementDraft,
  field: usize,
  input: Input,
  existing: impl IntoIterator<Item = (&'a str, sicap_core::options::Aspect)>,
  creating: bool,
) {
  match field {
    0 => {
      let aspect = edit_choice(s.aspect, input);
      if aspect != s.aspect {
        s.set_aspect(aspect, existing, creating);
      }
    }
    1 => edit_text(&mut s.code, input),
    2 => edit_text(&mut s.description, input),
    _ => {}
  }
}

impl Editable for CompetencyDraft {
  fn fields(&self, _ws: &Workspace) -> Vec<Field> { statement_fields(&self.0) }

  fn input(&mut self, field: usize, _pick: usize, input: Input, ws: &Workspace, creating: bool) {
    statement_input(&mut self.0, field, input, ws.competency_code_pairs(), creating);
  }
}

impl Editable for OutcomeDraft {
  fn fields(&self, _ws: &Workspace) -> Vec<Field> { statement_fields(&self.0) }

  fn input(&mut self, field: usize, _pick: usize, input: Input, ws: &Workspace, creating: bool) {
    statement_input(&mut self.0, field, input, ws.outcome_code_pairs(), creating);
  }
}

impl Editable for KnowledgeAreaDraft {
  fn fields(&self, _ws: &Workspace) -> Vec<Field> {
    vec![
      Field::text("Kode", &self.code, true),
      Field::text("Nama Bahan Kajian", &self.name, true),
      Field::cycle("Aspek", self.aspect.label(), true),
      Field::text("Bidang Ilmu", &self.domain, true),
    ]
  }

  fn input(&mut self, field: usize, _pick: usize, input: Input, _ws: &Workspace, _creating: bool) {
    match field {
      0 => edit_text(&mut self.code, input),
      1 => edit_text(&mut self.name, input),
      2 => self.aspect = edit_choice(self.aspect, input),
      3 => edit_text(&mut self.domain, input),
      _ => {}
    }
  }
}

impl Editable for CourseDraft {
  fn fields(&self, ws: &Workspace) -> Vec<Field> {
    let area = self
      .knowledge_area
      .and_then(|id| ws.knowledge_area(&id))
      .map(|a| format!("{} {}", a.code, a.name))
      .unwrap_or_default();
    let lecturers = ws
      .lecturers
      .iter()
      .map(|l| Pick { label: l.name.clone(), selected: self.lecturers.contains(&l.id) })
      .collect();
    vec![
      Field::text("Kode MK", &self.code, true),
      Field::text("Nama Mata Kuliah", &self.name, true),
      Field::cycle("SKS", self.credits.to_string(), false),
      Field::cycle("Semester", self.semester.label(), false),
      Field::cycle("Sifat", self.nature.label(), false),
      Field::text("Deskripsi", &self.description, false),
      Field::cycle("Bahan Kajian", area, true),
      Field::picks("CPL (min. 2)", outcome_picks(ws, &self.outcomes), true),
      Field::picks("Dosen Pengampu", lecturers, false),
    ]
  }

  fn input(&mut self, field: usize, pick: usize, input: Input, ws: &Workspace, creating: bool) {
    match field {
      // The course code is the key; it is fixed once the course exists.
      0 if creating => edit_text(&mut self.code, input),
      1 => edit_text(&mut self.name, input),
      2 => {
        let credits = edit_number(u32::from(self.credits), input, 24);
        self.credits = u8::try_from(credits).unwrap_or(u8::MAX);
      }
      3 => self.semester = edit_choice(self.semester, input),
      4 => self.nature = edit_choice(self.nature, input),
      5 => edit_text(&mut self.description, input),
      6 => {
        let ids: Vec<RecordId> = ws.knowledge_areas.iter().map(|a| a.id).collect();
        self.knowledge_area = edit_ref(self.knowledge_area.as_ref(), &ids, input);
      }
      7 if input == Input::Toggle => {
        if let Some(o) = ws.outcomes.as_slice().get(pick) {
          self.toggle_outcome(o.id);
        }
      }
      8 if input == Input::Toggle => {
        if let Some(l) = ws.lecturers.as_slice().get(pick) {
          self.toggle_lecturer(l.id);
        }
      }
      _ => {}
    }
  }
}

impl Editable for LecturerDraft {
  fn fields(&self, _ws: &Workspace) -> Vec<Field> {
    vec![
      Field::text("NIP", &self.nip, true),
      Field::text("Nama", &self.name, true),
      Field::text("Email", &self.email, false),
      Field::text("Bidang Keahlian", &self.specialty, false),
      Field::text("Jabatan Fungsional", &self.rank, false),
    ]
  }

  fn input(&mut self, field: usize, _pick: usize, input: Input, _ws: &Workspace, _creating: bool) {
    match field {
      0 => edit_text(&mut self.nip, input),
      1 => edit_text(&mut self.name, input),
      2 => edit_text(&mut self.email, input),
      3 => edit_text(&mut self.specialty, input),
      4 => edit_text(&mut self.rank, input),
      _ => {}
    }
  }
}

impl Editable for CourseOutcomeDraft {
  fn fields(&self, ws: &Workspace) -> Vec<Field> {
    let outcome = self
      .outcome_id
      .and_then(|id| ws.outcome(&id))
      .map(|o| o.code.clone())
      .unwrap_or_default();
    vec![
      Field::cycle("Mata Kuliah", self.course_code.clone(), true),
      Field::text("Kode CPMK", &self.code, true),
      Field::text("Deskripsi", &self.description, true),
      Field::cycle("Bobot (%)", format!("{:.0}", self.weight), false),
      Field::cycle("CPL", outcome, true),
    ]
  }

  fn input(&mut self, field: usize, _pick: usize, input: Input, ws: &Workspace, creating: bool) {
    match field {
      0 => {
        let codes = course_codes(ws);
        if let Some(code) = edit_ref(Some(&self.course_code), &codes, input) {
          if creating && code != self.course_code {
            let fresh = CourseOutcomeDraft::suggested(&code, &ws.course_outcomes);
            self.code = fresh.code;
          }
          self.course_code = code;
        }
      }
      1 => edit_text(&mut self.code, input),
      2 => edit_text(&mut self.description, input),
      3 => {
        // Whole percentages only.
        let weight = edit_number(self.weight.round().clamp(0.0, 100.0) as u32, input, 100);
        self.weight = f64::from(weight);
      }
      4 => {
        let ids: Vec<RecordId> = ws.outcomes.iter().map(|o| o.id).collect();
        self.outcome_id = edit_ref(self.outcome_id.as_ref(), &ids, input);
      }
      _ => {}
    }
  }
}

impl Editable for PlanDraft {
  fn fields(&self, _ws: &Workspace) -> Vec<Field> {
    let sessions = match self.sessions.last() {
      Some(s) => format!(
        "{} pertemuan, terakhir minggu {} ({})",
        self.sessions.len(),
        s.week,
        s.learning_form.label()
      ),
      None => "belum ada pertemuan".into(),
    };
    vec![
      Field::cycle("Mata Kuliah", self.course_code.clone(), true),
      Field::cycle("Versi", self.version.to_string(), false),
      Field::cycle("Tanggal Penyusunan", self.drafted_on.format("%Y-%m-%d").to_string(), false),
      Field::text("Dosen Pengembang", &self.lecturer, true),
      Field::text("Koordinator MK", &self.coordinator, false),
      Field::text("Ketua Program Studi", &self.head_of_program, false),
      Field::cycle("Status", self.status.label(), false),
      Field { label: "Pertemuan", value: sessions, required: false, kind: FieldKind::Sessions },
    ]
  }

  fn input(&mut self, field: usize, _pick: usize, input: Input, ws: &Workspace, _creating: bool) {
    match field {
      0 => {
        if let Some(code) = edit_ref(Some(&self.course_code), &course_codes(ws), input) {
          self.course_code = code;
        }
      }
      1 => self.version = edit_number(self.version, input, 99).max(1),
      2 => {
        let day = chrono::Days::new(1);
        let moved = match input {
          Input::Next => self.drafted_on.checked_add_days(day),
          Input::Prev => self.drafted_on.checked_sub_days(day),
          _ => None,
        };
        if let Some(date) = moved {
          self.drafted_on = date;
        }
      }
      3 => edit_text(&mut self.lecturer, input),
      4 => edit_text(&mut self.coordinator, input),
      5 => edit_text(&mut self.head_of_program, input),
      6 => self.status = edit_choice(self.status, input),
      7 => match input {
        Input::Char('+') => {
          self.add_session();
        }
        Input::Char('-') | Input::Backspace => {
          self.sessions.pop();
        }
        Input::Next | Input::Prev => {
          if let Some(last) = self.sessions.last_mut() {
            last.learning_form = edit_choice::<TeachingMethod>(last.learning_form, input);
          }
        }
        _ => {}
      },
      _ => {}
    }
  }
}

// ─── Open form ────────────────────────────────────────────────────────────────

/// The one form that can be open at a time.
pub enum Form {
  Curriculum(FormDialog<CurriculumDraft>),
  Profile(FormDialog<ProfileDraft>),
  Competency(FormDialog<CompetencyDraft>),
  Outcome(FormDialog<OutcomeDraft>),
  KnowledgeArea(FormDialog<KnowledgeAreaDraft>),
  Course(FormDialog<CourseDraft>),
  Lecturer(FormDialog<LecturerDraft>),
  CourseOutcome(FormDialog<CourseOutcomeDraft>),
  Plan(FormDialog<PlanDraft>),
}

macro_rules! with_form {
  ($form:expr, $d:ident => $body:expr) => {
    match $form {
      Form::Curriculum($d) => $body,
      Form::Profile($d) => $body,
      Form::Competency($d) => $body,
      Form::Outcome($d) => $body,
      Form::KnowledgeArea($d) => $body,
      Form::Course($d) => $body,
      Form::Lecturer($d) => $body,
      Form::CourseOutcome($d) => $body,
      Form::Plan($d) => $body,
    }
  };
}

fn created<D: Draft>(draft: D) -> FormDialog<D> {
  let mut dialog = FormDialog::default();
  dialog.open_create(draft);
  dialog
}

fn editing<D: Draft>(record: &D::Record) -> FormDialog<D> {
  let mut dialog = FormDialog::default();
  dialog.open_edit(record);
  dialog
}

impl Form {
  pub fn create_curriculum(draft: CurriculumDraft) -> Self { Self::Curriculum(created(draft)) }
  pub fn create_profile(draft: ProfileDraft) -> Self { Self::Profile(created(draft)) }
  pub fn create_competency(draft: CompetencyDraft) -> Self { Self::Competency(created(draft)) }
  pub fn create_outcome(draft: OutcomeDraft) -> Self { Self::Outcome(created(draft)) }
  pub fn create_area(draft: KnowledgeAreaDraft) -> Self { Self::KnowledgeArea(created(draft)) }
  pub fn create_course(draft: CourseDraft) -> Self { Self::Course(created(draft)) }
  pub fn create_lecturer(draft: LecturerDraft) -> Self { Self::Lecturer(created(draft)) }
  pub fn create_course_outcome(draft: CourseOutcomeDraft) -> Self {
    Self::CourseOutcome(created(draft))
  }
  pub fn create_plan(draft: PlanDraft) -> Self { Self::Plan(created(draft)) }

  pub fn edit_curriculum(r: &Curriculum) -> Self { Self::Curriculum(editing(r)) }
  pub fn edit_profile(r: &GraduateProfile) -> Self { Self::Profile(editing(r)) }
  pub fn edit_competency(r: &CoreCompetency) -> Self { Self::Competency(editing(r)) }
  pub fn edit_outcome(r: &LearningOutcome) -> Self { Self::Outcome(editing(r)) }
  pub fn edit_area(r: &KnowledgeArea) -> Self { Self::KnowledgeArea(editing(r)) }
  pub fn edit_course(r: &Course) -> Self { Self::Course(editing(r)) }
  pub fn edit_lecturer(r: &Lecturer) -> Self { Self::Lecturer(editing(r)) }
  pub fn edit_course_outcome(r: &CourseOutcome) -> Self { Self::CourseOutcome(editing(r)) }
  pub fn edit_plan(r: &LearningPlan) -> Self { Self::Plan(editing(r)) }

  fn noun(&self) -> &'static str {
    match self {
      Self::Curriculum(_) => "Kurikulum",
      Self::Profile(_) => "Profil Lulusan",
      Self::Competency(_) => "Kompetensi Utama",
      Self::Outcome(_) => "CPL",
      Self::KnowledgeArea(_) => "Bahan Kajian",
      Self::Course(_) => "Mata Kuliah",
      Self::Lecturer(_) => "Dosen",
      Self::CourseOutcome(_) => "CPMK",
      Self::Plan(_) => "RPS",
    }
  }

  pub fn title(&self) -> String {
    let verb = if self.is_editing() { "Edit" } else { "Tambah" };
    format!("{verb} {}", self.noun())
  }

  pub fn is_editing(&self) -> bool { with_form!(self, d => d.is_editing()) }

  pub fn can_submit(&self) -> bool { with_form!(self, d => d.can_submit()) }

  pub fn fields(&self, ws: &Workspace) -> Vec<Field> {
    with_form!(self, d => d.draft().map(|draft| draft.fields(ws)).unwrap_or_default())
  }

  fn input(&mut self, field: usize, pick: usize, input: Input, ws: &Workspace) {
    let creating = !self.is_editing();
    with_form!(self, d => {
      if let Some(draft) = d.draft_mut() {
        draft.input(field, pick, input, ws, creating);
      }
    })
  }

  /// Commit to the matching store in `ws`.
  pub fn submit(&mut self, ws: &mut Workspace) -> Submission {
    let outcome = match self {
      Self::Curriculum(d) => d.submit(&mut ws.curricula),
      Self::Profile(d) => d.submit(&mut ws.profiles),
      Self::Competency(d) => d.submit(&mut ws.competencies),
      Self::Outcome(d) => d.submit(&mut ws.outcomes),
      Self::KnowledgeArea(d) => d.submit(&mut ws.knowledge_areas),
      Self::Course(d) => d.submit(&mut ws.courses),
      Self::Lecturer(d) => d.submit(&mut ws.lecturers),
      Self::CourseOutcome(d) => d.submit(&mut ws.course_outcomes),
      Self::Plan(d) => d.submit(&mut ws.plans),
    };
    if matches!(outcome, Submission::Created | Submission::Updated(_)) {
      info!(form = self.noun(), ?outcome, "form committed");
    }
    outcome
  }
}

// ─── Dialog ───────────────────────────────────────────────────────────────────

/// An open form plus its focus state.
pub struct Dialog {
  pub form:  Form,
  /// Focused field index.
  pub field: usize,
  /// Cursor within a [`FieldKind::Picks`] field.
  pub pick:  usize,
}

impl Dialog {
  pub fn new(form: Form) -> Self { Self { form, field: 0, pick: 0 } }

  pub fn focus_next(&mut self, ws: &Workspace) {
    let count = self.form.fields(ws).len().max(1);
    self.field = (self.field + 1) % count;
    self.pick = 0;
  }

  pub fn focus_prev(&mut self, ws: &Workspace) {
    let count = self.form.fields(ws).len().max(1);
    self.field = (self.field + count - 1) % count;
    self.pick = 0;
  }

  /// Route `input` to the focused field. Left/right on a pick list moves
  /// the pick cursor instead of editing.
  pub fn input(&mut self, input: Input, ws: &Workspace) {
    let fields = self.form.fields(ws);
    if let Some(FieldKind::Picks(picks)) = fields.get(self.field).map(|f| &f.kind) {
      match input {
        Input::Next => {
          self.pick = (self.pick + 1).min(picks.len().saturating_sub(1));
          return;
        }
        Input::Prev => {
          self.pick = self.pick.saturating_sub(1);
          return;
        }
        Input::Char(' ') => return self.form.input(self.field, self.pick, Input::Toggle, ws),
        _ => {}
      }
    }
    self.form.input(self.field, self.pick, input, ws);
  }
}

// ─── Delete confirmation ──────────────────────────────────────────────────────

/// The pending "are you sure?" prompt, one variant per deletable entity.
pub enum Delete {
  Curriculum(DeletePrompt<Curriculum>),
  Profile(DeletePrompt<GraduateProfile>),
  Competency(DeletePrompt<CoreCompetency>),
  Outcome(DeletePrompt<LearningOutcome>),
  KnowledgeArea(DeletePrompt<KnowledgeArea>),
  Course(DeletePrompt<Course>),
  Lecturer(DeletePrompt<Lecturer>),
  CourseOutcome(DeletePrompt<CourseOutcome>),
  Plan(DeletePrompt<LearningPlan>),
}

fn prompt<R: sicap_core::store::Record>(record: &R) -> DeletePrompt<R> {
  let mut p = DeletePrompt::default();
  p.request(record);
  p
}

impl Delete {
  pub fn curriculum(r: &Curriculum) -> Self { Self::Curriculum(prompt(r)) }
  pub fn profile(r: &GraduateProfile) -> Self { Self::Profile(prompt(r)) }
  pub fn competency(r: &CoreCompetency) -> Self { Self::Competency(prompt(r)) }
  pub fn outcome(r: &LearningOutcome) -> Self { Self::Outcome(prompt(r)) }
  pub fn area(r: &KnowledgeArea) -> Self { Self::KnowledgeArea(prompt(r)) }
  pub fn course(r: &Course) -> Self { Self::Course(prompt(r)) }
  pub fn lecturer(r: &Lecturer) -> Self { Self::Lecturer(prompt(r)) }
  pub fn course_outcome(r: &CourseOutcome) -> Self { Self::CourseOutcome(prompt(r)) }
  pub fn plan(r: &LearningPlan) -> Self { Self::Plan(prompt(r)) }

  /// Remove the pending record; returns how many records went.
  pub fn confirm(&mut self, ws: &mut Workspace) -> usize {
    let removed = match self {
      Self::Curriculum(p) => p.confirm(&mut ws.curricula),
      // Records that head a matrix row or column take it with them.
      Self::Profile(p) => p.take().map_or(0, |id| ws.remove_profile(&id)),
      Self::Outcome(p) => p.take().map_or(0, |id| ws.remove_outcome(&id)),
      Self::KnowledgeArea(p) => p.take().map_or(0, |id| ws.remove_area(&id)),
      Self::Course(p) => p.take().map_or(0, |code| ws.remove_course(&code)),
      Self::Competency(p) => p.confirm(&mut ws.competencies),
      Self::Lecturer(p) => p.confirm(&mut ws.lecturers),
      Self::CourseOutcome(p) => p.confirm(&mut ws.course_outcomes),
      Self::Plan(p) => p.confirm(&mut ws.plans),
    };
    info!(removed, "delete confirmed");
    removed
  }
}

#[cfg(test)]
mod tests {
  use sicap_core::{options::Aspect, report, seed};

  use super::*;

  fn type_str(dialog: &mut Dialog, ws: &Workspace, s: &str) {
    for c in s.chars() {
      dialog.input(Input::Char(c), ws);
    }
  }

  #[test]
  fn outcome_aspect_change_resuggests_code() {
    let ws = seed::workspace();
    let draft = OutcomeDraft(StatementDraft::suggested(
      Aspect::Attitude,
      ws.outcome_code_pairs(),
      RecordId::new(),
    ));
    let mut dialog = Dialog::new(Form::create_outcome(draft));
    dialog.input(Input::Next, &ws);
    let fields = dialog.form.fields(&ws);
    assert_eq!(fields[0].value, Aspect::Knowledge.label());
    assert!(fields[1].value.starts_with('P'));
  }

  #[test]
  fn course_form_needs_area_and_two_outcomes() {
    let mut ws = seed::workspace();
    let before = ws.courses.len();
    let cid = ws.primary_curriculum().unwrap();
    let mut dialog = Dialog::new(Form::create_course(CourseDraft::new(cid)));
    type_str(&mut dialog, &ws, "INF999");
    dialog.focus_next(&ws);
    type_str(&mut dialog, &ws, "Kecerdasan Buatan");
    assert!(!dialog.form.can_submit());

    // Bahan Kajian: first option.
    for _ in 0..5 {
      dialog.focus_next(&ws);
    }
    dialog.input(Input::Next, &ws);

    // Two CPL picks.
    dialog.focus_next(&ws);
    dialog.input(Input::Char(' '), &ws);
    dialog.input(Input::Next, &ws);
    assert!(!dialog.form.can_submit());
    dialog.input(Input::Char(' '), &ws);
    assert!(dialog.form.can_submit());

    assert_eq!(dialog.form.submit(&mut ws), Submission::Created);
    assert_eq!(ws.courses.len(), before + 1);
    assert_eq!(ws.courses.get("INF999").unwrap().outcomes.len(), 2);
  }

  #[test]
  fn course_code_is_fixed_in_edit() {
    let mut ws = seed::workspace();
    let course = ws.courses.get("INF101").unwrap().clone();
    let mut dialog = Dialog::new(Form::edit_course(&course));
    type_str(&mut dialog, &ws, "X");
    assert_eq!(dialog.form.fields(&ws)[0].value, "INF101");
    dialog.focus_next(&ws);
    type_str(&mut dialog, &ws, " Lanjut");
    assert_eq!(dialog.form.submit(&mut ws), Submission::Updated(1));
    assert!(ws.courses.get("INF101").unwrap().name.ends_with(" Lanjut"));
  }

  #[test]
  fn blank_curriculum_is_inert() {
    let mut ws = seed::workspace();
    let mut form = Form::create_curriculum(CurriculumDraft::new(2025));
    assert_eq!(form.submit(&mut ws), Submission::Inert);
    assert_eq!(form.title(), "Tambah Kurikulum");
  }

  #[test]
  fn number_fields_take_digits_and_steps() {
    assert_eq!(edit_number(0, Input::Char('7'), 100), 7);
    assert_eq!(edit_number(7, Input::Char('5'), 100), 75);
    assert_eq!(edit_number(75, Input::Char('5'), 100), 100);
    assert_eq!(edit_number(75, Input::Backspace, 100), 7);
    assert_eq!(edit_number(0, Input::Prev, 100), 0);
  }

  #[test]
  fn ref_cycling_wraps() {
    let opts = ["a", "b", "c"];
    assert_eq!(edit_ref(None, &opts, Input::Next), Some("a"));
    assert_eq!(edit_ref(Some(&"c"), &opts, Input::Next), Some("a"));
    assert_eq!(edit_ref(Some(&"a"), &opts, Input::Prev), Some("c"));
    assert_eq!(edit_ref::<&str>(None, &[], Input::Next), None);
  }

  #[test]
  fn deleting_outcome_clears_matrix_rows() {
    let mut ws = seed::workspace();
    let outcome = ws.outcomes.iter().next().unwrap().clone();
    let mut delete = Delete::outcome(&outcome);
    assert_eq!(delete.confirm(&mut ws), 1);
    assert_eq!(ws.outcome_courses.row_count(&outcome.id), 0);
    assert_eq!(ws.outcome_areas.row_count(&outcome.id), 0);
    assert_eq!(delete.confirm(&mut ws), 0);
  }

  #[test]
  fn deleting_course_clears_matrix_column() {
    let mut ws = seed::workspace();
    let code = "INF101".to_owned();
    let course = ws.courses.get(&code).unwrap().clone();
    let linked_before: usize = report::per_outcome(&ws).iter().map(|r| r.courses).sum();
    let col = ws.outcome_courses.col_count(&code);
    assert!(col > 0);

    let mut delete = Delete::course(&course);
    assert_eq!(delete.confirm(&mut ws), 1);
    assert_eq!(ws.outcome_courses.col_count(&code), 0);
    let linked_after: usize = report::per_outcome(&ws).iter().map(|r| r.courses).sum();
    assert_eq!(linked_after, linked_before - col);

    // Re-adding the code does not bring the old links back.
    let mut fresh = course.clone();
    fresh.outcomes.clear();
    ws.courses.add(fresh);
    assert_eq!(ws.outcome_courses.col_count(&code), 0);
  }

  #[test]
  fn deleting_area_clears_matrix_column() {
    let mut ws = seed::workspace();
    let area = ws
      .knowledge_areas
      .iter()
      .find(|k| ws.outcome_areas.col_count(&k.id) > 0)
      .unwrap()
      .clone();
    let total = ws.outcome_areas.total_count();
    let col = ws.outcome_areas.col_count(&area.id);

    assert_eq!(Delete::area(&area).confirm(&mut ws), 1);
    assert_eq!(ws.outcome_areas.col_count(&area.id), 0);
    assert_eq!(ws.outcome_areas.total_count(), total - col);
  }
}
