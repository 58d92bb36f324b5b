//! Application state machine and event dispatcher.

use std::convert::Infallible;

use chrono::{Datelike, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sicap_core::{
  draft::{
    CompetencyDraft, CourseDraft, CourseOutcomeDraft, CurriculumDraft, KnowledgeAreaDraft,
    LecturerDraft, OutcomeDraft, PlanDraft, ProfileDraft, StatementDraft,
  },
  entity::{
    CoreCompetency, Course, CourseOutcome, Curriculum, GraduateProfile, KnowledgeArea,
    LearningOutcome, LearningPlan, Lecturer, RecordId,
  },
  form::Submission,
  kkm::{BelowThreshold, Kkm},
  options::{Aspect, CourseNature, CurriculumStatus, PlanStatus, Semester},
  report::ReportKind,
  route::Route,
  settings::AppSettings,
  view::{CategoryFilter, CourseFacet, ViewQuery, filter},
  workspace::Workspace,
};
use tracing::{debug, info, warn};

use crate::{
  dialog::{Delete, Dialog, Form, Input},
  prefs::Prefs,
};

// ─── Tabs ─────────────────────────────────────────────────────────────────────

/// Sub-view of a page. Only the CPL, Bahan Kajian and course pages have more
/// than the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
  #[default]
  List,
  Matrix,
  /// Lecturers, under the course page.
  Lecturers,
}

impl Tab {
  pub fn label(self) -> &'static str {
    match self {
      Self::List => "Daftar",
      Self::Matrix => "Matriks",
      Self::Lecturers => "Dosen",
    }
  }

  /// The tabs `route` offers, in order.
  pub fn available(route: Route) -> &'static [Tab] {
    match route {
      Route::LearningOutcomes | Route::KnowledgeAreas => &[Tab::List, Tab::Matrix],
      Route::Courses => &[Tab::List, Tab::Matrix, Tab::Lecturers],
      _ => &[Tab::List],
    }
  }
}

// ─── Matrix view ──────────────────────────────────────────────────────────────

/// A rendered snapshot of the matrix behind the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixView {
  pub title:      &'static str,
  pub rows:       Vec<String>,
  pub cols:       Vec<String>,
  pub cells:      Vec<Vec<bool>>,
  pub row_counts: Vec<usize>,
  pub col_counts: Vec<usize>,
  pub total:      usize,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub ws: Workspace,

  pub route: Route,
  pub tab:   Tab,

  /// Cursor within the filtered list of the current page.
  pub cursor:        usize,
  /// `(row, col)` cursor in the matrix tab.
  pub matrix_cursor: (usize, usize),

  /// Search box text, shared by every list page.
  pub search:    String,
  /// Whether the user is typing into the search box.
  pub searching: bool,
  /// Path typed into the go-to prompt, when open.
  pub goto:      Option<String>,

  pub aspect_filter:   CategoryFilter<Aspect>,
  pub status_filter:   CategoryFilter<CurriculumStatus>,
  pub semester_filter: CategoryFilter<Semester>,
  pub nature_filter:   CategoryFilter<CourseNature>,
  pub plan_filter:     CategoryFilter<PlanStatus>,

  pub dialog: Option<Dialog>,
  pub delete: Option<Delete>,

  pub kkm:     Kkm,
  /// Selected student on the dashboard.
  pub student: usize,
  /// Selected course on the dashboard (below-threshold and history).
  pub course:  usize,
  pub report:  ReportKind,

  pub settings: AppSettings,
  prefs:        Prefs,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(ws: Workspace, prefs: Prefs, settings: AppSettings, kkm: Kkm) -> Self {
    Self {
      ws,
      route: Route::Dashboard,
      tab: Tab::List,
      cursor: 0,
      matrix_cursor: (0, 0),
      search: String::new(),
      searching: false,
      goto: None,
      aspect_filter: CategoryFilter::All,
      status_filter: CategoryFilter::All,
      semester_filter: CategoryFilter::All,
      nature_filter: CategoryFilter::All,
      plan_filter: CategoryFilter::All,
      dialog: None,
      delete: None,
      kkm,
      student: 0,
      course: 0,
      report: ReportKind::default(),
      settings,
      prefs,
      status_msg: String::new(),
    }
  }

  // ── Filtered lists ────────────────────────────────────────────────────────

  fn text_query<F>(&self) -> ViewQuery<F> { ViewQuery::text(self.search.as_str()) }

  pub fn curricula(&self) -> Vec<&Curriculum> {
    let query = self.text_query().with(self.status_filter, |s| s);
    filter(&self.ws.curricula, &query)
  }

  pub fn profiles(&self) -> Vec<&GraduateProfile> {
    filter(&self.ws.profiles, &self.text_query::<Infallible>())
  }

  pub fn competencies(&self) -> Vec<&CoreCompetency> {
    filter(&self.ws.competencies, &self.text_query().with(self.aspect_filter, |a| a))
  }

  pub fn outcomes(&self) -> Vec<&LearningOutcome> {
    filter(&self.ws.outcomes, &self.text_query().with(self.aspect_filter, |a| a))
  }

  pub fn areas(&self) -> Vec<&KnowledgeArea> {
    filter(&self.ws.knowledge_areas, &self.text_query().with(self.aspect_filter, |a| a))
  }

  pub fn courses(&self) -> Vec<&Course> {
    let query = self
      .text_query()
      .with(self.semester_filter, CourseFacet::Semester)
      .with(self.nature_filter, CourseFacet::Nature);
    filter(&self.ws.courses, &query)
  }

  pub fn lecturers(&self) -> Vec<&Lecturer> {
    filter(&self.ws.lecturers, &self.text_query::<Infallible>())
  }

  pub fn course_outcomes(&self) -> Vec<&CourseOutcome> {
    filter(&self.ws.course_outcomes, &self.text_query::<Infallible>())
  }

  pub fn plans(&self) -> Vec<&LearningPlan> {
    filter(&self.ws.plans, &self.text_query().with(self.plan_filter, |s| s))
  }

  /// Number of rows in the list the cursor moves over.
  fn list_len(&self) -> usize {
    match (self.route, self.tab) {
      (Route::Curricula, _) => self.curricula().len(),
      (Route::GraduateProfiles, _) => self.profiles().len(),
      (Route::CoreCompetencies, _) => self.competencies().len(),
      (Route::LearningOutcomes, Tab::List) => self.outcomes().len(),
      (Route::KnowledgeAreas, Tab::List) => self.areas().len(),
      (Route::Courses, Tab::List) => self.courses().len(),
      (Route::Courses, Tab::Lecturers) => self.lecturers().len(),
      (Route::CourseOutcomes, _) => self.course_outcomes().len(),
      (Route::Plans, _) => self.plans().len(),
      (Route::Dashboard, _) => self.ws.courses.len(),
      _ => 0,
    }
  }

  fn at_cursor<'a, T>(&self, items: Vec<&'a T>) -> Option<&'a T> {
    items.get(self.cursor).copied()
  }

  // ── Matrix ────────────────────────────────────────────────────────────────

  /// The matrix behind the current page's matrix tab.
  pub fn matrix_view(&self) -> Option<MatrixView> {
    if self.tab != Tab::Matrix {
      return None;
    }
    let ws = &self.ws;
    let rows: Vec<String> = ws.outcomes.iter().map(|o| o.code.clone()).collect();
    let row_ids: Vec<RecordId> = ws.outcomes.iter().map(|o| o.id).collect();

    macro_rules! build {
      ($title:literal, $matrix:expr, $cols:expr, $label:expr) => {{
        let matrix = $matrix;
        let keys: Vec<_> = $cols.collect();
        let cols = keys.iter().map($label).collect();
        MatrixView {
          title: $title,
          cells: row_ids.iter().map(|r| keys.iter().map(|c| matrix.has(r, c)).collect()).collect(),
          row_counts: row_ids.iter().map(|r| matrix.row_count(r)).collect(),
          col_counts: keys.iter().map(|c| matrix.col_count(c)).collect(),
          total: matrix.total_count(),
          rows,
          cols,
        }
      }};
    }

    let view = match self.route {
      Route::LearningOutcomes => build!(
        "CPL → Profil Lulusan",
        &ws.outcome_profiles,
        ws.profiles.iter().map(|p| p.id),
        |id: &RecordId| ws.profiles.get(id).map(|p| p.code.clone()).unwrap_or_default()
      ),
      Route::KnowledgeAreas => build!(
        "CPL → Bahan Kajian",
        &ws.outcome_areas,
        ws.knowledge_areas.iter().map(|a| a.id),
        |id: &RecordId| ws.knowledge_area(id).map(|a| a.code.clone()).unwrap_or_default()
      ),
      Route::Courses => build!(
        "CPL → Mata Kuliah",
        &ws.outcome_courses,
        ws.courses.iter().map(|c| c.code.clone()),
        |code: &String| code.clone()
      ),
      _ => return None,
    };
    Some(view)
  }

  fn toggle_matrix_cell(&mut self) {
    let (row, col) = self.matrix_cursor;
    let Some(outcome) = self.ws.outcomes.as_slice().get(row).map(|o| o.id) else {
      return;
    };
    let linked = match self.route {
      Route::LearningOutcomes => match self.ws.profiles.as_slice().get(col).map(|p| p.id) {
        Some(profile) => self.ws.toggle_outcome_profile(outcome, profile),
        None => return,
      },
      Route::KnowledgeAreas => match self.ws.knowledge_areas.as_slice().get(col).map(|a| a.id) {
        Some(area) => self.ws.toggle_outcome_area(outcome, area),
        None => return,
      },
      Route::Courses => match self.ws.courses.as_slice().get(col).map(|c| c.code.clone()) {
        Some(code) => self.ws.toggle_outcome_course(outcome, &code),
        None => return,
      },
      _ => return,
    };
    self.status_msg = if linked { "Relasi ditambahkan".into() } else { "Relasi dihapus".into() };
  }

  // ── Dashboard ─────────────────────────────────────────────────────────────

  /// Code of the course selected on the dashboard.
  pub fn dashboard_course(&self) -> Option<&Course> { self.ws.courses.as_slice().get(self.course) }

  pub fn below_threshold(&self) -> Option<BelowThreshold> {
    self
      .dashboard_course()
      .map(|c| self.ws.scores.below_threshold(&c.code, self.kkm))
  }

  /// Students matching the dashboard search, as `(nim, name)`.
  pub fn dashboard_students(&self) -> Vec<(&str, &str)> { self.ws.scores.find_students(&self.search) }

  /// `(nim, name)` of the student selected on the dashboard.
  pub fn dashboard_student(&self) -> Option<(&str, &str)> {
    self.dashboard_students().get(self.student).copied()
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Switch to `route`, resetting per-page state. The plan form routes open
  /// their form immediately.
  pub fn navigate(&mut self, route: Route) {
    debug!(path = %route, "navigate");
    self.route = route;
    self.tab = Tab::List;
    self.cursor = 0;
    self.matrix_cursor = (0, 0);
    self.search.clear();
    self.searching = false;
    self.aspect_filter = CategoryFilter::All;
    self.status_filter = CategoryFilter::All;
    self.semester_filter = CategoryFilter::All;
    self.nature_filter = CategoryFilter::All;
    self.plan_filter = CategoryFilter::All;
    self.dialog = None;
    self.delete = None;

    match route {
      Route::NewPlan => {
        let draft = PlanDraft::new(Local::now().date_naive());
        self.dialog = Some(Dialog::new(Form::create_plan(draft)));
      }
      Route::EditPlan(id) => match self.ws.plans.get(&id) {
        Some(plan) => self.dialog = Some(Dialog::new(Form::edit_plan(plan))),
        None => {
          self.route = Route::Plans;
          self.status_msg = format!("RPS {id} tidak ditemukan");
        }
      },
      _ => {}
    }
  }

  fn nav_index(&self) -> usize {
    let parent = self.route.nav_parent();
    Route::NAV.iter().position(|r| *r == parent).unwrap_or(0)
  }

  fn toggle_sidebar(&mut self) {
    let collapsed = self.settings.toggle_sidebar();
    if let Err(e) = self.settings.save(&mut self.prefs) {
      warn!(error = %e, "failed to save sidebar preference");
    }
    info!(collapsed, "sidebar toggled");
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.delete.is_some() {
      self.handle_delete_key(key);
    } else if self.dialog.is_some() {
      self.handle_dialog_key(key);
    } else if self.goto.is_some() {
      self.handle_goto_key(key);
    } else if self.searching {
      self.handle_search_key(key);
    } else {
      return self.handle_normal_key(key);
    }
    true
  }

  fn handle_delete_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('y') | KeyCode::Enter => {
        if let Some(mut delete) = self.delete.take() {
          let removed = delete.confirm(&mut self.ws);
          self.status_msg = format!("{removed} data dihapus");
          self.clamp_cursor();
        }
      }
      KeyCode::Char('n') | KeyCode::Esc => {
        self.delete = None;
        self.status_msg = "Batal menghapus".into();
      }
      _ => {}
    }
  }

  fn handle_dialog_key(&mut self, key: KeyEvent) {
    let Some(dialog) = self.dialog.as_mut() else {
      return;
    };
    let ws = &self.ws;
    match key.code {
      KeyCode::Esc => {
        self.dialog = None;
        self.status_msg = "Perubahan dibatalkan".into();
        self.leave_plan_form();
      }
      KeyCode::Enter => match dialog.form.submit(&mut self.ws) {
        Submission::Inert => {
          self.status_msg = "Lengkapi semua field wajib (*)".into();
        }
        Submission::Created | Submission::Updated(_) | Submission::NotOpen => {
          self.dialog = None;
          self.status_msg = "Data tersimpan".into();
          self.leave_plan_form();
        }
      },
      KeyCode::Tab | KeyCode::Down => dialog.focus_next(ws),
      KeyCode::BackTab | KeyCode::Up => dialog.focus_prev(ws),
      KeyCode::Right => dialog.input(Input::Next, ws),
      KeyCode::Left => dialog.input(Input::Prev, ws),
      KeyCode::Backspace => dialog.input(Input::Backspace, ws),
      KeyCode::Char(c) => dialog.input(Input::Char(c), ws),
      _ => {}
    }
  }

  /// Leaving a plan form route returns to the plan list.
  fn leave_plan_form(&mut self) {
    if matches!(self.route, Route::NewPlan | Route::EditPlan(_)) {
      self.route = Route::Plans;
      self.clamp_cursor();
    }
  }

  fn handle_goto_key(&mut self, key: KeyEvent) {
    let Some(path) = self.goto.as_mut() else {
      return;
    };
    match key.code {
      KeyCode::Esc => self.goto = None,
      KeyCode::Backspace => {
        path.pop();
      }
      KeyCode::Char(c) => path.push(c),
      KeyCode::Enter => {
        let path = self.goto.take().unwrap_or_default();
        match Route::parse(path.trim()) {
          Ok(route) => self.navigate(route),
          Err(e) => self.status_msg = e.to_string(),
        }
      }
      _ => {}
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.searching = false;
        self.search.clear();
        self.cursor = 0;
        self.student = 0;
      }
      KeyCode::Enter => self.searching = false,
      KeyCode::Backspace => {
        self.search.pop();
        self.cursor = 0;
        self.student = 0;
      }
      KeyCode::Char(c) => {
        self.search.push(c);
        self.cursor = 0;
        self.student = 0;
      }
      _ => {}
    }
  }

  fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
    self.status_msg.clear();
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('b') => self.toggle_sidebar(),
      KeyCode::Char('g') => self.goto = Some(String::new()),
      KeyCode::Char(c @ '0'..='9') => {
        let idx = c.to_digit(10).map_or(0, |d| (d as usize + 9) % 10);
        if let Some(route) = Route::NAV.get(idx) {
          self.navigate(*route);
        }
      }
      KeyCode::Char(']') => {
        let next = (self.nav_index() + 1) % Route::NAV.len();
        self.navigate(Route::NAV[next]);
      }
      KeyCode::Char('[') => {
        let prev = (self.nav_index() + Route::NAV.len() - 1) % Route::NAV.len();
        self.navigate(Route::NAV[prev]);
      }
      KeyCode::Tab => self.next_tab(),
      _ => match self.route {
        Route::Dashboard => self.handle_dashboard_key(key),
        Route::Reports => self.handle_report_key(key),
        _ if self.tab == Tab::Matrix => self.handle_matrix_key(key),
        _ => self.handle_list_key(key),
      },
    }
    true
  }

  fn next_tab(&mut self) {
    if self.route == Route::Reports {
      self.report = self.report.next();
      return;
    }
    let tabs = Tab::available(self.route);
    let pos = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
    self.tab = tabs[(pos + 1) % tabs.len()];
    self.cursor = 0;
    self.matrix_cursor = (0, 0);
  }

  fn move_cursor(&mut self, down: bool) {
    let len = self.list_len();
    if down {
      if self.cursor + 1 < len {
        self.cursor += 1;
      }
    } else {
      self.cursor = self.cursor.saturating_sub(1);
    }
  }

  fn clamp_cursor(&mut self) {
    self.cursor = self.cursor.min(self.list_len().saturating_sub(1));
  }

  fn handle_dashboard_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('+') | KeyCode::Char('=') => self.kkm = self.kkm.adjust(5),
      KeyCode::Char('-') => self.kkm = self.kkm.adjust(-5),
      KeyCode::Char('s') => {
        let n = self.dashboard_students().len().max(1);
        self.student = (self.student + 1) % n;
      }
      KeyCode::Char('/') => self.searching = true,
      KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('c') => {
        let n = self.ws.courses.len().max(1);
        self.course = (self.course + 1) % n;
      }
      KeyCode::Char('k') | KeyCode::Up => {
        let n = self.ws.courses.len().max(1);
        self.course = (self.course + n - 1) % n;
      }
      _ => {}
    }
  }

  fn handle_report_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('x') => self.status_msg = "Ekspor Excel belum tersedia".into(),
      KeyCode::Char('p') => self.status_msg = "Cetak PDF belum tersedia".into(),
      _ => {}
    }
  }

  fn handle_matrix_key(&mut self, key: KeyEvent) {
    let Some(view) = self.matrix_view() else {
      return;
    };
    let (row, col) = &mut self.matrix_cursor;
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => *row = (*row + 1).min(view.rows.len().saturating_sub(1)),
      KeyCode::Char('k') | KeyCode::Up => *row = row.saturating_sub(1),
      KeyCode::Char('l') | KeyCode::Right => {
        *col = (*col + 1).min(view.cols.len().saturating_sub(1))
      }
      KeyCode::Char('h') | KeyCode::Left => *col = col.saturating_sub(1),
      KeyCode::Char(' ') | KeyCode::Enter => self.toggle_matrix_cell(),
      _ => {}
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.move_cursor(true),
      KeyCode::Char('k') | KeyCode::Up => self.move_cursor(false),
      KeyCode::Char('/') => {
        self.searching = true;
        self.cursor = 0;
      }
      KeyCode::Char('f') => self.cycle_filter(),
      KeyCode::Char('F') if self.route == Route::Courses => {
        self.nature_filter = self.nature_filter.cycle();
        self.cursor = 0;
      }
      KeyCode::Char('a') => self.open_create(),
      KeyCode::Char('e') | KeyCode::Enter => self.open_edit(),
      KeyCode::Char('d') => self.request_delete(),
      KeyCode::Char('t') if self.route == Route::Curricula => {
        if let Some(id) = self.at_cursor(self.curricula()).map(|c| c.id) {
          let active = self.ws.toggle_active(&id);
          self.status_msg = match active {
            Some(true) => "Kurikulum diaktifkan".into(),
            _ => "Kurikulum diarsipkan".into(),
          };
          self.clamp_cursor();
        }
      }
      KeyCode::Char('y') if self.route == Route::Curricula => {
        if let Some(id) = self.at_cursor(self.curricula()).map(|c| c.id) {
          self.ws.duplicate_curriculum(&id, Local::now().year());
          self.status_msg = "Kurikulum diduplikasi".into();
        }
      }
      _ => {}
    }
  }

  fn cycle_filter(&mut self) {
    match self.route {
      Route::Curricula => self.status_filter = self.status_filter.cycle(),
      Route::CoreCompetencies | Route::LearningOutcomes | Route::KnowledgeAreas => {
        self.aspect_filter = self.aspect_filter.cycle()
      }
      Route::Courses => self.semester_filter = self.semester_filter.cycle(),
      Route::Plans => self.plan_filter = self.plan_filter.cycle(),
      _ => return,
    }
    self.cursor = 0;
  }

  // ── Forms ─────────────────────────────────────────────────────────────────

  fn open_create(&mut self) {
    let ws = &self.ws;
    let cid = ws.primary_curriculum().unwrap_or_default();
    let aspect = self.aspect_filter.as_option().copied().unwrap_or(Aspect::Attitude);
    let form = match (self.route, self.tab) {
      (Route::Curricula, _) => Form::create_curriculum(CurriculumDraft::new(Local::now().year())),
      (Route::GraduateProfiles, _) => {
        Form::create_profile(ProfileDraft::suggested(&ws.profiles, cid))
      }
      (Route::CoreCompetencies, _) => Form::create_competency(CompetencyDraft(
        StatementDraft::suggested(aspect, ws.competency_code_pairs(), cid),
      )),
      (Route::LearningOutcomes, _) => Form::create_outcome(OutcomeDraft(
        StatementDraft::suggested(aspect, ws.outcome_code_pairs(), cid),
      )),
      (Route::KnowledgeAreas, _) => {
        Form::create_area(KnowledgeAreaDraft::suggested(&ws.knowledge_areas, cid))
      }
      (Route::Courses, Tab::Lecturers) => Form::create_lecturer(LecturerDraft::default()),
      (Route::Courses, _) => Form::create_course(CourseDraft::new(cid)),
      (Route::CourseOutcomes, _) => {
        let course = ws.courses.iter().next().map(|c| c.code.as_str()).unwrap_or_default();
        Form::create_course_outcome(CourseOutcomeDraft::suggested(course, &ws.course_outcomes))
      }
      (Route::Plans, _) => return self.navigate(Route::NewPlan),
      _ => return,
    };
    self.dialog = Some(Dialog::new(form));
  }

  fn open_edit(&mut self) {
    let form = match (self.route, self.tab) {
      (Route::Curricula, _) => self.at_cursor(self.curricula()).map(Form::edit_curriculum),
      (Route::GraduateProfiles, _) => self.at_cursor(self.profiles()).map(Form::edit_profile),
      (Route::CoreCompetencies, _) => {
        self.at_cursor(self.competencies()).map(Form::edit_competency)
      }
      (Route::LearningOutcomes, _) => self.at_cursor(self.outcomes()).map(Form::edit_outcome),
      (Route::KnowledgeAreas, _) => self.at_cursor(self.areas()).map(Form::edit_area),
      (Route::Courses, Tab::Lecturers) => self.at_cursor(self.lecturers()).map(Form::edit_lecturer),
      (Route::Courses, _) => self.at_cursor(self.courses()).map(Form::edit_course),
      (Route::CourseOutcomes, _) => {
        self.at_cursor(self.course_outcomes()).map(Form::edit_course_outcome)
      }
      (Route::Plans, _) => {
        if let Some(id) = self.at_cursor(self.plans()).map(|p| p.id) {
          self.navigate(Route::EditPlan(id));
        }
        return;
      }
      _ => None,
    };
    if let Some(form) = form {
      self.dialog = Some(Dialog::new(form));
    }
  }

  fn request_delete(&mut self) {
    self.delete = match (self.route, self.tab) {
      (Route::Curricula, _) => self.at_cursor(self.curricula()).map(Delete::curriculum),
      (Route::GraduateProfiles, _) => self.at_cursor(self.profiles()).map(Delete::profile),
      (Route::CoreCompetencies, _) => self.at_cursor(self.competencies()).map(Delete::competency),
      (Route::LearningOutcomes, _) => self.at_cursor(self.outcomes()).map(Delete::outcome),
      (Route::KnowledgeAreas, _) => self.at_cursor(self.areas()).map(Delete::area),
      (Route::Courses, Tab::Lecturers) => self.at_cursor(self.lecturers()).map(Delete::lecturer),
      (Route::Courses, _) => self.at_cursor(self.courses()).map(Delete::course),
      (Route::CourseOutcomes, _) => {
        self.at_cursor(self.course_outcomes()).map(Delete::course_outcome)
      }
      (Route::Plans, _) => self.at_cursor(self.plans()).map(Delete::plan),
      _ => None,
    };
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::{KeyEventKind, KeyEventState};
  use sicap_core::{seed, settings::MemoryKv};

  use super::*;

  fn app() -> App {
    App::new(
      seed::workspace(),
      Prefs::Memory(MemoryKv::new()),
      AppSettings::default(),
      Kkm::DEFAULT,
    )
  }

  fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key(KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    })
  }

  fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
      press(app, KeyCode::Char(c));
    }
  }

  #[test]
  fn number_keys_follow_sidebar_order() {
    let mut app = app();
    press(&mut app, KeyCode::Char('7'));
    assert_eq!(app.route, Route::Courses);
    press(&mut app, KeyCode::Char('0'));
    assert_eq!(app.route, Route::Reports);
    press(&mut app, KeyCode::Char(']'));
    assert_eq!(app.route, Route::Dashboard);
  }

  #[test]
  fn goto_parses_paths() {
    let mut app = app();
    press(&mut app, KeyCode::Char('g'));
    type_str(&mut app, "/bahan-kajian");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.route, Route::KnowledgeAreas);

    press(&mut app, KeyCode::Char('g'));
    type_str(&mut app, "/nowhere");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.route, Route::KnowledgeAreas);
    assert!(!app.status_msg.is_empty());
  }

  #[test]
  fn search_narrows_course_list() {
    let mut app = app();
    app.navigate(Route::Courses);
    press(&mut app, KeyCode::Char('/'));
    type_str(&mut app, "basis");
    press(&mut app, KeyCode::Enter);
    let hits = app.courses();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Basis Data");
  }

  #[test]
  fn sidebar_toggle_is_persisted() {
    let mut app = app();
    press(&mut app, KeyCode::Char('b'));
    assert!(app.settings.sidebar_collapsed);
    assert!(AppSettings::load(&app.prefs).unwrap().sidebar_collapsed);
  }

  #[test]
  fn matrix_toggle_round_trips() {
    let mut app = app();
    app.navigate(Route::KnowledgeAreas);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.tab, Tab::Matrix);
    let before = app.matrix_view().unwrap();
    press(&mut app, KeyCode::Char(' '));
    let after = app.matrix_view().unwrap();
    assert_ne!(before.cells[0][0], after.cells[0][0]);
    assert_eq!(after.total, after.row_counts.iter().sum::<usize>());
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.matrix_view().unwrap(), before);
  }

  #[test]
  fn delete_needs_confirmation() {
    let mut app = app();
    app.navigate(Route::GraduateProfiles);
    let before = app.ws.profiles.len();
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.ws.profiles.len(), before);
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.ws.profiles.len(), before - 1);
  }

  #[test]
  fn new_plan_route_opens_form_and_returns_to_list() {
    let mut app = app();
    app.navigate(Route::Plans);
    let before = app.ws.plans.len();
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.route, Route::NewPlan);
    assert!(app.dialog.is_some());

    // Course, then lecturer.
    press(&mut app, KeyCode::Right);
    for _ in 0..3 {
      press(&mut app, KeyCode::Tab);
    }
    type_str(&mut app, "Dr. Ahmad");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.route, Route::Plans);
    assert_eq!(app.ws.plans.len(), before + 1);
  }

  #[test]
  fn unknown_plan_edit_falls_back_to_list() {
    let mut app = app();
    app.navigate(Route::EditPlan(RecordId::new()));
    assert_eq!(app.route, Route::Plans);
    assert!(app.dialog.is_none());
  }

  #[test]
  fn kkm_adjusts_on_dashboard() {
    let mut app = app();
    press(&mut app, KeyCode::Char('+'));
    assert_eq!(app.kkm.value(), 75);
    for _ in 0..10 {
      press(&mut app, KeyCode::Char('+'));
    }
    assert_eq!(app.kkm.value(), 100);
  }

  #[test]
  fn curriculum_filter_and_toggle() {
    let mut app = app();
    app.navigate(Route::Curricula);
    let total = app.curricula().len();
    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.status_filter, CategoryFilter::Only(CurriculumStatus::Active));
    let active = app.curricula().len();
    assert!(active <= total);
    press(&mut app, KeyCode::Char('f'));
    press(&mut app, KeyCode::Char('f'));
    assert!(app.status_filter.is_all());

    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.ws.curricula.len(), total + 1);
  }

  #[test]
  fn dashboard_student_search() {
    let mut app = app();
    assert_eq!(app.dashboard_student(), Some(("2021001", "Ahmad Fauzi")));
    press(&mut app, KeyCode::Char('/'));
    assert!(app.searching);
    type_str(&mut app, "citra");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.dashboard_student(), Some(("2021003", "Citra Dewi")));

    // `s` cycles within the matches only.
    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.dashboard_student(), Some(("2021003", "Citra Dewi")));

    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Esc);
    type_str(&mut app, "s");
    assert_eq!(app.dashboard_student(), Some(("2021002", "Budi Santoso")));
  }

  #[test]
  fn filters_reset_between_pages() {
    let mut app = app();
    app.navigate(Route::Courses);
    press(&mut app, KeyCode::Char('f'));
    press(&mut app, KeyCode::Char('F'));
    assert!(!app.semester_filter.is_all());
    assert!(!app.nature_filter.is_all());

    app.navigate(Route::Dashboard);
    app.navigate(Route::Courses);
    assert!(app.semester_filter.is_all());
    assert!(app.nature_filter.is_all());
    assert_eq!(app.courses().len(), app.ws.courses.len());
  }
}
