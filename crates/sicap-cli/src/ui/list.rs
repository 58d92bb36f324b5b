//! List pages — one table per entity, with the search and filter bar.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use sicap_core::{options::Choice, route::Route};

use crate::app::{App, Tab};

/// Column headers, widths and cell text for the current page.
struct Page {
  title:   &'static str,
  total:   usize,
  /// Active category filters, e.g. `"Aspek: Semua"`.
  filters: Vec<String>,
  headers: Vec<&'static str>,
  widths:  Vec<Constraint>,
  rows:    Vec<Vec<String>>,
}

fn page(app: &App) -> Page {
  let ws = &app.ws;
  let aspect = format!("Aspek: {}", app.aspect_filter.label());
  match (app.route, app.tab) {
    (Route::Curricula, _) => Page {
      title:   "Kurikulum",
      total:   ws.curricula.len(),
      filters: vec![format!("Status: {}", app.status_filter.label())],
      headers: vec!["Nama", "Tahun", "Status", "CPL", "MK"],
      widths:  vec![
        Constraint::Min(24),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(5),
      ],
      rows:    app
        .curricula()
        .into_iter()
        .map(|c| {
          vec![
            c.name.clone(),
            c.effective_year.to_string(),
            if c.is_active { "Aktif" } else { "Arsip" }.to_owned(),
            ws.outcomes.iter().filter(|o| o.curriculum_id == c.id).count().to_string(),
            ws.courses.iter().filter(|m| m.curriculum_id == c.id).count().to_string(),
          ]
        })
        .collect(),
    },
    (Route::GraduateProfiles, _) => Page {
      title:   "Profil Lulusan",
      total:   ws.profiles.len(),
      filters: Vec::new(),
      headers: vec!["Kode", "Profil", "Deskripsi", "Sumber"],
      widths:  vec![
        Constraint::Length(7),
        Constraint::Length(24),
        Constraint::Min(20),
        Constraint::Length(20),
      ],
      rows:    app
        .profiles()
        .into_iter()
        .map(|p| vec![p.code.clone(), p.title.clone(), p.description.clone(), p.source.clone()])
        .collect(),
    },
    (Route::CoreCompetencies, _) => Page {
      title:   "Kompetensi Utama Lulusan",
      total:   ws.competencies.len(),
      filters: vec![aspect],
      headers: vec!["Kode", "Aspek", "Deskripsi"],
      widths:  vec![Constraint::Length(6), Constraint::Length(20), Constraint::Min(20)],
      rows:    app
        .competencies()
        .into_iter()
        .map(|k| vec![k.code.clone(), k.aspect.short_label().to_owned(), k.description.clone()])
        .collect(),
    },
    (Route::LearningOutcomes, _) => Page {
      title:   "Capaian Pembelajaran Lulusan",
      total:   ws.outcomes.len(),
      filters: vec![aspect],
      headers: vec!["Kode", "Aspek", "Deskripsi", "BK", "MK"],
      widths:  vec![
        Constraint::Length(6),
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(4),
        Constraint::Length(4),
      ],
      rows:    app
        .outcomes()
        .into_iter()
        .map(|o| {
          vec![
            o.code.clone(),
            o.aspect.short_label().to_owned(),
            o.description.clone(),
            ws.outcome_areas.row_count(&o.id).to_string(),
            ws.outcome_courses.row_count(&o.id).to_string(),
          ]
        })
        .collect(),
    },
    (Route::KnowledgeAreas, _) => Page {
      title:   "Bahan Kajian",
      total:   ws.knowledge_areas.len(),
      filters: vec![aspect],
      headers: vec!["Kode", "Nama", "Aspek", "Bidang", "CPL"],
      widths:  vec![
        Constraint::Length(7),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(24),
        Constraint::Length(4),
      ],
      rows:    app
        .areas()
        .into_iter()
        .map(|a| {
          vec![
            a.code.clone(),
            a.name.clone(),
            a.aspect.short_label().to_owned(),
            a.domain.clone(),
            ws.outcome_areas.col_count(&a.id).to_string(),
          ]
        })
        .collect(),
    },
    (Route::Courses, Tab::Lecturers) => Page {
      title:   "Dosen",
      total:   ws.lecturers.len(),
      filters: Vec::new(),
      headers: vec!["NIP", "Nama", "Email", "Bidang", "Jabatan"],
      widths:  vec![
        Constraint::Length(19),
        Constraint::Min(20),
        Constraint::Length(24),
        Constraint::Length(20),
        Constraint::Length(14),
      ],
      rows:    app
        .lecturers()
        .into_iter()
        .map(|l| {
          vec![
            l.nip.clone(),
            l.name.clone(),
            l.email.clone().unwrap_or_default(),
            l.specialty.clone().unwrap_or_default(),
            l.rank.clone().unwrap_or_default(),
          ]
        })
        .collect(),
    },
    (Route::Courses, _) => Page {
      title:   "Mata Kuliah",
      total:   ws.courses.len(),
      filters: vec![
        format!("Semester: {}", app.semester_filter.label()),
        format!("Sifat: {}", app.nature_filter.label()),
      ],
      headers: vec!["Kode", "Nama", "SKS", "Smt", "Sifat", "BK", "CPL", "Dosen"],
      widths:  vec![
        Constraint::Length(7),
        Constraint::Min(20),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(16),
        Constraint::Length(20),
      ],
      rows:    app
        .courses()
        .into_iter()
        .map(|c| {
          let area = c
            .knowledge_area
            .and_then(|id| ws.knowledge_area(&id))
            .map(|a| a.code.clone())
            .unwrap_or_else(|| "-".into());
          // Lecturers that no longer exist are simply not shown.
          let lecturers: Vec<&str> = c
            .lecturers
            .iter()
            .filter_map(|id| ws.lecturers.get(id))
            .map(|l| l.name.as_str())
            .collect();
          vec![
            c.code.clone(),
            c.name.clone(),
            c.credits.to_string(),
            c.semester.number().to_string(),
            c.nature.label().to_owned(),
            area,
            ws.outcome_codes(c).join(", "),
            lecturers.join(", "),
          ]
        })
        .collect(),
    },
    (Route::CourseOutcomes, _) => Page {
      title:   "CPMK",
      total:   ws.course_outcomes.len(),
      filters: Vec::new(),
      headers: vec!["MK", "Kode", "Deskripsi", "Bobot", "CPL"],
      widths:  vec![
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(5),
      ],
      rows:    app
        .course_outcomes()
        .into_iter()
        .map(|o| {
          vec![
            o.course_code.clone(),
            o.code.clone(),
            o.description.clone(),
            format!("{:.0}%", o.weight),
            ws.outcome(&o.outcome_id).map(|c| c.code.clone()).unwrap_or_else(|| "-".into()),
          ]
        })
        .collect(),
    },
    _ => Page {
      title:   "Rencana Pembelajaran Semester",
      total:   ws.plans.len(),
      filters: vec![format!("Status: {}", app.plan_filter.label())],
      headers: vec!["MK", "Versi", "Tanggal", "Dosen", "Status", "Pertemuan", "Bobot"],
      widths:  vec![
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(17),
        Constraint::Length(9),
        Constraint::Length(6),
      ],
      rows:    app
        .plans()
        .into_iter()
        .map(|p| {
          vec![
            p.course_code.clone(),
            p.version.to_string(),
            p.drafted_on.format("%Y-%m-%d").to_string(),
            p.lecturer.clone(),
            p.status.label().to_owned(),
            p.sessions.len().to_string(),
            format!("{:.0}%", p.total_weight()),
          ]
        })
        .collect(),
    },
  }
}

/// Render the current list page into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let page = page(app);

  // Title with count.
  let filtered = page.rows.len();
  let title = if filtered == page.total {
    format!(" {} ({}) ", page.title, page.total)
  } else {
    format!(" {} ({}/{}) ", page.title, filtered, page.total)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar along the bottom of the inner area.
  if inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let mut parts = Vec::new();
    if app.searching || !app.search.is_empty() {
      let cursor = if app.searching { "_" } else { "" };
      parts.push(format!("/{}{cursor}", app.search));
    }
    parts.extend(page.filters);
    f.render_widget(
      Paragraph::new(parts.join("   ")).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if page.rows.is_empty() {
    f.render_widget(
      Paragraph::new("Tidak ada data.").style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let header = Row::new(page.headers.into_iter().map(Cell::from))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
  let rows = page.rows.into_iter().map(|r| Row::new(r.into_iter().map(Cell::from)));

  let mut state = TableState::default();
  state.select(Some(app.cursor.min(filtered.saturating_sub(1))));

  f.render_stateful_widget(
    Table::new(rows, page.widths)
      .header(header)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    inner_area,
    &mut state,
  );
}
