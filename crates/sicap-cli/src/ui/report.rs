//! Laporan — per-course, per-CPL and per-year summary tables.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Cell, Row, Table, Tabs},
};
use sicap_core::report::{self, ReportKind};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(area);

  let selected = ReportKind::ALL.iter().position(|k| *k == app.report).unwrap_or(0);
  f.render_widget(
    Tabs::new(ReportKind::ALL.iter().map(|k| k.label()))
      .select(selected)
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
    rows[0],
  );

  let (headers, widths, body): (Vec<&str>, Vec<Constraint>, Vec<Vec<String>>) = match app.report {
    ReportKind::PerCourse => (
      vec!["Kode", "Mata Kuliah", "CPMK", "CPL", "Rata-rata Bobot"],
      vec![
        Constraint::Length(8),
        Constraint::Min(24),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(16),
      ],
      report::per_course(&app.ws)
        .into_iter()
        .map(|r| {
          vec![
            r.code,
            r.name,
            r.course_outcomes.to_string(),
            r.outcomes.to_string(),
            r.mean_weight.map_or_else(|| "-".to_owned(), |w| format!("{w:.1}%")),
          ]
        })
        .collect(),
    ),
    ReportKind::PerOutcome => (
      vec!["Kode", "Deskripsi", "Mata Kuliah"],
      vec![Constraint::Length(6), Constraint::Min(30), Constraint::Length(12)],
      report::per_outcome(&app.ws)
        .into_iter()
        .map(|r| vec![r.code, r.description, r.courses.to_string()])
        .collect(),
    ),
    ReportKind::PerYear => (
      vec!["Tahun", "Kurikulum", "CPL", "Mata Kuliah"],
      vec![
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(12),
      ],
      report::per_year(&app.ws)
        .into_iter()
        .map(|r| {
          vec![
            r.year.to_string(),
            r.curricula.to_string(),
            r.outcomes.to_string(),
            r.courses.to_string(),
          ]
        })
        .collect(),
    ),
  };

  let block = Block::default()
    .title(format!(" Laporan {} ", app.report.label()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let header = Row::new(headers.into_iter().map(Cell::from))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
  let body = body.into_iter().map(|r| Row::new(r.into_iter().map(Cell::from)));

  f.render_widget(Table::new(body, widths).header(header).block(block), rows[1]);
}
