//! TUI rendering — orchestrates all panes.

pub mod dashboard;
pub mod dialog;
pub mod list;
pub mod matrix;
pub mod report;
pub mod sidebar;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Tabs},
};
use sicap_core::route::Route;

use crate::app::{App, Tab};

/// Sidebar width when expanded and when collapsed to its number column.
const SIDEBAR_WIDTH: u16 = 24;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Some(dialog) = &app.dialog {
    // The plan routes show their form as the page itself.
    if !matches!(app.route, Route::NewPlan | Route::EditPlan(_)) {
      dialog::draw_popup(f, area, app, dialog);
    }
  }
  if app.delete.is_some() {
    dialog::draw_confirm(f, area);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    format!(" SI-CAP  {}  {}", app.route.title(), app.route.path()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("KKM {}  {date} ", app.kkm),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let width = if app.settings.sidebar_collapsed {
    SIDEBAR_COLLAPSED_WIDTH
  } else {
    SIDEBAR_WIDTH
  };
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(width), Constraint::Min(0)])
    .split(area);

  sidebar::draw(f, cols[0], app);
  draw_page(f, cols[1], app);
}

fn draw_page(f: &mut Frame, area: Rect, app: &App) {
  match app.route {
    Route::Dashboard => dashboard::draw(f, area, app),
    Route::Reports => report::draw(f, area, app),
    Route::NewPlan | Route::EditPlan(_) => match &app.dialog {
      Some(dialog) => dialog::draw_page(f, area, app, dialog),
      None => list::draw(f, area, app),
    },
    route => {
      let tabs = Tab::available(route);
      let body = if tabs.len() > 1 {
        let rows = Layout::default()
          .direction(Direction::Vertical)
          .constraints([Constraint::Length(1), Constraint::Min(0)])
          .split(area);
        draw_tabs(f, rows[0], app, tabs);
        rows[1]
      } else {
        area
      };
      match app.tab {
        Tab::Matrix => matrix::draw(f, body, app),
        Tab::List | Tab::Lecturers => list::draw(f, body, app),
      }
    }
  }
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App, tabs: &[Tab]) {
  let selected = tabs.iter().position(|t| *t == app.tab).unwrap_or(0);
  let widget = Tabs::new(tabs.iter().map(|t| t.label()))
    .select(selected)
    .style(Style::default().fg(Color::DarkGray))
    .highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    );
  f.render_widget(widget, area);
}

/// An empty bordered pane with a dim one-line message.
pub(crate) fn draw_placeholder(f: &mut Frame, area: Rect, title: &str, message: &str) {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(vec![Span::styled(
      message.to_owned(),
      Style::default().fg(Color::DarkGray),
    )])),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = if app.delete.is_some() {
    ("HAPUS", "y/Enter hapus  n/Esc batal".to_owned())
  } else if app.dialog.is_some() {
    ("FORM", "Tab/↑↓ field  ←→ pilih  Spasi centang  Enter simpan  Esc batal".to_owned())
  } else if let Some(path) = &app.goto {
    ("GOTO", format!("{path}_  Enter buka  Esc batal"))
  } else if app.searching {
    ("CARI", "Ketik untuk menyaring  Enter selesai  Esc hapus".to_owned())
  } else {
    ("NORMAL", normal_hints(app).to_owned())
  };

  let status = if app.status_msg.is_empty() || app.goto.is_some() {
    hints
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

fn normal_hints(app: &App) -> &'static str {
  match app.route {
    Route::Dashboard => "+/- KKM  j/k mata kuliah  s mahasiswa  / cari mahasiswa  0-9 menu  q keluar",
    Route::Reports => "Tab jenis laporan  x ekspor Excel (n/a)  p cetak PDF (n/a)  q keluar",
    Route::Curricula => "a tambah  e edit  d hapus  t aktif/arsip  y duplikat  f status  / cari",
    Route::Courses if app.tab == Tab::Matrix => "hjkl gerak  Spasi ubah relasi  Tab tampilan",
    Route::Courses => "a tambah  e edit  d hapus  f semester  F sifat  / cari  Tab tampilan",
    _ if app.tab == Tab::Matrix => "hjkl gerak  Spasi ubah relasi  Tab tampilan  q keluar",
    _ => "a tambah  e edit  d hapus  f filter  / cari  g buka path  q keluar",
  }
}
