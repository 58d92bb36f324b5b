//! Dashboard — headline counts and KKM-coloured score charts.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};
use sicap_core::kkm::{Kkm, PassStatus, ScorePoint, classify_series, tally};

use crate::app::App;

fn status_color(status: PassStatus) -> Color {
  match status {
    PassStatus::Pass => Color::Green,
    PassStatus::Fail => Color::Red,
  }
}

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(4),      // stat cards
      Constraint::Percentage(50), // charts, top row
      Constraint::Min(8),         // charts, bottom row
    ])
    .split(area);

  draw_stats(f, rows[0], app);

  let top = thirds(rows[1]);
  let bottom = thirds(rows[2]);
  let scores = &app.ws.scores;

  draw_chart(f, top[0], "Ketercapaian Profil Lulusan", &scores.profile_attainment, app.kkm);
  draw_chart(f, top[1], "Rata-rata Bahan Kajian", &scores.area_averages, app.kkm);
  draw_chart(f, top[2], "Rata-rata Mata Kuliah", &scores.course_averages, app.kkm);

  let student = app.dashboard_student();
  let mut student_title = match student {
    Some((nim, name)) => format!("Nilai Akhir {name} ({nim})"),
    None => "Nilai Akhir Mahasiswa".to_owned(),
  };
  if app.searching || !app.search.is_empty() {
    let cursor = if app.searching { "_" } else { "" };
    student_title.push_str(&format!(" /{}{cursor}", app.search));
  }
  let finals = student
    .map(|(nim, _)| scores.student_finals(nim))
    .unwrap_or_default();
  draw_chart(f, bottom[0], &student_title, &finals, app.kkm);

  let (cpmk_title, cpmk) = match app.dashboard_course() {
    Some(course) => (
      format!("Rata-rata CPMK {}", course.code),
      scores.course_outcome_averages(&course.code),
    ),
    None => ("Rata-rata CPMK".to_owned(), Vec::new()),
  };
  draw_chart(f, bottom[1], &cpmk_title, &cpmk, app.kkm);
  draw_course_panel(f, bottom[2], app);
}

fn thirds(area: Rect) -> std::rc::Rc<[Rect]> {
  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
    .split(area)
}

// ─── Stats ────────────────────────────────────────────────────────────────────

fn draw_stats(f: &mut Frame, area: Rect, app: &App) {
  let stats = app.ws.stats();
  let cards = [
    ("Kurikulum", stats.curricula.to_string(), format!("{} aktif", stats.active_curricula.len())),
    ("Profil Lulusan", stats.profiles.to_string(), String::new()),
    ("CPL", stats.outcomes.to_string(), String::new()),
    ("Mata Kuliah", stats.courses.to_string(), format!("{} CPMK", stats.course_outcomes)),
    (
      "RPS",
      stats.plans.to_string(),
      format!("{} terbit, {} draft", stats.published_plans, stats.draft_plans),
    ),
  ];

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints(cards.iter().map(|_| Constraint::Ratio(1, cards.len() as u32)))
    .split(area);

  for ((label, value, note), col) in cards.into_iter().zip(cols.iter()) {
    let block = Block::default()
      .title(format!(" {label} "))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let lines = vec![
      Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
      Line::from(Span::styled(note, Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines).block(block), *col);
  }
}

// ─── Charts ───────────────────────────────────────────────────────────────────

fn draw_chart(f: &mut Frame, area: Rect, title: &str, series: &[ScorePoint], kkm: Kkm) {
  let t = tally(series.iter().map(|p| p.score), kkm);
  let block = Block::default()
    .title(format!(" {title}  ✓{} ✗{} ", t.passing, t.failing))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if series.is_empty() {
    f.render_widget(
      Paragraph::new("Tidak ada data.")
        .style(Style::default().fg(Color::DarkGray))
        .block(block),
      area,
    );
    return;
  }

  let bars: Vec<Bar> = classify_series(series, kkm)
    .map(|(point, status)| {
      let color = status_color(status);
      Bar::default()
        .value(point.score.round().max(0.0) as u64)
        .label(Line::from(point.code.clone()))
        .text_value(format!("{:.0}", point.score))
        .style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color))
    })
    .collect();

  let inner_width = area.width.saturating_sub(2);
  let n = u16::try_from(bars.len()).unwrap_or(u16::MAX).max(1);
  let bar_width = (inner_width / n).saturating_sub(1).clamp(3, 9);

  f.render_widget(
    BarChart::default()
      .block(block)
      .data(BarGroup::default().bars(&bars))
      .bar_width(bar_width)
      .bar_gap(1)
      .max(100),
    area,
  );
}

fn draw_course_panel(f: &mut Frame, area: Rect, app: &App) {
  let Some(course) = app.dashboard_course() else {
    return super::draw_placeholder(f, area, "Mata Kuliah", "Belum ada mata kuliah.");
  };
  let block = Block::default()
    .title(format!(" {} {} ", course.code, course.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut lines = Vec::new();
  if let Some(measure) = app.below_threshold() {
    lines.push(Line::from(vec![
      Span::raw("Di bawah KKM: "),
      Span::styled(
        format!("{} dari {} mahasiswa ({:.1}%)", measure.below, measure.total, measure.percent()),
        Style::default().fg(if measure.below > 0 { Color::Red } else { Color::Green }),
      ),
    ]));
  }
  let average = app
    .ws
    .scores
    .course_averages
    .iter()
    .find(|p| p.code == course.code);
  if let Some(avg) = average {
    let status = app.kkm.classify(avg.score);
    lines.push(Line::from(vec![
      Span::raw("Rata-rata: "),
      Span::styled(
        format!("{:.1} ({})", avg.score, status.label()),
        Style::default().fg(status_color(status)),
      ),
    ]));
  }

  lines.push(Line::from(Span::styled(
    "Riwayat per semester",
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
  )));
  let mut any = false;
  for term in app.ws.scores.history_for(&course.code) {
    any = true;
    let m = term.as_measure();
    lines.push(Line::from(format!(
      "{:<6} {:<18} {:>2}/{:<3} {:>5.1}%",
      term.term,
      term.period,
      m.below,
      m.total,
      m.percent()
    )));
  }
  if !any {
    lines.push(Line::from(Span::styled("Belum ada riwayat.", Style::default().fg(Color::DarkGray))));
  }

  f.render_widget(Paragraph::new(lines).block(block), area);
}
