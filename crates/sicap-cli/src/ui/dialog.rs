//! Form dialogs and the delete confirmation, drawn over the page.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
  app::App,
  dialog::{Dialog, FieldKind},
};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height)])
    .flex(Flex::Center)
    .areas(area);
  let [rect] = Layout::horizontal([Constraint::Length(width)])
    .flex(Flex::Center)
    .areas(row);
  rect
}

/// One line per field: label, value, and for pick lists the options.
fn field_lines(app: &App, dialog: &Dialog) -> Vec<Line<'static>> {
  let fields = dialog.form.fields(&app.ws);
  let mut lines = Vec::new();
  for (i, field) in fields.into_iter().enumerate() {
    let focused = i == dialog.field;
    let marker = if field.required { "*" } else { " " };
    let label_style = if focused {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    let value_style = if focused {
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };

    let value = match &field.kind {
      FieldKind::Text if focused => format!("{}_", field.value),
      FieldKind::Cycle if focused => format!("‹ {} ›", field.value),
      FieldKind::Picks(_) => format!("{} dipilih", field.value),
      _ => field.value.clone(),
    };
    lines.push(Line::from(vec![
      Span::styled(format!("{marker}{:<20}", field.label), label_style),
      Span::styled(value, value_style),
    ]));

    if let FieldKind::Picks(picks) = &field.kind {
      let mut spans = vec![Span::raw(" ".repeat(21))];
      for (p, pick) in picks.iter().enumerate() {
        let mark = if pick.selected { "[x]" } else { "[ ]" };
        let mut style = if pick.selected {
          Style::default().fg(Color::Green)
        } else {
          Style::default().fg(Color::DarkGray)
        };
        if focused && p == dialog.pick {
          style = style.bg(Color::Blue).fg(Color::White);
        }
        spans.push(Span::styled(format!("{mark} {} ", pick.label), style));
      }
      lines.push(Line::from(spans));
    }
  }

  lines.push(Line::raw(""));
  let (text, color) = if dialog.form.can_submit() {
    ("Enter untuk menyimpan", Color::Green)
  } else {
    ("Field bertanda * wajib diisi", Color::Yellow)
  };
  lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
  lines
}

/// Draw the open form as a centred modal.
pub fn draw_popup(f: &mut Frame, area: Rect, app: &App, dialog: &Dialog) {
  let lines = field_lines(app, dialog);
  let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
  let rect = centered(area, area.width.saturating_sub(8).min(90), height.min(area.height));

  let block = Block::default()
    .title(format!(" {} ", dialog.form.title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  f.render_widget(Clear, rect);
  f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), rect);
}

/// Draw the open form as a full page (the plan create/edit routes).
pub fn draw_page(f: &mut Frame, area: Rect, app: &App, dialog: &Dialog) {
  let block = Block::default()
    .title(format!(" {} ", dialog.form.title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  f.render_widget(
    Paragraph::new(field_lines(app, dialog))
      .block(block)
      .wrap(Wrap { trim: false }),
    area,
  );
}

pub fn draw_confirm(f: &mut Frame, area: Rect) {
  let rect = centered(area, 44, 5);
  let block = Block::default()
    .title(" Hapus data ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  f.render_widget(Clear, rect);
  f.render_widget(
    Paragraph::new(vec![
      Line::raw("Data yang dihapus tidak dapat dikembalikan."),
      Line::from(Span::styled(
        "y hapus   n batal",
        Style::default().fg(Color::Yellow),
      )),
    ])
    .block(block),
    rect,
  );
}
