//! Relation matrix tab — CPL rows against profile, Bahan Kajian or course
//! columns, with per-row and per-column counts.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Cell, Row, Table},
};

use crate::app::App;

const CODE_WIDTH: u16 = 6;
const CELL_WIDTH: u16 = 7;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(view) = app.matrix_view() else {
    return super::draw_placeholder(f, area, "Matriks", "Tidak ada matriks di halaman ini.");
  };
  let (cur_row, cur_col) = app.matrix_cursor;

  let block = Block::default()
    .title(format!(" {} ({} relasi) ", view.title, view.total))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  // Scroll horizontally so the cursor column stays visible.
  let visible = usize::from(inner.width.saturating_sub(CODE_WIDTH + CELL_WIDTH) / CELL_WIDTH).max(1);
  let first = cur_col.saturating_sub(visible - 1);
  let cols = first..(first + visible).min(view.cols.len());

  let bold = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
  let header = Row::new(
    std::iter::once(Cell::from("CPL"))
      .chain(view.cols[cols.clone()].iter().map(|c| Cell::from(c.clone())))
      .chain(std::iter::once(Cell::from("Σ"))),
  )
  .style(bold);

  let mut rows: Vec<Row> = view
    .rows
    .iter()
    .enumerate()
    .map(|(r, code)| {
      let cells = view.cells[r][cols.clone()].iter().enumerate().map(|(i, linked)| {
        let c = first + i;
        let mut style = if *linked {
          Style::default().fg(Color::Green)
        } else {
          Style::default().fg(Color::DarkGray)
        };
        if r == cur_row && c == cur_col {
          style = style.bg(Color::Blue).add_modifier(Modifier::BOLD);
        }
        Cell::from(if *linked { "  ●" } else { "  ·" }).style(style)
      });
      Row::new(
        std::iter::once(Cell::from(code.clone()).style(bold))
          .chain(cells)
          .chain(std::iter::once(Cell::from(view.row_counts[r].to_string()))),
      )
    })
    .collect();

  // Footer with column totals.
  rows.push(
    Row::new(
      std::iter::once(Cell::from("Σ"))
        .chain(view.col_counts[cols.clone()].iter().map(|n| Cell::from(format!("  {n}"))))
        .chain(std::iter::once(Cell::from(view.total.to_string()))),
    )
    .style(bold),
  );

  let widths = std::iter::once(Constraint::Length(CODE_WIDTH))
    .chain(cols.map(|_| Constraint::Length(CELL_WIDTH)))
    .chain(std::iter::once(Constraint::Length(CELL_WIDTH)));

  f.render_widget(Table::new(rows, widths).header(header), inner);
}
