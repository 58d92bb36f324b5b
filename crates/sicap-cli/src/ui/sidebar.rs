//! Navigation sidebar — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem},
};
use sicap_core::route::Route;

use crate::app::App;

/// Render the navigation list. Collapsed, only the shortcut digits show.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let collapsed = app.settings.sidebar_collapsed;
  let current = app.route.nav_parent();

  let block = Block::default()
    .title(if collapsed { "" } else { " Menu " })
    .borders(Borders::RIGHT)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = Route::NAV
    .iter()
    .enumerate()
    .map(|(i, route)| {
      let key = (i + 1) % 10;
      let style = if *route == current {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      let mut spans = vec![Span::styled(format!(" {key} "), style.fg(Color::Yellow))];
      if !collapsed {
        spans.push(Span::styled(route.title(), style));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  f.render_widget(List::new(items).block(block), area);
}
