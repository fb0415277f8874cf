use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::catalog::{self, Catalog};
use crate::router::{Destination, Router};
use crate::tui::{wrap_text, Palette, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

/// Theme browser. Enter drills into a theme; `b` swaps this screen for the
/// booking flow so backing out of it lands on Home.
pub struct ExploreScreen {
    selection: usize,
    palette: Palette,
    accent: String,
}

impl ExploreScreen {
    pub fn new(palette: Palette, accent: &str) -> Self {
        Self {
            selection: 0,
            palette,
            accent: accent.to_string(),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, catalog: &Catalog, router: &mut dyn Router) {
        let len = catalog.themes.len();
        match code {
            KeyCode::Up => self.selection = self.selection.saturating_sub(1),
            KeyCode::Down => self.selection = (self.selection + 1).min(len.saturating_sub(1)),
            KeyCode::Enter => {
                if let Some(theme) = catalog.themes.get(self.selection) {
                    router.navigate(Destination::ThemeDetails(catalog::theme_details_params(
                        theme,
                        &self.accent,
                    )));
                }
            }
            KeyCode::Char('b') => router.replace(Destination::BookEventFlow),
            KeyCode::Esc | KeyCode::Char('q') => router.go_back(),
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame, catalog: &Catalog) {
        let area = frame.area();
        let [header_area, _gap, list_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(" Explore Themes").style(HEADER_STYLE),
            header_area,
        );

        let width = list_area.width.saturating_sub(6) as usize;
        let mut lines = Vec::new();
        for (i, theme) in catalog.themes.iter().enumerate() {
            let selected = i == self.selection;
            let title_style = if selected {
                SELECTED_STYLE
            } else {
                Style::new()
                    .fg(self.palette.text)
                    .add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(Span::styled(format!("  {}", theme.title), title_style)));
            if selected {
                let (wrapped, _) = wrap_text(&theme.description, width);
                for l in wrapped.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("    {l}"),
                        Style::new().fg(self.palette.muted),
                    )));
                }
            }
        }
        frame.render_widget(Paragraph::new(lines), list_area);

        frame.render_widget(
            Paragraph::new(" Up/Down=navigate  Enter=details  b=book an event  Esc=back")
                .style(FOOTER_STYLE),
            hints_area,
        );
    }
}
