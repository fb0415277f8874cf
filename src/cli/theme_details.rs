use std::str::FromStr;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::catalog::Catalog;
use crate::router::{Router, ThemeDetailsParams};
use crate::tui::{wrap_text, Palette, FOOTER_STYLE};

/// Gallery descriptions for a drill-down, when it refers to a catalog theme.
fn gallery(params: &ThemeDetailsParams, catalog: &Catalog) -> Vec<String> {
    params
        .id
        .parse::<i64>()
        .ok()
        .and_then(|id| catalog.theme(id))
        .map(|t| t.images.iter().map(|i| i.description.clone()).collect())
        .unwrap_or_default()
}

pub fn handle_key(code: KeyCode, router: &mut dyn Router) {
    if matches!(code, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q')) {
        router.go_back();
    }
}

pub fn draw(frame: &mut Frame, params: &ThemeDetailsParams, catalog: &Catalog, palette: &Palette) {
    let area = frame.area();
    let badge_color = Color::from_str(&params.color).unwrap_or(palette.primary);
    let width = area.width.saturating_sub(4) as usize;
    let (description, desc_lines) = wrap_text(&params.description, width);

    let [hero_area, gallery_area, hints_area] = Layout::vertical([
        Constraint::Length(desc_lines + 7),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut hero = vec![
        Line::from(""),
        Line::from(Span::styled(
            " THEME ",
            Style::new()
                .bg(badge_color)
                .fg(palette.card)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            params.title.clone(),
            Style::new().fg(palette.text).add_modifier(Modifier::BOLD),
        )),
    ];
    hero.extend(
        description
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::new().fg(palette.muted)))),
    );
    if !params.image.is_empty() {
        hero.push(Line::from(Span::styled(
            format!("\u{25a3} {}", params.image),
            Style::new().fg(palette.disabled),
        )));
    }
    frame.render_widget(
        Paragraph::new(hero).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(badge_color))
                .title(" \u{2039} Back "),
        ),
        hero_area,
    );

    let items = gallery(params, catalog);
    if !items.is_empty() {
        let mut lines = vec![Line::from(Span::styled(
            " Gallery",
            Style::new().fg(palette.text).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(items.into_iter().map(|d| Line::from(format!("  \u{2022} {d}"))));
        frame.render_widget(Paragraph::new(lines), gallery_area);
    }

    frame.render_widget(Paragraph::new(" Esc=back").style(FOOTER_STYLE), hints_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{theme_details_params, uniform, uniform_details_params};
    use crate::router::{Destination, StackRouter};

    #[test]
    fn gallery_lists_theme_images() {
        let catalog = Catalog::embedded().unwrap();
        let params = theme_details_params(catalog.theme(1).unwrap(), "#305B77");
        assert_eq!(
            gallery(&params, &catalog),
            vec!["Floral entrance with kolam", "Mandap with banana-leaf arch"]
        );
    }

    #[test]
    fn uniform_details_have_no_gallery() {
        let catalog = Catalog::embedded().unwrap();
        let params = uniform_details_params(uniform("u1").unwrap(), "#305B77");
        assert!(gallery(&params, &catalog).is_empty());
    }

    #[test]
    fn escape_goes_back() {
        let mut router = StackRouter::new();
        router.navigate(Destination::Explore);
        handle_key(KeyCode::Enter, &mut router);
        assert_eq!(router.current(), &Destination::Explore);
        handle_key(KeyCode::Esc, &mut router);
        assert_eq!(router.current(), &Destination::Home);
    }
}
