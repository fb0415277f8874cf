use crossterm::event::KeyCode;
use rand::seq::SliceRandom;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::router::{Destination, Router};
use crate::tui::{wrap_text, Palette, FOOTER_STYLE, HEADER_STYLE};

const GREETINGS: &[&str] = &[
    "Let's staff your next event.",
    "Hosts, models and uniforms, sorted.",
    "Planning something big?",
    "Your crew is a few steps away.",
    "Every great event starts at the door.",
];

const MENU_ITEMS: &[&str] = &["Book an event", "My events", "Explore themes", "Quit"];

const HERO_TITLE: &str = "Designed to Celebrate.";
const HERO_BODY: &str = "Join 2.7K event makers shaping celebrations that stand the test of time. \
From cozy gatherings to majestic receptions, every moment feels extraordinary.";

pub enum HomeAction {
    Continue,
    Quit,
}

pub struct HomeScreen {
    greeting: String,
    selection: usize,
    palette: Palette,
}

impl HomeScreen {
    pub fn new(user_name: &str, palette: Palette) -> Self {
        let mut rng = rand::thread_rng();
        let line = GREETINGS.choose(&mut rng).unwrap_or(&"Hello.");
        let first_name = user_name.split_whitespace().next().unwrap_or("");
        let greeting = if first_name.is_empty() {
            line.to_string()
        } else {
            format!("Hello, {first_name}. {line}")
        };
        Self {
            greeting,
            selection: 0,
            palette,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, router: &mut dyn Router) -> HomeAction {
        match code {
            KeyCode::Up => self.selection = self.selection.saturating_sub(1),
            KeyCode::Down => self.selection = (self.selection + 1).min(MENU_ITEMS.len() - 1),
            KeyCode::Char('b') => router.navigate(Destination::BookEventFlow),
            KeyCode::Char('m') => router.navigate(Destination::Events),
            KeyCode::Char('e') => router.navigate(Destination::Explore),
            KeyCode::Char('q') | KeyCode::Esc => return HomeAction::Quit,
            KeyCode::Enter => match self.selection {
                0 => router.navigate(Destination::BookEventFlow),
                1 => router.navigate(Destination::Events),
                2 => router.navigate(Destination::Explore),
                _ => return HomeAction::Quit,
            },
            _ => {}
        }
        HomeAction::Continue
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let hero_width = area.width.saturating_sub(8).min(64);
        let (hero_body, hero_lines) = wrap_text(HERO_BODY, hero_width as usize);
        let [_top, title_area, greeting_area, _gap, hero_area, menu_area, _bottom, hints_area] =
            Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(hero_lines + 3),
                Constraint::Length(MENU_ITEMS.len() as u16),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled("crewbook", HEADER_STYLE)).centered(),
            title_area,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.greeting.as_str(),
                Style::new().fg(self.palette.muted),
            ))
            .centered(),
            greeting_area,
        );

        let mut hero = vec![Line::from(Span::styled(
            HERO_TITLE,
            Style::new()
                .fg(self.palette.primary)
                .add_modifier(Modifier::BOLD),
        ))
        .centered()];
        hero.extend(hero_body.lines().map(|l| {
            Line::from(Span::styled(l.to_string(), Style::new().fg(self.palette.text))).centered()
        }));
        frame.render_widget(Paragraph::new(hero), hero_area);

        let width = 30u16.min(area.width);
        let x = area.x + (area.width - width) / 2;
        let centered_menu = Rect::new(x, menu_area.y, width, menu_area.height);
        let lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let marker = if i == self.selection { ">" } else { " " };
                let style = if i == self.selection {
                    Style::new()
                        .fg(self.palette.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!(" {marker} {label}"), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), centered_menu);

        frame.render_widget(
            Paragraph::new(" Up/Down=navigate  Enter=select  b=book  m=my events  e=explore  q=quit")
                .style(FOOTER_STYLE),
            hints_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::StackRouter;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn greeting_uses_first_name() {
        let home = HomeScreen::new("Priya Sharma", Palette::default());
        assert!(home.greeting.starts_with("Hello, Priya. "));
        let home = HomeScreen::new("", Palette::default());
        assert!(GREETINGS.contains(&home.greeting.as_str()));
    }

    #[test]
    fn enter_routes_by_selection() {
        let mut home = HomeScreen::new("", Palette::default());
        let mut router = StackRouter::new();
        home.handle_key(KeyCode::Enter, &mut router);
        assert_eq!(router.current(), &Destination::BookEventFlow);

        let mut router = StackRouter::new();
        home.handle_key(KeyCode::Down, &mut router);
        home.handle_key(KeyCode::Enter, &mut router);
        assert_eq!(router.current(), &Destination::Events);

        let mut router = StackRouter::new();
        home.handle_key(KeyCode::Down, &mut router);
        home.handle_key(KeyCode::Enter, &mut router);
        assert_eq!(router.current(), &Destination::Explore);

        home.handle_key(KeyCode::Down, &mut router);
        home.handle_key(KeyCode::Down, &mut router);
        assert!(matches!(home.handle_key(KeyCode::Enter, &mut router), HomeAction::Quit));
    }

    #[test]
    fn shortcut_opens_events() {
        let mut home = HomeScreen::new("", Palette::default());
        let mut router = StackRouter::new();
        home.handle_key(KeyCode::Char('m'), &mut router);
        assert_eq!(router.current(), &Destination::Events);
    }

    #[test]
    fn renders_hero_copy() {
        let home = HomeScreen::new("Priya", Palette::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| home.draw(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(HERO_TITLE));
        assert!(text.contains("Join 2.7K event makers"));
        assert!(text.contains("My events"));
    }
}
