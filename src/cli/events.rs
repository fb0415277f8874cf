use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::cards::image_label;
use crate::catalog::{EventItem, DEMO_EVENTS};
use crate::fmt::money;
use crate::router::{Destination, Router};
use crate::tui::{Palette, FOOTER_STYLE, HEADER_STYLE};

const EVENT_CARD_HEIGHT: u16 = 7;

/// Booked events plus a "Book Events" button. Focus 0 is the button, the
/// rest index into `DEMO_EVENTS`.
pub struct EventsScreen {
    focus: usize,
    palette: Palette,
}

/// Dots joined by dashes, filled for completed stages: `●──●──○`.
pub fn tracker_line(steps: usize, completed: usize) -> String {
    (0..steps)
        .map(|i| if i < completed { "\u{25cf}" } else { "\u{25cb}" })
        .collect::<Vec<_>>()
        .join("\u{2500}\u{2500}")
}

impl EventsScreen {
    pub fn new(palette: Palette) -> Self {
        Self { focus: 0, palette }
    }

    fn selected_event(&self) -> Option<&'static EventItem> {
        self.focus.checked_sub(1).and_then(|i| DEMO_EVENTS.get(i))
    }

    pub fn handle_key(&mut self, code: KeyCode, router: &mut dyn Router) {
        match code {
            KeyCode::Up => self.focus = self.focus.saturating_sub(1),
            KeyCode::Down | KeyCode::Tab => self.focus = (self.focus + 1).min(DEMO_EVENTS.len()),
            KeyCode::Enter | KeyCode::Char(' ') => match self.selected_event() {
                None => router.navigate(Destination::BookEventFlow),
                Some(event) => {
                    tracing::debug!(order = event.order_id, status = event.status.label(), "track status")
                }
            },
            KeyCode::Char('b') => router.navigate(Destination::BookEventFlow),
            KeyCode::Esc | KeyCode::Char('q') => router.go_back(),
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, intro_area, button_area, list_title_area, list_area, hints_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(Paragraph::new(" Events").style(HEADER_STYLE), header_area);

        let heading = Style::new().fg(self.palette.primary).add_modifier(Modifier::BOLD);
        let muted = Style::new().fg(self.palette.muted);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("Your Event Starts Here", heading)).centered(),
                Line::from(Span::styled("Plan, book, and celebrate effortlessly.", muted)).centered(),
            ]),
            intro_area,
        );

        let mut button_style = Style::new().fg(self.palette.primary).add_modifier(Modifier::BOLD);
        if self.focus == 0 {
            button_style = button_style.add_modifier(Modifier::REVERSED);
        }
        let button_rect = Rect::new(
            area.x + area.width.saturating_sub(30) / 2,
            button_area.y,
            30.min(area.width),
            button_area.height,
        );
        frame.render_widget(
            Paragraph::new(Span::styled("Book Events", button_style))
                .centered()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::new().fg(self.palette.primary)),
                ),
            button_rect,
        );

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("Your Events", heading)).centered(),
                Line::from(Span::styled("Track what's booked, effortlessly.", muted)).centered(),
            ]),
            list_title_area,
        );

        let visible = (list_area.height / EVENT_CARD_HEIGHT).max(1) as usize;
        let first = self.focus.saturating_sub(1).saturating_sub(visible - 1);
        for (slot, (i, event)) in DEMO_EVENTS.iter().enumerate().skip(first).take(visible).enumerate() {
            let y = list_area.y + slot as u16 * EVENT_CARD_HEIGHT;
            if y + EVENT_CARD_HEIGHT > list_area.y + list_area.height {
                break;
            }
            let rect = Rect::new(list_area.x + 1, y, list_area.width.saturating_sub(2), EVENT_CARD_HEIGHT);
            self.draw_event(frame, rect, event, self.focus == i + 1);
        }

        frame.render_widget(
            Paragraph::new(" Up/Down=move  Enter=book / track  b=book an event  Esc=back")
                .style(FOOTER_STYLE),
            hints_area,
        );
    }

    fn draw_event(&self, frame: &mut Frame, area: Rect, event: &EventItem, focused: bool) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border_for(focused));
        if focused {
            block = block.border_type(BorderType::Thick);
        }
        let text = Style::new().fg(self.palette.text);
        let lines = vec![
            Line::from(vec![
                Span::styled(event.title, text.add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(
                    format!(" {} ", event.status.label()),
                    Style::new().bg(self.palette.track).fg(self.palette.text),
                ),
            ]),
            Line::from(Span::styled(money(event.price), text.add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                format!("Order id: {}   {}", event.order_id, image_label(event.image)),
                Style::new().fg(self.palette.muted),
            )),
            Line::from(Span::styled(
                tracker_line(event.steps, event.completed_steps),
                Style::new().fg(self.palette.primary),
            )),
            Line::from(Span::styled(
                "[ Track Status ]",
                Style::new().fg(self.palette.primary).add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::StackRouter;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn tracker_fills_completed_stages() {
        assert_eq!(tracker_line(4, 3), "\u{25cf}\u{2500}\u{2500}\u{25cf}\u{2500}\u{2500}\u{25cf}\u{2500}\u{2500}\u{25cb}");
        assert_eq!(tracker_line(2, 0), "\u{25cb}\u{2500}\u{2500}\u{25cb}");
        assert_eq!(tracker_line(0, 0), "");
    }

    #[test]
    fn enter_on_button_opens_booking_flow() {
        let mut screen = EventsScreen::new(Palette::default());
        let mut router = StackRouter::new();
        router.navigate(Destination::Events);
        screen.handle_key(KeyCode::Enter, &mut router);
        assert_eq!(router.current(), &Destination::BookEventFlow);
        router.go_back();
        assert_eq!(router.current(), &Destination::Events);
    }

    #[test]
    fn enter_on_event_stays_put() {
        let mut screen = EventsScreen::new(Palette::default());
        let mut router = StackRouter::new();
        router.navigate(Destination::Events);
        screen.handle_key(KeyCode::Down, &mut router);
        assert_eq!(screen.selected_event().map(|e| e.order_id), Some("#265894"));
        screen.handle_key(KeyCode::Enter, &mut router);
        assert_eq!(router.current(), &Destination::Events);

        for _ in 0..10 {
            screen.handle_key(KeyCode::Down, &mut router);
        }
        assert_eq!(screen.focus, DEMO_EVENTS.len());
    }

    #[test]
    fn escape_goes_back_home() {
        let mut screen = EventsScreen::new(Palette::default());
        let mut router = StackRouter::new();
        router.navigate(Destination::Events);
        screen.handle_key(KeyCode::Esc, &mut router);
        assert_eq!(router.current(), &Destination::Home);
    }

    #[test]
    fn renders_booked_event_card() {
        let screen = EventsScreen::new(Palette::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Book Events"));
        assert!(text.contains("South Indian Style Wedding"));
        assert!(text.contains("#265894"));
        assert!(text.contains("Track Status"));
    }
}
