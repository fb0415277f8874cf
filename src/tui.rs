use std::str::FromStr;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::Frame;

use crate::error::Result;
use crate::settings::PaletteSettings;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

/// Colour tokens handed to every view at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub background: Color,
    pub card: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub track: Color,
    pub success: Color,
    pub disabled: Color,
}

impl Palette {
    pub fn from_settings(p: &PaletteSettings) -> Self {
        let fallback = PaletteSettings::default();
        let pick = |value: &str, default: &str| {
            Color::from_str(value)
                .or_else(|_| Color::from_str(default))
                .unwrap_or(Color::Reset)
        };
        Self {
            primary: pick(&p.primary, &fallback.primary),
            background: pick(&p.background, &fallback.background),
            card: pick(&p.card, &fallback.card),
            border: pick(&p.border, &fallback.border),
            text: pick(&p.text, &fallback.text),
            muted: pick(&p.muted, &fallback.muted),
            track: pick(&p.track, &fallback.track),
            success: pick(&p.success, &fallback.success),
            disabled: pick(&p.disabled, &fallback.disabled),
        }
    }

    pub fn border_for(&self, selected: bool) -> Style {
        if selected {
            Style::new().fg(self.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(self.border)
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_settings(&PaletteSettings::default())
    }
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

/// A `width` x `height` rect centred inside `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, rect, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(row);
    rect
}

/// Build a display string with a block cursor inserted at `cursor_pos`.
pub fn insert_cursor(value: &str, cursor_pos: usize) -> String {
    let mut display = value.to_string();
    let byte_pos = display
        .char_indices()
        .nth(cursor_pos)
        .map(|(i, _)| i)
        .unwrap_or(display.len());
    display.insert(byte_pos, '\u{2588}');
    display
}

/// What the event loop should do after a key is handled.
pub enum LoopControl {
    Continue,
    Quit,
}

/// Full-screen app contract driven by `run_app`.
pub trait App {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, key: KeyEvent) -> LoopControl;
}

/// Run a ratatui app. Sets up the terminal, event loop and panic hook, then
/// restores the terminal on exit.
pub fn run_app(app: &mut dyn App) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        tracing::error!("panic: {info}");
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                match app.handle_key(key) {
                    LoopControl::Quit => break Ok(()),
                    LoopControl::Continue => {}
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_parses_hex_tokens() {
        let palette = Palette::default();
        assert_eq!(palette.primary, Color::Rgb(0x30, 0x5B, 0x77));
        assert_eq!(palette.disabled, Color::Rgb(0xB9, 0xC3, 0xCC));
    }

    #[test]
    fn palette_falls_back_on_bad_tokens() {
        let settings = PaletteSettings {
            primary: "not-a-colour".into(),
            ..PaletteSettings::default()
        };
        let palette = Palette::from_settings(&settings);
        assert_eq!(palette.primary, Color::Rgb(0x30, 0x5B, 0x77));
    }

    #[test]
    fn border_switches_on_selection() {
        let palette = Palette::default();
        assert_eq!(palette.border_for(true).fg, Some(palette.primary));
        assert_eq!(palette.border_for(false).fg, Some(palette.border));
    }

    #[test]
    fn wrap_text_counts_lines() {
        let (wrapped, lines) = wrap_text("silk sarees and jasmine garlands", 12);
        assert!(lines > 1);
        assert_eq!(wrapped.lines().count() as u16, lines);
        assert_eq!(wrap_text("x", 0).1, 1);
    }

    #[test]
    fn cursor_is_inserted_at_char_index() {
        assert_eq!(insert_cursor("ab", 1), "a\u{2588}b");
        assert_eq!(insert_cursor("ab", 9), "ab\u{2588}");
    }

    #[test]
    fn centered_rect_is_clipped() {
        let r = centered(Rect::new(0, 0, 20, 10), 50, 4);
        assert_eq!(r.width, 20);
        assert_eq!(r.height, 4);
    }
}
