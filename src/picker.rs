//! Modal date/time picker. Edits a draft timestamp and hands it back on
//! confirm; the caller decides which components to keep. Which target is
//! being edited lives with the caller, so every call takes it.

use chrono::{Datelike, Duration, Months, NaiveDateTime, Timelike};
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::{centered, Palette, FOOTER_STYLE};
use crate::wizard::{PickerMode, PickerTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Day,
    Month,
    Year,
    Hour,
    Minute,
}

const DATE_COMPONENTS: &[Component] = &[Component::Day, Component::Month, Component::Year];
const TIME_COMPONENTS: &[Component] = &[Component::Hour, Component::Minute];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Pending,
    Confirm(NaiveDateTime),
    Cancel,
}

fn components(mode: PickerMode) -> &'static [Component] {
    match mode {
        PickerMode::Date => DATE_COMPONENTS,
        PickerMode::Time => TIME_COMPONENTS,
    }
}

#[derive(Debug, Clone, Default)]
pub struct DateTimePicker {
    draft: NaiveDateTime,
    focus: usize,
}

impl DateTimePicker {
    pub fn open(initial: NaiveDateTime) -> Self {
        Self {
            draft: initial,
            focus: 0,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, mode: PickerMode) -> PickerOutcome {
        let count = components(mode).len();
        match code {
            KeyCode::Enter => return PickerOutcome::Confirm(self.draft),
            KeyCode::Esc => return PickerOutcome::Cancel,
            KeyCode::Left | KeyCode::BackTab => self.focus = (self.focus + count - 1) % count,
            KeyCode::Right | KeyCode::Tab => self.focus = (self.focus + 1) % count,
            KeyCode::Up => self.step(mode, 1),
            KeyCode::Down => self.step(mode, -1),
            _ => {}
        }
        PickerOutcome::Pending
    }

    fn step(&mut self, mode: PickerMode, delta: i32) {
        let component = components(mode)[self.focus];
        self.draft = shift(self.draft, component, delta);
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, target: PickerTarget, palette: &Palette) {
        let rect = centered(area, 36, 7);
        frame.render_widget(Clear, rect);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(palette.primary))
            .title(format!(" {} ", target.label()));

        let values: Vec<(Component, String)> = components(target.mode())
            .iter()
            .map(|c| (*c, component_text(self.draft, *c)))
            .collect();

        let mut spans = vec![Span::raw("  ")];
        for (i, (_, text)) in values.iter().enumerate() {
            if i > 0 {
                let sep = match target.mode() {
                    PickerMode::Date => " / ",
                    PickerMode::Time => " : ",
                };
                spans.push(Span::raw(sep));
            }
            let style = if i == self.focus {
                Style::new().fg(palette.primary).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::new().fg(palette.text)
            };
            spans.push(Span::styled(text.clone(), style));
        }

        let lines = vec![
            Line::from(""),
            Line::from(spans),
            Line::from(""),
            Line::from(Span::styled(
                "  \u{2191}/\u{2193}=change  \u{2190}/\u{2192}=move",
                FOOTER_STYLE,
            )),
            Line::from(Span::styled("  Enter=confirm  Esc=cancel", FOOTER_STYLE)),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }
}

fn component_text(dt: NaiveDateTime, c: Component) -> String {
    match c {
        Component::Day => format!("{:02}", dt.day()),
        Component::Month => dt.format("%b").to_string(),
        Component::Year => dt.year().to_string(),
        Component::Hour => format!("{:02}", dt.hour()),
        Component::Minute => format!("{:02}", dt.minute()),
    }
}

/// Move one component by `delta`. Days and months roll the calendar (month
/// arithmetic clamps to the last valid day); hours and minutes wrap within
/// the day.
fn shift(dt: NaiveDateTime, c: Component, delta: i32) -> NaiveDateTime {
    match c {
        Component::Day => dt + Duration::days(delta as i64),
        Component::Month => add_months(dt, delta),
        Component::Year => add_months(dt, delta * 12),
        Component::Hour => {
            let hour = (dt.hour() as i32 + delta).rem_euclid(24) as u32;
            dt.with_hour(hour).unwrap_or(dt)
        }
        Component::Minute => {
            let minute = (dt.minute() as i32 + delta).rem_euclid(60) as u32;
            dt.with_minute(minute).unwrap_or(dt)
        }
    }
}

fn add_months(dt: NaiveDateTime, delta: i32) -> NaiveDateTime {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        dt.checked_add_months(months)
    } else {
        dt.checked_sub_months(months)
    };
    shifted.unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    const DATE: PickerMode = PickerMode::Date;
    const TIME: PickerMode = PickerMode::Time;

    #[test]
    fn date_picker_adjusts_day_month_year() {
        let mut p = DateTimePicker::open(at(2024, 1, 31, 10, 0));
        p.handle_key(KeyCode::Up, DATE);
        assert_eq!(p.draft, at(2024, 2, 1, 10, 0));
        p.handle_key(KeyCode::Right, DATE);
        p.handle_key(KeyCode::Up, DATE);
        assert_eq!(p.draft, at(2024, 3, 1, 10, 0));
        p.handle_key(KeyCode::Right, DATE);
        p.handle_key(KeyCode::Down, DATE);
        assert_eq!(p.draft, at(2023, 3, 1, 10, 0));
    }

    #[test]
    fn month_shift_clamps_to_month_end() {
        assert_eq!(shift(at(2024, 1, 31, 9, 0), Component::Month, 1), at(2024, 2, 29, 9, 0));
        assert_eq!(shift(at(2024, 3, 31, 9, 0), Component::Month, -1), at(2024, 2, 29, 9, 0));
    }

    #[test]
    fn time_picker_wraps_within_day() {
        let mut p = DateTimePicker::open(at(2024, 1, 1, 23, 59));
        p.handle_key(KeyCode::Up, TIME);
        assert_eq!(p.draft, at(2024, 1, 1, 0, 59));
        p.handle_key(KeyCode::Tab, TIME);
        p.handle_key(KeyCode::Up, TIME);
        assert_eq!(p.draft, at(2024, 1, 1, 0, 0));
        // focus wraps back to hour
        p.handle_key(KeyCode::Right, TIME);
        p.handle_key(KeyCode::Down, TIME);
        assert_eq!(p.draft, at(2024, 1, 1, 23, 0));
    }

    #[test]
    fn enter_confirms_and_esc_cancels() {
        let mut p = DateTimePicker::open(at(2024, 1, 1, 10, 0));
        p.handle_key(KeyCode::Up, TIME);
        assert_eq!(p.handle_key(KeyCode::Enter, TIME), PickerOutcome::Confirm(at(2024, 1, 1, 11, 0)));
        assert_eq!(p.handle_key(KeyCode::Esc, TIME), PickerOutcome::Cancel);
        assert_eq!(p.handle_key(KeyCode::Char('x'), TIME), PickerOutcome::Pending);
    }
}
