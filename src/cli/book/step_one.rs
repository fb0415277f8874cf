//! Event details form: location dropdowns, event text fields, crew/day
//! counts and the four date/time rows. Holds only focus and cursor state;
//! every value lives in the wizard.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::catalog::DropdownOption;
use crate::fmt::{clock_time, long_date};
use crate::tui::{insert_cursor, Palette, SELECTED_STYLE};
use crate::wizard::{BookingWizard, PickerTarget, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    State,
    City,
    Text(TextField),
    Picker(PickerTarget),
}

const ROWS: &[Row] = &[
    Row::State,
    Row::City,
    Row::Text(TextField::AboutText),
    Row::Text(TextField::Venue),
    Row::Text(TextField::CrewCount),
    Row::Text(TextField::DayCount),
    Row::Picker(PickerTarget::StartDate),
    Row::Picker(PickerTarget::StartTime),
    Row::Picker(PickerTarget::EndDate),
    Row::Picker(PickerTarget::EndTime),
];

const LABEL_WIDTH: u16 = 22;

fn row_label(row: Row) -> &'static str {
    match row {
        Row::State => "Select State",
        Row::City => "Select City",
        Row::Text(TextField::AboutText) => "Enter The Event Name",
        Row::Text(TextField::Venue) => "Select a Venue",
        Row::Text(TextField::CrewCount) => "Crew Count",
        Row::Text(TextField::DayCount) => "Number of Days",
        Row::Text(_) => "",
        Row::Picker(target) => target.label(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Handled,
    Unhandled,
    OpenPicker(PickerTarget),
    LeaveDown,
}

#[derive(Debug, Clone, Copy)]
struct Dropdown {
    row: Row,
    highlighted: usize,
}

#[derive(Debug, Default)]
pub struct StepOneForm {
    focus: usize,
    cursor: usize,
    dropdown: Option<Dropdown>,
}

impl StepOneForm {
    fn row(&self) -> Row {
        ROWS[self.focus.min(ROWS.len() - 1)]
    }

    fn move_to(&mut self, focus: usize, wizard: &BookingWizard) {
        self.focus = focus;
        if let Row::Text(field) = self.row() {
            self.cursor = wizard.text(field).chars().count();
        }
    }

    fn options(row: Row, wizard: &BookingWizard) -> Vec<DropdownOption> {
        match row {
            Row::State => wizard.state_options(),
            Row::City => wizard.city_options(),
            _ => Vec::new(),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, wizard: &mut BookingWizard) -> FormAction {
        if let Some(mut dd) = self.dropdown {
            let options = Self::options(dd.row, wizard);
            match code {
                KeyCode::Up => dd.highlighted = dd.highlighted.saturating_sub(1),
                KeyCode::Down => {
                    dd.highlighted = (dd.highlighted + 1).min(options.len().saturating_sub(1))
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(opt) = options.get(dd.highlighted) {
                        match dd.row {
                            Row::State => wizard.select_state(&opt.value),
                            Row::City => {
                                wizard.select_city(&opt.value);
                            }
                            _ => {}
                        }
                    }
                    self.dropdown = None;
                    return FormAction::Handled;
                }
                KeyCode::Esc => {
                    self.dropdown = None;
                    return FormAction::Handled;
                }
                _ => {}
            }
            self.dropdown = Some(dd);
            return FormAction::Handled;
        }

        match code {
            KeyCode::Up => {
                if self.focus > 0 {
                    self.move_to(self.focus - 1, wizard);
                }
                return FormAction::Handled;
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.focus + 1 < ROWS.len() {
                    self.move_to(self.focus + 1, wizard);
                    return FormAction::Handled;
                }
                return FormAction::LeaveDown;
            }
            _ => {}
        }

        match self.row() {
            Row::State | Row::City => match code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let row = self.row();
                    let options = Self::options(row, wizard);
                    // City stays disabled until a state is chosen.
                    if options.is_empty() {
                        return FormAction::Handled;
                    }
                    let current = match row {
                        Row::State => wizard.state().event.selected_state_id(),
                        _ => wizard.state().event.selected_city_name(),
                    };
                    let highlighted = current
                        .and_then(|v| options.iter().position(|o| o.value == v))
                        .unwrap_or(0);
                    self.dropdown = Some(Dropdown { row, highlighted });
                    FormAction::Handled
                }
                _ => FormAction::Unhandled,
            },
            Row::Picker(target) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => FormAction::OpenPicker(target),
                _ => FormAction::Unhandled,
            },
            Row::Text(field) => {
                if code == KeyCode::Enter {
                    self.move_to(self.focus + 1, wizard);
                    return FormAction::Handled;
                }
                if edit_text(wizard, field, &mut self.cursor, code) {
                    FormAction::Handled
                } else {
                    FormAction::Unhandled
                }
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, wizard: &BookingWizard, palette: &Palette) {
        let event = &wizard.state().event;
        let state_name = event.selected_state_id().and_then(|id| {
            wizard
                .state_options()
                .into_iter()
                .find(|o| o.value == id)
                .map(|o| o.label)
        });
        let city_enabled = event.selected_state_id().is_some();

        let rows = Layout::vertical(vec![Constraint::Length(1); ROWS.len()])
            .spacing(1)
            .split(area);

        for (i, (row, rect)) in ROWS.iter().zip(rows.iter()).enumerate() {
            let focused = i == self.focus;
            let [label_area, value_area] =
                Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)])
                    .areas(*rect);

            let mut label_style = Style::new().fg(palette.text);
            if focused {
                label_style = label_style.add_modifier(Modifier::BOLD);
            }
            frame.render_widget(
                Paragraph::new(Span::styled(row_label(*row), label_style)),
                label_area,
            );

            let (value, dimmed) = match row {
                Row::State => (state_name.clone().unwrap_or_else(|| "Select state \u{25be}".into()), false),
                Row::City => (
                    event
                        .selected_city_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| "Select city \u{25be}".into()),
                    !city_enabled,
                ),
                Row::Text(field) => {
                    let text = wizard.text(*field);
                    if focused {
                        (insert_cursor(text, self.cursor), false)
                    } else {
                        (text.to_string(), false)
                    }
                }
                Row::Picker(target) => {
                    let ts = wizard.state().timestamp(*target);
                    let shown = match target {
                        PickerTarget::StartDate | PickerTarget::EndDate => long_date(&ts),
                        PickerTarget::StartTime | PickerTarget::EndTime => clock_time(&ts),
                    };
                    (shown, false)
                }
            };

            let style = if focused {
                SELECTED_STYLE
            } else if dimmed {
                Style::new().fg(palette.disabled)
            } else {
                Style::new().fg(palette.muted)
            };
            let width = value_area.width as usize;
            frame.render_widget(
                Paragraph::new(Span::styled(format!("{value:<width$}"), style)),
                value_area,
            );
        }

        if let Some(dd) = self.dropdown {
            let anchor = if dd.row == Row::State { rows[0] } else { rows[1] };
            self.draw_dropdown(frame, area, anchor, dd, wizard, palette);
        }
    }

    fn draw_dropdown(
        &self,
        frame: &mut Frame,
        area: Rect,
        anchor: Rect,
        dd: Dropdown,
        wizard: &BookingWizard,
        palette: &Palette,
    ) {
        let options = Self::options(dd.row, wizard);
        let height = (options.len() as u16 + 2).min(area.height.saturating_sub(anchor.y - area.y + 1));
        let x = anchor.x + LABEL_WIDTH;
        let rect = Rect::new(
            x,
            anchor.y + 1,
            anchor.width.saturating_sub(LABEL_WIDTH).min(32),
            height,
        );
        frame.render_widget(Clear, rect);

        let items: Vec<ListItem> = options
            .iter()
            .map(|o| ListItem::new(Line::from(o.label.clone())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(palette.primary)),
            )
            .highlight_style(SELECTED_STYLE)
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(dd.highlighted));
        frame.render_stateful_widget(list, rect, &mut state);
    }
}

/// Apply an editing key to a wizard text field. Returns false for keys that
/// are not text edits.
pub(super) fn edit_text(
    wizard: &mut BookingWizard,
    field: TextField,
    cursor: &mut usize,
    code: KeyCode,
) -> bool {
    let len = wizard.text(field).chars().count();
    *cursor = (*cursor).min(len);
    match code {
        KeyCode::Char(c) => {
            if wizard.insert_char(field, *cursor, c) {
                *cursor += 1;
            }
        }
        KeyCode::Backspace => {
            if *cursor > 0 {
                *cursor -= 1;
                wizard.remove_char(field, *cursor);
            }
        }
        KeyCode::Delete => {
            wizard.remove_char(field, *cursor);
        }
        KeyCode::Left => *cursor = cursor.saturating_sub(1),
        KeyCode::Right => *cursor = (*cursor + 1).min(len),
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = len,
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ModelViewMode;
    use chrono::NaiveDate;

    fn wizard() -> BookingWizard {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        BookingWizard::new(now, ModelViewMode::Double)
    }

    fn type_str(form: &mut StepOneForm, w: &mut BookingWizard, s: &str) {
        for c in s.chars() {
            form.handle_key(KeyCode::Char(c), w);
        }
    }

    #[test]
    fn state_dropdown_selects_and_clears_city() {
        let mut w = wizard();
        let mut form = StepOneForm::default();
        form.handle_key(KeyCode::Enter, &mut w);
        form.handle_key(KeyCode::Down, &mut w);
        form.handle_key(KeyCode::Enter, &mut w);
        assert_eq!(w.state().event.selected_state_id(), Some("MH"));

        form.handle_key(KeyCode::Down, &mut w);
        form.handle_key(KeyCode::Enter, &mut w);
        form.handle_key(KeyCode::Down, &mut w);
        form.handle_key(KeyCode::Enter, &mut w);
        assert_eq!(w.state().event.selected_city_name(), Some("Pune"));

        form.handle_key(KeyCode::Up, &mut w);
        form.handle_key(KeyCode::Enter, &mut w);
        form.handle_key(KeyCode::Up, &mut w);
        form.handle_key(KeyCode::Enter, &mut w);
        assert_eq!(w.state().event.selected_state_id(), Some("KA"));
        assert!(w.state().event.selected_city_name().is_none());
    }

    #[test]
    fn city_dropdown_stays_closed_without_state() {
        let mut w = wizard();
        let mut form = StepOneForm::default();
        form.handle_key(KeyCode::Down, &mut w);
        form.handle_key(KeyCode::Enter, &mut w);
        assert!(form.dropdown.is_none());
    }

    #[test]
    fn escape_closes_dropdown_without_selecting() {
        let mut w = wizard();
        let mut form = StepOneForm::default();
        form.handle_key(KeyCode::Enter, &mut w);
        assert_eq!(form.handle_key(KeyCode::Esc, &mut w), FormAction::Handled);
        assert!(form.dropdown.is_none());
        assert!(w.state().event.selected_state_id().is_none());
    }

    #[test]
    fn typing_fills_event_fields() {
        let mut w = wizard();
        let mut form = StepOneForm::default();
        form.handle_key(KeyCode::Down, &mut w);
        form.handle_key(KeyCode::Down, &mut w);
        type_str(&mut form, &mut w, "Reception");
        form.handle_key(KeyCode::Enter, &mut w);
        type_str(&mut form, &mut w, "ITC Gardenia");
        form.handle_key(KeyCode::Backspace, &mut w);
        assert_eq!(w.state().event.about_text, "Reception");
        assert_eq!(w.state().event.venue, "ITC Gardeni");
        assert!(w.can_advance());
    }

    #[test]
    fn crew_count_ignores_letters() {
        let mut w = wizard();
        let mut form = StepOneForm::default();
        for _ in 0..4 {
            form.handle_key(KeyCode::Down, &mut w);
        }
        type_str(&mut form, &mut w, "a0");
        assert_eq!(w.state().event.crew_count, "20");
    }

    #[test]
    fn date_rows_request_picker_and_last_row_leaves() {
        let mut w = wizard();
        let mut form = StepOneForm::default();
        for _ in 0..6 {
            form.handle_key(KeyCode::Down, &mut w);
        }
        assert_eq!(
            form.handle_key(KeyCode::Enter, &mut w),
            FormAction::OpenPicker(PickerTarget::StartDate)
        );
        for _ in 0..3 {
            form.handle_key(KeyCode::Down, &mut w);
        }
        assert_eq!(
            form.handle_key(KeyCode::Enter, &mut w),
            FormAction::OpenPicker(PickerTarget::EndTime)
        );
        assert_eq!(form.handle_key(KeyCode::Down, &mut w), FormAction::LeaveDown);
    }

    #[test]
    fn esc_is_left_to_the_screen() {
        let mut w = wizard();
        let mut form = StepOneForm::default();
        assert_eq!(form.handle_key(KeyCode::Esc, &mut w), FormAction::Unhandled);
    }
}
