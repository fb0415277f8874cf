//! The BookEventFlow screen: header with progress, one body per step and
//! the footer call-to-action. All state transitions go through
//! `BookingWizard`; this module only maps keys and draws.

pub mod step_one;

use chrono::NaiveDateTime;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph, Wrap},
    Frame,
};

use crate::cards::{grid_cells, CardAction, CardGrid, ModelCard, SelectableCard};
use crate::catalog::{self, Catalog};
use crate::fmt::{clock_time, long_date, money};
use crate::picker::{DateTimePicker, PickerOutcome};
use crate::router::{Destination, Router};
use crate::tui::{insert_cursor, wrap_text, Palette, FOOTER_STYLE, SELECTED_STYLE};
use crate::wizard::{
    BookingWizard, PaymentMethod, Step, TextField, Transition, BILLING_ROWS, STEP_COUNT,
    TOTAL_AMOUNT,
};

use step_one::{edit_text, FormAction, StepOneForm};

const BILLING_FIELDS: &[(TextField, &str)] = &[
    (TextField::CompanyName, "Name of the company"),
    (TextField::CompanyAddress, "Address"),
    (TextField::GstNumber, "GST Number"),
];

pub struct BookingScreen {
    wizard: BookingWizard,
    palette: Palette,
    /// Hex form of the primary colour, passed to drill-down views.
    accent: String,
    form: StepOneForm,
    theme_grid: CardGrid,
    uniform_grid: CardGrid,
    model_grid: CardGrid,
    package_cursor: usize,
    billing_focus: usize,
    billing_cursor: usize,
    payment_cursor: usize,
    cta_focused: bool,
    /// Draft for the open modal. Whether one is open is `wizard.active_picker()`.
    picker: DateTimePicker,
}

impl BookingScreen {
    pub fn new(wizard: BookingWizard, palette: Palette, accent: &str) -> Self {
        Self {
            wizard,
            palette,
            accent: accent.to_string(),
            form: StepOneForm::default(),
            theme_grid: CardGrid::default(),
            uniform_grid: CardGrid::default(),
            model_grid: CardGrid::default(),
            package_cursor: 0,
            billing_focus: 0,
            billing_cursor: 0,
            payment_cursor: 0,
            cta_focused: false,
            picker: DateTimePicker::default(),
        }
    }

    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, code: KeyCode, catalog: &Catalog, router: &mut dyn Router) {
        if let Some(target) = self.wizard.active_picker() {
            match self.picker.handle_key(code, target.mode()) {
                PickerOutcome::Pending => {}
                PickerOutcome::Confirm(value) => self.wizard.confirm_picker(value),
                PickerOutcome::Cancel => self.wizard.cancel_picker(),
            }
            return;
        }

        if code == KeyCode::PageDown {
            self.press_cta(router);
            return;
        }

        if self.cta_focused {
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => self.press_cta(router),
                KeyCode::Up | KeyCode::BackTab => self.cta_focused = false,
                KeyCode::Esc => self.back(router),
                _ => {}
            }
            return;
        }

        let handled = match self.wizard.current_step() {
            Step::EventDetails => self.handle_event_details(code),
            Step::Theme => self.handle_theme(code, catalog, router),
            Step::Uniform => self.handle_uniform(code, router),
            Step::Package => self.handle_package(code),
            Step::Model => self.handle_model(code, catalog),
            Step::Billing => self.handle_billing(code),
            Step::Payment => self.handle_payment(code),
            Step::Summary | Step::Success => match code {
                KeyCode::Down | KeyCode::Tab | KeyCode::Enter => {
                    self.cta_focused = true;
                    true
                }
                _ => false,
            },
        };

        if !handled && code == KeyCode::Esc {
            self.back(router);
        }
    }

    fn back(&mut self, router: &mut dyn Router) {
        self.cta_focused = false;
        self.wizard.go_to_previous_step(router);
    }

    fn press_cta(&mut self, router: &mut dyn Router) {
        if self.wizard.current_step().is_terminal() {
            self.wizard.finish_and_return_home(router);
            return;
        }
        if let Transition::Advanced { .. } = self.wizard.go_to_next_step() {
            self.cta_focused = false;
        }
    }

    fn handle_event_details(&mut self, code: KeyCode) -> bool {
        match self.form.handle_key(code, &mut self.wizard) {
            FormAction::Handled => true,
            FormAction::Unhandled => false,
            FormAction::OpenPicker(target) => {
                self.wizard.open_picker(target);
                self.picker = DateTimePicker::open(self.wizard.state().timestamp(target));
                true
            }
            FormAction::LeaveDown => {
                self.cta_focused = true;
                true
            }
        }
    }

    fn handle_theme(&mut self, code: KeyCode, catalog: &Catalog, router: &mut dyn Router) -> bool {
        let themes = &catalog.themes;
        match self.theme_grid.handle_key(code, themes.len(), 2) {
            Some(CardAction::Press(i)) => self.wizard.select_theme(themes[i].id),
            Some(CardAction::View(i)) => router.navigate(Destination::ThemeDetails(
                catalog::theme_details_params(&themes[i], &self.accent),
            )),
            Some(CardAction::LeaveDown) => self.cta_focused = true,
            None => return is_grid_key(code),
        }
        true
    }

    fn handle_uniform(&mut self, code: KeyCode, router: &mut dyn Router) -> bool {
        let uniforms = catalog::UNIFORMS;
        match self.uniform_grid.handle_key(code, uniforms.len(), 2) {
            Some(CardAction::Press(i)) => self.wizard.select_uniform(uniforms[i].id),
            Some(CardAction::View(i)) => router.navigate(Destination::ThemeDetails(
                catalog::uniform_details_params(&uniforms[i], &self.accent),
            )),
            Some(CardAction::LeaveDown) => self.cta_focused = true,
            None => return is_grid_key(code),
        }
        true
    }

    fn handle_model(&mut self, code: KeyCode, catalog: &Catalog) -> bool {
        if code == KeyCode::Char('m') {
            self.wizard.toggle_model_view_mode();
            return true;
        }
        let columns = self.wizard.state().model_view_mode.columns();
        let models = &catalog.models;
        match self.model_grid.handle_key(code, models.len(), columns) {
            Some(CardAction::Press(i)) => self.wizard.select_model(&models[i].id),
            // models have no drill-down view
            Some(CardAction::View(_)) => {}
            Some(CardAction::LeaveDown) => self.cta_focused = true,
            None => return is_grid_key(code),
        }
        true
    }

    fn handle_package(&mut self, code: KeyCode) -> bool {
        let packages = catalog::PACKAGES;
        match code {
            KeyCode::Up => self.package_cursor = self.package_cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Tab => {
                if self.package_cursor + 1 < packages.len() {
                    self.package_cursor += 1;
                } else {
                    self.cta_focused = true;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.wizard.select_package(packages[self.package_cursor].id)
            }
            _ => return false,
        }
        true
    }

    fn handle_billing(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => {
                if self.billing_focus > 0 {
                    self.billing_focus -= 1;
                    self.billing_cursor = self.billing_text_len();
                }
                true
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Enter => {
                if self.billing_focus + 1 < BILLING_FIELDS.len() {
                    self.billing_focus += 1;
                    self.billing_cursor = self.billing_text_len();
                } else {
                    self.cta_focused = true;
                }
                true
            }
            _ => {
                let field = BILLING_FIELDS[self.billing_focus].0;
                edit_text(&mut self.wizard, field, &mut self.billing_cursor, code)
            }
        }
    }

    fn billing_text_len(&self) -> usize {
        self.wizard
            .text(BILLING_FIELDS[self.billing_focus].0)
            .chars()
            .count()
    }

    fn handle_payment(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => self.payment_cursor = self.payment_cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Tab => {
                if self.payment_cursor + 1 < PaymentMethod::ALL.len() {
                    self.payment_cursor += 1;
                } else {
                    self.cta_focused = true;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.wizard.select_payment(PaymentMethod::ALL[self.payment_cursor])
            }
            _ => return false,
        }
        true
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    pub fn draw(&self, frame: &mut Frame, catalog: &Catalog) {
        let area = frame.area();
        let [header_area, body_area, footer_area, hints_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        self.draw_header(frame, header_area);

        let body = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(self.palette.border));
        let inner = body.inner(body_area);
        frame.render_widget(body, body_area);

        match self.wizard.current_step() {
            Step::EventDetails => self.form.draw(frame, inner, &self.wizard, &self.palette),
            Step::Theme => self.draw_themes(frame, inner, catalog),
            Step::Uniform => self.draw_uniforms(frame, inner),
            Step::Package => self.draw_packages(frame, inner),
            Step::Model => self.draw_models(frame, inner, catalog),
            Step::Billing => self.draw_billing(frame, inner),
            Step::Summary => self.draw_summary(frame, inner, catalog),
            Step::Payment => self.draw_payment(frame, inner),
            Step::Success => self.draw_success(frame, inner),
        }

        self.draw_cta(frame, footer_area);

        frame.render_widget(
            Paragraph::new(self.hints()).style(FOOTER_STYLE),
            hints_area,
        );

        if let Some(target) = self.wizard.active_picker() {
            self.picker.draw(frame, area, target, &self.palette);
        }
    }

    fn hints(&self) -> &'static str {
        if self.cta_focused {
            return " Enter=continue  Up=back to form  Esc=previous step";
        }
        match self.wizard.current_step() {
            Step::EventDetails => " Up/Down=field  Enter=open/next  PgDn=continue  Esc=back",
            Step::Theme | Step::Uniform => {
                " Arrows=move  Enter=select  v=view details  PgDn=continue  Esc=back"
            }
            Step::Model => " Arrows=move  Enter=select  m=single/double  PgDn=continue  Esc=back",
            Step::Package | Step::Payment => " Up/Down=move  Enter=select  PgDn=continue  Esc=back",
            Step::Billing => " Up/Down=field  PgDn=continue  Esc=back",
            Step::Summary => " PgDn=continue  Esc=back",
            Step::Success => " PgDn=go home",
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let [title_area, gauge_area, count_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" \u{2039} ", Style::new().fg(self.palette.primary)),
                Span::styled(
                    self.wizard.step_title(),
                    Style::new()
                        .fg(self.palette.primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ])),
            title_area,
        );

        frame.render_widget(
            LineGauge::default()
                .ratio(self.wizard.progress_fraction())
                .label("")
                .filled_style(Style::new().fg(self.palette.primary))
                .unfilled_style(Style::new().fg(self.palette.track)),
            gauge_area,
        );

        frame.render_widget(
            Paragraph::new(format!(
                " Step {} of {}",
                self.wizard.current_step().index() + 1,
                STEP_COUNT
            ))
            .style(Style::new().fg(self.palette.muted)),
            count_area,
        );
    }

    fn draw_cta(&self, frame: &mut Frame, area: Rect) {
        let enabled = self.wizard.current_step().is_terminal() || self.wizard.can_advance();
        let fill = if enabled {
            self.palette.primary
        } else {
            self.palette.disabled
        };
        let mut style = Style::new().fg(fill).add_modifier(Modifier::BOLD);
        if self.cta_focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        frame.render_widget(
            Paragraph::new(Span::styled(format!("  {}  ", self.wizard.cta_label()), style))
                .alignment(ratatui::layout::Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::new().fg(fill)),
                ),
            area,
        );
    }

    fn section_title(&self, text: &str) -> Line<'static> {
        Line::from(Span::styled(
            text.to_string(),
            Style::new()
                .fg(self.palette.text)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn split_title(area: Rect) -> (Rect, Rect) {
        let [title, _, rest] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        (title, rest)
    }

    fn draw_themes(&self, frame: &mut Frame, area: Rect, catalog: &Catalog) {
        let (title, grid) = Self::split_title(area);
        frame.render_widget(Paragraph::new(self.section_title("Choose Theme")), title);
        let selected = self.wizard.state().selections.theme_id;
        for (i, rect) in grid_cells(grid, catalog.themes.len(), 2, self.theme_grid.cursor) {
            let theme = &catalog.themes[i];
            frame.render_widget(
                SelectableCard {
                    image: theme.cover().unwrap_or_default(),
                    title: &theme.title,
                    price: None,
                    selected: selected == Some(theme.id),
                    focused: !self.cta_focused && i == self.theme_grid.cursor,
                    palette: &self.palette,
                },
                rect,
            );
        }
    }

    fn draw_uniforms(&self, frame: &mut Frame, area: Rect) {
        let (title, grid) = Self::split_title(area);
        frame.render_widget(Paragraph::new(self.section_title("Choose Uniforms")), title);
        let selected = self.wizard.state().selections.uniform_id.as_deref();
        let uniforms = catalog::UNIFORMS;
        for (i, rect) in grid_cells(grid, uniforms.len(), 2, self.uniform_grid.cursor) {
            let item = &uniforms[i];
            frame.render_widget(
                SelectableCard {
                    image: item.image,
                    title: item.title,
                    price: Some(item.price),
                    selected: selected == Some(item.id),
                    focused: !self.cta_focused && i == self.uniform_grid.cursor,
                    palette: &self.palette,
                },
                rect,
            );
        }
    }

    fn draw_models(&self, frame: &mut Frame, area: Rect, catalog: &Catalog) {
        let (title, grid) = Self::split_title(area);
        frame.render_widget(Paragraph::new(self.section_title("Choose Models")), title);
        let selected = self.wizard.state().selections.model_id.as_deref();
        let columns = self.wizard.state().model_view_mode.columns();
        for (i, rect) in grid_cells(grid, catalog.models.len(), columns, self.model_grid.cursor) {
            let model = &catalog.models[i];
            frame.render_widget(
                ModelCard {
                    image: &model.image,
                    name: &model.name,
                    height: &model.height,
                    selected: selected == Some(model.id.as_str()),
                    focused: !self.cta_focused && i == self.model_grid.cursor,
                    palette: &self.palette,
                },
                rect,
            );
        }
    }

    fn draw_packages(&self, frame: &mut Frame, area: Rect) {
        let packages = catalog::PACKAGES;
        let [list_area, _, detail_area] = Layout::vertical([
            Constraint::Length(packages.len() as u16 + 2),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        let selected = self.wizard.state().selections.package_id.as_deref();
        let mut lines = vec![self.section_title("Choose models Packages"), Line::from("")];
        for (i, p) in packages.iter().enumerate() {
            let is_selected = selected == Some(p.id);
            let marker = if is_selected { "\u{25c6}" } else { "\u{25c7}" };
            let mut style = if is_selected {
                Style::new().fg(self.palette.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(self.palette.text)
            };
            if !self.cta_focused && i == self.package_cursor {
                style = style.patch(SELECTED_STYLE);
            }
            lines.push(Line::from(Span::styled(format!(" {marker} {}", p.title), style)));
        }
        frame.render_widget(Paragraph::new(lines), list_area);

        let shown = packages[self.package_cursor.min(packages.len() - 1)].id;
        if let Some(details) = catalog::package_details(shown) {
            let (wrapped, _) = wrap_text(details.description, detail_area.width.saturating_sub(2) as usize);
            let mut lines = vec![self.section_title(details.title)];
            lines.extend(wrapped.lines().map(|l| {
                Line::from(Span::styled(l.to_string(), Style::new().fg(self.palette.muted)))
            }));
            frame.render_widget(Paragraph::new(lines), detail_area);
        }
    }

    fn draw_billing(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            self.section_title("GST Details for Corporate Events (optional)"),
            Line::from(""),
        ];
        for (i, (field, placeholder)) in BILLING_FIELDS.iter().enumerate() {
            let value = self.wizard.text(*field);
            let focused = !self.cta_focused && i == self.billing_focus;
            let span = if focused {
                Span::styled(insert_cursor(value, self.billing_cursor), SELECTED_STYLE)
            } else if value.is_empty() {
                Span::styled(placeholder.to_string(), Style::new().fg(self.palette.disabled))
            } else {
                Span::styled(value.to_string(), Style::new().fg(self.palette.text))
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {placeholder:<22}"),
                    Style::new().fg(self.palette.muted),
                ),
                span,
            ]));
            lines.push(Line::from(""));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn summary_lines(&self, catalog: &Catalog) -> Vec<(String, String)> {
        let state = self.wizard.state();
        let event = &state.event;
        let sel = &state.selections;
        let location = match (event.selected_city_name(), event.selected_state_id()) {
            (Some(city), Some(id)) => {
                let name = catalog::location(id).map(|l| l.state).unwrap_or(id);
                format!("{city}, {name}")
            }
            (None, Some(id)) => catalog::location(id).map(|l| l.state).unwrap_or(id).to_string(),
            _ => "-".to_string(),
        };
        let dash = || "-".to_string();
        vec![
            ("Event".into(), event.about_text.trim().to_string()),
            ("Event Venue".into(), event.venue.trim().to_string()),
            ("Location".into(), location),
            (
                "Starts".into(),
                format!("{}, {}", long_date(&event.start), clock_time(&event.start)),
            ),
            (
                "Ends".into(),
                format!("{}, {}", long_date(&event.end), clock_time(&event.end)),
            ),
            ("Total Staff".into(), event.crew_count.clone()),
            ("Days".into(), event.day_count.clone()),
            (
                "Theme".into(),
                sel.theme_id
                    .and_then(|id| catalog.theme(id))
                    .map(|t| t.title.clone())
                    .unwrap_or_else(dash),
            ),
            (
                "Uniform".into(),
                sel.uniform_id
                    .as_deref()
                    .and_then(catalog::uniform)
                    .map(|u| u.title.to_string())
                    .unwrap_or_else(dash),
            ),
            (
                "Package".into(),
                sel.package_id
                    .as_deref()
                    .and_then(catalog::package)
                    .map(|p| p.title.to_string())
                    .unwrap_or_else(dash),
            ),
            (
                "Model".into(),
                sel.model_id
                    .as_deref()
                    .and_then(|id| catalog.model(id))
                    .map(|m| m.name.clone())
                    .unwrap_or_else(dash),
            ),
        ]
    }

    fn kv_line(&self, key: &str, value: String, bold: bool) -> Line<'static> {
        let mut value_style = Style::new().fg(self.palette.text);
        if bold {
            value_style = value_style.add_modifier(Modifier::BOLD);
        }
        Line::from(vec![
            Span::styled(format!(" {key:<20}"), Style::new().fg(self.palette.muted)),
            Span::styled(value, value_style),
        ])
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect, catalog: &Catalog) {
        let mut lines = vec![self.section_title("Order Summary"), Line::from("")];
        for (k, v) in self.summary_lines(catalog) {
            lines.push(self.kv_line(&k, v, false));
        }
        let billing = &self.wizard.state().billing;
        if !billing.company_name.trim().is_empty() || !billing.gst_number.trim().is_empty() {
            lines.push(Line::from(""));
            lines.push(self.kv_line("Company", billing.company_name.clone(), false));
            lines.push(self.kv_line("GST Number", billing.gst_number.clone(), false));
        }
        lines.push(Line::from(""));
        lines.push(self.section_title("Billing Details"));
        for (k, amount, bold) in BILLING_ROWS {
            lines.push(self.kv_line(k, money(*amount), *bold));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }

    fn draw_payment(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![self.section_title("Payment Method"), Line::from("")];
        let chosen = self.wizard.state().payment_method;
        for (i, method) in PaymentMethod::ALL.iter().enumerate() {
            let radio = if chosen == Some(*method) { "(\u{25cf})" } else { "( )" };
            let mut style = Style::new().fg(self.palette.text);
            if !self.cta_focused && i == self.payment_cursor {
                style = style.patch(SELECTED_STYLE);
            }
            lines.push(Line::from(Span::styled(format!(" {radio} {}", method.label()), style)));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_success(&self, frame: &mut Frame, area: Rect) {
        let now: NaiveDateTime = chrono::Local::now().naive_local();
        let mode = self
            .wizard
            .state()
            .payment_method
            .map(|m| m.label())
            .unwrap_or("-");
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "\u{2714}",
                Style::new().fg(self.palette.success).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(
                "Booking Successful",
                Style::new().fg(self.palette.text).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(
                "You have successfully booked the event.",
                Style::new().fg(self.palette.muted),
            ))
            .centered(),
            Line::from(""),
        ];
        lines.push(self.kv_line("Payment Mode", mode.to_string(), false));
        lines.push(self.kv_line("Total Amount", money(TOTAL_AMOUNT), false));
        lines.push(self.kv_line("Pay Date", long_date(&now), false));
        lines.push(self.kv_line("Pay Time", clock_time(&now), false));
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                format!("Total Pay {}", money(TOTAL_AMOUNT)),
                Style::new().fg(self.palette.primary).add_modifier(Modifier::BOLD),
            ))
            .centered(),
        );
        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn is_grid_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Up | KeyCode::Left | KeyCode::Right)
}
