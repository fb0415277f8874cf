//! Booking flow state machine.
//!
//! `BookingWizard` owns every field the flow collects and the current step.
//! It knows nothing about rendering: views read `state()` and feed user input
//! back through the methods below. Forward progress is gated by each step's
//! guard; a failed guard is a silent no-op.

pub mod state;
pub mod step;

use chrono::NaiveDateTime;

use crate::catalog::{self, DropdownOption};
use crate::fmt::money;
use crate::router::{Destination, Router};
use crate::settings::ModelViewMode;

pub use state::{PaymentMethod, PickerMode, PickerTarget, TextField, WizardState};
pub use step::{Step, STEP_COUNT};

/// Fixed display amount for the booking. Nothing is charged.
pub const TOTAL_AMOUNT: f64 = 75_000.0;

/// `(label, amount, bold)` rows shown under "Billing Details".
pub const BILLING_ROWS: &[(&str, f64, bool)] = &[
    ("Total Price", 63_559.32, false),
    ("GST (18%)", 11_440.68, false),
    ("Payable Price now", 10_000.0, false),
    ("Remaining", 65_000.0, false),
    ("Grand Total", TOTAL_AMOUNT, true),
];

/// Outcome of a "Next" press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: Step, to: Step },
    Blocked,
    /// Already on the last step; finishing is a separate action.
    AtEnd,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    state: WizardState,
    picker: Option<PickerTarget>,
}

impl BookingWizard {
    pub fn new(now: NaiveDateTime, model_view_mode: ModelViewMode) -> Self {
        Self {
            state: WizardState::new(now, model_view_mode),
            picker: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    // -----------------------------------------------------------------------
    // Step transitions
    // -----------------------------------------------------------------------

    /// Step back, or leave the flow from the first step.
    pub fn go_to_previous_step(&mut self, router: &mut dyn Router) {
        match self.state.current_step.previous() {
            Some(prev) => {
                tracing::debug!(from = ?self.state.current_step, to = ?prev, "step back");
                self.state.current_step = prev;
            }
            None => router.go_back(),
        }
    }

    pub fn can_advance(&self) -> bool {
        self.state.current_step.guard(&self.state)
    }

    pub fn go_to_next_step(&mut self) -> Transition {
        let from = self.state.current_step;
        if from.is_terminal() {
            return Transition::AtEnd;
        }
        if !from.guard(&self.state) {
            return Transition::Blocked;
        }
        match from.next() {
            Some(to) => {
                tracing::debug!(from = ?from, to = ?to, "step forward");
                self.state.current_step = to;
                Transition::Advanced { from, to }
            }
            None => Transition::AtEnd,
        }
    }

    /// Leave the flow from the success step. Returns false anywhere else.
    pub fn finish_and_return_home(&self, router: &mut dyn Router) -> bool {
        if !self.state.current_step.is_terminal() {
            return false;
        }
        tracing::info!(
            theme = ?self.state.selections.theme_id,
            package = ?self.state.selections.package_id,
            payment = ?self.state.payment_method,
            "booking flow finished"
        );
        router.pop_to_top();
        router.navigate(Destination::Home);
        true
    }

    // -----------------------------------------------------------------------
    // Field edits
    // -----------------------------------------------------------------------

    pub fn text(&self, field: TextField) -> &str {
        self.state.text(field)
    }

    /// Insert a character into a text field at a char index. Numeric fields
    /// only accept ASCII digits.
    pub fn insert_char(&mut self, field: TextField, at: usize, c: char) -> bool {
        if field.numeric() && !c.is_ascii_digit() {
            return false;
        }
        let value = self.state.text_mut(field);
        let byte_pos = byte_offset(value, at);
        value.insert(byte_pos, c);
        true
    }

    /// Remove the character at a char index, if any.
    pub fn remove_char(&mut self, field: TextField, at: usize) -> bool {
        let value = self.state.text_mut(field);
        if at >= value.chars().count() {
            return false;
        }
        let byte_pos = byte_offset(value, at);
        value.remove(byte_pos);
        true
    }

    /// Replace a field wholesale; input filtering matches `insert_char`.
    #[cfg(test)]
    pub fn set_text(&mut self, field: TextField, text: &str) {
        let value = self.state.text_mut(field);
        value.clear();
        if field.numeric() {
            value.extend(text.chars().filter(|c| c.is_ascii_digit()));
        } else {
            value.push_str(text);
        }
    }

    /// Select a state. The city is always cleared, even when re-selecting the same state.
    pub fn select_state(&mut self, id: &str) {
        self.state.event.selected_state_id = Some(id.to_string());
        self.state.event.selected_city_name = None;
    }

    /// Select a city of the current state. Ignored without a state or for a
    /// city the state does not list.
    pub fn select_city(&mut self, name: &str) -> bool {
        if !self.city_options().iter().any(|c| c.value == name) {
            return false;
        }
        self.state.event.selected_city_name = Some(name.to_string());
        true
    }

    pub fn state_options(&self) -> Vec<DropdownOption> {
        catalog::state_options()
    }

    pub fn city_options(&self) -> Vec<DropdownOption> {
        catalog::city_options(self.state.event.selected_state_id())
    }

    pub fn select_theme(&mut self, id: i64) {
        self.state.selections.theme_id = Some(id);
    }

    pub fn select_uniform(&mut self, id: &str) {
        self.state.selections.uniform_id = Some(id.to_string());
    }

    pub fn select_package(&mut self, id: &str) {
        self.state.selections.package_id = Some(id.to_string());
    }

    pub fn select_model(&mut self, id: &str) {
        self.state.selections.model_id = Some(id.to_string());
    }

    pub fn select_payment(&mut self, method: PaymentMethod) {
        self.state.payment_method = Some(method);
    }

    pub fn toggle_model_view_mode(&mut self) {
        self.state.model_view_mode = self.state.model_view_mode.toggled();
    }

    // -----------------------------------------------------------------------
    // Date/time picker
    // -----------------------------------------------------------------------

    pub fn open_picker(&mut self, target: PickerTarget) {
        self.picker = Some(target);
    }

    pub fn active_picker(&self) -> Option<PickerTarget> {
        self.picker
    }

    /// Commit a picked value into the active target. No-op when no picker is open.
    pub fn confirm_picker(&mut self, picked: NaiveDateTime) {
        if let Some(target) = self.picker.take() {
            self.state.apply_picked(target, picked);
            tracing::debug!(?target, value = %self.state.timestamp(target), "picker confirmed");
        }
    }

    pub fn cancel_picker(&mut self) {
        self.picker = None;
    }

    // -----------------------------------------------------------------------
    // Derived values
    // -----------------------------------------------------------------------

    pub fn progress_fraction(&self) -> f64 {
        (self.state.current_step.index() + 1) as f64 / STEP_COUNT as f64
    }

    pub fn step_title(&self) -> &'static str {
        self.state.current_step.title()
    }

    pub fn cta_label(&self) -> String {
        match self.state.current_step {
            Step::Billing | Step::Summary => format!("Pay {}", money(TOTAL_AMOUNT)),
            Step::Success => "Go to Home".to_string(),
            _ => "Proceed to Next Step".to_string(),
        }
    }
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
