use chrono::{NaiveDateTime, NaiveTime, Timelike};

use super::step::Step;
use crate::settings::ModelViewMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub about_text: String,
    pub venue: String,
    /// Numeric text, edited as typed.
    pub crew_count: String,
    pub day_count: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub(super) selected_state_id: Option<String>,
    pub(super) selected_city_name: Option<String>,
}

impl EventDetails {
    pub fn selected_state_id(&self) -> Option<&str> {
        self.selected_state_id.as_deref()
    }

    pub fn selected_city_name(&self) -> Option<&str> {
        self.selected_city_name.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    pub theme_id: Option<i64>,
    pub uniform_id: Option<String>,
    pub package_id: Option<String>,
    pub model_id: Option<String>,
}

/// GST details for corporate events. Optional and never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingDetails {
    pub company_name: String,
    pub company_address: String,
    pub gst_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Paytm,
    PhonePe,
    GPay,
    Card,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Paytm,
        PaymentMethod::PhonePe,
        PaymentMethod::GPay,
        PaymentMethod::Card,
        PaymentMethod::Cash,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Paytm => "Paytm UPI",
            PaymentMethod::PhonePe => "PhonePe",
            PaymentMethod::GPay => "GPay",
            PaymentMethod::Card => "Cards",
            PaymentMethod::Cash => "Cash",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Date,
    Time,
}

/// Which timestamp component a picker session edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerTarget {
    StartDate,
    StartTime,
    EndDate,
    EndTime,
}

impl PickerTarget {
    pub fn mode(self) -> PickerMode {
        match self {
            PickerTarget::StartDate | PickerTarget::EndDate => PickerMode::Date,
            PickerTarget::StartTime | PickerTarget::EndTime => PickerMode::Time,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PickerTarget::StartDate => "Start date",
            PickerTarget::StartTime => "Start time",
            PickerTarget::EndDate => "End date",
            PickerTarget::EndTime => "End time",
        }
    }
}

/// Text inputs owned by the wizard, addressable by the views that edit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    AboutText,
    Venue,
    CrewCount,
    DayCount,
    CompanyName,
    CompanyAddress,
    GstNumber,
}

impl TextField {
    pub fn numeric(self) -> bool {
        matches!(self, TextField::CrewCount | TextField::DayCount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub current_step: Step,
    pub event: EventDetails,
    pub selections: Selections,
    pub billing: BillingDetails,
    pub payment_method: Option<PaymentMethod>,
    pub model_view_mode: ModelViewMode,
}

impl WizardState {
    pub fn new(now: NaiveDateTime, model_view_mode: ModelViewMode) -> Self {
        Self {
            current_step: Step::EventDetails,
            event: EventDetails {
                about_text: String::new(),
                venue: String::new(),
                crew_count: "2".to_string(),
                day_count: "1".to_string(),
                start: now,
                end: now,
                selected_state_id: None,
                selected_city_name: None,
            },
            selections: Selections::default(),
            billing: BillingDetails::default(),
            payment_method: None,
            model_view_mode,
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::AboutText => &self.event.about_text,
            TextField::Venue => &self.event.venue,
            TextField::CrewCount => &self.event.crew_count,
            TextField::DayCount => &self.event.day_count,
            TextField::CompanyName => &self.billing.company_name,
            TextField::CompanyAddress => &self.billing.company_address,
            TextField::GstNumber => &self.billing.gst_number,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::AboutText => &mut self.event.about_text,
            TextField::Venue => &mut self.event.venue,
            TextField::CrewCount => &mut self.event.crew_count,
            TextField::DayCount => &mut self.event.day_count,
            TextField::CompanyName => &mut self.billing.company_name,
            TextField::CompanyAddress => &mut self.billing.company_address,
            TextField::GstNumber => &mut self.billing.gst_number,
        }
    }

    pub fn timestamp(&self, target: PickerTarget) -> NaiveDateTime {
        match target {
            PickerTarget::StartDate | PickerTarget::StartTime => self.event.start,
            PickerTarget::EndDate | PickerTarget::EndTime => self.event.end,
        }
    }

    fn timestamp_mut(&mut self, target: PickerTarget) -> &mut NaiveDateTime {
        match target {
            PickerTarget::StartDate | PickerTarget::StartTime => &mut self.event.start,
            PickerTarget::EndDate | PickerTarget::EndTime => &mut self.event.end,
        }
    }

    pub(super) fn apply_picked(&mut self, target: PickerTarget, picked: NaiveDateTime) {
        let slot = self.timestamp_mut(target);
        *slot = merge_picked(*slot, picked, target.mode());
    }
}

/// Merge a picker value into an existing timestamp. A date pick keeps the
/// existing time of day; a time pick keeps the existing calendar date and
/// seconds.
pub fn merge_picked(base: NaiveDateTime, picked: NaiveDateTime, mode: PickerMode) -> NaiveDateTime {
    match mode {
        PickerMode::Date => picked.date().and_time(base.time()),
        PickerMode::Time => {
            let time = NaiveTime::from_hms_opt(picked.hour(), picked.minute(), base.second())
                .unwrap_or_else(|| picked.time());
            base.date().and_time(time)
        }
    }
}
