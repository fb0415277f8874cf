use super::state::WizardState;

/// The fixed, ordered sequence of booking steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    EventDetails,
    Theme,
    Uniform,
    Package,
    Model,
    Billing,
    Summary,
    Payment,
    Success,
}

pub const STEPS: [Step; 9] = [
    Step::EventDetails,
    Step::Theme,
    Step::Uniform,
    Step::Package,
    Step::Model,
    Step::Billing,
    Step::Summary,
    Step::Payment,
    Step::Success,
];

pub const STEP_COUNT: usize = STEPS.len();

impl Step {
    pub fn index(self) -> usize {
        match self {
            Step::EventDetails => 0,
            Step::Theme => 1,
            Step::Uniform => 2,
            Step::Package => 3,
            Step::Model => 4,
            Step::Billing => 5,
            Step::Summary => 6,
            Step::Payment => 7,
            Step::Success => 8,
        }
    }

    pub fn from_index(index: usize) -> Option<Step> {
        STEPS.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::EventDetails => "Book Event",
            Step::Theme => "Choose Theme",
            Step::Uniform => "Choose Uniforms",
            Step::Package => "Choose Models Packages",
            Step::Model => "Choose Models",
            Step::Billing => "GST Details",
            Step::Summary => "Order Summary",
            Step::Payment => "Payment",
            Step::Success => "Success",
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }

    pub fn is_terminal(self) -> bool {
        self.index() == STEP_COUNT - 1
    }

    /// Whether the input this step asks for is present.
    pub fn guard(self, state: &WizardState) -> bool {
        match self {
            Step::EventDetails => {
                !state.event.about_text.trim().is_empty() && !state.event.venue.trim().is_empty()
            }
            Step::Theme => state.selections.theme_id.is_some(),
            Step::Uniform => state.selections.uniform_id.is_some(),
            Step::Package => state.selections.package_id.is_some(),
            Step::Model => state.selections.model_id.is_some(),
            Step::Billing | Step::Summary => true,
            Step::Payment => state.payment_method.is_some(),
            Step::Success => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_sequence_order() {
        for (i, step) in STEPS.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(Step::from_index(i), Some(*step));
        }
        assert_eq!(Step::from_index(STEP_COUNT), None);
    }

    #[test]
    fn next_and_previous_stop_at_the_ends() {
        assert_eq!(Step::EventDetails.previous(), None);
        assert_eq!(Step::EventDetails.next(), Some(Step::Theme));
        assert_eq!(Step::Payment.next(), Some(Step::Success));
        assert_eq!(Step::Success.next(), None);
        assert!(Step::Success.is_terminal());
        assert!(!Step::Payment.is_terminal());
    }

    #[test]
    fn titles_are_distinct() {
        let mut titles: Vec<&str> = STEPS.iter().map(|s| s.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), STEP_COUNT);
    }
}
