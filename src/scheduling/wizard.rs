//! Booking wizard state machine.
//!
//! Three linear steps: pick a date and time, enter contact details,
//! confirm. Back navigation is always allowed and never loses input;
//! forward transitions are gated on per-step validity. The terminal step
//! yields the payload for `POST /api/submissions/bookings`.

use chrono::NaiveDate;

use crate::models::submission::CreateBooking;

/// Wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectSchedule,
    ContactInfo,
    Confirm,
}

/// Form state shared across all steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business: String,
    pub message: String,
}

/// The booking wizard: one shared form, a current step, guarded advances
#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    form: BookingForm,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectSchedule,
            form: BookingForm::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.form.date = Some(date);
    }

    pub fn select_time(&mut self, time: impl Into<String>) {
        self.form.time = Some(time.into());
    }

    pub fn set_contact(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) {
        self.form.name = name.into();
        self.form.email = email.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.form.phone = phone.into();
    }

    pub fn set_business(&mut self, business: impl Into<String>) {
        self.form.business = business.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.form.message = message.into();
    }

    /// Schedule step is complete once both a date and a time are selected
    pub fn can_proceed_to_contact(&self) -> bool {
        self.form.date.is_some() && self.form.time.is_some()
    }

    /// Contact step only requires presence of name and email
    pub fn can_proceed_to_confirm(&self) -> bool {
        !self.form.name.is_empty() && !self.form.email.is_empty()
    }

    /// Advance to the next step if the current step's guard holds.
    /// Returns `false` when the guard fails or the wizard is already at
    /// the confirm step.
    pub fn advance(&mut self) -> bool {
        match self.step {
            WizardStep::SelectSchedule if self.can_proceed_to_contact() => {
                self.step = WizardStep::ContactInfo;
                true
            }
            WizardStep::ContactInfo if self.can_proceed_to_confirm() => {
                self.step = WizardStep::Confirm;
                true
            }
            _ => false,
        }
    }

    /// Step back without touching the form
    pub fn back(&mut self) -> bool {
        match self.step {
            WizardStep::SelectSchedule => false,
            WizardStep::ContactInfo => {
                self.step = WizardStep::SelectSchedule;
                true
            }
            WizardStep::Confirm => {
                self.step = WizardStep::ContactInfo;
                true
            }
        }
    }

    /// Build the backend submission payload.
    ///
    /// Only available at the confirm step with all guards satisfied.
    pub fn submission(&self) -> Option<CreateBooking> {
        if self.step != WizardStep::Confirm
            || !self.can_proceed_to_contact()
            || !self.can_proceed_to_confirm()
        {
            return None;
        }
        let date = self.form.date?;
        Some(CreateBooking {
            date: Some(date.format("%A, %B %-d, %Y").to_string()),
            date_iso: Some(date.format("%Y-%m-%d").to_string()),
            time: self.form.time.clone(),
            name: self.form.name.clone(),
            email: self.form.email.clone(),
            phone: non_empty(&self.form.phone),
            business: non_empty(&self.form.business),
            message: non_empty(&self.form.message),
        })
    }

    /// Return to the initial state with all fields cleared, ready for the
    /// next open of the widget.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_guard_requires_date_and_time() {
        let mut wizard = BookingWizard::new();
        assert!(!wizard.can_proceed_to_contact());
        assert!(!wizard.advance());

        wizard.select_date(date(2030, 6, 3));
        assert!(!wizard.can_proceed_to_contact());

        wizard.select_time("09:00 AM");
        assert!(wizard.can_proceed_to_contact());
        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::ContactInfo);
    }

    #[test]
    fn test_contact_guard_requires_name_and_email() {
        let mut wizard = BookingWizard::new();
        wizard.select_date(date(2030, 6, 3));
        wizard.select_time("09:00 AM");
        wizard.advance();

        assert!(!wizard.advance());

        wizard.set_contact("Ada", "");
        assert!(!wizard.can_proceed_to_confirm());

        // Presence only: no format validation at this gate
        wizard.set_contact("Ada", "not-an-email");
        assert!(wizard.can_proceed_to_confirm());
        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Confirm);
    }

    #[test]
    fn test_back_navigation_keeps_input() {
        let mut wizard = BookingWizard::new();
        wizard.select_date(date(2030, 6, 3));
        wizard.select_time("10:30 AM");
        wizard.advance();
        wizard.set_contact("Ada Lovelace", "ada@example.com");

        assert!(wizard.back());
        assert_eq!(wizard.step(), WizardStep::SelectSchedule);
        assert_eq!(wizard.form().name, "Ada Lovelace");
        assert_eq!(wizard.form().time.as_deref(), Some("10:30 AM"));

        // Guards still hold, so we can walk straight back forward
        assert!(wizard.advance());
        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Confirm);
    }

    #[test]
    fn test_cannot_go_back_from_first_step() {
        let mut wizard = BookingWizard::new();
        assert!(!wizard.back());
    }

    #[test]
    fn test_submission_payload() {
        let mut wizard = BookingWizard::new();
        assert!(wizard.submission().is_none());

        wizard.select_date(date(2030, 6, 3)); // a Monday
        wizard.select_time("02:00 PM");
        wizard.advance();
        wizard.set_contact("Ada Lovelace", "ada@example.com");
        wizard.set_business("Analytical Engines Ltd");
        wizard.advance();

        let payload = wizard.submission().unwrap();
        assert_eq!(payload.date.as_deref(), Some("Monday, June 3, 2030"));
        assert_eq!(payload.date_iso.as_deref(), Some("2030-06-03"));
        assert_eq!(payload.time.as_deref(), Some("02:00 PM"));
        assert_eq!(payload.name, "Ada Lovelace");
        assert_eq!(payload.phone, None);
        assert_eq!(
            payload.business.as_deref(),
            Some("Analytical Engines Ltd")
        );
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut wizard = BookingWizard::new();
        wizard.select_date(date(2030, 6, 3));
        wizard.select_time("09:00 AM");
        wizard.advance();
        wizard.set_contact("Ada", "ada@example.com");
        wizard.advance();

        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::SelectSchedule);
        assert_eq!(wizard.form(), &BookingForm::default());
    }
}
