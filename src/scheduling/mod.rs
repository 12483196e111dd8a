//! Booking scheduling logic: calendar grid generation and the
//! multi-step booking wizard state machine.

pub mod calendar;
pub mod wizard;

pub use calendar::{month_grid, CalendarMonth, DayCell};
pub use wizard::{BookingForm, BookingWizard, WizardStep};
