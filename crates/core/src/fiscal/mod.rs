//! Fiscal calendar and period keys.

pub mod calendar;
pub mod period;

pub use calendar::FiscalCalendar;
pub use period::{FiscalCalendarDay, FiscalPeriod};
