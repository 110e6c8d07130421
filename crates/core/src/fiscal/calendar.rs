//! Date to fiscal period mapping.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use super::period::{FiscalCalendarDay, FiscalPeriod};
use crate::dimension::DimensionError;

/// Fiscal calendar indexed by date.
#[derive(Debug, Clone, Default)]
pub struct FiscalCalendar {
    days: BTreeMap<NaiveDate, FiscalCalendarDay>,
}

impl FiscalCalendar {
    /// Indexes loaded rows, keeping the first row for each date.
    ///
    /// Returns the calendar and every date that appeared again, in load order.
    #[must_use]
    pub fn index_days(days: &[FiscalCalendarDay]) -> (Self, Vec<NaiveDate>) {
        let mut index = BTreeMap::new();
        let mut duplicates = Vec::new();
        for day in days {
            if index.contains_key(&day.calendar_date) {
                duplicates.push(day.calendar_date);
            } else {
                index.insert(day.calendar_date, day.clone());
            }
        }
        (Self { days: index }, duplicates)
    }

    /// Generates a calendar fiscal year: one period per month.
    ///
    /// # Errors
    ///
    /// Returns `DimensionError::InvalidDateRange` if `start` is after `end`.
    pub fn calendar_months(start: NaiveDate, end: NaiveDate) -> Result<Self, DimensionError> {
        if start > end {
            return Err(DimensionError::InvalidDateRange { start, end });
        }

        let days = start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| FiscalCalendarDay {
                calendar_date: date,
                fiscal_year: date.year(),
                fiscal_period: date.month(),
                is_month_end: date.succ_opt().is_none_or(|next| next.month() != date.month()),
            })
            .map(|day| (day.calendar_date, day))
            .collect();

        Ok(Self { days })
    }

    /// Returns the calendar row for a date.
    #[must_use]
    pub fn lookup(&self, date: NaiveDate) -> Option<&FiscalCalendarDay> {
        self.days.get(&date)
    }

    /// Returns the fiscal period a date maps to.
    #[must_use]
    pub fn period_of(&self, date: NaiveDate) -> Option<FiscalPeriod> {
        self.lookup(date).map(FiscalCalendarDay::period)
    }

    /// Returns the distinct fiscal periods in chronological order.
    #[must_use]
    pub fn periods(&self) -> Vec<FiscalPeriod> {
        self.days
            .values()
            .map(FiscalCalendarDay::period)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns all dates mapped to a fiscal period, in order.
    #[must_use]
    pub fn dates_in(&self, period: FiscalPeriod) -> Vec<NaiveDate> {
        self.days
            .values()
            .filter(|day| day.period() == period)
            .map(|day| day.calendar_date)
            .collect()
    }

    /// Returns the calendar rows in date order.
    pub fn days(&self) -> impl Iterator<Item = &FiscalCalendarDay> {
        self.days.values()
    }

    /// Number of days covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if no days are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
