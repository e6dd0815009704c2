//! Calendar-day source for the ledger.

use chrono::{Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// Format a date as a ledger key (`YYYY-MM-DD`).
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Supplies "today" to the ledger.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current calendar day
    fn today(&self) -> NaiveDate;
}

/// Which calendar the day boundary follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBasis {
    /// Days roll over at UTC midnight
    #[default]
    Utc,
    /// Days roll over at local midnight
    Local,
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    basis: DateBasis,
}

impl SystemClock {
    /// Create a clock using the given day boundary
    #[must_use]
    pub fn new(basis: DateBasis) -> Self {
        Self { basis }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.basis {
            DateBasis::Utc => Utc::now().date_naive(),
            DateBasis::Local => Local::now().date_naive(),
        }
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Create a clock frozen at `date`
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    /// Move the clock to `date`
    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(PoisonError::into_inner) = date;
    }

    /// Move the clock forward by `days`
    pub fn advance_days(&self, days: i64) {
        let mut date = self.date.lock().unwrap_or_else(PoisonError::into_inner);
        *date += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
