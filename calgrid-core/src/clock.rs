//! Source of "today".
//!
//! The initial view and the today marker must agree, so both are read from
//! the same clock.

use chrono::{Local, NaiveDate};

use crate::date_key::DateKey;

pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn today_key(&self) -> DateKey {
        DateKey::new(self.today())
    }
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
