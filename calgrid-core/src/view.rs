//! Which month is shown and which day is selected.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::detail::DayDetail;
use crate::event_map::EventMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub view_year: i32,
    /// Zero-based month (0 = January).
    pub view_month: u32,
    pub selected: Option<DateKey>,
}

impl ViewState {
    /// View of the month containing `today`, nothing selected.
    pub fn new(today: NaiveDate) -> Self {
        ViewState {
            view_year: today.year(),
            view_month: today.month0(),
            selected: None,
        }
    }

    /// Move by `delta` months, carrying into the year.
    ///
    /// The view may leave `KEY_YEARS`; the grid for such a month is an
    /// `InvalidMonth` error.
    pub fn navigate_month(&mut self, delta: i32) {
        let index = self.view_year as i64 * 12 + self.view_month as i64 + delta as i64;
        self.view_year = index.div_euclid(12) as i32;
        self.view_month = index.rem_euclid(12) as u32;
    }

    /// Show the month containing `today`; the selection is kept.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.view_year = today.year();
        self.view_month = today.month0();
    }

    /// Select `key` and resolve its events for the detail view.
    pub fn select_day<'a>(&mut self, key: DateKey, events: &'a EventMap) -> DayDetail<'a> {
        self.selected = Some(key);
        DayDetail::new(key, events.events_for(&key))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
