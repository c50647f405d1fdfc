//! Month grid layout.
//!
//! A month is laid out as full weeks: the grid starts on the first weekday on
//! or before the 1st and ends on the last weekday on or after the last day,
//! so it always has 4, 5 or 6 rows of seven cells.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::date_key::{DateKey, KEY_YEARS};
use crate::error::{CalGridError, CalGridResult};
use crate::event::EventRecord;
use crate::event_map::EventMap;

/// Maximum number of dot indicators drawn in one cell.
pub const MAX_DOTS: usize = 3;

pub const DAYS_PER_WEEK: usize = 7;

/// Everything the presentation layer needs to draw one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellDescriptor<'a> {
    pub date_key: DateKey,
    pub day_of_month: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// All events of the day; only the first `MAX_DOTS` become dots.
    pub events: &'a [EventRecord],
}

impl CellDescriptor<'_> {
    /// Colors of the dot indicators, at most `MAX_DOTS`.
    pub fn dots(&self) -> impl Iterator<Item = &str> {
        self.events.iter().take(MAX_DOTS).map(|e| e.color.as_str())
    }
}

/// First day of a zero-based month. Years outside `KEY_YEARS` are rejected.
pub fn first_of_month(year: i32, month0: u32) -> CalGridResult<NaiveDate> {
    if month0 > 11 {
        return Err(CalGridError::InvalidMonth(format!("month index {month0} is outside 0-11")));
    }
    if !KEY_YEARS.contains(&year) {
        return Err(CalGridError::InvalidMonth(format!(
            "year {year} is outside {}-{}",
            KEY_YEARS.start(),
            KEY_YEARS.end()
        )));
    }
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .ok_or_else(|| CalGridError::InvalidMonth(format!("{year:04}-{:02}", month0 + 1)))
}

/// Number of days in a zero-based month, from calendar arithmetic.
pub fn days_in_month(year: i32, month0: u32) -> CalGridResult<u32> {
    let first = first_of_month(year, month0)?;
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or_else(|| CalGridError::InvalidMonth(format!("{year:04}-{:02}", month0 + 1)))?;
    Ok((next - first).num_days() as u32)
}

/// Offset of `date` from the start of its week (0 = `week_start`).
pub fn weekday_offset(date: NaiveDate, week_start: Weekday) -> u32 {
    (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

/// Lay out a month with weeks starting on Sunday.
pub fn compute_month_grid<'a>(
    view_year: i32,
    view_month: u32,
    events: &'a EventMap,
    today_key: &DateKey,
    selected_key: Option<&DateKey>,
) -> CalGridResult<Vec<CellDescriptor<'a>>> {
    compute_month_grid_from(Weekday::Sun, view_year, view_month, events, today_key, selected_key)
}

/// Lay out a month with weeks starting on `week_start`.
///
/// The result is row-major, its length a multiple of seven, and it depends
/// only on the arguments. A month whose spill-over cells leave `KEY_YEARS`
/// (January of year 0, December of 9999) is an `InvalidMonth`.
pub fn compute_month_grid_from<'a>(
    week_start: Weekday,
    view_year: i32,
    view_month: u32,
    events: &'a EventMap,
    today_key: &DateKey,
    selected_key: Option<&DateKey>,
) -> CalGridResult<Vec<CellDescriptor<'a>>> {
    let first = first_of_month(view_year, view_month)?;
    let first_weekday = weekday_offset(first, week_start) as usize;
    let days_in_month = days_in_month(view_year, view_month)? as usize;
    let total_cells = (first_weekday + days_in_month).div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK;

    let mut cells = Vec::with_capacity(total_cells);

    // Day index 1 is the 1st; indices <= 0 and > days_in_month spill into
    // the neighbouring months.
    let first_index = 1 - first_weekday as i64;
    let out_of_range = || CalGridError::InvalidMonth(format!("{view_year:04}-{:02}", view_month + 1));
    for day_index in first_index..first_index + total_cells as i64 {
        let date = first
            .checked_add_signed(Duration::days(day_index - 1))
            .ok_or_else(out_of_range)?;
        let date_key = DateKey::checked(date).map_err(|_| out_of_range())?;

        cells.push(CellDescriptor {
            date_key,
            day_of_month: date.day(),
            is_current_month: date.month0() == view_month,
            is_today: date_key == *today_key,
            is_selected: selected_key == Some(&date_key),
            events: events.events_for(&date_key),
        });
    }

    Ok(cells)
}

/// A computed month, ready to be drawn.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid<'a> {
    pub year: i32,
    /// Zero-based month.
    pub month: u32,
    pub week_start: Weekday,
    pub cells: Vec<CellDescriptor<'a>>,
}

impl<'a> MonthGrid<'a> {
    pub fn build(
        week_start: Weekday,
        year: i32,
        month: u32,
        events: &'a EventMap,
        today_key: &DateKey,
        selected_key: Option<&DateKey>,
    ) -> CalGridResult<Self> {
        let cells = compute_month_grid_from(week_start, year, month, events, today_key, selected_key)?;
        Ok(MonthGrid {
            year,
            month,
            week_start,
            cells,
        })
    }

    /// Heading such as "March 2025".
    pub fn title(&self) -> String {
        match first_of_month(self.year, self.month) {
            Ok(first) => first.format("%B %Y").to_string(),
            Err(_) => format!("{:04}-{:02}", self.year, self.month + 1),
        }
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, CellDescriptor<'a>> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Short weekday names in column order, e.g. ["Su", "Mo", ...].
    pub fn weekday_labels(&self) -> [&'static str; DAYS_PER_WEEK] {
        const NAMES: [&str; DAYS_PER_WEEK] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
        let offset = self.week_start.num_days_from_monday() as usize;
        std::array::from_fn(|i| NAMES[(offset + i) % DAYS_PER_WEEK])
    }

    pub fn selected(&self) -> Option<&CellDescriptor<'a>> {
        self.cells.iter().find(|c| c.is_selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 1).unwrap(), 29);
        assert_eq!(days_in_month(2025, 1).unwrap(), 28);
        assert_eq!(days_in_month(1900, 1).unwrap(), 28);
        assert_eq!(days_in_month(2000, 1).unwrap(), 29);
        assert_eq!(days_in_month(2025, 11).unwrap(), 31);
    }

    #[test]
    fn test_invalid_month_index() {
        assert!(first_of_month(2025, 12).is_err());
    }

    #[test]
    fn test_years_outside_key_range_are_invalid() {
        assert!(matches!(first_of_month(10000, 0), Err(CalGridError::InvalidMonth(_))));
        assert!(matches!(first_of_month(-5, 6), Err(CalGridError::InvalidMonth(_))));
        assert!(days_in_month(-1, 1).is_err());

        let events = EventMap::new();
        let today = DateKey::from_ymd(2025, 3, 1).unwrap();
        assert!(compute_month_grid(10000, 0, &events, &today, None).is_err());

        let june = compute_month_grid(9999, 5, &events, &today, None).unwrap();
        assert!(june.iter().all(|c| c.date_key.to_string().len() == 10));
    }

    #[test]
    fn test_weekday_offset() {
        let march_first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(weekday_offset(march_first, Weekday::Sun), 6);
        assert_eq!(weekday_offset(march_first, Weekday::Mon), 5);
        assert_eq!(weekday_offset(march_first, Weekday::Sat), 0);
    }

    #[test]
    fn test_four_row_month() {
        // February 2015 starts on a Sunday and has 28 days
        let events = EventMap::new();
        let today = DateKey::from_ymd(2015, 2, 1).unwrap();
        let cells = compute_month_grid(2015, 1, &events, &today, None).unwrap();
        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(|c| c.is_current_month));
    }

    #[test]
    fn test_leading_cells_roll_into_previous_year() {
        // January 2025 starts on a Wednesday
        let events = EventMap::new();
        let today = DateKey::from_ymd(2025, 1, 15).unwrap();
        let cells = compute_month_grid(2025, 0, &events, &today, None).unwrap();

        assert_eq!(cells[0].date_key.to_string(), "2024-12-29");
        assert!(!cells[0].is_current_month);
        assert_eq!(cells[3].date_key.to_string(), "2025-01-01");
        assert_eq!(cells.len(), 35);
        assert_eq!(cells.last().unwrap().date_key.to_string(), "2025-02-01");
    }

    #[test]
    fn test_dots_truncate_but_events_do_not() {
        let key = DateKey::from_ymd(2025, 3, 10).unwrap();
        let events: EventMap = (0..5)
            .map(|i| (key, EventRecord::new(format!("Event {i}")).with_color(format!("#00000{i}"))))
            .collect();

        let cells = compute_month_grid(2025, 2, &events, &key, None).unwrap();
        let cell = cells.iter().find(|c| c.date_key == key).unwrap();

        assert_eq!(cell.events.len(), 5);
        assert_eq!(cell.dots().collect::<Vec<_>>(), ["#000000", "#000001", "#000002"]);
    }

    #[test]
    fn test_monday_start_labels() {
        let events = EventMap::new();
        let today = DateKey::from_ymd(2025, 3, 1).unwrap();
        let grid = MonthGrid::build(Weekday::Mon, 2025, 2, &events, &today, None).unwrap();

        assert_eq!(grid.weekday_labels()[0], "Mo");
        assert_eq!(grid.weekday_labels()[6], "Su");
        assert_eq!(grid.cells[0].date_key.to_string(), "2025-02-24");
        assert_eq!(grid.title(), "March 2025");
    }
}
