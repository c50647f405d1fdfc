use calgrid_core::grid::{compute_month_grid, compute_month_grid_from, days_in_month, first_of_month, weekday_offset};
use calgrid_core::raw::RawEvent;
use calgrid_core::{DateKey, EventMap, EventRecord, ViewState};
use chrono::{NaiveDate, Weekday};

fn key(s: &str) -> DateKey {
    s.parse().unwrap()
}

fn march_2025_events() -> EventMap {
    [
        (key("2025-03-03"), EventRecord::new("Standup").at("09:00", Some("09:15"))),
        (key("2025-03-06"), EventRecord::new("Team Sync").at("10:00", Some("11:00"))),
        (key("2025-03-06"), EventRecord::new("Dentist").with_color("#ef4444")),
    ]
    .into_iter()
    .collect()
}

#[test]
fn march_2025_scenario() {
    let events = march_2025_events();
    let today = key("2025-03-15");
    let cells = compute_month_grid(2025, 2, &events, &today, None).unwrap();

    assert_eq!(weekday_offset(first_of_month(2025, 2).unwrap(), Weekday::Sun), 6);
    assert_eq!(cells.len(), 42);

    let sixth = cells.iter().find(|c| c.date_key == key("2025-03-06")).unwrap();
    assert_eq!(sixth.events.len(), 2);
    assert_eq!(sixth.events[0].title, "Team Sync");
    assert_eq!(sixth.events[1].title, "Dentist");
    assert_eq!(sixth.dots().count(), 2);

    let third = cells.iter().find(|c| c.date_key == key("2025-03-03")).unwrap();
    assert_eq!(third.events.len(), 1);
}

#[test]
fn grid_shape_holds_for_every_month() {
    let events = EventMap::new();
    let today = key("2000-01-01");

    for year in [1999, 2000, 2023, 2024, 2025, 2100] {
        for month0 in 0..12 {
            for week_start in [Weekday::Sun, Weekday::Mon] {
                let cells = compute_month_grid_from(week_start, year, month0, &events, &today, None).unwrap();
                let first = first_of_month(year, month0).unwrap();
                let offset = weekday_offset(first, week_start) as usize;
                let days = days_in_month(year, month0).unwrap() as usize;

                assert_eq!(cells.len() % 7, 0, "{year}-{month0}");
                assert!(cells.len() >= offset + days);
                assert!(cells.len() < offset + days + 7);

                let current: Vec<u32> = cells
                    .iter()
                    .filter(|c| c.is_current_month)
                    .map(|c| c.day_of_month)
                    .collect();
                let expected: Vec<u32> = (1..=days as u32).collect();
                assert_eq!(current, expected, "{year}-{month0}");

                // Consecutive cells are consecutive days
                for pair in cells.windows(2) {
                    assert_eq!(pair[1].date_key.date() - pair[0].date_key.date(), chrono::Duration::days(1));
                }
            }
        }
    }
}

#[test]
fn at_most_one_today_and_selected() {
    let events = EventMap::new();
    let today = key("2025-03-31");
    let selected = key("2025-04-05");

    // 2025-03-31 and 2025-04-05 are both visible in the March grid
    let march = compute_month_grid(2025, 2, &events, &today, Some(&selected)).unwrap();
    assert_eq!(march.iter().filter(|c| c.is_today).count(), 1);
    assert_eq!(march.iter().filter(|c| c.is_selected).count(), 1);

    let june = compute_month_grid(2025, 5, &events, &today, Some(&selected)).unwrap();
    assert_eq!(june.iter().filter(|c| c.is_today).count(), 0);
    assert_eq!(june.iter().filter(|c| c.is_selected).count(), 0);
}

#[test]
fn grid_is_pure() {
    let events = march_2025_events();
    let today = key("2025-03-15");
    let selected = key("2025-03-06");

    let a = compute_month_grid(2025, 2, &events, &today, Some(&selected)).unwrap();
    let b = compute_month_grid(2025, 2, &events, &today, Some(&selected)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn navigation_round_trip_across_december() {
    let mut view = ViewState::new(NaiveDate::from_ymd_opt(2025, 12, 10).unwrap());
    assert_eq!((view.view_year, view.view_month), (2025, 11));

    view.navigate_month(1);
    assert_eq!((view.view_year, view.view_month), (2026, 0));

    view.navigate_month(12);
    view.navigate_month(-12);
    view.navigate_month(-1);
    assert_eq!((view.view_year, view.view_month), (2025, 11));
}

#[test]
fn pushed_record_lands_on_its_calendar_date() {
    let raw: Vec<RawEvent> =
        serde_json::from_str(r#"[{"date":"2025-03-06T00:00:00Z","eventName":"Team Sync"}]"#).unwrap();
    let events = EventMap::from_raw(&raw);
    let today = key("2025-03-01");

    let cells = compute_month_grid(2025, 2, &events, &today, None).unwrap();
    let with_events: Vec<_> = cells.iter().filter(|c| !c.events.is_empty()).collect();

    assert_eq!(with_events.len(), 1);
    assert_eq!(with_events[0].date_key.to_string(), "2025-03-06");
    assert_eq!(with_events[0].events[0].title, "Team Sync");
}

#[test]
fn selecting_an_empty_day_reports_no_events() {
    let events = march_2025_events();
    let mut view = ViewState::new(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());

    let detail = view.select_day(key("2025-03-04"), &events);

    assert!(detail.events.is_empty());
    assert_eq!(detail.summary(), "No events");
    assert_eq!(detail.label, "Tuesday, March 4, 2025");
}
