pub mod browse;
pub mod config;
pub mod day;
pub mod show;
pub mod watch;

use anyhow::Result;
use calgrid_core::CalendarSession;
use calgrid_core::DateKey;
use calgrid_core::clock::Clock;
use calgrid_core::config::CalGridConfig;
use calgrid_core::source::{AnySource, EventSource};

use crate::utils::tui::with_spinner;

/// Build the configured source and load it once into a fresh session.
pub async fn open_session(config: &CalGridConfig) -> Result<(CalendarSession, AnySource)> {
    let mut session = CalendarSession::new(config.week_start());
    let source = AnySource::from_config(config, session.today_key().date())?;

    with_spinner(format!("Loading events from {}", source.describe()), session.load(&source)).await;

    Ok((session, source))
}

/// Parse a `YYYY-MM` month argument into (year, zero-based month).
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let key: DateKey = format!("{s}-01")
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", s))?;
    Ok((key.year(), key.month0()))
}

/// Parse a day argument: `YYYY-MM-DD`, or a day number in the shown month.
pub fn parse_day<C: Clock>(s: &str, session: &CalendarSession<C>) -> Result<DateKey> {
    if let Ok(day) = s.trim().parse::<u32>() {
        let view = session.view();
        return DateKey::from_ymd(view.view_year, view.view_month + 1, day)
            .map_err(|_| anyhow::anyhow!("Day {} does not exist in the shown month", day));
    }

    Ok(s.trim().parse::<DateKey>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::clock::FixedClock;
    use chrono::{NaiveDate, Weekday};

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 2));
        assert_eq!(parse_month("2024-12").unwrap(), (2024, 11));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("2025-3").is_err());
    }

    #[test]
    fn test_parse_day_number_uses_shown_month() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
        let session = CalendarSession::with_clock(clock, Weekday::Sun);

        assert_eq!(parse_day("28", &session).unwrap().to_string(), "2025-02-28");
        assert!(parse_day("29", &session).is_err());
        assert_eq!(parse_day("2025-03-06", &session).unwrap().to_string(), "2025-03-06");
    }
}
