use chrono::{Datelike, NaiveDate};

use crate::date_key::DateKey;
use crate::error::CalGridResult;
use crate::event::EventRecord;
use crate::event_map::EventMap;
use crate::source::EventSource;

/// Events held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    events: EventMap,
}

impl StaticSource {
    pub fn new(events: EventMap) -> Self {
        StaticSource { events }
    }

    /// A demo month of events placed in the month of `today`.
    pub fn sample(today: NaiveDate) -> Self {
        let day = |d: u32| DateKey::new(today.with_day(d).unwrap_or(today));

        let events = [
            (
                day(3),
                EventRecord::new("Team Sync")
                    .at("09:00", Some("09:30"))
                    .with_description("Weekly planning"),
            ),
            (
                day(6),
                EventRecord::new("Design Review")
                    .at("11:00", Some("12:00"))
                    .with_color("#f59e0b"),
            ),
            (
                day(6),
                EventRecord::new("Dentist")
                    .at("16:30", Some("17:00"))
                    .with_color("#ef4444"),
            ),
            (day(12), EventRecord::new("Sprint Start").with_color("#10b981")),
            (
                day(12),
                EventRecord::new("Standup").at("09:15", Some("09:30")),
            ),
            (
                day(12),
                EventRecord::new("1:1").at("13:00", Some("13:30")).with_color("#8b5cf6"),
            ),
            (
                day(12),
                EventRecord::new("Release Notes")
                    .at("15:00", None)
                    .with_color("#ec4899"),
            ),
            (
                day(20),
                EventRecord::new("Company Holiday")
                    .with_color("#10b981")
                    .with_description("Office closed"),
            ),
            (
                day(27),
                EventRecord::new("Book Club")
                    .at("19:00", Some("21:00"))
                    .with_color("#f59e0b"),
            ),
        ];

        StaticSource::new(events.into_iter().collect())
    }
}

impl EventSource for StaticSource {
    async fn load(&self) -> CalGridResult<EventMap> {
        Ok(self.events.clone())
    }

    fn describe(&self) -> String {
        format!("sample data ({} events)", self.events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_lands_in_requested_month() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let map = StaticSource::sample(today).load().await.unwrap();

        assert!(map.days().all(|(key, _)| key.year() == 2024 && key.month0() == 1));
        assert_eq!(map.events_for(&DateKey::from_ymd(2024, 2, 12).unwrap()).len(), 4);
    }
}
