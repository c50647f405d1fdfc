//! A browsing session: view state plus the events loaded for it.
//!
//! Events are loaded once per session and cached. Navigation and selection
//! only recompute the grid from the cached map; they never go back to the
//! source. A pushed `SourceMessage` replaces the cached map.

use chrono::Weekday;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::date_key::DateKey;
use crate::detail::DayDetail;
use crate::error::CalGridResult;
use crate::event_map::EventMap;
use crate::grid::MonthGrid;
use crate::source::{EventSource, SourceMessage};
use crate::view::ViewState;

pub struct CalendarSession<C: Clock = SystemClock> {
    clock: C,
    week_start: Weekday,
    view: ViewState,
    events: Option<EventMap>,
}

impl CalendarSession<SystemClock> {
    pub fn new(week_start: Weekday) -> Self {
        Self::with_clock(SystemClock, week_start)
    }
}

impl<C: Clock> CalendarSession<C> {
    /// Session showing the clock's current month, with nothing loaded yet.
    pub fn with_clock(clock: C, week_start: Weekday) -> Self {
        let view = ViewState::new(clock.today());
        CalendarSession {
            clock,
            week_start,
            view,
            events: None,
        }
    }

    /// Load events from `source` unless already loaded.
    ///
    /// A failing source leaves the session with an empty map; the grid still
    /// renders, just without dots.
    pub async fn load<S: EventSource>(&mut self, source: &S) -> &EventMap {
        if self.events.is_some() {
            debug!("Events already loaded, skipping {}", source.describe());
        } else {
            let map = match source.load().await {
                Ok(map) => {
                    info!(events = map.len(), "Loaded events from {}", source.describe());
                    map
                }
                Err(e) => {
                    warn!("Could not load events from {}: {e}", source.describe());
                    EventMap::new()
                }
            };
            self.events = Some(map);
        }

        self.events.get_or_insert_with(EventMap::new)
    }

    /// Replace the cached events with a pushed update.
    pub fn apply_message(&mut self, message: &SourceMessage) {
        let map = message.to_event_map();
        info!(events = map.len(), "Applied pushed events");
        self.events = Some(map);
    }

    pub fn is_loaded(&self) -> bool {
        self.events.is_some()
    }

    pub fn events(&self) -> Option<&EventMap> {
        self.events.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn today_key(&self) -> DateKey {
        self.clock.today_key()
    }

    /// The current month, or `None` while events are still loading.
    pub fn grid(&self) -> Option<CalGridResult<MonthGrid<'_>>> {
        let events = self.events.as_ref()?;
        Some(MonthGrid::build(
            self.week_start,
            self.view.view_year,
            self.view.view_month,
            events,
            &self.clock.today_key(),
            self.view.selected.as_ref(),
        ))
    }

    pub fn navigate_month(&mut self, delta: i32) {
        self.view.navigate_month(delta);
    }

    pub fn go_to_today(&mut self) {
        self.view.go_to_today(self.clock.today());
    }

    /// Select a day and return its detail; before loading it has no events.
    pub fn select_day(&mut self, key: DateKey) -> DayDetail<'_> {
        match &self.events {
            Some(events) => self.view.select_day(key, events),
            None => {
                self.view.selected = Some(key);
                DayDetail::new(key, &[])
            }
        }
    }

    /// Show the month of `key`.
    pub fn show_month_of(&mut self, key: DateKey) {
        self.view.view_year = key.year();
        self.view.view_month = key.month0();
    }
}
