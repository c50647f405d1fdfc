//! Core types for the calgrid calendar.
//!
//! This crate provides everything a month view needs apart from drawing:
//! - `DateKey`, `EventRecord` and `EventMap` for the event data
//! - `grid` for laying out a month as full weeks of cells
//! - `view`, `detail` and `session` for navigation and day selection
//! - `source` for obtaining the event map (sample data, files, channels, remote)

pub mod clock;
pub mod config;
pub mod date_key;
pub mod detail;
pub mod error;
pub mod event;
pub mod event_map;
pub mod grid;
pub mod raw;
pub mod session;
pub mod source;
pub mod view;

pub use date_key::DateKey;
pub use detail::DayDetail;
pub use error::{CalGridError, CalGridResult};
pub use event::{EventRecord, EventStart};
pub use event_map::EventMap;
pub use grid::{CellDescriptor, MonthGrid};
pub use session::CalendarSession;
pub use view::ViewState;
