//! Calendar date-event index.
//!
//! Pure functions over the event collection and a displayed (year, month).
//! Nothing here is persisted.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{ChoirEvent, EventDraft};

/// Direction of month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

/// Move `delta` months from (year, month), rolling the year as needed.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    (year, month)
}

/// Currently displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
}

impl CalendarView {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// One month back or forward. No range clamping.
    pub fn navigate(self, direction: Direction) -> Self {
        let delta = match direction {
            Direction::Prev => -1,
            Direction::Next => 1,
        };
        let (year, month) = shift_month(self.year, self.month, delta);
        Self { year, month }
    }

    /// Number of days in the displayed month.
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = shift_month(self.year, self.month, 1);
        match (
            NaiveDate::from_ymd_opt(self.year, self.month, 1),
            NaiveDate::from_ymd_opt(next_year, next_month, 1),
        ) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            _ => 0,
        }
    }

    /// Weekday of the 1st, counted from Sunday = 0.
    pub fn first_weekday(&self) -> u32 {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// Days of the displayed month that have at least one event.
    pub fn event_days(&self, events: &[ChoirEvent]) -> BTreeSet<u32> {
        events
            .iter()
            .filter(|e| e.year == self.year && e.month == self.month)
            .map(|e| e.day)
            .collect()
    }
}

/// True iff some event falls on exactly (year, month, day).
pub fn has_event(events: &[ChoirEvent], year: i32, month: u32, day: u32) -> bool {
    events.iter().any(|e| e.is_on(year, month, day))
}

/// Clicking a day: editors get a blank draft for that date, visitors nothing.
pub fn date_click(authorized: bool, year: i32, month: u32, day: u32) -> Option<EventDraft> {
    authorized.then(|| EventDraft::new_on(year, month, day))
}

/// Everything a client needs to draw one month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub first_weekday: u32,
    pub event_days: Vec<u32>,
    pub prev: CalendarView,
    pub next: CalendarView,
}

impl MonthView {
    pub fn build(view: CalendarView, events: &[ChoirEvent]) -> Self {
        Self {
            year: view.year,
            month: view.month,
            days_in_month: view.days_in_month(),
            first_weekday: view.first_weekday(),
            event_days: view.event_days(events).into_iter().collect(),
            prev: view.navigate(Direction::Prev),
            next: view.navigate(Direction::Next),
        }
    }
}
