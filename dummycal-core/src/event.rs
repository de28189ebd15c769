//! Event drafts handed from the generator to a calendar store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a calendar owned by a store (the directory slug for
/// the directory store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarId(pub String);

impl CalendarId {
    pub fn new(id: impl Into<String>) -> Self {
        CalendarId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A randomly generated event, not yet stored anywhere.
///
/// Times are floating local times. For all-day drafts `start` sits at
/// midnight, while `end` still carries the sampled duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub calendar_id: CalendarId,
}

impl EventDraft {
    /// Human-readable time, e.g. "2025-03-20 15:00 - 16:30" or "2025-03-20 (all day)".
    pub fn render_time(&self) -> String {
        if self.all_day {
            return format!("{} (all day)", self.start.format("%Y-%m-%d"));
        }

        if self.start.date() == self.end.date() {
            format!(
                "{} - {}",
                self.start.format("%Y-%m-%d %H:%M"),
                self.end.format("%H:%M")
            )
        } else {
            format!(
                "{} - {}",
                self.start.format("%Y-%m-%d %H:%M"),
                self.end.format("%Y-%m-%d %H:%M")
            )
        }
    }
}

impl fmt::Display for EventDraft {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(start: (u32, u32), end: (u32, u32), all_day: bool) -> EventDraft {
        let day = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        EventDraft {
            title: "Lunch".to_string(),
            start: day.and_hms_opt(start.0, start.1, 0).unwrap(),
            end: day.and_hms_opt(end.0, end.1, 0).unwrap(),
            all_day,
            calendar_id: CalendarId::new("work"),
        }
    }

    #[test]
    fn render_time_same_day() {
        assert_eq!(draft((15, 0), (16, 30), false).render_time(), "2025-03-20 15:00 - 16:30");
    }

    #[test]
    fn render_time_all_day() {
        assert_eq!(draft((0, 0), (2, 0), true).render_time(), "2025-03-20 (all day)");
    }

    #[test]
    fn render_time_crossing_midnight() {
        let mut d = draft((23, 0), (23, 0), false);
        d.end = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap().and_hms_opt(1, 15, 0).unwrap();
        assert_eq!(d.render_time(), "2025-03-20 23:00 - 2025-03-21 01:15");
    }
}
