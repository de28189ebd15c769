//! ICS file generation for event drafts.

use chrono::{Days, NaiveDate, NaiveTime};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::error::{StoreError, StoreResult};
use crate::event::EventDraft;

/// Generate .ics content for a single draft.
pub fn generate_ics(draft: &EventDraft, uid: &str) -> StoreResult<String> {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(uid);
    ics_event.summary(&draft.title);

    // DTSTAMP is required by RFC 5545
    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    if draft.all_day {
        add_date_property(&mut ics_event, "DTSTART", draft.start.date());
        add_date_property(&mut ics_event, "DTEND", all_day_end(draft)?);
    } else {
        // Floating datetime (no Z, no TZID)
        ics_event.add_property("DTSTART", draft.start.format("%Y%m%dT%H%M%S").to_string());
        ics_event.add_property("DTEND", draft.end.format("%Y%m%dT%H%M%S").to_string());
    }

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

/// A DATE-valued DTEND is exclusive: the day after the last day the draft touches.
fn all_day_end(draft: &EventDraft) -> StoreResult<NaiveDate> {
    let last_day = if draft.end.time() == NaiveTime::MIN && draft.end.date() > draft.start.date() {
        draft.end.date().pred_opt().unwrap_or(draft.start.date())
    } else {
        draft.end.date()
    };

    last_day
        .max(draft.start.date())
        .checked_add_days(Days::new(1))
        .ok_or_else(|| StoreError::IcsGenerate(format!("no day after {} for DTEND", last_day)))
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with DUMMYCAL
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:DUMMYCAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CalendarId;
    use chrono::Duration;

    fn make_draft(all_day: bool) -> EventDraft {
        let day = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let start = if all_day {
            day.and_hms_opt(0, 0, 0).unwrap()
        } else {
            day.and_hms_opt(15, 0, 0).unwrap()
        };
        EventDraft {
            title: "Pick up kids".to_string(),
            start,
            end: start + Duration::minutes(90),
            all_day,
            calendar_id: CalendarId::new("family"),
        }
    }

    #[test]
    fn test_generate_ics_timed_event_is_floating() {
        let ics = generate_ics(&make_draft(false), "abc@dummycal").unwrap();

        assert!(ics.contains("DTSTART:20250320T150000"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20250320T163000"), "ICS:\n{}", ics);
        assert!(!ics.contains("DTSTART:20250320T150000Z"), "Should not be UTC. ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:Pick up kids"));
        assert!(ics.contains("UID:abc@dummycal"));
    }

    #[test]
    fn test_generate_ics_all_day_event_has_value_date() {
        let ics = generate_ics(&make_draft(true), "abc@dummycal").unwrap();

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20250320"),
            "DTSTART should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20250321"),
            "DTEND should be the following day. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_generate_ics_strips_bloat() {
        let ics = generate_ics(&make_draft(false), "abc@dummycal").unwrap();

        assert!(ics.contains("PRODID:DUMMYCAL"));
        assert!(!ics.contains("CALSCALE:GREGORIAN"));
        assert!(ics.contains("DTSTAMP:"));
        assert!(ics.ends_with("\r\n"));
    }

    #[test]
    fn all_day_end_covers_days_touched_by_duration() {
        let mut draft = make_draft(true);

        // Ends at 00:15 on the following day
        draft.end = draft.start + Duration::minutes(24 * 60 + 15);
        assert_eq!(all_day_end(&draft).unwrap(), NaiveDate::from_ymd_opt(2025, 3, 22).unwrap());

        // Ending exactly at midnight does not touch the next day
        draft.end = draft.start + Duration::days(1);
        assert_eq!(all_day_end(&draft).unwrap(), NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
    }

    #[test]
    fn all_day_draft_on_last_date_is_an_error() {
        let mut draft = make_draft(true);
        draft.start = NaiveDate::MAX.and_time(NaiveTime::MIN);
        draft.end = draft.start + Duration::hours(2);

        let result = generate_ics(&draft, "abc@dummycal");
        assert!(matches!(result, Err(StoreError::IcsGenerate(_))));
    }
}
