//! Parsing of command-line values into generation parameters.

use chrono::{NaiveDate, NaiveTime, Timelike};
use dummycal_core::params::{MINUTES_PER_QUARTER_HOUR, QUARTER_HOURS_PER_DAY};

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let lower = input.to_lowercase();

    lower
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the reference date: YYYY-MM-DD or natural language ("today", "next monday").
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    fuzzydate::parse(&expanded)
        .map(|dt| dt.date())
        .map_err(|_| format!("Could not parse date: \"{}\"", input))
}

/// Parse a start time of day: "HH:MM" (floored to the quarter-hour) or a
/// raw quarter-hour index.
pub fn parse_quarter_hour(input: &str) -> Result<u32, String> {
    let input = input.trim();

    let quarter_hour = if let Ok(n) = input.parse::<u32>() {
        n
    } else {
        let time = NaiveTime::parse_from_str(input, "%H:%M")
            .map_err(|_| format!("Invalid time \"{}\". Expected HH:MM or 0-95", input))?;
        time.hour() * 4 + time.minute() / 15
    };

    if quarter_hour >= QUARTER_HOURS_PER_DAY {
        return Err(format!(
            "Time \"{}\" is out of range. Expected HH:MM or 0-95",
            input
        ));
    }

    Ok(quarter_hour)
}

/// Parse a maximum duration: humantime ("90m", "3h") floored to whole
/// quarter-hours, or a raw quarter-hour count.
pub fn parse_duration_quarter_hours(input: &str) -> Result<u32, String> {
    let input = input.trim();

    let quarter_hours = if let Ok(n) = input.parse::<u32>() {
        n
    } else {
        let duration = humantime::parse_duration(input)
            .map_err(|e| format!("Could not parse duration \"{}\": {}", input, e))?;
        let minutes = duration.as_secs() / 60;
        u32::try_from(minutes / MINUTES_PER_QUARTER_HOUR as u64).unwrap_or(u32::MAX)
    };

    if !(1..=QUARTER_HOURS_PER_DAY).contains(&quarter_hours) {
        return Err(format!(
            "Duration \"{}\" must be between 15 minutes and 24 hours",
            input
        ));
    }

    Ok(quarter_hours)
}

/// Parse a probability as a fraction ("0.25") or percentage ("25%").
pub fn parse_probability(input: &str) -> Result<f64, String> {
    let input = input.trim();

    let value = match input.strip_suffix('%') {
        Some(percent) => percent
            .trim()
            .parse::<f64>()
            .map(|p| p / 100.0)
            .map_err(|_| format!("Invalid percentage \"{}\"", input))?,
        None => input
            .parse::<f64>()
            .map_err(|_| format!("Invalid probability \"{}\"", input))?,
    };

    if !(0.0..=1.0).contains(&value) {
        return Err(format!("Probability \"{}\" must be between 0 and 1", input));
    }

    Ok(value)
}
