//! Randomization parameters for dummy event generation.
//!
//! Times of day and durations are counted in quarter-hours:
//! one unit is 15 minutes, 96 units make a full day.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Number of quarter-hours in a day.
pub const QUARTER_HOURS_PER_DAY: u32 = 96;

/// Minutes in one quarter-hour.
pub const MINUTES_PER_QUARTER_HOUR: i64 = 15;

/// Resolution of the all-day probability (per-mille).
pub const PROBABILITY_RESOLUTION: u32 = 1000;

/// Longest interval a run may cover, a little over 270 years.
pub const MAX_INTERVAL_DAYS: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Number of days (starting at the reference date) events are spread over.
    pub interval_days: u32,
    /// Earliest start time of day for timed events.
    pub min_start_quarter_hour: u32,
    /// Latest start time of day for timed events (exclusive unless equal to min).
    pub max_start_quarter_hour: u32,
    /// Longest duration an event may get.
    pub max_duration_quarter_hours: u32,
    /// Chance of an event being all-day, 0.0 to 1.0.
    pub all_day_probability: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        GenerationParameters {
            interval_days: 60,
            min_start_quarter_hour: 8 * 4,
            max_start_quarter_hour: 17 * 4,
            max_duration_quarter_hours: 3 * 4,
            all_day_probability: 0.1,
        }
    }
}

impl GenerationParameters {
    /// Clamp every value into the range the generator can sample from.
    pub fn sanitized(&self) -> Self {
        let last_quarter_hour = QUARTER_HOURS_PER_DAY - 1;
        let resolution = f64::from(PROBABILITY_RESOLUTION);

        let probability = if self.all_day_probability.is_nan() {
            0.0
        } else {
            self.all_day_probability.clamp(0.0, 1.0)
        };

        GenerationParameters {
            interval_days: self.interval_days.min(MAX_INTERVAL_DAYS),
            min_start_quarter_hour: self.min_start_quarter_hour.min(last_quarter_hour),
            max_start_quarter_hour: self.max_start_quarter_hour.min(last_quarter_hour),
            max_duration_quarter_hours: self
                .max_duration_quarter_hours
                .clamp(1, QUARTER_HOURS_PER_DAY),
            all_day_probability: (probability * resolution).floor() / resolution,
        }
    }

    /// Latest start, never earlier than the earliest start.
    pub fn effective_max_start(&self) -> u32 {
        self.max_start_quarter_hour.max(self.min_start_quarter_hour)
    }

    /// How many events get drafted for this interval.
    pub fn trial_count(&self) -> usize {
        trial_count(self.interval_days)
    }
}

/// `floor(interval_days * 1.5)`: some drafts are expected to fail.
pub fn trial_count(interval_days: u32) -> usize {
    (f64::from(interval_days) * 1.5).floor() as usize
}

/// Time of day for a quarter-hour index (wraps past midnight).
pub fn time_of_quarter_hour(quarter_hour: u32) -> NaiveTime {
    let quarter_hour = quarter_hour % QUARTER_HOURS_PER_DAY;
    NaiveTime::from_hms_opt(quarter_hour / 4, (quarter_hour % 4) * 15, 0).unwrap_or(NaiveTime::MIN)
}

pub fn quarter_hours(count: u32) -> Duration {
    Duration::minutes(i64::from(count) * MINUTES_PER_QUARTER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_office_hours() {
        let params = GenerationParameters::default();
        assert_eq!(params.interval_days, 60);
        assert_eq!(time_of_quarter_hour(params.min_start_quarter_hour).to_string(), "08:00:00");
        assert_eq!(time_of_quarter_hour(params.max_start_quarter_hour).to_string(), "17:00:00");
        assert_eq!(quarter_hours(params.max_duration_quarter_hours), Duration::hours(3));
    }

    #[test]
    fn trial_count_oversamples_by_half() {
        assert_eq!(trial_count(0), 0);
        assert_eq!(trial_count(1), 1);
        assert_eq!(trial_count(7), 10);
        assert_eq!(trial_count(60), 90);
    }

    #[test]
    fn effective_max_start_never_precedes_min() {
        let params = GenerationParameters {
            min_start_quarter_hour: 40,
            max_start_quarter_hour: 10,
            ..Default::default()
        };
        assert_eq!(params.effective_max_start(), 40);
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let params = GenerationParameters {
            interval_days: 3,
            min_start_quarter_hour: 200,
            max_start_quarter_hour: 96,
            max_duration_quarter_hours: 0,
            all_day_probability: 1.7,
        }
        .sanitized();

        assert_eq!(params.min_start_quarter_hour, 95);
        assert_eq!(params.max_start_quarter_hour, 95);
        assert_eq!(params.max_duration_quarter_hours, 1);
        assert_eq!(params.all_day_probability, 1.0);
        assert_eq!(params.interval_days, 3);
    }

    #[test]
    fn sanitized_caps_interval() {
        let params = GenerationParameters {
            interval_days: u32::MAX,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(params.interval_days, MAX_INTERVAL_DAYS);
        assert_eq!(params.trial_count(), 150_000);
    }

    #[test]
    fn sanitized_floors_probability_to_per_mille() {
        let params = GenerationParameters {
            all_day_probability: 0.12345,
            ..Default::default()
        }
        .sanitized();
        assert!((params.all_day_probability - 0.123).abs() < 1e-9);

        let nan = GenerationParameters {
            all_day_probability: f64::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(nan.all_day_probability, 0.0);
    }

    #[test]
    fn time_of_quarter_hour_maps_to_fifteen_minute_steps() {
        assert_eq!(time_of_quarter_hour(0), NaiveTime::MIN);
        assert_eq!(time_of_quarter_hour(33), NaiveTime::from_hms_opt(8, 15, 0).unwrap());
        assert_eq!(time_of_quarter_hour(95), NaiveTime::from_hms_opt(23, 45, 0).unwrap());
    }
}
