//! Random dummy event generation.
//!
//! The generator drafts `floor(interval_days * 1.5)` events spread over the
//! interval, hands them one by one to a [`CalendarStore`] and commits once
//! at the end. A draft the store rejects is logged and skipped; only a
//! failing commit fails the run.

use std::time::{Duration, Instant};

use chrono::{Days, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{StoreError, StoreResult};
use crate::event::{CalendarId, EventDraft};
use crate::params::{GenerationParameters, PROBABILITY_RESOLUTION, quarter_hours, time_of_quarter_hour};
use crate::store::CalendarStore;

/// Titles drafts are named after.
pub const TITLES: [&str; 11] = [
    "Meeting",
    "Party",
    "BBQ",
    "Pick up kids",
    "Cleaning",
    "Dinner",
    "Lunch",
    "Buy presents",
    "Dance",
    "Reminder",
    "Call X",
];

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationResult {
    pub created_count: usize,
    pub elapsed: Duration,
}

/// Samples independent event drafts for one calendar and interval.
#[derive(Debug, Clone)]
pub struct DraftSampler {
    calendar_id: CalendarId,
    day_zero: NaiveDateTime,
    params: GenerationParameters,
}

impl DraftSampler {
    /// Day zero is local midnight of `from`.
    pub fn new(calendar_id: CalendarId, from: NaiveDate, params: &GenerationParameters) -> Self {
        DraftSampler {
            calendar_id,
            day_zero: from.and_time(chrono::NaiveTime::MIN),
            params: params.sanitized(),
        }
    }

    pub fn trial_count(&self) -> usize {
        self.params.trial_count()
    }

    /// Draw one draft. Fails when the sampled day or end time falls past
    /// the last date chrono can represent.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> StoreResult<EventDraft> {
        let params = &self.params;

        let title = TITLES.choose(rng).copied().unwrap_or(TITLES[0]);
        let day_offset = uniform_below(rng, params.interval_days);
        let start_quarter_hour = params.min_start_quarter_hour
            + uniform_below(rng, params.effective_max_start() - params.min_start_quarter_hour);
        let duration = 1 + uniform_below(rng, params.max_duration_quarter_hours);
        let all_day = f64::from(rng.gen_range(0..PROBABILITY_RESOLUTION))
            / f64::from(PROBABILITY_RESOLUTION)
            < params.all_day_probability;

        let mut start = self
            .day_zero
            .checked_add_days(Days::new(u64::from(day_offset)))
            .ok_or_else(|| {
                StoreError::DateOutOfRange(format!("{} + {} days", self.day_zero.date(), day_offset))
            })?;
        if !all_day {
            start = start.date().and_time(time_of_quarter_hour(start_quarter_hour));
        }
        let end = start
            .checked_add_signed(quarter_hours(duration))
            .ok_or_else(|| StoreError::DateOutOfRange(format!("{} + {} quarter-hours", start, duration)))?;

        Ok(EventDraft {
            title: title.to_string(),
            start,
            end,
            all_day,
            calendar_id: self.calendar_id.clone(),
        })
    }
}

/// Uniform integer in `[0, upper)`, or 0 when the range is empty.
fn uniform_below<R: Rng + ?Sized>(rng: &mut R, upper: u32) -> u32 {
    if upper == 0 { 0 } else { rng.gen_range(0..upper) }
}

/// Fill `calendar` with random events starting at `from`.
///
/// Returns how many drafts the store accepted. A commit failure discards
/// that count and is returned as the error.
pub fn generate<S, R>(
    store: &mut S,
    calendar: &CalendarId,
    from: NaiveDate,
    params: &GenerationParameters,
    rng: &mut R,
) -> StoreResult<GenerationResult>
where
    S: CalendarStore + ?Sized,
    R: Rng + ?Sized,
{
    let started = Instant::now();
    let sampler = DraftSampler::new(calendar.clone(), from, params);
    let trials = sampler.trial_count();

    tracing::info!(%calendar, %from, trials, "generating dummy events");

    let mut created_count = 0;
    for trial in 0..trials {
        let draft = match sampler.sample(rng) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(trial, error = %e, "skipping event");
                continue;
            }
        };

        match store.create_event(&draft) {
            Ok(()) => {
                created_count += 1;
                tracing::debug!(trial, title = %draft.title, time = %draft.render_time(), "drafted event");
            }
            Err(e) => {
                tracing::warn!(trial, title = %draft.title, error = %e, "skipping event");
            }
        }
    }

    store.commit()?;

    let elapsed = started.elapsed();
    tracing::info!(created_count, trials, ?elapsed, "dummy events committed");

    Ok(GenerationResult {
        created_count,
        elapsed,
    })
}
