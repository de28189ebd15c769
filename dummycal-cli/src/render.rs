//! Terminal rendering for dummycal types.

use chrono::NaiveDate;
use dummycal_core::params::{GenerationParameters, time_of_quarter_hour};
use dummycal_core::{Calendar, EventDraft, GenerationResult};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Calendar {
    fn render(&self) -> String {
        format!("📅 {} {}", self.title, format!("({})", self.id).dimmed())
    }
}

impl Render for EventDraft {
    fn render(&self) -> String {
        format!("{} {} {}", "+".green(), self.title.green(), self.render_time().dimmed())
    }
}

impl Render for GenerationResult {
    fn render(&self) -> String {
        format!(
            "{} {} created in {:.1} seconds",
            self.created_count,
            pluralize("event", self.created_count),
            self.elapsed.as_secs_f64()
        )
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// "08:15" for quarter-hour 33.
pub fn format_quarter_hour(quarter_hour: u32) -> String {
    time_of_quarter_hour(quarter_hour).format("%H:%M").to_string()
}

/// "3 hours", "1 hour, 15 minutes", "45 minutes".
pub fn format_duration(quarter_hours: u32) -> String {
    let hours = quarter_hours / 4;
    let minutes = (quarter_hours % 4) * 15;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} {}", hours, pluralize("hour", hours as usize)));
    }
    if minutes > 0 || hours == 0 {
        parts.push(format!("{} {}", minutes, pluralize("minute", minutes as usize)));
    }
    parts.join(", ")
}

/// "10.0 %" for 0.1.
pub fn format_probability(probability: f64) -> String {
    format!("{:.1} %", probability * 100.0)
}

/// Summary of what is about to be generated.
pub fn render_plan(calendar: &Calendar, from: NaiveDate, params: &GenerationParameters) -> String {
    let params = params.sanitized();
    let rows = [
        ("Calendar", calendar.render()),
        ("From", from.format("%Y-%m-%d").to_string()),
        ("Interval", format!("{} days", params.interval_days)),
        (
            "Start between",
            format!(
                "{} and {}",
                format_quarter_hour(params.min_start_quarter_hour),
                format_quarter_hour(params.effective_max_start())
            ),
        ),
        ("Max duration", format_duration(params.max_duration_quarter_hours)),
        ("All-day", format_probability(params.all_day_probability)),
    ];

    rows.iter()
        .map(|(label, value)| format!("  {} {}", format!("{:<14}", label).dimmed(), value))
        .collect::<Vec<_>>()
        .join("\n")
}
