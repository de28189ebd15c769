use std::io::IsTerminal;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use dialoguer::Select;
use dummycal_core::config::DummycalConfig;
use dummycal_core::params::MAX_INTERVAL_DAYS;
use dummycal_core::store::{CalendarStore, DirStore, MemoryStore};
use dummycal_core::{Calendar, GenerationParameters, generate};
use owo_colors::OwoColorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::ensure_authorized;
use crate::parse::{parse_date, parse_duration_quarter_hours, parse_probability, parse_quarter_hour};
use crate::render::{Render, render_plan};
use crate::session::Session;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Calendar to fill (by slug)
    #[arg(short, long)]
    pub calendar: Option<String>,

    /// First day of the interval (e.g. "2025-03-20", "next monday"; default today)
    #[arg(short, long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Number of days to spread events over
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_INTERVAL_DAYS)))]
    pub interval: Option<u32>,

    /// Earliest start time of day (HH:MM or quarter-hour index)
    #[arg(long, value_parser = parse_quarter_hour)]
    pub min_start: Option<u32>,

    /// Latest start time of day (HH:MM or quarter-hour index)
    #[arg(long, value_parser = parse_quarter_hour)]
    pub max_start: Option<u32>,

    /// Longest event duration (e.g. "3h", "45m", or quarter-hours)
    #[arg(short = 'd', long, value_parser = parse_duration_quarter_hours)]
    pub max_duration: Option<u32>,

    /// Chance of an event being all-day (e.g. "0.1" or "10%")
    #[arg(short, long, value_parser = parse_probability)]
    pub all_day_probability: Option<f64>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the events instead of saving them
    #[arg(long)]
    pub dry_run: bool,

    /// Grant calendar access without asking if it was never requested
    #[arg(short, long)]
    pub yes: bool,
}

impl GenerateArgs {
    /// Command-line values override the configured defaults.
    pub fn parameters(&self, defaults: &GenerationParameters) -> GenerationParameters {
        GenerationParameters {
            interval_days: self.interval.unwrap_or(defaults.interval_days),
            min_start_quarter_hour: self.min_start.unwrap_or(defaults.min_start_quarter_hour),
            max_start_quarter_hour: self.max_start.unwrap_or(defaults.max_start_quarter_hour),
            max_duration_quarter_hours: self
                .max_duration
                .unwrap_or(defaults.max_duration_quarter_hours),
            all_day_probability: self.all_day_probability.unwrap_or(defaults.all_day_probability),
        }
        .sanitized()
    }
}

pub fn run(
    store: &mut DirStore,
    config: &DummycalConfig,
    session: &Session,
    args: GenerateArgs,
) -> Result<()> {
    ensure_authorized(store, args.yes)?;

    let calendars = store.list_writable_calendars()?;
    if calendars.is_empty() {
        anyhow::bail!(
            "No writable calendars found in {}.\n\n\
            Create one with:\n  \
            dummycal create-calendar \"Test data\"",
            store.root().display()
        );
    }

    let interactive = std::io::stdin().is_terminal();
    let calendar = resolve_calendar(
        args.calendar.as_deref(),
        config.default_calendar.as_deref(),
        &calendars,
        interactive,
    )?
    .clone();

    let from = args.from.unwrap_or_else(|| Local::now().date_naive());
    let params = args.parameters(&config.generation);

    println!("{}", render_plan(&calendar, from, &params));
    println!();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if args.dry_run {
        let mut preview = MemoryStore::new(vec![calendar.clone()]);
        let result = session
            .run(|| generate(&mut preview, &calendar.id, from, &params, &mut rng))?
            .context("Could not generate events")?;

        for draft in preview.committed() {
            println!("   {}", draft.render());
        }
        println!();
        println!("{}", format!("  Dry run: {}", result.render()).dimmed());
        return Ok(());
    }

    let result = session
        .run(|| generate(store, &calendar.id, from, &params, &mut rng))?
        .context("Could not save the generated events")?;

    println!("{}", format!("  {}", result.render()).green());

    Ok(())
}

/// Resolve which calendar to fill.
fn resolve_calendar<'a>(
    slug: Option<&str>,
    default_slug: Option<&str>,
    calendars: &'a [Calendar],
    interactive: bool,
) -> Result<&'a Calendar> {
    if let Some(slug) = slug {
        return calendars.iter().find(|c| c.id.as_str() == slug).ok_or_else(|| {
            let available: Vec<_> = calendars.iter().map(|c| c.id.as_str()).collect();
            anyhow::anyhow!(
                "Calendar '{}' not found. Available: {}",
                slug,
                available.join(", ")
            )
        });
    }

    // Try the default calendar
    if let Some(cal) = default_slug.and_then(|d| calendars.iter().find(|c| c.id.as_str() == d)) {
        return Ok(cal);
    }

    // If only one calendar, use it
    if calendars.len() == 1 {
        return Ok(&calendars[0]);
    }

    if interactive {
        let items: Vec<&str> = calendars.iter().map(|c| c.title.as_str()).collect();
        let selection = Select::new()
            .with_prompt("  Calendar")
            .items(&items)
            .default(0)
            .interact()?;
        Ok(&calendars[selection])
    } else {
        let available: Vec<_> = calendars.iter().map(|c| c.id.as_str()).collect();
        anyhow::bail!(
            "Multiple calendars found ({}). Use --calendar to specify one.",
            available.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use dummycal_core::CalendarId;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn calendar(slug: &str, title: &str) -> Calendar {
        Calendar {
            id: CalendarId::new(slug),
            title: title.to_string(),
            read_only: false,
        }
    }

    // --- GenerateArgs ---

    #[test]
    fn flags_override_defaults() {
        let cli = TestCli::try_parse_from([
            "dummycal",
            "--interval",
            "7",
            "--min-start",
            "08:00",
            "--max-start",
            "17:00",
            "--max-duration",
            "3h",
            "--all-day-probability",
            "0%",
            "--from",
            "2025-03-17",
        ])
        .unwrap();

        let params = cli.args.parameters(&GenerationParameters::default());
        assert_eq!(
            params,
            GenerationParameters {
                interval_days: 7,
                min_start_quarter_hour: 32,
                max_start_quarter_hour: 68,
                max_duration_quarter_hours: 12,
                all_day_probability: 0.0,
            }
        );
        assert_eq!(cli.args.from, NaiveDate::from_ymd_opt(2025, 3, 17));
    }

    #[test]
    fn missing_flags_use_configured_defaults() {
        let cli = TestCli::try_parse_from(["dummycal", "--interval", "3"]).unwrap();
        let defaults = GenerationParameters {
            min_start_quarter_hour: 40,
            ..Default::default()
        };

        let params = cli.args.parameters(&defaults);
        assert_eq!(params.interval_days, 3);
        assert_eq!(params.min_start_quarter_hour, 40);
        assert_eq!(params.max_duration_quarter_hours, 12);
    }

    #[test]
    fn invalid_values_are_rejected_by_clap() {
        assert!(TestCli::try_parse_from(["dummycal", "--min-start", "99"]).is_err());
        assert!(TestCli::try_parse_from(["dummycal", "--max-duration", "0"]).is_err());
        assert!(TestCli::try_parse_from(["dummycal", "--all-day-probability", "2"]).is_err());
        assert!(TestCli::try_parse_from(["dummycal", "--interval", "4000000000"]).is_err());
        assert!(TestCli::try_parse_from(["dummycal", "--interval", "100001"]).is_err());
        assert!(TestCli::try_parse_from(["dummycal", "--interval", "100000"]).is_ok());
    }

    // --- resolve_calendar ---

    #[test]
    fn resolves_explicit_slug() {
        let calendars = vec![calendar("home", "Home"), calendar("work", "Work")];
        let found = resolve_calendar(Some("work"), Some("home"), &calendars, false).unwrap();
        assert_eq!(found.title, "Work");
    }

    #[test]
    fn unknown_slug_lists_available() {
        let calendars = vec![calendar("home", "Home"), calendar("work", "Work")];
        let err = resolve_calendar(Some("gym"), None, &calendars, false).unwrap_err();
        assert!(err.to_string().contains("home, work"));
    }

    #[test]
    fn falls_back_to_default_then_single() {
        let calendars = vec![calendar("home", "Home"), calendar("work", "Work")];
        let found = resolve_calendar(None, Some("home"), &calendars, false).unwrap();
        assert_eq!(found.title, "Home");

        let single = vec![calendar("work", "Work")];
        let found = resolve_calendar(None, Some("gone"), &single, false).unwrap();
        assert_eq!(found.title, "Work");
    }

    #[test]
    fn ambiguous_without_terminal_is_an_error() {
        let calendars = vec![calendar("home", "Home"), calendar("work", "Work")];
        assert!(resolve_calendar(None, None, &calendars, false).is_err());
    }
}
