use anyhow::Result;
use dummycal_core::store::{CalendarStore, DirStore};
use owo_colors::OwoColorize;

use super::ensure_authorized;
use crate::render::Render;

pub fn run(store: &mut DirStore, yes: bool) -> Result<()> {
    ensure_authorized(store, yes)?;

    let calendars = store.list_writable_calendars()?;

    if calendars.is_empty() {
        println!("{}", "  <No calendars>".dimmed());
        return Ok(());
    }

    for calendar in &calendars {
        println!("  {}", calendar.render());
    }

    Ok(())
}
