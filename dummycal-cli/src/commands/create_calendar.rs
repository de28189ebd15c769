use anyhow::Result;
use dummycal_core::store::DirStore;
use owo_colors::OwoColorize;

use super::ensure_authorized;
use crate::render::Render;

pub fn run(store: &mut DirStore, title: &str, yes: bool) -> Result<()> {
    ensure_authorized(store, yes)?;

    let calendar = store.create_calendar(title)?;
    println!("{} {}", "  Created:".green(), calendar.render());

    Ok(())
}
