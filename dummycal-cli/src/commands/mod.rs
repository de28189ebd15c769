pub mod auth;
pub mod calendars;
pub mod create_calendar;
pub mod generate;

use anyhow::{Result, bail};
use dialoguer::Confirm;
use dummycal_core::store::{AuthorizationStatus, CalendarStore, DirStore};

/// Make sure we may write to the calendar directory, asking the user the
/// first time. Denied or restricted access stops the command.
pub fn ensure_authorized(store: &mut DirStore, assume_yes: bool) -> Result<()> {
    let location = store.root().display().to_string();

    authorize(store, &location, || {
        if assume_yes {
            return Ok(true);
        }
        let granted = Confirm::new()
            .with_prompt(format!(
                "  Allow dummycal to add events to calendars in {}?",
                location
            ))
            .default(false)
            .interact()?;
        Ok(granted)
    })
}

/// Turn the store's authorization status into go or no-go. `ask` is only
/// called when nobody has answered yet.
fn authorize<S, F>(store: &mut S, location: &str, ask: F) -> Result<()>
where
    S: CalendarStore + ?Sized,
    F: FnOnce() -> Result<bool>,
{
    match store.authorization_status() {
        AuthorizationStatus::Authorized => Ok(()),
        AuthorizationStatus::NotDetermined => match store.request_access(ask()?)? {
            AuthorizationStatus::Authorized => Ok(()),
            status => bail_for(status, location),
        },
        status => bail_for(status, location),
    }
}

fn bail_for(status: AuthorizationStatus, location: &str) -> Result<()> {
    match status {
        AuthorizationStatus::Restricted => bail!("The calendar directory {} is read-only.", location),
        _ => bail!(
            "Access to your calendars is {}.\n\n\
            Grant it with:\n  \
            dummycal auth --grant",
            status
        ),
    }
}
