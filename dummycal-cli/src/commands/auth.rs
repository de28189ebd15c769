use anyhow::Result;
use dummycal_core::store::{AuthorizationStatus, CalendarStore, DirStore};
use owo_colors::OwoColorize;

use super::ensure_authorized;

pub fn run(store: &mut DirStore, grant: bool, revoke: bool, yes: bool) -> Result<()> {
    if grant || revoke {
        store.request_access(grant)?;
    } else if store.authorization_status() == AuthorizationStatus::NotDetermined {
        // A refusal here is an answer, not an error
        if let Err(e) = ensure_authorized(store, yes) {
            tracing::debug!(error = %e, "access not granted");
        }
    }

    let status = store.authorization_status();
    let line = format!("  Calendar access: {}", status);
    match status {
        AuthorizationStatus::Authorized => println!("{}", line.green()),
        AuthorizationStatus::NotDetermined => println!("{}", line.yellow()),
        AuthorizationStatus::Denied | AuthorizationStatus::Restricted => println!("{}", line.red()),
    }
    println!("{}", format!("  {}", store.root().display()).dimmed());

    Ok(())
}
