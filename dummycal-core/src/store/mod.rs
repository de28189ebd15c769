//! Calendar stores that generated events are written to.

pub mod dir;
pub mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StoreResult;
use crate::event::{CalendarId, EventDraft};

/// Whether the user allowed us to write into their calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    /// Nobody asked yet.
    NotDetermined,
    Authorized,
    Denied,
    /// Access is impossible regardless of what the user says.
    Restricted,
}

impl AuthorizationStatus {
    pub fn is_authorized(self) -> bool {
        self == AuthorizationStatus::Authorized
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            AuthorizationStatus::NotDetermined => "not determined",
            AuthorizationStatus::Authorized => "authorized",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::Restricted => "restricted",
        };
        write!(f, "{}", label)
    }
}

/// A calendar as listed by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: CalendarId,
    pub title: String,
    pub read_only: bool,
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Narrow contract the generator needs from a calendar backend.
///
/// `create_event` stages a single event; nothing is durable until `commit`.
pub trait CalendarStore {
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Record the user's answer to an access request and return the new status.
    fn request_access(&mut self, granted: bool) -> StoreResult<AuthorizationStatus>;

    /// Calendars that accept new events, sorted by title.
    fn list_writable_calendars(&self) -> StoreResult<Vec<Calendar>>;

    fn create_event(&mut self, draft: &EventDraft) -> StoreResult<()>;

    fn commit(&mut self) -> StoreResult<()>;
}

/// Drop read-only calendars and sort the rest alphabetically by title.
pub(crate) fn writable_sorted(calendars: impl IntoIterator<Item = Calendar>) -> Vec<Calendar> {
    let mut writable: Vec<Calendar> = calendars.into_iter().filter(|c| !c.read_only).collect();
    writable.sort_by(|a, b| a.title.cmp(&b.title));
    writable
}
