//! In-memory calendar store.
//!
//! Backs `--dry-run` and lets tests simulate per-event and commit failures.

use std::collections::HashSet;

use crate::error::{StoreError, StoreResult};
use crate::event::{CalendarId, EventDraft};
use crate::store::{AuthorizationStatus, Calendar, CalendarStore, writable_sorted};

#[derive(Debug, Clone)]
pub struct MemoryStore {
    status: AuthorizationStatus,
    calendars: Vec<Calendar>,
    staged: Vec<EventDraft>,
    committed: Vec<EventDraft>,
    create_calls: usize,
    failing_creates: HashSet<usize>,
    fail_commit: bool,
    commits: usize,
}

impl MemoryStore {
    /// An authorized store with the given calendars.
    pub fn new(calendars: Vec<Calendar>) -> Self {
        MemoryStore {
            status: AuthorizationStatus::Authorized,
            calendars,
            staged: Vec::new(),
            committed: Vec::new(),
            create_calls: 0,
            failing_creates: HashSet::new(),
            fail_commit: false,
            commits: 0,
        }
    }

    /// A store with a single writable calendar.
    pub fn with_calendar(id: &str, title: &str) -> Self {
        Self::new(vec![Calendar {
            id: CalendarId::new(id),
            title: title.to_string(),
            read_only: false,
        }])
    }

    pub fn with_status(mut self, status: AuthorizationStatus) -> Self {
        self.status = status;
        self
    }

    /// Reject the nth call (0-based) to `create_event`.
    pub fn failing_create(mut self, call_index: usize) -> Self {
        self.failing_creates.insert(call_index);
        self
    }

    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn committed(&self) -> &[EventDraft] {
        &self.committed
    }

    pub fn staged(&self) -> &[EventDraft] {
        &self.staged
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls
    }

    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl CalendarStore for MemoryStore {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }

    fn request_access(&mut self, granted: bool) -> StoreResult<AuthorizationStatus> {
        if self.status == AuthorizationStatus::Restricted {
            return Ok(self.status);
        }
        self.status = if granted {
            AuthorizationStatus::Authorized
        } else {
            AuthorizationStatus::Denied
        };
        Ok(self.status)
    }

    fn list_writable_calendars(&self) -> StoreResult<Vec<Calendar>> {
        if !self.status.is_authorized() {
            return Err(StoreError::NotAuthorized(self.status));
        }
        Ok(writable_sorted(self.calendars.iter().cloned()))
    }

    fn create_event(&mut self, draft: &EventDraft) -> StoreResult<()> {
        let call = self.create_calls;
        self.create_calls += 1;

        if !self.status.is_authorized() {
            return Err(StoreError::NotAuthorized(self.status));
        }

        let calendar = self
            .calendars
            .iter()
            .find(|c| c.id == draft.calendar_id)
            .ok_or_else(|| StoreError::CalendarNotFound(draft.calendar_id.to_string()))?;

        if calendar.read_only {
            return Err(StoreError::ReadOnlyCalendar(calendar.id.to_string()));
        }

        if self.failing_creates.contains(&call) {
            return Err(StoreError::Io(std::io::Error::other(format!(
                "simulated failure for event #{}",
                call
            ))));
        }

        self.staged.push(draft.clone());
        Ok(())
    }

    fn commit(&mut self) -> StoreResult<()> {
        self.commits += 1;

        if self.fail_commit {
            self.staged.clear();
            return Err(StoreError::Commit("simulated commit failure".into()));
        }

        self.committed.append(&mut self.staged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(calendar: &str) -> EventDraft {
        let start = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap().and_hms_opt(9, 0, 0).unwrap();
        EventDraft {
            title: "Dance".to_string(),
            start,
            end: start + chrono::Duration::hours(1),
            all_day: false,
            calendar_id: CalendarId::new(calendar),
        }
    }

    #[test]
    fn events_only_show_up_after_commit() {
        let mut store = MemoryStore::with_calendar("home", "Home");
        store.create_event(&draft("home")).unwrap();

        assert_eq!(store.staged().len(), 1);
        assert!(store.committed().is_empty());

        store.commit().unwrap();
        assert!(store.staged().is_empty());
        assert_eq!(store.committed().len(), 1);
    }

    #[test]
    fn rejects_unknown_and_read_only_calendars() {
        let mut store = MemoryStore::new(vec![Calendar {
            id: CalendarId::new("holidays"),
            title: "Holidays".to_string(),
            read_only: true,
        }]);

        assert!(matches!(
            store.create_event(&draft("nope")),
            Err(StoreError::CalendarNotFound(_))
        ));
        assert!(matches!(
            store.create_event(&draft("holidays")),
            Err(StoreError::ReadOnlyCalendar(_))
        ));
        assert!(store.list_writable_calendars().unwrap().is_empty());
    }

    #[test]
    fn listing_requires_authorization() {
        let mut store =
            MemoryStore::with_calendar("home", "Home").with_status(AuthorizationStatus::NotDetermined);
        assert!(matches!(
            store.list_writable_calendars(),
            Err(StoreError::NotAuthorized(AuthorizationStatus::NotDetermined))
        ));

        store.request_access(true).unwrap();
        assert_eq!(store.list_writable_calendars().unwrap().len(), 1);
    }

    #[test]
    fn simulated_create_failure_hits_only_that_call() {
        let mut store = MemoryStore::with_calendar("home", "Home").failing_create(1);

        assert!(store.create_event(&draft("home")).is_ok());
        assert!(store.create_event(&draft("home")).is_err());
        assert!(store.create_event(&draft("home")).is_ok());
        assert_eq!(store.staged().len(), 2);
        assert_eq!(store.create_calls(), 3);
    }

    #[test]
    fn restricted_store_ignores_access_requests() {
        let mut store =
            MemoryStore::with_calendar("home", "Home").with_status(AuthorizationStatus::Restricted);
        assert_eq!(store.request_access(true).unwrap(), AuthorizationStatus::Restricted);

        let mut store =
            MemoryStore::with_calendar("home", "Home").with_status(AuthorizationStatus::NotDetermined);
        assert_eq!(store.request_access(false).unwrap(), AuthorizationStatus::Denied);
        assert!(matches!(
            store.create_event(&draft("home")),
            Err(StoreError::NotAuthorized(AuthorizationStatus::Denied))
        ));
    }
}
