//! caldir-style directory store.
//!
//! Every subdirectory of the root holding a `.caldir/config.toml` is a
//! calendar, and every event is one `.ics` file inside it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::event::{CalendarId, EventDraft};
use crate::ics::generate_ics;
use crate::store::{AuthorizationStatus, Calendar, CalendarStore, writable_sorted};
use crate::utils::slugify;

const ACCESS_FILE: &str = ".dummycal/access.toml";
const CALENDAR_CONFIG_FILE: &str = ".caldir/config.toml";
const MAX_SLUG_SUFFIX: usize = 100;

fn is_false(b: &bool) -> bool {
    !*b
}

/// The part of a calendar's .caldir/config.toml we care about. Other keys
/// (a caldir `remote` table, for instance) are ignored.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
struct CalendarConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    read_only: bool,
}

impl CalendarConfig {
    fn load(calendar_dir: &Path) -> StoreResult<Self> {
        let path = calendar_dir.join(CALENDAR_CONFIG_FILE);

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: CalendarConfig =
                toml::from_str(&content).map_err(|e| StoreError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self, calendar_dir: &Path) -> StoreResult<()> {
        let dir = calendar_dir.join(".caldir");
        std::fs::create_dir_all(&dir)?;

        let content =
            toml::to_string_pretty(self).map_err(|e| StoreError::Config(e.to_string()))?;

        std::fs::write(calendar_dir.join(CALENDAR_CONFIG_FILE), content)?;
        Ok(())
    }
}

/// Recorded answer to the access question.
#[derive(Debug, Serialize, Deserialize)]
struct AccessRecord {
    granted: bool,
}

/// An event rendered to ICS, waiting for `commit`.
#[derive(Debug)]
struct StagedEvent {
    path: PathBuf,
    contents: String,
}

#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
    staged: Vec<StagedEvent>,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirStore {
            root: root.into(),
            staged: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    fn calendar_path(&self, id: &CalendarId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// All calendars, read-only ones included, in directory order. A calendar
    /// whose config cannot be read is left out.
    fn calendars(&self) -> StoreResult<Vec<Calendar>> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return Ok(Vec::new());
        };

        let mut calendars = Vec::new();
        for path in entries.filter_map(|entry| entry.ok()).map(|entry| entry.path()) {
            if !path.is_dir() || !path.join(CALENDAR_CONFIG_FILE).exists() {
                continue;
            }
            let Some(slug) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match CalendarConfig::load(&path) {
                Ok(config) => calendars.push(Self::describe(slug, &config)),
                Err(e) => {
                    tracing::warn!(calendar = slug, error = %e, "skipping calendar with unreadable config");
                }
            }
        }

        Ok(calendars)
    }

    fn describe(slug: &str, config: &CalendarConfig) -> Calendar {
        Calendar {
            id: CalendarId::new(slug),
            title: config.name.clone().unwrap_or_else(|| slug.to_string()),
            read_only: config.read_only,
        }
    }

    fn find_calendar(&self, id: &CalendarId) -> StoreResult<Calendar> {
        let path = self.calendar_path(id);
        if !path.join(CALENDAR_CONFIG_FILE).exists() {
            return Err(StoreError::CalendarNotFound(id.to_string()));
        }
        Ok(Self::describe(id.as_str(), &CalendarConfig::load(&path)?))
    }

    /// Create a new calendar directory named after `title`.
    pub fn create_calendar(&self, title: &str) -> StoreResult<Calendar> {
        let slug = self.unique_calendar_slug(title)?;
        let config = CalendarConfig {
            name: Some(title.to_string()),
            read_only: false,
        };
        config.save(&self.root.join(&slug))?;

        tracing::info!(calendar = %slug, "created calendar");
        Ok(Self::describe(&slug, &config))
    }

    /// Generate a calendar slug that doesn't conflict with existing directories.
    /// If the base slug exists, tries slug-2, slug-3, etc.
    fn unique_calendar_slug(&self, title: &str) -> StoreResult<String> {
        let base = match slugify(title) {
            s if s.is_empty() => "calendar".to_string(),
            s => s,
        };

        if !self.root.join(&base).exists() {
            return Ok(base);
        }

        (2..=MAX_SLUG_SUFFIX)
            .map(|n| format!("{}-{}", base, n))
            .find(|suffixed| !self.root.join(suffixed).exists())
            .ok_or(StoreError::SlugExhausted(base))
    }

    /// Pick a file name for the draft that is free on disk and not already staged.
    fn unique_event_path(&self, draft: &EventDraft) -> StoreResult<PathBuf> {
        let dir = self.calendar_path(&draft.calendar_id);
        let base = Self::base_slug_for(draft);

        let is_free = |slug: &str| {
            let path = dir.join(format!("{}.ics", slug));
            !path.exists() && !self.staged.iter().any(|s| s.path == path)
        };

        if is_free(&base) {
            return Ok(dir.join(format!("{}.ics", base)));
        }

        (2..=MAX_SLUG_SUFFIX)
            .map(|n| format!("{}-{}", base, n))
            .find(|suffixed| is_free(suffixed))
            .map(|slug| dir.join(format!("{}.ics", slug)))
            .ok_or(StoreError::SlugExhausted(base))
    }

    /// Timed events: `YYYY-MM-DDTHHMM__slug`
    /// All-day events: `YYYY-MM-DD__slug`
    fn base_slug_for(draft: &EventDraft) -> String {
        let date = if draft.all_day {
            draft.start.format("%Y-%m-%d").to_string()
        } else {
            draft.start.format("%Y-%m-%dT%H%M").to_string()
        };

        format!("{}__{}", date, slugify(&draft.title))
    }

    fn write_atomically(path: &Path, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");

        std::fs::write(&temp, contents)?;
        std::fs::rename(&temp, path)
    }
}

impl CalendarStore for DirStore {
    fn authorization_status(&self) -> AuthorizationStatus {
        if let Ok(metadata) = std::fs::metadata(&self.root) {
            if metadata.permissions().readonly() {
                return AuthorizationStatus::Restricted;
            }
        }

        let path = self.root.join(ACCESS_FILE);
        let Ok(content) = std::fs::read_to_string(&path) else {
            return AuthorizationStatus::NotDetermined;
        };

        match toml::from_str::<AccessRecord>(&content) {
            Ok(AccessRecord { granted: true }) => AuthorizationStatus::Authorized,
            Ok(AccessRecord { granted: false }) => AuthorizationStatus::Denied,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable access record");
                AuthorizationStatus::NotDetermined
            }
        }
    }

    fn request_access(&mut self, granted: bool) -> StoreResult<AuthorizationStatus> {
        if self.authorization_status() == AuthorizationStatus::Restricted {
            return Ok(AuthorizationStatus::Restricted);
        }

        let content = toml::to_string_pretty(&AccessRecord { granted })
            .map_err(|e| StoreError::Config(e.to_string()))?;
        let path = self.root.join(ACCESS_FILE);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;

        Ok(self.authorization_status())
    }

    fn list_writable_calendars(&self) -> StoreResult<Vec<Calendar>> {
        let status = self.authorization_status();
        if !status.is_authorized() {
            return Err(StoreError::NotAuthorized(status));
        }

        Ok(writable_sorted(self.calendars()?))
    }

    fn create_event(&mut self, draft: &EventDraft) -> StoreResult<()> {
        let status = self.authorization_status();
        if !status.is_authorized() {
            return Err(StoreError::NotAuthorized(status));
        }

        let calendar = self.find_calendar(&draft.calendar_id)?;
        if calendar.read_only {
            return Err(StoreError::ReadOnlyCalendar(calendar.id.to_string()));
        }

        let uid = format!("{}@dummycal", Uuid::new_v4());
        let contents = generate_ics(draft, &uid)?;
        let path = self.unique_event_path(draft)?;

        self.staged.push(StagedEvent { path, contents });
        Ok(())
    }

    /// Write every staged event. Stops at the first failure; files written
    /// before it stay on disk.
    fn commit(&mut self) -> StoreResult<()> {
        let staged = std::mem::take(&mut self.staged);

        for event in &staged {
            Self::write_atomically(&event.path, &event.contents).map_err(|e| {
                StoreError::Commit(format!("Could not write {}: {e}", event.path.display()))
            })?;
        }

        tracing::debug!(count = staged.len(), root = %self.root.display(), "committed events");
        Ok(())
    }
}
