//! Core of dummycal: fills calendars with random dummy events for testing.
//!
//! - `generator` drafts randomized events and submits them to a store
//! - `store` holds the `CalendarStore` contract and its directory and
//!   in-memory implementations
//! - `params` describes the randomization knobs

pub mod config;
pub mod error;
pub mod event;
pub mod generator;
pub mod ics;
pub mod params;
pub mod store;
mod utils;

pub use error::{StoreError, StoreResult};
pub use event::{CalendarId, EventDraft};
pub use generator::{DraftSampler, GenerationResult, generate};
pub use params::GenerationParameters;
pub use store::{AuthorizationStatus, Calendar, CalendarStore};
