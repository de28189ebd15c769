//! Re-entrancy guard for generation runs.
//!
//! `main` owns the one `Session` of the process and hands it to the
//! commands that start a run.

use std::cell::Cell;

use anyhow::{Result, bail};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Owns the run state; a second trigger while a run is in flight is refused.
#[derive(Debug, Default)]
pub struct Session {
    state: Cell<RunState>,
}

impl Session {
    pub fn state(&self) -> RunState {
        self.state.get()
    }

    pub fn can_trigger(&self) -> bool {
        self.state() == RunState::Idle
    }

    pub fn run<T>(&self, work: impl FnOnce() -> T) -> Result<T> {
        if !self.can_trigger() {
            bail!("A generation run is already in progress");
        }

        self.state.set(RunState::Running);
        let output = work();
        self.state.set(RunState::Idle);

        Ok(output)
    }
}
