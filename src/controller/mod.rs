//! Checklist controller
//!
//! Owns the in-memory `ChecklistState`, writes it through to the key-value
//! store after every mutation, and drives the two-press reset.
//!
//! Storage failures never reach the user: a malformed record loads as the
//! default state, and a failed save is logged while the in-memory change stands.

use chrono::{DateTime, Local, Utc};
use std::path::{Path, PathBuf};

use crate::catalog::{make_key, Category, CATALOG};
use crate::db::KeyValueStore;
use crate::export::SummaryRenderer;
use crate::models::{ChecklistState, Progress};
use crate::reset::{PressOutcome, ResetConfirmation};

/// Fixed key of the persisted checklist record
pub const STORAGE_KEY: &str = "brand-sanitation-checklist";

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// What a reset press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// First press; press again before the deadline to clear
    Armed { deadline: DateTime<Utc> },
    /// Checked items cleared and last reset updated
    Cleared,
}

pub struct ChecklistController<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    catalog: &'static [Category],
    state: ChecklistState,
    confirm: ResetConfirmation,
    ready: bool,
}

impl<S: KeyValueStore> ChecklistController<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ChecklistController<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        let state = ChecklistState::new(clock.now());
        Self {
            store,
            clock,
            catalog: CATALOG,
            state,
            confirm: ResetConfirmation::default(),
            ready: false,
        }
    }

    /// Use a different reset confirmation window
    pub fn with_confirmation(mut self, confirm: ResetConfirmation) -> Self {
        self.confirm = confirm;
        self
    }

    /// Use a different catalog
    pub fn with_catalog(mut self, catalog: &'static [Category]) -> Self {
        self.catalog = catalog;
        self
    }

    /// Read the persisted record, falling back to the default state
    pub fn load(&mut self) {
        self.state = match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<ChecklistState>(&raw) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(error = %e, "stored checklist is malformed, starting fresh");
                    ChecklistState::new(self.clock.now())
                }
            },
            Ok(None) => {
                tracing::debug!("no stored checklist, starting fresh");
                ChecklistState::new(self.clock.now())
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored checklist, starting fresh");
                ChecklistState::new(self.clock.now())
            }
        };
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn state(&self) -> &ChecklistState {
        &self.state
    }

    pub fn catalog(&self) -> &'static [Category] {
        self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Flip one item. Any key is accepted, including ones not in the catalog.
    pub fn toggle(&mut self, category_id: &str, item_index: usize) -> bool {
        let key = make_key(category_id, item_index);
        let value = self.state.toggle_key(key.clone());
        tracing::debug!(key = %key, checked = value, "toggled item");
        self.save();
        value
    }

    /// Replace the completed-by name verbatim
    pub fn set_completed_by(&mut self, name: impl Into<String>) {
        self.state.completed_by = name.into();
        self.save();
    }

    /// First press arms; a second press inside the window clears the day
    pub fn reset(&mut self) -> ResetOutcome {
        let now = self.clock.now();
        match self.confirm.press(now) {
            PressOutcome::Armed { deadline } => {
                tracing::debug!(deadline = %deadline, "reset armed");
                ResetOutcome::Armed { deadline }
            }
            PressOutcome::Confirmed => {
                self.state = ChecklistState {
                    checked: Default::default(),
                    completed_by: std::mem::take(&mut self.state.completed_by),
                    last_reset: now,
                };
                tracing::info!("checklist reset for a new day");
                self.save();
                ResetOutcome::Cleared
            }
        }
    }

    /// Whether the next reset press would clear
    pub fn is_reset_armed(&self) -> bool {
        self.confirm.is_armed(self.clock.now())
    }

    pub fn cancel_reset(&mut self) {
        self.confirm.cancel();
    }

    pub fn reset_window(&self) -> chrono::Duration {
        self.confirm.window()
    }

    pub fn progress(&self) -> Progress {
        self.state.progress(self.catalog)
    }

    pub fn category_progress(&self, category: &Category) -> Progress {
        self.state.category_progress(category)
    }

    /// Report text dated with today's local calendar date
    pub fn export_summary(&self) -> String {
        let date = self.clock.now().with_timezone(&Local).date_naive();
        SummaryRenderer::render(&self.state, self.catalog, date)
    }

    /// Write the report to `dir` under the dated filename
    pub fn export_to_dir(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        SummaryRenderer::export_to_dir(&self.export_summary(), dir, self.clock.now())
    }

    fn save(&mut self) {
        let json = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize checklist");
                return;
            }
        };
        if let Err(e) = self.store.set(STORAGE_KEY, &json) {
            tracing::warn!(error = %e, "failed to save checklist");
        }
    }
}
