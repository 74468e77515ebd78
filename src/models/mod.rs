//! Data models for the checklist
//!
//! `ChecklistState` is the canonical JSON record kept in the key-value store.
//! Field names match the persisted format (`checked`, `completedBy`, `lastReset`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{make_key, Category};

/// Toggle state, completed-by name, and last reset time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistState {
    #[serde(default)]
    pub checked: BTreeMap<String, bool>,
    #[serde(default)]
    pub completed_by: String,
    #[serde(default = "Utc::now")]
    pub last_reset: DateTime<Utc>,
}

impl ChecklistState {
    /// Fresh state: nothing checked, no name, reset now
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            checked: BTreeMap::new(),
            completed_by: String::new(),
            last_reset: now,
        }
    }

    pub fn is_checked(&self, category_id: &str, index: usize) -> bool {
        self.is_key_checked(&make_key(category_id, index))
    }

    pub fn is_key_checked(&self, key: &str) -> bool {
        self.checked.get(key).copied().unwrap_or(false)
    }

    /// Flip the value at a composite key and return the new value
    pub fn toggle_key(&mut self, key: String) -> bool {
        let entry = self.checked.entry(key).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Name for display, falling back when blank
    pub fn completed_by_display(&self) -> &str {
        if self.completed_by.is_empty() {
            "Not specified"
        } else {
            &self.completed_by
        }
    }

    /// Progress of one category; keys outside the category are ignored
    pub fn category_progress(&self, category: &Category) -> Progress {
        let done = category.keys().filter(|k| self.is_key_checked(k)).count();
        Progress::new(done, category.items.len())
    }

    /// Progress over the whole catalog; stale keys are not counted
    pub fn progress(&self, catalog: &[Category]) -> Progress {
        catalog
            .iter()
            .map(|c| self.category_progress(c))
            .fold(Progress::new(0, 0), |acc, p| {
                Progress::new(acc.done + p.done, acc.total + p.total)
            })
    }

    /// Keys marked true that no longer name a catalog entry
    pub fn stale_keys<'a>(&'a self, catalog: &'a [Category]) -> impl Iterator<Item = &'a str> + 'a {
        self.checked
            .iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| k.as_str())
            .filter(move |k| !catalog.iter().any(|c| c.keys().any(|ck| ck == *k)))
    }
}

/// Completion counts with a rounded percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub percentage: u8,
}

impl Progress {
    pub fn new(done: usize, total: usize) -> Self {
        Self {
            done,
            total,
            percentage: percentage(done, total),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}

/// `round(100 * done / total)` with halves rounding up; zero total is 0%
pub fn percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (200 * done + total) / (2 * total);
    pct.min(u8::MAX as usize) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(0, 63), 0);
        assert_eq!(percentage(63, 63), 100);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(percentage(1, 200), 1); // 0.5 rounds up
    }

    #[test]
    fn test_toggle_key_twice_restores() {
        let mut state = ChecklistState::new(fixed_now());
        assert!(state.toggle_key("lobby::0".to_string()));
        assert!(state.is_checked("lobby", 0));
        assert!(!state.toggle_key("lobby::0".to_string()));
        assert!(!state.is_checked("lobby", 0));
    }

    #[test]
    fn test_progress_ignores_stale_keys() {
        let mut state = ChecklistState::new(fixed_now());
        state.checked.insert("lobby::1".to_string(), true);
        state.checked.insert("lobby::2".to_string(), false);
        state.checked.insert("garage::0".to_string(), true);
        state.checked.insert("lobby::99".to_string(), true);

        let progress = state.progress(CATALOG);
        assert_eq!(progress.done, 1);
        assert_eq!(progress.total, 63);
        assert_eq!(progress.percentage, 2);

        let stale: Vec<_> = state.stale_keys(CATALOG).collect();
        assert_eq!(stale, vec!["garage::0", "lobby::99"]);
    }

    #[test]
    fn test_category_complete() {
        let mut state = ChecklistState::new(fixed_now());
        let intro = &CATALOG[4];
        for key in intro.keys() {
            state.toggle_key(key);
        }
        let progress = state.category_progress(intro);
        assert!(progress.is_complete());
        assert_eq!(progress.percentage, 100);
        assert!(!Progress::new(0, 0).is_complete());
    }

    #[test]
    fn test_serialized_field_names() {
        let mut state = ChecklistState::new(fixed_now());
        state.completed_by = "Sam".to_string();
        state.checked.insert("exterior::3".to_string(), true);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["completedBy"], "Sam");
        assert_eq!(json["checked"]["exterior::3"], true);
        assert_eq!(json["lastReset"], "2026-10-19T08:30:00Z");
    }

    #[test]
    fn test_missing_fields_default() {
        let state: ChecklistState =
            serde_json::from_str(r#"{"checked":{"lobby::0":true}}"#).unwrap();
        assert!(state.is_checked("lobby", 0));
        assert_eq!(state.completed_by, "");
        assert_eq!(state.completed_by_display(), "Not specified");
    }
}
