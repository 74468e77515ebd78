// Integration tests for the checklist against an on-disk store
// Tests persistence round-trips, reset, export, and the CLI commands

use anyhow::Result;
use sanitation::catalog::{make_key, CATALOG};
use sanitation::commands;
use sanitation::config::SanitationPaths;
use sanitation::controller::{ChecklistController, Clock, ResetOutcome, SystemClock, STORAGE_KEY};
use sanitation::db::{Database, KeyValueStore};
use sanitation::models::ChecklistState;
use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

/// Clock the test moves by hand
#[derive(Clone)]
struct ManualClock(Rc<Cell<DateTime<Utc>>>);

impl ManualClock {
    fn new() -> Self {
        Self(Rc::new(Cell::new(Utc::now())))
    }

    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.get()
    }
}

/// Setup test environment
fn setup() -> Result<(TempDir, SanitationPaths)> {
    let temp_dir = TempDir::new()?;
    let paths = SanitationPaths::at(temp_dir.path().to_path_buf());
    commands::init(&paths)?;
    Ok((temp_dir, paths))
}

fn open(paths: &SanitationPaths) -> Result<ChecklistController<Database>> {
    let mut controller = ChecklistController::new(Database::open(paths)?);
    controller.load();
    Ok(controller)
}

#[test]
fn test_state_survives_reopen() -> Result<()> {
    let (_temp, paths) = setup()?;

    let saved = {
        let mut controller = open(&paths)?;
        controller.toggle("lobby", 0);
        controller.toggle("bathrooms", 10);
        controller.set_completed_by("Dana");
        controller.state().clone()
    };

    let reloaded = open(&paths)?;
    assert_eq!(reloaded.state(), &saved);
    assert_eq!(reloaded.progress().done, 2);

    Ok(())
}

#[test]
fn test_malformed_record_loads_default() -> Result<()> {
    let (_temp, paths) = setup()?;
    let mut db = Database::open(&paths)?;
    db.set(STORAGE_KEY, "{\"checked\": [oops")?;

    let controller = open(&paths)?;
    assert!(controller.state().checked.is_empty());
    assert_eq!(controller.state().completed_by, "");

    Ok(())
}

#[test]
fn test_record_written_verbatim_as_json() -> Result<()> {
    let (_temp, paths) = setup()?;
    let mut controller = open(&paths)?;
    controller.toggle("exterior", 2);

    let db = Database::open(&paths)?;
    let raw = db.get(STORAGE_KEY)?.expect("record written");
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(value["checked"]["exterior::2"], true);
    assert_eq!(value["completedBy"], "");
    assert!(value["lastReset"].is_string());

    let state: ChecklistState = serde_json::from_str(&raw)?;
    assert_eq!(&state, controller.state());

    Ok(())
}

#[test]
fn test_double_reset_persists_cleared_state() -> Result<()> {
    let (_temp, paths) = setup()?;
    let mut controller = open(&paths)?;
    controller.toggle("intro-room", 1);
    controller.set_completed_by("Pat");

    assert!(matches!(controller.reset(), ResetOutcome::Armed { .. }));
    assert_eq!(controller.reset(), ResetOutcome::Cleared);

    let reloaded = open(&paths)?;
    assert!(reloaded.state().checked.is_empty());
    assert_eq!(reloaded.state().completed_by, "Pat");

    Ok(())
}

#[test]
fn test_export_two_of_ten() -> Result<()> {
    let (temp, paths) = setup()?;
    let mut controller = open(&paths)?;
    controller.toggle("lobby", 3);
    controller.toggle("lobby", 7);

    let out_dir = temp.path().join("out");
    let path = controller.export_to_dir(&out_dir)?;
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name.starts_with("brand-sanitation-"));
    assert!(name.ends_with(".txt"));

    let content = fs::read_to_string(&path)?;
    let lobby = CATALOG.iter().find(|c| c.id == "lobby").unwrap();
    let block: Vec<_> = content
        .lines()
        .skip_while(|l| !l.starts_with(lobby.name))
        .take(2 + lobby.items.len())
        .collect();

    assert_eq!(block[0], format!("{} (2/10)", lobby.name));
    let marks: Vec<_> = block[2..].iter().map(|l| &l[..5]).collect();
    let expected: Vec<_> = (0..10)
        .map(|i| if i == 3 || i == 7 { "  [X]" } else { "  [ ]" })
        .collect();
    assert_eq!(marks, expected);

    Ok(())
}

#[test]
fn test_commands_toggle_and_name() -> Result<()> {
    let (_temp, paths) = setup()?;

    commands::toggle(&paths, "training-floor", Some(2))?;
    commands::toggle(&paths, "brand-standards::8", None)?;
    commands::set_name(&paths, "Quinn")?;

    let controller = open(&paths)?;
    assert!(controller.state().is_key_checked(&make_key("training-floor", 2)));
    assert!(controller.state().is_checked("brand-standards", 8));
    assert_eq!(controller.state().completed_by, "Quinn");

    assert!(commands::toggle(&paths, "not-a-key", None).is_err());

    Ok(())
}

#[test]
fn test_commands_toggle_unknown_key_still_stored() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::toggle(&paths, "garage", Some(0))?;

    let controller = open(&paths)?;
    assert!(controller.state().is_checked("garage", 0));
    assert_eq!(controller.progress().done, 0);

    Ok(())
}

#[test]
fn test_commands_reset_confirmed() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::toggle(&paths, "lobby", Some(1))?;

    commands::reset_with(&paths, SystemClock, || Ok(true))?;

    assert!(open(&paths)?.state().checked.is_empty());
    Ok(())
}

#[test]
fn test_commands_reset_expired() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::toggle(&paths, "lobby", Some(1))?;
    let clock = ManualClock::new();

    commands::reset_with(&paths, clock.clone(), || {
        clock.advance(Duration::milliseconds(3500));
        Ok(true)
    })?;

    assert!(open(&paths)?.state().is_checked("lobby", 1));
    Ok(())
}

#[test]
fn test_commands_reset_within_window_on_manual_clock() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::toggle(&paths, "lobby", Some(1))?;
    let clock = ManualClock::new();

    commands::reset_with(&paths, clock.clone(), || {
        clock.advance(Duration::seconds(3));
        Ok(true)
    })?;

    assert!(open(&paths)?.state().checked.is_empty());
    Ok(())
}

#[test]
fn test_commands_reset_cancelled_at_end_of_input() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::toggle(&paths, "lobby", Some(1))?;
    commands::set_name(&paths, "Robin")?;

    commands::reset_with(&paths, SystemClock, || {
        commands::read_confirmation(std::io::empty())
    })?;

    let controller = open(&paths)?;
    assert!(controller.state().is_checked("lobby", 1));
    assert_eq!(controller.state().completed_by, "Robin");
    Ok(())
}

#[test]
fn test_commands_export_to_file() -> Result<()> {
    let (temp, paths) = setup()?;
    commands::set_name(&paths, "Robin")?;
    let out = temp.path().join("report.txt");

    commands::export(&paths, out.to_str())?;

    let content = fs::read_to_string(&out)?;
    assert!(content.starts_with("BRAND & SANITATION CHECKLIST\n"));
    assert!(content.contains("Completed By: Robin"));
    assert!(content.contains("Progress: 0/63 (0%)"));

    Ok(())
}

#[test]
fn test_commands_require_init() -> Result<()> {
    let temp = TempDir::new()?;
    let paths = SanitationPaths::at(temp.path().to_path_buf());
    let err = commands::status(&paths, false).unwrap_err();
    assert!(err.to_string().contains("not initialized"));

    commands::init(&paths)?;
    commands::init(&paths)?;
    commands::status(&paths, false)?;
    commands::status(&paths, true)?;
    commands::list(&paths)?;

    Ok(())
}
