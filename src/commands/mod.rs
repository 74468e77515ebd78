//! CLI commands for sanitation

use anyhow::{bail, Context, Result};
use chrono::Local;
use std::io::{self, BufRead};
use std::path::Path;

use crate::catalog::{self, CompositeKey};
use crate::config::{load_config, save_config, Config, SanitationPaths};
use crate::controller::{ChecklistController, Clock, ResetOutcome, SystemClock, STORAGE_KEY};
use crate::db::Database;
use crate::export::long_date;
use crate::help::{GUIDE, PORTAL_URL};
use crate::reset::ResetConfirmation;

/// Initialize sanitation for first-time setup
pub fn init(paths: &SanitationPaths) -> Result<()> {
    if paths.is_initialized() {
        println!("Sanitation is already initialized at {}", paths.root.display());
        return Ok(());
    }

    println!("Initializing sanitation at {}...", paths.root.display());

    paths.ensure_dirs()?;
    println!("  Created directory structure");

    save_config(paths, &Config::default())?;
    println!("  Created config.toml");

    Database::init(paths)?;
    println!("  Created checklist database");

    println!();
    println!("Sanitation initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  sanitation                 Open the checklist dashboard");
    println!("  sanitation list            Show every task with its key");
    println!("  sanitation help-guide      How to use the daily checklist");

    Ok(())
}

/// Open the store and load today's checklist
pub fn open_controller(
    paths: &SanitationPaths,
    config: &Config,
) -> Result<ChecklistController<Database>> {
    open_controller_with_clock(paths, config, SystemClock)
}

pub fn open_controller_with_clock<C: Clock>(
    paths: &SanitationPaths,
    config: &Config,
    clock: C,
) -> Result<ChecklistController<Database, C>> {
    ensure_initialized(paths)?;
    let db = Database::open(paths)?;
    let mut controller = ChecklistController::with_clock(db, clock)
        .with_confirmation(ResetConfirmation::from_secs(config.reset_confirm_secs));
    controller.load();
    Ok(controller)
}

/// Print overall and per-category progress
pub fn status(paths: &SanitationPaths, json: bool) -> Result<()> {
    let config = load_config(paths)?;
    let controller = open_controller(paths, &config)?;
    let state = controller.state();

    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }

    let progress = controller.progress();
    println!("Brand & Sanitation - {}", long_date(Local::now().date_naive()));
    println!("{}", "=".repeat(50));
    println!("Completed By: {}", state.completed_by_display());
    println!(
        "Last Reset:   {}",
        state.last_reset.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    if let Some(saved) = controller.store().updated_at(STORAGE_KEY)? {
        println!("Last Saved:   {}", format_timestamp(saved));
    }
    println!(
        "Progress:     {} of {} tasks complete ({}%)",
        progress.done, progress.total, progress.percentage
    );
    println!();

    for category in controller.catalog() {
        let cat = controller.category_progress(category);
        let mark = if cat.is_complete() { "✓" } else { " " };
        println!(
            "  {} {:<40} {:>2}/{:<2}",
            mark, category.name, cat.done, cat.total
        );
    }

    let stale = state.stale_keys(controller.catalog()).count();
    if stale > 0 {
        println!();
        println!("Note: {} checked key(s) no longer match a task and are not counted", stale);
    }

    Ok(())
}

/// Print every task with its composite key and check mark
pub fn list(paths: &SanitationPaths) -> Result<()> {
    let config = load_config(paths)?;
    let controller = open_controller(paths, &config)?;
    let state = controller.state();

    for category in controller.catalog() {
        let cat = controller.category_progress(category);
        println!("{} ({}/{})", category.name, cat.done, cat.total);
        println!("{}", "-".repeat(40));
        for item in category.entries() {
            let mark = if state.is_checked(item.category_id, item.index) {
                "x"
            } else {
                " "
            };
            println!("  [{}] {:<22} {}", mark, item.key(), item.label);
        }
        println!();
    }

    Ok(())
}

/// Resolve `category index` or `category::index` into a key
pub fn parse_target(target: &str, index: Option<usize>) -> Result<CompositeKey> {
    match index {
        Some(index) => Ok(CompositeKey::new(target, index)),
        None => target
            .parse::<CompositeKey>()
            .with_context(|| {
                format!(
                    "Expected <category> <index> or <category>::<index>, got '{}'",
                    target
                )
            }),
    }
}

/// Toggle one task
pub fn toggle(paths: &SanitationPaths, target: &str, index: Option<usize>) -> Result<()> {
    let key = parse_target(target, index)?;
    let config = load_config(paths)?;
    let mut controller = open_controller(paths, &config)?;

    let item = catalog::lookup(controller.catalog(), &key);
    if item.is_none() {
        println!("⚠ Warning: {} is not a task in the checklist", key);
    }

    let checked = controller.toggle(&key.category_id, key.index);
    let label = item.map(|i| i.label).unwrap_or("(unknown task)");
    println!("[{}] {}", if checked { "x" } else { " " }, label);

    let progress = controller.progress();
    println!(
        "Progress: {}/{} ({}%)",
        progress.done, progress.total, progress.percentage
    );
    Ok(())
}

/// Set the completed-by name
pub fn set_name(paths: &SanitationPaths, name: &str) -> Result<()> {
    let config = load_config(paths)?;
    let mut controller = open_controller(paths, &config)?;
    controller.set_completed_by(name);
    println!("Completed By: {}", controller.state().completed_by_display());
    Ok(())
}

/// Reset for a new day. Without `yes`, waits for Enter as the second press.
pub fn reset(paths: &SanitationPaths, yes: bool) -> Result<()> {
    reset_with(paths, SystemClock, || {
        if yes {
            return Ok(true);
        }
        read_confirmation(io::stdin().lock())
    })
}

/// Read one line as the second press; end of input means no answer
pub fn read_confirmation<R: BufRead>(mut reader: R) -> Result<bool> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    Ok(read > 0)
}

/// Two-press reset where `confirm` blocks until the second press.
/// `confirm` returning false cancels; the window is measured with `clock`.
pub fn reset_with<C, F>(paths: &SanitationPaths, clock: C, confirm: F) -> Result<()>
where
    C: Clock,
    F: FnOnce() -> Result<bool>,
{
    let config = load_config(paths)?;
    let mut controller = open_controller_with_clock(paths, &config, clock)?;

    if let ResetOutcome::Armed { deadline } = controller.reset() {
        println!(
            "Press Enter within {}s to reset every task (Ctrl-C to cancel)... [until {}]",
            controller.reset_window().num_seconds(),
            deadline.with_timezone(&Local).format("%H:%M:%S")
        );
    }

    if !confirm()? {
        controller.cancel_reset();
        println!("Reset cancelled; nothing was reset.");
        return Ok(());
    }

    match controller.reset() {
        ResetOutcome::Cleared => {
            println!("✓ Checklist reset for a new day");
            println!("  Completed By kept: {}", controller.state().completed_by_display());
        }
        ResetOutcome::Armed { .. } => {
            controller.cancel_reset();
            println!("Confirmation window expired; nothing was reset.");
        }
    }
    Ok(())
}

/// Export the summary to a file, or stdout when `output` is "-"
pub fn export(paths: &SanitationPaths, output: Option<&str>) -> Result<()> {
    let config = load_config(paths)?;
    let controller = open_controller(paths, &config)?;

    match output {
        Some("-") => {
            println!("{}", controller.export_summary());
        }
        Some(path) => {
            let path = Path::new(path);
            crate::export::SummaryRenderer::export_to_file(&controller.export_summary(), path)?;
            println!("✓ Exported checklist to {}", path.display());
        }
        None => {
            let path = controller.export_to_dir(&paths.export_dir(&config))?;
            println!("✓ Exported checklist to {}", path.display());
        }
    }
    Ok(())
}

pub fn help_guide() {
    print!("{}", GUIDE.to_text());
}

pub fn portal() {
    println!("{}", PORTAL_URL);
}

fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn ensure_initialized(paths: &SanitationPaths) -> Result<()> {
    if !paths.is_initialized() {
        bail!("Sanitation not initialized. Run `sanitation init` first.");
    }
    Ok(())
}
