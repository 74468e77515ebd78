//! Plain-text export of the checklist
//!
//! Renders the daily summary report and writes it to a dated file.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Category;
use crate::models::ChecklistState;

pub const REPORT_TITLE: &str = "BRAND & SANITATION CHECKLIST";
pub const FILE_PREFIX: &str = "brand-sanitation";
pub const FOOTER: [&str; 2] = [
    "Brand & Sanitation by Total Success AI",
    "Part of The Master's Edge Business Program",
];

/// Long form date, e.g. "Monday, October 19, 2026"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `brand-sanitation-<YYYY-MM-DD>.txt` for the UTC calendar date of `now`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("{}-{}.txt", FILE_PREFIX, now.format("%Y-%m-%d"))
}

pub struct SummaryRenderer;

impl SummaryRenderer {
    /// Render the report; `date` is the calendar date shown in the header
    pub fn render(state: &ChecklistState, catalog: &[Category], date: NaiveDate) -> String {
        let progress = state.progress(catalog);

        let mut lines = vec![
            REPORT_TITLE.to_string(),
            format!("Date: {}", long_date(date)),
            format!("Completed By: {}", state.completed_by_display()),
            format!(
                "Progress: {}/{} ({}%)",
                progress.done, progress.total, progress.percentage
            ),
            "=".repeat(50),
            String::new(),
        ];

        for category in catalog {
            let cat = state.category_progress(category);
            lines.push(format!("{} ({}/{})", category.name, cat.done, cat.total));
            lines.push("-".repeat(40));
            for item in category.entries() {
                let mark = if state.is_checked(item.category_id, item.index) {
                    "X"
                } else {
                    " "
                };
                lines.push(format!("  [{}] {}", mark, item.label));
            }
            lines.push(String::new());
        }

        lines.extend(FOOTER.iter().map(|s| s.to_string()));
        lines.join("\n")
    }

    /// Write a rendered report into `dir`, creating it if needed
    pub fn export_to_dir(content: &str, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
        let path = dir.join(export_filename(now));
        Self::export_to_file(content, &path)?;
        Ok(path)
    }

    pub fn export_to_file(content: &str, path: &Path) -> Result<()> {
        fs::write(path, content)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        tracing::info!(path = %path.display(), "exported checklist summary");
        Ok(())
    }
}
