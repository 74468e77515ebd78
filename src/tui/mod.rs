//! Terminal UI for the checklist using ratatui
//!
//! One screen: progress card, the checklist grouped by category, and popups
//! for the completed-by name and the help guide.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use chrono::Local;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;

use crate::catalog::total_items;
use crate::controller::{ChecklistController, Clock, ResetOutcome, SystemClock};
use crate::db::KeyValueStore;
use crate::export::long_date;
use crate::help::{GUIDE, PORTAL_URL};

/// A line of the checklist: a category header or one of its items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Category(usize),
    Item { category: usize, index: usize },
}

/// Main TUI application state
pub struct TuiApp<S: KeyValueStore, C: Clock = SystemClock> {
    controller: ChecklistController<S, C>,
    export_dir: PathBuf,
    rows: Vec<Row>,
    list_state: ListState,
    should_quit: bool,
    show_help: bool,
    show_name_popup: bool,
    name_input: String,
    status_message: Option<String>,
}

impl<S: KeyValueStore, C: Clock> TuiApp<S, C> {
    /// Create a new TUI application around a loaded controller
    pub fn new(controller: ChecklistController<S, C>, export_dir: PathBuf) -> Self {
        let rows = build_rows(&controller);
        let mut list_state = ListState::default();
        list_state.select(rows.iter().position(|r| matches!(r, Row::Item { .. })));

        Self {
            controller,
            export_dir,
            rows,
            list_state,
            should_quit: false,
            show_help: false,
            show_name_popup: false,
            name_input: String::new(),
            status_message: None,
        }
    }

    pub fn controller(&self) -> &ChecklistController<S, C> {
        &self.controller
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_app(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    /// Main event loop; the short poll lets an armed reset lapse on screen
    fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key)?;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.show_name_popup {
            match key.code {
                KeyCode::Esc => self.show_name_popup = false,
                KeyCode::Enter => {
                    let name = std::mem::take(&mut self.name_input);
                    self.controller.set_completed_by(name);
                    self.show_name_popup = false;
                    self.status_message = Some("✓ Name saved".to_string());
                }
                KeyCode::Backspace => {
                    self.name_input.pop();
                }
                KeyCode::Char(c) => self.name_input.push(c),
                _ => {}
            }
            return Ok(());
        }

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return Ok(());
        }

        self.status_message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => self.next_item(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_item(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('n') => {
                self.name_input = self.controller.state().completed_by.clone();
                self.show_name_popup = true;
            }
            KeyCode::Char('r') => self.press_reset(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }

        Ok(())
    }

    fn toggle_selected(&mut self) {
        let selected = self.list_state.selected().and_then(|i| self.rows.get(i)).copied();
        if let Some(Row::Item { category, index }) = selected {
            let id = self.controller.catalog()[category].id;
            self.controller.toggle(id, index);
        }
    }

    fn press_reset(&mut self) {
        match self.controller.reset() {
            ResetOutcome::Armed { .. } => {
                self.status_message = Some("Press r again to confirm reset".to_string());
            }
            ResetOutcome::Cleared => {
                self.status_message = Some("✓ Checklist reset for a new day".to_string());
            }
        }
    }

    fn export(&mut self) {
        self.status_message = Some(match self.controller.export_to_dir(&self.export_dir) {
            Ok(path) => format!("✓ Exported to {}", path.display()),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                format!("✗ Export failed: {}", e)
            }
        });
    }

    /// Move to the next item row, wrapping and skipping category headers
    fn next_item(&mut self) {
        self.step(1);
    }

    fn previous_item(&mut self) {
        self.step(self.rows.len().saturating_sub(1));
    }

    fn step(&mut self, by: usize) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let mut i = self.list_state.selected().unwrap_or(0);
        for _ in 0..len {
            i = (i + by) % len;
            if matches!(self.rows[i], Row::Item { .. }) {
                self.list_state.select(Some(i));
                return;
            }
        }
    }

    /// Draw the UI
    pub fn ui(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(6), // Progress
                Constraint::Min(0),    // Checklist
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_progress(f, chunks[1]);
        self.render_checklist(f, chunks[2]);
        self.render_footer(f, chunks[3]);

        if self.show_help {
            self.render_help_popup(f);
        }
        if self.show_name_popup {
            self.render_name_popup(f);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let today = long_date(self.controller.now().with_timezone(&Local).date_naive());
        let line = Line::from(vec![
            Span::styled(
                "Brand & Sanitation",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", today)),
            Span::styled(
                format!("   ← Portal: {}", PORTAL_URL),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn render_progress(&self, f: &mut Frame, area: Rect) {
        let progress = self.controller.progress();
        let state = self.controller.state();
        let color = if progress.is_complete() {
            Color::Green
        } else {
            Color::Blue
        };

        let block = Block::default().borders(Borders::ALL).title(format!(
            "{} of {} tasks complete",
            progress.done, progress.total
        ));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(2)])
            .split(inner);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .percent(progress.percentage.min(100) as u16)
            .label(format!("{}%", progress.percentage));
        f.render_widget(gauge, rows[0]);

        let name = if state.completed_by.is_empty() {
            Span::styled("Enter your name (n)", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(state.completed_by.clone())
        };
        f.render_widget(
            Paragraph::new(Line::from(vec![Span::raw("Completed by: "), name])),
            rows[1],
        );

        let reset = if self.controller.is_reset_armed() {
            Span::styled(
                "[r] Press again to confirm",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("[r] Reset for New Day")
        };
        let last_reset = format!(
            "Last reset: {}   ",
            state.last_reset.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        );
        f.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(last_reset), reset])),
            rows[2],
        );
    }

    fn render_checklist(&mut self, f: &mut Frame, area: Rect) {
        let catalog = self.controller.catalog();
        let state = self.controller.state();

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| match *row {
                Row::Category(c) => {
                    let category = &catalog[c];
                    let progress = state.category_progress(category);
                    let style = if progress.is_complete() {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    ListItem::new(format!(
                        "{}  {}/{}",
                        category.name, progress.done, progress.total
                    ))
                    .style(style)
                }
                Row::Item { category, index } => {
                    let category = &catalog[category];
                    let checked = state.is_checked(category.id, index);
                    let (mark, style) = if checked {
                        (
                            "[x]",
                            Style::default()
                                .fg(Color::DarkGray)
                                .add_modifier(Modifier::CROSSED_OUT),
                        )
                    } else {
                        ("[ ]", Style::default())
                    };
                    ListItem::new(format!("  {} {}", mark, category.items[index])).style(style)
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Checklist"))
            .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let text = match &self.status_message {
            Some(msg) => msg.clone(),
            None => format!(
                "↑/↓: Move  Space: Check  n: Name  r: Reset  e: Export  ?: Help  q: Quit  |  \
                 Auto-saves as you check items. {} daily tasks across {} categories.",
                total_items(self.controller.catalog()),
                self.controller.catalog().len()
            ),
        };
        let footer = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(footer, area);
    }

    fn render_help_popup(&self, f: &mut Frame) {
        let area = centered_rect(70, 80, f.area());
        f.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(Span::styled(
                GUIDE.description,
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                GUIDE.intro_title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(GUIDE.intro),
        ];
        for step in &GUIDE.steps {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                step.title,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                step.subtitle,
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(step.description));
            lines.push(Line::from(Span::styled(
                format!("Tip: {}", step.tip),
                Style::default().fg(Color::Yellow),
            )));
        }

        let help = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} (Esc to close)", GUIDE.title)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(help, area);
    }

    fn render_name_popup(&self, f: &mut Frame) {
        let area = centered_rect(50, 20, f.area());
        f.render_widget(Clear, area);

        let input = Paragraph::new(self.name_input.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Completed by (Enter: Save  Esc: Cancel)"),
            )
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(input, area);
    }
}

fn build_rows<S: KeyValueStore, C: Clock>(controller: &ChecklistController<S, C>) -> Vec<Row> {
    let mut rows = Vec::new();
    for (c, category) in controller.catalog().iter().enumerate() {
        rows.push(Row::Category(c));
        rows.extend((0..category.items.len()).map(|index| Row::Item { category: c, index }));
    }
    rows
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
