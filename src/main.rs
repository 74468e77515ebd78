//! sanitation - daily Brand & Sanitation checklist
//!
//! Opens the checklist dashboard by default; subcommands cover the same
//! operations from the shell.

use clap::{Parser, Subcommand};

use sanitation::config::{load_config, SanitationPaths};
use sanitation::{commands, logging, tui};

#[derive(Parser)]
#[command(name = "sanitation")]
#[command(author, version, about = "Brand & Sanitation - a daily facility checklist")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize sanitation (first-time setup)
    Init,

    /// Launch the checklist dashboard (default)
    Tui,

    /// Show overall and per-category progress
    Status {
        /// Print the stored checklist record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every task with its key
    List,

    /// Check or uncheck a task
    Toggle {
        /// Category id (e.g. "lobby") or a full key (e.g. "lobby::3")
        target: String,

        /// Item index within the category
        index: Option<usize>,
    },

    /// Set the "completed by" name
    Name {
        /// Name to record; pass "" to clear
        name: String,
    },

    /// Reset for a new day (press Enter again to confirm)
    Reset {
        /// Confirm without waiting
        #[arg(short, long)]
        yes: bool,
    },

    /// Export the checklist as a text summary
    Export {
        /// Output file path ("-" for stdout); defaults to the exports directory
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show how to use the daily checklist
    HelpGuide,

    /// Print the portal link
    Portal,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = SanitationPaths::new()?;
    let config = load_config(&paths)?;

    let command = cli.command.unwrap_or(Commands::Tui);

    // The dashboard owns the terminal, so its logs go to a file
    let _guard = match command {
        Commands::Tui => Some(logging::init_file(&paths.logs, &config.log_level)?),
        _ => {
            logging::init_stderr(&config.log_level)?;
            None
        }
    };

    match command {
        Commands::Init => {
            commands::init(&paths)?;
        }
        Commands::Tui => {
            let controller = commands::open_controller(&paths, &config)?;
            let mut app = tui::TuiApp::new(controller, paths.export_dir(&config));
            app.run()?;
        }
        Commands::Status { json } => {
            commands::status(&paths, json)?;
        }
        Commands::List => {
            commands::list(&paths)?;
        }
        Commands::Toggle { target, index } => {
            commands::toggle(&paths, &target, index)?;
        }
        Commands::Name { name } => {
            commands::set_name(&paths, &name)?;
        }
        Commands::Reset { yes } => {
            commands::reset(&paths, yes)?;
        }
        Commands::Export { output } => {
            commands::export(&paths, output.as_deref())?;
        }
        Commands::HelpGuide => {
            commands::help_guide();
        }
        Commands::Portal => {
            commands::portal();
        }
    }

    Ok(())
}
