use crate::{
    Config, FileStore, KeyValueStore, Planner, Result,
    util::{parse_calendar_day, today},
};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use clap_complete::{ArgValueCompleter, PathCompleter};
use cli_table::{Cell, Table};
use std::io::{self, Write};
use time::Date;

mod completion;
pub mod files;
pub mod plan;
pub mod settings;
pub mod shell;

pub use files::{ExportCommand, GenerateCommand, ImportCommand};
pub use plan::{CalendarCommand, ListCommand, ToggleCommand};
pub use settings::SettingsCommands;
pub use shell::{Shell, ShellCommand};

#[derive(Debug, Parser)]
#[command(version, author)]
#[command(rename_all = "kebab")]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[arg(short, long, global = true, env = "HOLIDAY_PLANNER_CONFIG")]
    #[arg(add = ArgValueCompleter::new(PathCompleter::file()))]
    /// The configuration file to use.
    config: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let config = match self.config {
            Some(ref path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let store = FileStore::new(config.storage_dir().clone());
        let mut planner = Planner::load(store, config)?;
        let mut stdout = io::stdout();
        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => Shell::new(io::stdin().lock(), stdout).run(&mut planner),
            Commands::Status => print_status(&planner, &mut stdout),
            Commands::List(cmd) => cmd.execute(&mut planner, &mut stdout),
            Commands::Calendar(cmd) => cmd.execute(&mut planner, &mut stdout),
            Commands::Export(cmd) => cmd.execute(&mut planner, &mut stdout),
            // Nothing else will happen in this process, so an import is kept right away.
            Commands::Import(cmd) => {
                ImportCommand { save: true, ..cmd }.execute(&mut planner, &mut stdout)
            }
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::parse()
    }
}

#[derive(Debug, Subcommand)]
#[command(rename_all = "kebab")]
pub enum Commands {
    /// Plan interactively (the default).
    Shell,
    /// Show the settings and what is left of the allowance.
    #[command(alias = "balance")]
    Status,
    /// List the days taken.
    #[command(alias = "ls")]
    List(ListCommand),
    /// Draw the calendar.
    #[command(alias = "cal")]
    Calendar(CalendarCommand),
    /// Export the saved plan to a file.
    Export(ExportCommand),
    /// Import a plan from a file and save it locally.
    Import(ImportCommand),
}

pub trait ExecutableCommand {
    fn execute<S: KeyValueStore>(self, planner: &mut Planner<S>, out: &mut dyn Write)
    -> Result<()>;
}

/// Parses `YYYY-MM-DD`, `today`, `tomorrow` or `yesterday`.
pub(crate) fn parse_date(value: &str) -> core::result::Result<Date, String> {
    let today = today();
    let relative = match value.trim().to_ascii_lowercase().as_str() {
        "today" => Some(Some(today)),
        "tomorrow" => Some(today.next_day()),
        "yesterday" => Some(today.previous_day()),
        _ => None,
    };
    match relative {
        Some(date) => date.ok_or_else(|| format!("`{value}` is out of range")),
        None => parse_calendar_day(value)
            .map_err(|e| format!("`{value}` is not a date (expected YYYY-MM-DD): {e}")),
    }
}

#[inline]
fn or_blank<V: ToString>(value: Option<V>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub(crate) fn print_settings<S: KeyValueStore>(
    planner: &Planner<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let settings = planner.settings();
    let table = vec![
        vec!["Name".cell(), settings.name().cell()],
        vec![
            "Holiday allowance".cell(),
            or_blank(settings.holiday_allowance()).cell(),
        ],
        vec![
            "Carried over".cell(),
            or_blank(settings.previous_holiday_allowance()).cell(),
        ],
        vec![
            "Leftover hours".cell(),
            or_blank(settings.leftover_hours_budget()).cell(),
        ],
        vec![
            "Show weekends".cell(),
            or_blank(settings.show_weekends()).cell(),
        ],
    ]
    .table();
    writeln!(out, "{}", table.display()?)?;
    let missing = settings.missing_fields();
    if !missing.is_empty() {
        let missing: Vec<_> = missing.iter().map(ToString::to_string).collect();
        writeln!(out, "Still missing: {}.", missing.join(", "))?;
    }
    Ok(())
}

pub(crate) fn print_balance<S: KeyValueStore>(
    planner: &Planner<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let balance = planner.balance();
    writeln!(
        out,
        "{} day(s) taken, {balance} left.",
        planner.holidays().len()
    )?;
    if balance.is_overdrawn() {
        writeln!(out, "More days are taken than the allowance covers.")?;
    }
    Ok(())
}

pub(crate) fn print_status<S: KeyValueStore>(
    planner: &Planner<S>,
    out: &mut dyn Write,
) -> Result<()> {
    print_settings(planner, out)?;
    print_balance(planner, out)
}
