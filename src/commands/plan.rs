use super::{ExecutableCommand, completion::planned_years, parse_date, print_balance};
use crate::{
    CalendarEvents, KeyValueStore, Planner, Result, calendar::render, util::iso_date,
    util::today,
};
use clap::Args;
use clap_complete::ArgValueCompleter;
use cli_table::{Cell, Table};
use std::io::Write;
use time::{Date, Month};

const DEFAULT_DISPLAY_WIDTH: u16 = 80;

#[derive(Debug, Args)]
pub struct ToggleCommand {
    #[arg(required = true, value_parser = parse_date)]
    /// The day(s) to mark or unmark (YYYY-MM-DD, today, tomorrow or yesterday).
    pub dates: Vec<Date>,
}

impl ExecutableCommand for ToggleCommand {
    fn execute<S: KeyValueStore>(self, planner: &mut Planner<S>, out: &mut dyn Write) -> Result<()> {
        for date in self.dates {
            let toggle = planner.date_clicked(date);
            let verb = if toggle.is_added() { "Marked" } else { "Unmarked" };
            writeln!(out, "{verb} {}.", iso_date(date))?;
        }
        print_balance(planner, out)
    }
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[arg(short, long, add = ArgValueCompleter::new(planned_years))]
    /// Only list days in this year.
    pub year: Option<i32>,
}

impl ExecutableCommand for ListCommand {
    fn execute<S: KeyValueStore>(self, planner: &mut Planner<S>, out: &mut dyn Write) -> Result<()> {
        let mut entries: Vec<_> = match self.year {
            Some(year) => planner.holidays().in_year(year).collect(),
            None => planner.holidays().iter().collect(),
        };
        entries.sort_by_key(|e| e.date());
        let table = if entries.is_empty() {
            vec![vec!["No holidays taken".cell()]].table()
        } else {
            entries
                .into_iter()
                .map(|e| {
                    vec![
                        iso_date(e.date()).cell(),
                        e.date().weekday().cell(),
                        e.title.as_str().cell(),
                    ]
                })
                .collect::<Vec<_>>()
                .table()
        };
        writeln!(out, "{}", table.display()?)?;
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct CalendarCommand {
    #[arg(short, long, add = ArgValueCompleter::new(planned_years))]
    /// The year to draw (defaults to the current one).
    pub year: Option<i32>,
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=12))]
    /// The month to draw when only one month fits (defaults to the current one).
    pub month: Option<u8>,
    #[arg(short, long, env = "COLUMNS")]
    /// How many columns the terminal has; wide terminals get the whole year.
    pub width: Option<u16>,
}

impl CalendarCommand {
    fn anchor(&self) -> Result<Date> {
        let today = today();
        let month = match self.month {
            Some(month) => Month::try_from(month)?,
            None => today.month(),
        };
        Ok(Date::from_calendar_date(
            self.year.unwrap_or(today.year()),
            month,
            1,
        )?)
    }
}

impl ExecutableCommand for CalendarCommand {
    fn execute<S: KeyValueStore>(self, planner: &mut Planner<S>, out: &mut dyn Write) -> Result<()> {
        let anchor = self.anchor()?;
        let width = self.width.unwrap_or(DEFAULT_DISPLAY_WIDTH);
        writeln!(out, "{}", render(&*planner, width, anchor)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, MemoryStore};
    use time::macros::date;

    fn run<C: ExecutableCommand>(cmd: C, planner: &mut Planner<MemoryStore>) -> String {
        let mut out = Vec::new();
        cmd.execute(planner, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn toggle_reports_each_day() {
        let mut planner = Planner::new(MemoryStore::new(), Config::default());
        planner.toggle(date!(2026 - 03 - 02));
        let out = run(
            ToggleCommand {
                dates: vec![date!(2026 - 03 - 02), date!(2026 - 03 - 03)],
            },
            &mut planner,
        );
        assert!(out.contains("Unmarked 2026-03-02."), "{out}");
        assert!(out.contains("Marked 2026-03-03."), "{out}");
        assert!(planner.holidays().contains(date!(2026 - 03 - 03)));
    }

    #[test]
    fn list_is_sorted_and_filtered() {
        let mut planner = Planner::new(MemoryStore::new(), Config::default());
        planner.toggle(date!(2026 - 08 - 10));
        planner.toggle(date!(2025 - 12 - 29));
        planner.toggle(date!(2026 - 01 - 05));
        let out = run(ListCommand { year: Some(2026) }, &mut planner);
        let january = out.find("2026-01-05").unwrap();
        let august = out.find("2026-08-10").unwrap();
        assert!(january < august);
        assert!(!out.contains("2025-12-29"));
        assert!(out.contains("Monday"));
    }

    #[test]
    fn empty_list_says_so() {
        let mut planner = Planner::new(MemoryStore::new(), Config::default());
        let out = run(ListCommand { year: None }, &mut planner);
        assert!(out.contains("No holidays taken"));
    }

    #[test]
    fn calendar_draws_the_requested_month() {
        let mut planner = Planner::new(MemoryStore::new(), Config::default());
        planner.toggle(date!(2026 - 02 - 13));
        let out = run(
            CalendarCommand {
                year: Some(2026),
                month: Some(2),
                width: Some(60),
            },
            &mut planner,
        );
        assert!(out.contains("February 2026"));
        assert!(out.contains("13*"));
    }
}
