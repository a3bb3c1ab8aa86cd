use super::{CalendarSource, ViewMode};
use crate::Result;
use cli_table::{Cell, CellStruct, Table};
use std::collections::BTreeSet;
use time::{Date, Month, Weekday};

const DAY_NAMES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const CELL_WIDTH: usize = 3;
const BLANK_CELL: &str = "   ";
pub const MARKER: char = '*';

#[inline]
fn is_weekend_column(column: usize) -> bool {
    column >= Weekday::Saturday.number_days_from_monday() as usize
}

/// Draws one month as a grid of weeks starting on Monday. Marked days get a trailing `*`.
pub fn month_grid(
    year: i32,
    month: Month,
    marked: &BTreeSet<Date>,
    weekends: bool,
) -> Result<String> {
    let first = Date::from_calendar_date(year, month, 1)?;
    let mut slots: Vec<Option<Date>> =
        vec![None; first.weekday().number_days_from_monday() as usize];
    let mut day = Some(first);
    while let Some(current) = day.filter(|d| d.month() == month) {
        slots.push(Some(current));
        day = current.next_day();
    }
    while slots.len() % DAY_NAMES.len() != 0 {
        slots.push(None);
    }

    let columns: Vec<usize> = (0..DAY_NAMES.len())
        .filter(|c| weekends || !is_weekend_column(*c))
        .collect();
    let width = columns.len() * (CELL_WIDTH + 1) - 1;

    let mut lines = vec![format!("{:^width$}", format!("{month} {year}"))];
    lines.push(
        columns
            .iter()
            .map(|c| format!("{:<CELL_WIDTH$}", DAY_NAMES[*c]))
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string(),
    );
    for week in slots.chunks(DAY_NAMES.len()) {
        let visible: Vec<_> = columns.iter().map(|c| week[*c]).collect();
        if visible.iter().all(Option::is_none) {
            continue;
        }
        let row = visible
            .into_iter()
            .map(|slot| match slot {
                Some(date) => {
                    let marker = if marked.contains(&date) { MARKER } else { ' ' };
                    format!("{:>2}{marker}", date.day())
                }
                None => String::from(BLANK_CELL),
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(row.trim_end().to_string());
    }
    Ok(lines.join("\n"))
}

/// Draws the plan the way `source` wants it drawn. The year view shows the year of `anchor`,
/// the month view the month of `anchor`.
pub fn render<C>(source: &C, display_width: u16, anchor: Date) -> Result<String>
where
    C: CalendarSource + ?Sized,
{
    let config = source.view_config(display_width);
    let marked: BTreeSet<Date> = source.markers().iter().map(|m| m.date()).collect();
    let mut out = match config.initial_view {
        ViewMode::DayGridMonth => {
            month_grid(anchor.year(), anchor.month(), &marked, config.weekends)?
        }
        ViewMode::MultiMonthYear => {
            let mut grids = Vec::with_capacity(12);
            let mut month = Month::January;
            for _ in 0..12 {
                grids.push(month_grid(anchor.year(), month, &marked, config.weekends)?);
                month = month.next();
            }
            let per_row = config.multi_month_max_columns.get();
            let rows: Vec<Vec<CellStruct>> = grids
                .chunks(per_row)
                .map(|chunk| {
                    let mut row: Vec<CellStruct> = chunk.iter().map(|g| g.cell()).collect();
                    row.resize_with(per_row, || "".cell());
                    row
                })
                .collect();
            rows.table().display()?.to_string()
        }
    };
    out.push_str(&format!("\n{MARKER} holiday taken"));
    Ok(out)
}
