use crate::{Config, FileStore, HolidaySet, Result, storage::load_holidays};
use clap_complete::CompletionCandidate;
use std::{collections::BTreeMap, ffi::OsStr};

/// Orders candidates as exact match, then prefix matches, then anything containing `current`.
fn filter_candidates<I>(current: &OsStr, all_candidates: I) -> Vec<CompletionCandidate>
where
    I: IntoIterator<Item = (String, String)>,
{
    let current = current.to_string_lossy();
    let mut exact = None;
    let mut starts_with = BTreeMap::new();
    let mut contains = BTreeMap::new();
    for (value, help) in all_candidates {
        if value == current {
            exact = Some((value, help));
        } else if value.starts_with(current.as_ref()) {
            starts_with.insert(value, help);
        } else if value.contains(current.as_ref()) {
            contains.insert(value, help);
        }
    }
    exact
        .into_iter()
        .chain(starts_with)
        .chain(contains)
        .enumerate()
        .map(|(order, (value, help))| {
            CompletionCandidate::new(value)
                .display_order(Some(order))
                .help(Some(help.into()))
        })
        .collect()
}

fn saved_holidays() -> Result<HolidaySet> {
    let config = Config::load()?;
    load_holidays(&FileStore::new(config.storage_dir().clone()))
}

/// Years that have at least one saved holiday, with how many days each.
pub(crate) fn planned_years(current: &OsStr) -> Vec<CompletionCandidate> {
    let holidays = match saved_holidays() {
        Ok(holidays) => holidays,
        Err(e) => {
            debug!("No completions, the saved plan could not be read: {e}");
            return Vec::new();
        }
    };
    let mut years = BTreeMap::new();
    for date in holidays.dates() {
        *years.entry(date.year()).or_insert(0usize) += 1;
    }
    filter_candidates(
        current,
        years
            .into_iter()
            .map(|(year, days)| (year.to_string(), format!("{days} day(s) planned"))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(candidates: Vec<CompletionCandidate>) -> Vec<String> {
        candidates
            .into_iter()
            .map(|c| c.get_value().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn exact_match_comes_first() {
        let all = ["2027", "2026", "2025"]
            .into_iter()
            .map(|y| (y.to_string(), String::new()));
        assert_eq!(
            values(filter_candidates(OsStr::new("2026"), all)),
            vec!["2026"]
        );
    }

    #[test]
    fn prefix_matches_come_before_other_matches() {
        let all = ["2120", "2026", "2025", "1999"]
            .into_iter()
            .map(|y| (y.to_string(), String::new()));
        assert_eq!(
            values(filter_candidates(OsStr::new("20"), all)),
            vec!["2025", "2026", "2120"]
        );
    }
}
