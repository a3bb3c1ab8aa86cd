use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, ops::Deref, slice::Iter as SliceIter, vec::IntoIter as VecIntoIter};
use strum::EnumIs;
use time::Date;

pub const HOLIDAY_TITLE: &str = "Holiday";
pub const HOLIDAY_CLASS_NAME: &str = "holiday";
pub const HOLIDAY_COLOR: &str = "rgb(52, 211, 153)";
pub const HOLIDAY_TEXT_COLOR: &str = "#18181B";

/// A day marked as taken, along with the styling the calendar draws it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEntry {
    #[serde(with = "crate::serializers::calendar_day")]
    pub start: Date,
    #[serde(
        default,
        with = "crate::serializers::calendar_day::option",
        skip_serializing_if = "std::option::Option::is_none"
    )]
    pub end: Option<Date>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub text_color: String,
    #[serde(default)]
    pub border_color: String,
}

impl HolidayEntry {
    /// A whole-day holiday marker with the fixed holiday styling.
    pub fn holiday(date: Date) -> Self {
        Self {
            start: date,
            end: Some(date),
            title: String::from(HOLIDAY_TITLE),
            id: String::new(),
            group_id: String::new(),
            all_day: true,
            class_name: String::from(HOLIDAY_CLASS_NAME),
            background_color: String::from(HOLIDAY_COLOR),
            text_color: String::from(HOLIDAY_TEXT_COLOR),
            border_color: String::from(HOLIDAY_COLOR),
        }
    }

    #[inline]
    pub fn date(&self) -> Date {
        self.start
    }
}

/// What a call to [`HolidaySet::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIs)]
pub enum Toggle {
    Added,
    Removed,
}

/// The days taken, in the order they were marked. There is never more than one entry per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HolidayEntry>", into = "Vec<HolidayEntry>")]
pub struct HolidaySet(Vec<HolidayEntry>);

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the entry for `date` if there is one, otherwise appends a new holiday for it.
    pub fn toggle(&mut self, date: Date) -> Toggle {
        if let Some(index) = self.position(date) {
            self.0.remove(index);
            debug!("Unmarked {date}.");
            Toggle::Removed
        } else {
            self.0.push(HolidayEntry::holiday(date));
            debug!("Marked {date}.");
            Toggle::Added
        }
    }

    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        self.position(date).is_some()
    }

    #[inline]
    fn position(&self, date: Date) -> Option<usize> {
        self.0.iter().position(|e| e.date() == date)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The marked days, sorted.
    pub fn dates(&self) -> BTreeSet<Date> {
        self.0.iter().map(HolidayEntry::date).collect()
    }

    /// Marked days falling in the given year.
    pub fn in_year(&self, year: i32) -> impl Iterator<Item = &HolidayEntry> {
        self.0.iter().filter(move |e| e.date().year() == year)
    }
}

impl From<Vec<HolidayEntry>> for HolidaySet {
    fn from(entries: Vec<HolidayEntry>) -> Self {
        let total = entries.len();
        let mut seen = BTreeSet::new();
        let deduped: Vec<_> = entries
            .into_iter()
            .filter(|e| seen.insert(e.date()))
            .collect();
        if deduped.len() != total {
            warn!(
                "Dropped {} duplicated holiday(s) while loading.",
                total - deduped.len()
            );
        }
        Self(deduped)
    }
}

impl From<HolidaySet> for Vec<HolidayEntry> {
    #[inline]
    fn from(value: HolidaySet) -> Self {
        value.0
    }
}

impl FromIterator<Date> for HolidaySet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Date>,
    {
        iter.into_iter().map(HolidayEntry::holiday).collect::<Vec<_>>().into()
    }
}

impl<'a> IntoIterator for &'a HolidaySet {
    type Item = &'a HolidayEntry;
    type IntoIter = SliceIter<'a, HolidayEntry>;

    fn into_iter(self) -> SliceIter<'a, HolidayEntry> {
        self.0.iter()
    }
}

impl IntoIterator for HolidaySet {
    type Item = HolidayEntry;
    type IntoIter = VecIntoIter<HolidayEntry>;

    fn into_iter(self) -> VecIntoIter<HolidayEntry> {
        self.0.into_iter()
    }
}

impl AsRef<[HolidayEntry]> for HolidaySet {
    fn as_ref(&self) -> &[HolidayEntry] {
        &self.0
    }
}

// Read-only on purpose: mutation goes through `toggle` so the one-entry-per-day rule holds.
impl Deref for HolidaySet {
    type Target = [HolidayEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::date;

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = HolidaySet::new();
        assert!(set.toggle(date!(2026 - 08 - 10)).is_added());
        assert!(set.contains(date!(2026 - 08 - 10)));
        assert_eq!(set.len(), 1);
        assert!(set.toggle(date!(2026 - 08 - 10)).is_removed());
        assert!(!set.contains(date!(2026 - 08 - 10)));
        assert!(set.is_empty());
    }

    #[test]
    fn toggle_pair_restores_membership() {
        let days = [
            date!(2025 - 12 - 31),
            date!(2026 - 01 - 01),
            date!(2026 - 02 - 28),
            date!(1999 - 07 - 04),
        ];
        let mut set: HolidaySet = days[..2].iter().copied().collect();
        for day in days {
            let before = set.dates();
            set.toggle(day);
            set.toggle(day);
            assert_eq!(set.dates(), before, "toggling {day} twice");
        }
    }

    #[test]
    fn removal_keeps_the_order_of_the_rest() {
        let mut set: HolidaySet = [
            date!(2026 - 05 - 04),
            date!(2026 - 05 - 01),
            date!(2026 - 05 - 06),
        ]
        .into_iter()
        .collect();
        set.toggle(date!(2026 - 05 - 01));
        let remaining: Vec<_> = set.iter().map(HolidayEntry::date).collect();
        assert_eq!(remaining, vec![date!(2026 - 05 - 04), date!(2026 - 05 - 06)]);
    }

    #[test]
    fn new_entries_carry_the_holiday_styling() {
        let entry = HolidayEntry::holiday(date!(2026 - 10 - 16));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "start": "2026-10-16",
                "end": "2026-10-16",
                "title": "Holiday",
                "id": "",
                "groupId": "",
                "allDay": true,
                "className": "holiday",
                "backgroundColor": "rgb(52, 211, 153)",
                "textColor": "#18181B",
                "borderColor": "rgb(52, 211, 153)",
            })
        );
    }

    #[test]
    fn loading_collapses_duplicate_days() {
        let set: HolidaySet = serde_json::from_str(
            r#"[{"start":"2026-03-02","title":"first"},{"start":"2026-03-03"},{"start":"2026-03-02","title":"second"}]"#,
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].title, "first");
    }

    #[test]
    fn in_year_filters_by_calendar_year() {
        let set: HolidaySet = [date!(2025 - 12 - 31), date!(2026 - 01 - 02)]
            .into_iter()
            .collect();
        let dates: Vec<_> = set.in_year(2026).map(HolidayEntry::date).collect();
        assert_eq!(dates, vec![date!(2026 - 01 - 02)]);
    }
}
