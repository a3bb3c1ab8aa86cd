use crate::{HolidaySet, PathedJsonError, Result, Settings, util::iso_date};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs::{self, DirBuilder, OpenOptions};
use strum::EnumIs;
use time::Date;

pub const EXPORT_FILE_PREFIX: &str = "holiday-planner-";

/// Everything needed to restore a plan, as written to and read from export files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Snapshot {
    pub settings: Settings,
    pub holiday_taken: HolidaySet,
}

impl Snapshot {
    pub fn new(settings: Settings, holiday_taken: HolidaySet) -> Self {
        Self {
            settings,
            holiday_taken,
        }
    }

    /// Parses a snapshot, reporting where in the document parsing failed.
    pub fn from_json<S: AsRef<str>>(text: S) -> core::result::Result<Self, PathedJsonError> {
        let deserializer = &mut serde_json::Deserializer::from_str(text.as_ref());
        serde_path_to_error::deserialize(deserializer)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes the snapshot into `dir` as `holiday-planner-<date>.json` and returns the file's path.
    pub fn export(&self, dir: &Utf8Path, date: Date) -> Result<Utf8PathBuf> {
        DirBuilder::new().recursive(true).create(dir)?;
        let path = dir.join(export_file_name(date));
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&path)?;
        serde_json::to_writer(file, self)?;
        info!(
            "Exported {} holiday(s) to {path}.",
            self.holiday_taken.len()
        );
        Ok(path)
    }
}

#[inline]
pub fn export_file_name(date: Date) -> String {
    format!("{EXPORT_FILE_PREFIX}{}.json", iso_date(date))
}

/// The result of an import. A rejected import never touches the current plan.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs)]
pub enum ImportOutcome {
    Applied { holidays: usize },
    Rejected { reason: String },
}

impl ImportOutcome {
    pub(crate) fn rejected<S: Into<String>>(reason: S) -> Self {
        let reason = reason.into();
        error!("Could not import snapshot: {reason}");
        Self::Rejected { reason }
    }
}

/// Reads a snapshot file. Every failure is turned into a rejection.
pub fn read_snapshot(path: &Utf8Path) -> core::result::Result<Snapshot, ImportOutcome> {
    let text = fs::read_to_string(path)
        .map_err(|e| ImportOutcome::rejected(format!("could not read {path}: {e}")))?;
    Snapshot::from_json(&text).map_err(|e| ImportOutcome::rejected(format!("{path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsBuilder;
    use pretty_assertions::assert_eq;
    use time::macros::date;

    fn snapshot() -> Snapshot {
        let settings = SettingsBuilder::default()
            .name("Ada")
            .holiday_allowance(20u32)
            .previous_holiday_allowance(2u32)
            .leftover_hours_budget(16u32)
            .show_weekends(false)
            .build()
            .unwrap();
        let holidays = [date!(2026 - 12 - 24), date!(2026 - 12 - 31)]
            .into_iter()
            .collect();
        Snapshot::new(settings, holidays)
    }

    #[test]
    fn file_name_uses_the_iso_date() {
        assert_eq!(
            export_file_name(date!(2026 - 10 - 16)),
            "holiday-planner-2026-10-16.json"
        );
    }

    #[test]
    fn export_then_read_gives_the_same_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        let path = snapshot().export(dir, date!(2026 - 10 - 16)).unwrap();
        assert_eq!(path, dir.join("holiday-planner-2026-10-16.json"));
        assert_eq!(read_snapshot(&path).unwrap(), snapshot());
    }

    #[test]
    fn uses_the_expected_top_level_keys() {
        let value: serde_json::Value = serde_json::from_str(&snapshot().to_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["holidayTaken", "settings"]);
    }

    #[test]
    fn missing_settings_is_an_error() {
        let error = Snapshot::from_json(r#"{"holidayTaken":[]}"#).unwrap_err();
        assert!(error.to_string().contains("settings"));
    }

    #[test]
    fn unknown_keys_are_an_error() {
        let parsed = Snapshot::from_json(r#"{"settings":{},"holidayTaken":[],"extra":1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn reads_files_written_by_the_browser_build() {
        let parsed = Snapshot::from_json(
            r##"{"settings":{"name":"Ada","holiday":20,"previousHoliday":2,"rou":16,"showWeekends":null},
                "holidayTaken":[{"start":"2026-06-01T12:00:00.000Z","end":"2026-06-01T12:00:00.000Z",
                "title":"Holiday","id":"","groupId":"","allDay":true,"className":"holiday",
                "backgroundColor":"rgb(52, 211, 153)","textColor":"#18181B","borderColor":"rgb(52, 211, 153)"}]}"##,
        )
        .unwrap();
        assert_eq!(parsed.holiday_taken.len(), 1);
        assert_eq!(parsed.settings.leftover_hours_budget(), Some(16));
    }

    #[test]
    fn unreadable_files_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(tmp.path()).unwrap().join("nope.json");
        assert!(read_snapshot(&path).unwrap_err().is_rejected());
    }
}
