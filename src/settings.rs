use crate::{Error, Result};
use derive_builder::Builder;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIs};

/// The fields a user has to fill in before a snapshot can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIs)]
pub enum SettingsField {
    #[strum(serialize = "name")]
    Name,
    #[strum(serialize = "holiday allowance")]
    HolidayAllowance,
    #[strum(serialize = "carried-over allowance")]
    PreviousHolidayAllowance,
    #[strum(serialize = "leftover hours")]
    LeftoverHoursBudget,
}

/// The quota inputs of the planner.
///
/// Field names on the wire match what the browser build wrote into local storage, so stored
/// settings and exported files stay readable. Numbers are whole, non-negative values; anything
/// else is refused when deserializing.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder, Getters, CopyGetters,
)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
#[builder(name = "SettingsBuilder", default, setter(into))]
pub struct Settings {
    #[getset(get = "pub")]
    name: String,
    #[serde(rename = "holiday", alias = "holidayAllowance")]
    #[getset(get_copy = "pub")]
    holiday_allowance: Option<u32>,
    #[serde(rename = "previousHoliday", alias = "previousHolidayAllowance")]
    #[getset(get_copy = "pub")]
    previous_holiday_allowance: Option<u32>,
    #[serde(rename = "rou", alias = "leftoverHoursBudget")]
    #[getset(get_copy = "pub")]
    leftover_hours_budget: Option<u32>,
    #[getset(get_copy = "pub")]
    show_weekends: Option<bool>,
}

impl Settings {
    /// Returns every required field that is still empty, in form order.
    pub fn missing_fields(&self) -> Vec<SettingsField> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push(SettingsField::Name);
        }
        if self.holiday_allowance.is_none() {
            missing.push(SettingsField::HolidayAllowance);
        }
        if self.previous_holiday_allowance.is_none() {
            missing.push(SettingsField::PreviousHolidayAllowance);
        }
        if self.leftover_hours_budget.is_none() {
            missing.push(SettingsField::LeftoverHoursBudget);
        }
        missing
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::incomplete_settings(missing))
        }
    }

    /// `null` means the user never touched the toggle, which renders like "hidden".
    #[inline]
    pub fn weekends_visible(&self) -> bool {
        self.show_weekends.unwrap_or(false)
    }

    pub fn set_show_weekends(&mut self, show: Option<bool>) {
        self.show_weekends = show;
    }

    /// Overwrites the fields that were explicitly set on the builder and leaves the rest alone.
    pub fn update(&mut self, other: SettingsBuilder) {
        if let Some(name) = other.name {
            self.name = name;
        }
        if let Some(holiday_allowance) = other.holiday_allowance {
            self.holiday_allowance = holiday_allowance;
        }
        if let Some(previous_holiday_allowance) = other.previous_holiday_allowance {
            self.previous_holiday_allowance = previous_holiday_allowance;
        }
        if let Some(leftover_hours_budget) = other.leftover_hours_budget {
            self.leftover_hours_budget = leftover_hours_budget;
        }
        if let Some(show_weekends) = other.show_weekends {
            self.show_weekends = show_weekends;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> Settings {
        SettingsBuilder::default()
            .name("Ada")
            .holiday_allowance(20u32)
            .previous_holiday_allowance(2u32)
            .leftover_hours_budget(16u32)
            .build()
            .unwrap()
    }

    #[test]
    fn default_settings_are_invalid() {
        let settings = Settings::default();
        assert!(!settings.is_valid());
        assert_eq!(
            settings.missing_fields(),
            vec![
                SettingsField::Name,
                SettingsField::HolidayAllowance,
                SettingsField::PreviousHolidayAllowance,
                SettingsField::LeftoverHoursBudget,
            ]
        );
    }

    #[test]
    fn weekends_flag_is_not_required() {
        let settings = complete();
        assert_eq!(settings.show_weekends(), None);
        assert!(settings.is_valid());
        assert!(settings.validate().is_ok());
        assert!(!settings.weekends_visible());
    }

    #[test]
    fn zero_counts_as_filled_in() {
        let mut settings = complete();
        settings.update(SettingsBuilder::default().leftover_hours_budget(0u32).clone());
        assert!(settings.is_valid());
    }

    #[test]
    fn validate_names_the_missing_fields() {
        let mut settings = complete();
        settings.update(
            SettingsBuilder::default()
                .name("")
                .holiday_allowance(None::<u32>)
                .clone(),
        );
        let error = settings.validate().unwrap_err();
        assert_eq!(
            error.to_string(),
            "settings are incomplete, missing: name, holiday allowance"
        );
    }

    #[test]
    fn update_only_touches_given_fields() {
        let mut settings = complete();
        settings.update(SettingsBuilder::default().show_weekends(true).clone());
        assert_eq!(settings.name(), "Ada");
        assert_eq!(settings.holiday_allowance(), Some(20));
        assert_eq!(settings.show_weekends(), Some(true));
        assert!(settings.weekends_visible());
    }

    #[test]
    fn reads_the_stored_wire_format() {
        let settings: Settings = serde_json::from_str(
            r#"{"name":"Ada","holiday":20,"previousHoliday":2,"rou":16,"showWeekends":null}"#,
        )
        .unwrap();
        assert_eq!(settings, complete());
    }

    #[test]
    fn accepts_long_field_names() {
        let settings: Settings = serde_json::from_str(
            r#"{"name":"Ada","holidayAllowance":20,"previousHolidayAllowance":2,"leftoverHoursBudget":16}"#,
        )
        .unwrap();
        assert_eq!(settings, complete());
    }

    #[test]
    fn writes_the_stored_wire_format() {
        let value = serde_json::to_value(complete()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Ada",
                "holiday": 20,
                "previousHoliday": 2,
                "rou": 16,
                "showWeekends": null,
            })
        );
    }

    #[test]
    fn refuses_negative_hours() {
        let parsed = serde_json::from_str::<Settings>(r#"{"name":"Ada","rou":-4}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn refuses_unknown_fields() {
        let parsed = serde_json::from_str::<Settings>(r#"{"name":"Ada","mood":"sunny"}"#);
        assert!(parsed.is_err());
    }
}
