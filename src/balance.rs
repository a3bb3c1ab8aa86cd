use crate::settings::Settings;
use serde::Serialize;
use std::{fmt, num::NonZeroU32};

pub const DEFAULT_HOURS_PER_DAY: NonZeroU32 = NonZeroU32::new(8).unwrap();

/// What is left of the allowance: whole days plus the hours that don't add up to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Balance {
    pub days: i64,
    pub hours: u32,
}

impl Balance {
    /// Uses the usual 8-hour working day.
    #[inline]
    pub fn compute(settings: &Settings, days_taken: usize) -> Self {
        Self::with_workday(settings, days_taken, DEFAULT_HOURS_PER_DAY)
    }

    /// Empty fields count as zero. `days` goes negative once more days are taken than allowed.
    pub fn with_workday(settings: &Settings, days_taken: usize, hours_per_day: NonZeroU32) -> Self {
        let allowance = i64::from(settings.holiday_allowance().unwrap_or(0))
            + i64::from(settings.previous_holiday_allowance().unwrap_or(0));
        let leftover_hours = settings.leftover_hours_budget().unwrap_or(0);
        let taken = i64::try_from(days_taken).unwrap_or(i64::MAX);
        Self {
            days: allowance + i64::from(leftover_hours / hours_per_day.get()) - taken,
            hours: leftover_hours % hours_per_day.get(),
        }
    }

    #[inline]
    pub fn is_overdrawn(&self) -> bool {
        self.days < 0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day(s) and {} hour(s)", self.days, self.hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsBuilder;
    use pretty_assertions::assert_eq;

    fn settings(holiday: u32, previous: u32, leftover_hours: u32) -> Settings {
        SettingsBuilder::default()
            .name("Ada")
            .holiday_allowance(holiday)
            .previous_holiday_allowance(previous)
            .leftover_hours_budget(leftover_hours)
            .build()
            .unwrap()
    }

    #[test]
    fn twenty_plus_two_plus_sixteen_hours_minus_five() {
        let balance = Balance::compute(&settings(20, 2, 16), 5);
        assert_eq!(balance, Balance { days: 19, hours: 0 });
    }

    #[test]
    fn leftover_hours_are_the_remainder() {
        for hours in 0..50 {
            let balance = Balance::compute(&settings(0, 0, hours), 0);
            assert_eq!(balance.hours, hours % 8);
            assert_eq!(balance.days, i64::from(hours / 8));
        }
    }

    #[test]
    fn days_never_increase_as_more_are_taken() {
        let settings = settings(25, 3, 13);
        let mut previous = Balance::compute(&settings, 0).days;
        for taken in 1..40 {
            let days = Balance::compute(&settings, taken).days;
            assert!(days <= previous);
            previous = days;
        }
        assert!(Balance::compute(&settings, 40).is_overdrawn());
    }

    #[test]
    fn empty_fields_count_as_zero() {
        let balance = Balance::compute(&Settings::default(), 3);
        assert_eq!(balance, Balance { days: -3, hours: 0 });
    }

    #[test]
    fn custom_workday_length() {
        let six = NonZeroU32::new(6).unwrap();
        let balance = Balance::with_workday(&settings(10, 0, 20), 2, six);
        assert_eq!(balance, Balance { days: 11, hours: 2 });
        assert_eq!(balance.to_string(), "11 day(s) and 2 hour(s)");
    }
}
