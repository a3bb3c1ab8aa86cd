use crate::holiday::{HolidayEntry, Toggle};
use serde::Serialize;
use std::num::NonZeroUsize;
use strum::{Display, EnumIs};
use time::Date;

mod render;
pub use render::*;

pub const DEFAULT_WIDE_DISPLAY_COLUMNS: u16 = 120;
pub const DEFAULT_MULTI_MONTH_MAX_COLUMNS: NonZeroUsize = NonZeroUsize::new(4).unwrap();
pub const CONTENT_HEIGHT: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumIs)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ViewMode {
    /// Every month of the year, several per row.
    MultiMonthYear,
    /// A single month.
    DayGridMonth,
}

impl ViewMode {
    /// Wide displays get the whole year, anything narrower a single month.
    pub fn for_width(display_width: u16, wide_threshold: u16) -> Self {
        if display_width >= wide_threshold {
            Self::MultiMonthYear
        } else {
            Self::DayGridMonth
        }
    }
}

/// How a calendar should draw itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    pub initial_view: ViewMode,
    pub multi_month_max_columns: NonZeroUsize,
    pub weekends: bool,
    pub selectable: bool,
    pub content_height: u32,
}

/// Notifications a calendar sends back when the user clicks on it.
pub trait CalendarEvents {
    /// A day cell was clicked.
    fn date_clicked(&mut self, date: Date) -> Toggle;

    /// A marker was clicked. Markers without a start date are ignored.
    fn event_clicked(&mut self, start: Option<Date>) -> Option<Toggle>;
}

/// What a calendar needs in order to draw the plan.
pub trait CalendarSource {
    fn view_config(&self, display_width: u16) -> ViewConfig;

    fn markers(&self) -> &[HolidayEntry];
}
