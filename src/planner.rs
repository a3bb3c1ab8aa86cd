use crate::{
    Balance, Config, HolidayEntry, HolidaySet, Result, Settings, SettingsBuilder, Toggle,
    calendar::{CONTENT_HEIGHT, CalendarEvents, CalendarSource, ViewConfig, ViewMode},
    snapshot::{ImportOutcome, Snapshot, read_snapshot},
    storage::{self, KeyValueStore},
};
use camino::{Utf8Path, Utf8PathBuf};
use strum::{Display, EnumIs};
use time::Date;

/// The user's answer when asked whether to keep the current plan locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIs)]
#[strum(serialize_all = "lowercase")]
pub enum Confirmation {
    Save,
    Decline,
    /// The question was closed without an answer.
    Dismiss,
}

/// The whole application state: the settings form, the marked days and where they are kept.
#[derive(Debug)]
pub struct Planner<S> {
    store: S,
    config: Config,
    settings: Settings,
    holidays: HolidaySet,
}

impl<S: KeyValueStore> Planner<S> {
    /// An empty plan. Nothing is read from `store` until it is saved to.
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            config,
            settings: Settings::default(),
            holidays: HolidaySet::new(),
        }
    }

    /// Restores whatever was last saved to `store`.
    pub fn load(store: S, config: Config) -> Result<Self> {
        let settings = storage::load_settings(&store)?;
        let holidays = storage::load_holidays(&store)?;
        debug!(
            "Loaded {} holiday(s), settings {}.",
            holidays.len(),
            if settings.is_valid() { "complete" } else { "incomplete" }
        );
        Ok(Self {
            store,
            config,
            settings,
            holidays,
        })
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    pub fn update_settings(&mut self, patch: SettingsBuilder) {
        let weekends = self.settings.weekends_visible();
        self.settings.update(patch);
        if weekends != self.settings.weekends_visible() {
            debug!(
                "Weekends are now {}.",
                if self.settings.weekends_visible() { "shown" } else { "hidden" }
            );
        }
    }

    pub fn set_show_weekends(&mut self, show: Option<bool>) {
        self.settings.set_show_weekends(show);
    }

    #[inline]
    pub fn toggle(&mut self, date: Date) -> Toggle {
        self.holidays.toggle(date)
    }

    /// Unmarks every day. Settings are kept.
    pub fn reset(&mut self) {
        self.holidays.clear();
    }

    pub fn balance(&self) -> Balance {
        Balance::with_workday(
            &self.settings,
            self.holidays.len(),
            self.config.hours_per_day(),
        )
    }

    #[inline]
    pub fn can_generate(&self) -> bool {
        self.settings.is_valid()
    }

    pub fn save_locally(&mut self) -> Result<()> {
        storage::save(&mut self.store, &self.settings, &self.holidays)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.settings.clone(), self.holidays.clone())
    }

    #[inline]
    pub fn export(&self, dir: &Utf8Path, date: Date) -> Result<Utf8PathBuf> {
        self.snapshot().export(dir, date)
    }

    /// Saves locally if the user agreed to, then exports no matter what they answered.
    ///
    /// Refused outright while the settings are incomplete.
    pub fn generate(
        &mut self,
        confirmation: Confirmation,
        dir: &Utf8Path,
        date: Date,
    ) -> Result<Utf8PathBuf> {
        self.settings.validate()?;
        if confirmation.is_save() {
            self.save_locally()?;
        } else {
            debug!("Not saving locally ({confirmation}).");
        }
        self.export(dir, date)
    }

    /// Replaces the settings and the marked days with the snapshot's.
    pub fn apply(&mut self, snapshot: Snapshot) -> ImportOutcome {
        let Snapshot {
            settings,
            holiday_taken,
        } = snapshot;
        let holidays = holiday_taken.len();
        self.settings = settings;
        self.holidays = holiday_taken;
        info!("Imported {holidays} holiday(s).");
        ImportOutcome::Applied { holidays }
    }

    /// Imports a snapshot document. Anything that doesn't parse is rejected and changes nothing.
    pub fn import_json<T: AsRef<str>>(&mut self, text: T) -> ImportOutcome {
        match Snapshot::from_json(text) {
            Ok(snapshot) => self.apply(snapshot),
            Err(e) => ImportOutcome::rejected(e.to_string()),
        }
    }

    pub fn import_file(&mut self, path: &Utf8Path) -> ImportOutcome {
        match read_snapshot(path) {
            Ok(snapshot) => self.apply(snapshot),
            Err(rejected) => rejected,
        }
    }
}

impl<S: KeyValueStore> CalendarEvents for Planner<S> {
    fn date_clicked(&mut self, date: Date) -> Toggle {
        self.toggle(date)
    }

    fn event_clicked(&mut self, start: Option<Date>) -> Option<Toggle> {
        start.map(|date| self.toggle(date))
    }
}

impl<S: KeyValueStore> CalendarSource for Planner<S> {
    fn view_config(&self, display_width: u16) -> ViewConfig {
        ViewConfig {
            initial_view: ViewMode::for_width(display_width, self.config.wide_display_columns()),
            multi_month_max_columns: self.config.multi_month_max_columns(),
            weekends: self.settings.weekends_visible(),
            selectable: true,
            content_height: CONTENT_HEIGHT,
        }
    }

    fn markers(&self) -> &[HolidayEntry] {
        &self.holidays
    }
}
