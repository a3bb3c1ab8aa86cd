use crate::{
    CONFIG_FILE_PATH, EXPORT_DIR, Result, STORAGE_DIR,
    balance::DEFAULT_HOURS_PER_DAY,
    calendar::{DEFAULT_MULTI_MONTH_MAX_COLUMNS, DEFAULT_WIDE_DISPLAY_COLUMNS},
};
use camino::{Utf8Path, Utf8PathBuf};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, DirBuilder, OpenOptions},
    num::{NonZeroU32, NonZeroUsize},
};

/// Runtime options, read from a YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Where settings and holidays are kept between runs.
    #[getset(get = "pub")]
    storage_dir: Utf8PathBuf,
    /// Where exported snapshots are written by default.
    #[getset(get = "pub")]
    export_dir: Utf8PathBuf,
    #[getset(get_copy = "pub")]
    hours_per_day: NonZeroU32,
    /// Terminals at least this wide get the full-year view.
    #[getset(get_copy = "pub")]
    wide_display_columns: u16,
    #[getset(get_copy = "pub")]
    multi_month_max_columns: NonZeroUsize,
}

impl Config {
    pub fn save_to(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            DirBuilder::new().recursive(true).create(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(path)?;
        serde_norway::to_writer(file, self)?;
        Ok(())
    }

    /// Loads the config at `path`, writing out the defaults first if there is none yet.
    pub fn load_from(path: &Utf8Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read(path)?;
            Ok(serde_norway::from_slice(&data)?)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            info!("Wrote default configuration to {path}.");
            Ok(config)
        }
    }

    #[inline]
    pub fn load() -> Result<Self> {
        Self::load_from(&CONFIG_FILE_PATH)
    }

    pub fn with_storage_dir<P: Into<Utf8PathBuf>>(mut self, dir: P) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn with_export_dir<P: Into<Utf8PathBuf>>(mut self, dir: P) -> Self {
        self.export_dir = dir.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: STORAGE_DIR.clone(),
            export_dir: EXPORT_DIR.clone(),
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            wide_display_columns: DEFAULT_WIDE_DISPLAY_COLUMNS,
            multi_month_max_columns: DEFAULT_MULTI_MONTH_MAX_COLUMNS,
        }
    }
}
