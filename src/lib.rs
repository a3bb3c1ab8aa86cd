#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use camino::Utf8PathBuf;
use std::path::PathBuf;

pub mod balance;
pub use balance::Balance;
pub mod calendar;
pub use calendar::{CalendarEvents, CalendarSource, ViewConfig, ViewMode};
pub mod commands;
pub use commands::Cli;
pub mod config;
pub use config::Config;
pub(crate) mod error;
pub use error::{Error, PathedJsonError, PlannerError, Result};
pub mod holiday;
pub use holiday::{HolidayEntry, HolidaySet, Toggle};
pub mod planner;
pub use planner::{Confirmation, Planner};
pub(crate) mod serializers;
pub mod settings;
pub use settings::{Settings, SettingsBuilder, SettingsField};
pub mod snapshot;
pub use snapshot::{ImportOutcome, Snapshot};
pub mod storage;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub mod util;

const APP_NAME: &str = "holiday-planner";

fn utf8_dir(dir: Option<PathBuf>) -> Utf8PathBuf {
    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    Utf8PathBuf::from_path_buf(dir)
        .unwrap_or_else(|p| Utf8PathBuf::from(p.to_string_lossy().into_owned()))
}

lazy_static! {
    pub static ref CONFIG_FILE_PATH: Utf8PathBuf = {
        let mut path = utf8_dir(dirs::config_dir());
        path.push(format!("{APP_NAME}.yaml"));
        path
    };
    pub static ref STORAGE_DIR: Utf8PathBuf = {
        let mut path = utf8_dir(dirs::data_dir());
        path.push(APP_NAME);
        path
    };
    pub static ref EXPORT_DIR: Utf8PathBuf = utf8_dir(dirs::download_dir());
}
