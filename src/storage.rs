use crate::{Error, HolidaySet, Result, Settings};
use camino::Utf8PathBuf;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::HashMap,
    fs::{self, DirBuilder, OpenOptions},
    io::Write,
};

/// Key the marked days are stored under.
pub const HOLIDAYS_KEY: &str = "settedHolidays";
/// Key the settings are stored under.
pub const SETTINGS_KEY: &str = "settings";

/// A tiny string-to-string store that survives between runs.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keeps every key in its own `<key>.json` file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: Utf8PathBuf,
}

impl FileStore {
    pub fn new<P: Into<Utf8PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Utf8PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if path.exists() {
            debug!("Reading {path}.");
            Ok(Some(fs::read_to_string(&path)?))
        } else {
            Ok(None)
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        DirBuilder::new().recursive(true).create(&self.dir)?;
        let path = self.path_for(key);
        debug!("Writing {path}.");
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&path)?;
        file.write_all(value.as_bytes())?;
        Ok(())
    }
}

/// A store that forgets everything once dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(HashMap<String, String>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.insert(String::from(key), String::from(value));
        Ok(())
    }
}

fn read_value<S, V>(store: &S, key: &str) -> Result<Option<V>>
where
    S: KeyValueStore + ?Sized,
    V: DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => {
            let deserializer = &mut serde_json::Deserializer::from_str(&raw);
            serde_path_to_error::deserialize(deserializer)
                .map(Some)
                .map_err(|e| Error::corrupt_storage(key, e))
        }
        None => Ok(None),
    }
}

fn write_value<S, V>(store: &mut S, key: &str, value: &V) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    V: Serialize,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Reads the stored settings, or empty ones if nothing was saved yet.
pub fn load_settings<S: KeyValueStore + ?Sized>(store: &S) -> Result<Settings> {
    Ok(read_value(store, SETTINGS_KEY)?.unwrap_or_default())
}

/// Reads the stored holidays, or none if nothing was saved yet.
pub fn load_holidays<S: KeyValueStore + ?Sized>(store: &S) -> Result<HolidaySet> {
    Ok(read_value(store, HOLIDAYS_KEY)?.unwrap_or_default())
}

/// Overwrites both stored values.
pub fn save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    settings: &Settings,
    holidays: &HolidaySet,
) -> Result<()> {
    write_value(store, HOLIDAYS_KEY, holidays)?;
    write_value(store, SETTINGS_KEY, settings)?;
    info!("Saved settings and {} holiday(s) locally.", holidays.len());
    Ok(())
}
