use crate::settings::SettingsField;
use camino::FromPathBufError;
use pastey::paste;
use serde_json::Error as JsonError;
use serde_norway::Error as YamlError;
use snafu::{Backtrace, GenerateImplicitData, Snafu};
use std::io::Error as IoError;
use time::error::ComponentRange as ComponentRangeError;

pub type PathedJsonError = serde_path_to_error::Error<JsonError>;

fn join_fields(fields: &[SettingsField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that belong to the planner itself rather than to the libraries it sits on.
#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum PlannerError {
    #[snafu(display("settings are incomplete, missing: {}", join_fields(missing)))]
    IncompleteSettings { missing: Vec<SettingsField> },
    #[snafu(display("stored value under `{key}` is malformed: {source}"))]
    CorruptStorage { key: String, source: PathedJsonError },
}

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Planner {
        source: PlannerError,
        backtrace: Backtrace,
    },
    Io {
        source: IoError,
        backtrace: Backtrace,
    },
    Json {
        source: JsonError,
        backtrace: Backtrace,
    },
    Yaml {
        source: YamlError,
        backtrace: Backtrace,
    },
    NonUtf8Path {
        source: FromPathBufError,
        backtrace: Backtrace,
    },
    #[snafu(display("{source}"))]
    ComponentRange {
        source: ComponentRangeError,
        backtrace: Backtrace,
    },
}

impl Error {
    pub fn backtrace(&self) -> &Backtrace {
        match self {
            Self::Planner { backtrace, .. }
            | Self::Io { backtrace, .. }
            | Self::Json { backtrace, .. }
            | Self::Yaml { backtrace, .. }
            | Self::NonUtf8Path { backtrace, .. }
            | Self::ComponentRange { backtrace, .. } => backtrace,
        }
    }

    pub fn incomplete_settings(missing: Vec<SettingsField>) -> Self {
        PlannerError::IncompleteSettings { missing }.into()
    }

    pub fn corrupt_storage<S: AsRef<str>>(key: S, source: PathedJsonError) -> Self {
        PlannerError::CorruptStorage {
            key: String::from(key.as_ref()),
            source,
        }
        .into()
    }

    /// Returns the planner-level cause, if this error has one.
    pub fn planner_error(&self) -> Option<&PlannerError> {
        match self {
            Self::Planner { source, .. } => Some(source),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($type:path, $error:ident, $base_error:ident) => {
        impl From<$type> for $base_error {
            fn from(error: $type) -> Self {
                Self::$error {
                    source: error,
                    backtrace: Backtrace::generate(),
                }
            }
        }
    };
    ($type:path, $error:ident) => {
        impl_from! { $type, $error, Error }
    };
    ($name:ident) => {
        paste! {
            impl_from! { [<$name Error>], $name }
        }
    };
}

impl_from! {FromPathBufError, NonUtf8Path}
impl_from! {Io}
impl_from! {Json}
impl_from! {Yaml}
impl_from! {Planner}
impl_from! {ComponentRange}

pub type Result<V> = core::result::Result<V, Error>;
