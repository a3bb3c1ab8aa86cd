//! (De)serializes a [`Date`] as an ISO calendar date, accepting RFC 3339 timestamps on input.
use crate::util::{iso_date, parse_calendar_day};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use time::Date;

pub fn serialize<S>(value: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&iso_date(*value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_day(&raw)
        .map_err(|e| D::Error::custom(format!("invalid calendar day `{raw}`: {e}")))
}

pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => super::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                parse_calendar_day(&raw)
                    .map_err(|e| D::Error::custom(format!("invalid calendar day `{raw}`: {e}")))
            })
            .transpose()
    }
}
