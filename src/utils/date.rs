use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use crate::core::library::{LibraryError, LibraryResult};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn format_date(time: &NaiveDateTime) -> String {
    time.format(DATE_FMT).to_string()
}

// Shifts time by whole days; a count chrono cannot represent is a validation error on field.
pub fn add_days(time: NaiveDateTime, days: i64, field: &str) -> LibraryResult<NaiveDateTime> {
    TimeDelta::try_days(days)
        .and_then(|delta| time.checked_add_signed(delta))
        .ok_or_else(|| LibraryError::validation(
            format!("{} days from {} is out of range", days, format_date(&time)).as_str(),
            Some(field.to_string())))
}

// Accepts ISO-8601 with or without fractional seconds, with an offset, with a space
// separator, or a bare date.
pub fn parse_date(str_time: &str) -> Option<NaiveDateTime> {
    let str_time = str_time.trim();
    if str_time.is_empty() {
        return None;
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(str_time, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(time);
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(str_time) {
        return Some(time.naive_local());
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(str_time, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(time);
    }
    NaiveDate::parse_from_str(str_time, "%Y-%m-%d").ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_date, parse_date};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        format_date(time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        parse_date(&str_time).ok_or_else(|| D::Error::custom(format!("invalid date {:?}", str_time)))
    }
}

// optional_serializer writes a missing date as an empty string and reads empty or null as None.
pub mod optional_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_date, parse_date};

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => format_date(time).serialize(serializer),
            None => "".serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            None => Ok(None),
            Some(str_time) if str_time.trim().is_empty() => Ok(None),
            Some(str_time) => {
                parse_date(&str_time).map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid date {:?}", str_time)))
            }
        }
    }
}
