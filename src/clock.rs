use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes since midnight for a wall-clock time.
pub fn to_minutes(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Converts a running-clock value back to a wall-clock time. Values outside a
/// single day wrap around midnight so that unusual anchors still produce a time.
pub fn from_minutes(minutes: i64) -> NaiveTime {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    // wrapped is always within 0..1440, so the conversion cannot fail
    NaiveTime::from_hms_opt((wrapped / 60) as u32, (wrapped % 60) as u32, 0)
        .unwrap_or_default()
}

pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter storing an optional time as `"HH:MM"`, or `""` when unset.
pub mod hhmm_opt {
    use super::{format_hhmm, parse_hhmm};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&format_hhmm(*time)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        parse_hhmm(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid HH:MM time '{raw}'")))
    }
}

/// Serde adapter storing a required time as `"HH:MM"`.
pub mod hhmm {
    use super::{format_hhmm, parse_hhmm};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_hhmm(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_hhmm(&raw).ok_or_else(|| D::Error::custom(format!("invalid HH:MM time '{raw}'")))
    }
}
