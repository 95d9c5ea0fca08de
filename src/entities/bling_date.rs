//! Serde field helpers for the calendar dates Bling sends.
//!
//! Bling writes an unset date as `"0000-00-00"` (sometimes followed by a
//! time), and date-time fields share the `YYYY-MM-DD` prefix. Use with
//! `#[serde(default, with = "crate::entities::bling_date")]` on an `Option<NaiveDate>`.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y-%m-%d";
const UNSET: &str = "0000-00-00";

#[allow(clippy::ref_option)]
pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => serializer.collect_str(&date.format(FORMAT)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let day = text.get(..UNSET.len()).unwrap_or(&text);
    if day.is_empty() || day == UNSET {
        return Ok(None);
    }
    NaiveDate::parse_from_str(day, FORMAT)
        .map(Some)
        .map_err(de::Error::custom)
}
