//! Serde adapters for server-local `NaiveDateTime` columns.
//!
//! Rows hold local wall-clock time without an offset. On the wire they are
//! RFC 3339 with the server's local offset, e.g. `2025-04-10T09:30:00+05:00`.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

fn to_rfc3339(dt: &NaiveDateTime) -> String {
    // A wall-clock time inside a DST gap has no local instant; read it as UTC.
    let local = Local
        .from_local_datetime(dt)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(dt));
    local.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

fn from_rfc3339(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(raw)?
        .with_timezone(&Local)
        .naive_local())
}

pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_rfc3339(dt))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    from_rfc3339(&raw).map_err(D::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        dt: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => serializer.serialize_some(&to_rfc3339(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| from_rfc3339(&raw).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Stamp {
        #[serde(with = "super")]
        at: NaiveDateTime,
        #[serde(with = "super::option")]
        until: Option<NaiveDateTime>,
    }

    #[test]
    fn writes_local_offset_and_reads_it_back() {
        let at = NaiveDate::from_ymd_opt(2025, 4, 10)
            .unwrap()
            .and_hms_micro_opt(12, 0, 0, 123_456)
            .unwrap();
        let stamp = Stamp { at, until: None };

        let value = serde_json::to_value(&stamp).unwrap();
        let raw = value["at"].as_str().unwrap();
        let parsed = DateTime::parse_from_rfc3339(raw).unwrap();
        assert_eq!(parsed.with_timezone(&Local).naive_local(), at);
        assert!(value["until"].is_null());

        let back: Stamp = serde_json::from_value(value).unwrap();
        assert_eq!(back, stamp);
    }

    #[test]
    fn rejects_offsetless_input() {
        let err = serde_json::from_value::<Stamp>(serde_json::json!({
            "at": "2025-04-10T12:00:00",
            "until": null
        }));
        assert!(err.is_err());
    }
}
