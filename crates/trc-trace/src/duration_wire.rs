//! Wire format for durations: `humantime` strings (`"150ms"`, `"1.2s"`) on
//! the way out, either a human string or a bare integer of nanoseconds on
//! the way in (§6).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

#[derive(Deserialize)]
#[serde(untagged)]
enum DurationRepr {
    Nanos(u64),
    Human(String),
}

pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&humantime::format_duration(*d).to_string())
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    match DurationRepr::deserialize(d)? {
        DurationRepr::Nanos(n) => Ok(Duration::from_nanos(n)),
        DurationRepr::Human(s) => {
            humantime::parse_duration(&s).map_err(serde::de::Error::custom)
        }
    }
}

pub mod vec {
    use super::{DurationRepr, Duration};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(ds: &[Duration], s: S) -> Result<S::Ok, S::Error> {
        let strings: Vec<String> = ds
            .iter()
            .map(|d| humantime::format_duration(*d).to_string())
            .collect();
        strings.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Duration>, D::Error> {
        let reprs = Vec::<DurationRepr>::deserialize(d)?;
        reprs
            .into_iter()
            .map(|repr| match repr {
                DurationRepr::Nanos(n) => Ok(Duration::from_nanos(n)),
                DurationRepr::Human(s) => {
                    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
                }
            })
            .collect()
    }
}

pub mod option {
    use super::{DurationRepr, Duration};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&humantime::format_duration(*d).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let repr = Option::<DurationRepr>::deserialize(d)?;
        match repr {
            None => Ok(None),
            Some(DurationRepr::Nanos(n)) => Ok(Some(Duration::from_nanos(n))),
            Some(DurationRepr::Human(s)) => humantime::parse_duration(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Wrapper(#[serde(with = "crate::duration_wire")] Duration);

    #[test]
    fn round_trips_human_string() {
        let w = Wrapper(Duration::from_millis(150));
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, "\"150ms\"");
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.0, Duration::from_millis(150));
    }

    #[test]
    fn accepts_integer_nanoseconds() {
        let back: Wrapper = serde_json::from_str("1000000").unwrap();
        assert_eq!(back.0, Duration::from_millis(1));
    }
}
