//! RFC 3339 wire format for `Option<SystemTime>` fields (`CategoryStats`'s
//! `oldest`/`newest`, which are absent until a category has seen a trace).

pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::SystemTime;

    pub fn serialize<S: Serializer>(t: &Option<SystemTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_some(&humantime::format_rfc3339(*t).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<SystemTime>, D::Error> {
        let repr = Option::<String>::deserialize(d)?;
        match repr {
            None => Ok(None),
            Some(s) => humantime::parse_rfc3339(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
