//! Serde adapters rendering byte strings as standard base64 in
//! human-readable formats (JSON reports, suggested-params files) and as raw
//! bytes otherwise.

use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    } else {
        serializer.serialize_bytes(bytes)
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    if deserializer.is_human_readable() {
        let s = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(s.as_bytes())
            .map_err(serde::de::Error::custom)
    } else {
        <Vec<u8>>::deserialize(deserializer)
    }
}

/// The same adapter applied element-wise to a list of byte strings.
pub mod list {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let human_readable = serializer.is_human_readable();
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            if human_readable {
                seq.serialize_element(&BASE64_STANDARD.encode(item))?;
            } else {
                seq.serialize_element(item)?;
            }
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error> {
        if !deserializer.is_human_readable() {
            return <Vec<Vec<u8>>>::deserialize(deserializer);
        }
        let items = <Vec<String>>::deserialize(deserializer)?;
        items
            .iter()
            .map(|s| BASE64_STANDARD.decode(s.as_bytes()))
            .collect::<Result<_, _>>()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        one: Vec<u8>,
        #[serde(with = "super::list")]
        many: Vec<Vec<u8>>,
    }

    #[test]
    fn json_uses_base64() {
        let w = Wrapper {
            one: b"hello".to_vec(),
            many: vec![vec![1, 2, 3], Vec::new()],
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"one":"aGVsbG8=","many":["AQID",""]}"#);
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn invalid_base64_rejected() {
        let err = serde_json::from_str::<Wrapper>(r#"{"one":"***","many":[]}"#);
        assert!(err.is_err());
    }
}
