use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes a [`PrefixKey`] as its raw `u128` value.
///
/// [`PrefixKey`]: crate::PrefixKey
pub mod as_u128 {
    use super::*;
    use crate::PrefixKey;

    pub fn serialize<S>(key: &PrefixKey, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        key.to_raw().serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<PrefixKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u128::deserialize(d)?;
        Ok(PrefixKey::from_raw(raw))
    }
}

/// Serializes a [`PrefixKey`] as its 22-character textual form, the
/// representation string-keyed tables store.
///
/// [`PrefixKey`]: crate::PrefixKey
pub mod as_text {
    use super::*;
    use crate::PrefixKey;

    pub fn serialize<S>(key: &PrefixKey, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(key.encode().as_str())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<PrefixKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TextVisitor;

        impl serde::de::Visitor<'_> for TextVisitor {
            type Value = PrefixKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 22-character URL-safe base64 key")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                PrefixKey::decode(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(TextVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::PrefixKey;
    use serde::{Deserialize, Serialize};

    #[test]
    fn u128_roundtrip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "crate::as_u128")]
            id: PrefixKey,
        }
        let row = Row {
            id: PrefixKey::from_raw(42),
        };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"id":42}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn text_roundtrip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "crate::as_text")]
            id: PrefixKey,
        }
        let row = Row {
            id: PrefixKey::from_words(0x0011_2233_4455_6677, 0x8899_AABB_CCDD_EEFF),
        };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"id":"ABEiM0RVZneImaq7zN3u_w"}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn text_decode_errors_surface_through_serde() {
        #[derive(Debug, Deserialize)]
        struct Row {
            #[serde(with = "crate::as_text")]
            #[allow(dead_code)]
            id: PrefixKey,
        }
        let result: Result<Row, _> = serde_json::from_str(r#"{"id":"not a key"}"#);
        assert!(result.is_err());
    }
}
