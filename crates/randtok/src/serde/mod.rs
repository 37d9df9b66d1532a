use crate::Pool;
use core::fmt;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

impl Serialize for Pool {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pool {
    /// Reads a pool from a string and validates it like [`Pool::new`].
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PoolVisitor;

        impl Visitor<'_> for PoolVisitor {
            type Value = Pool;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string of at least two symbols")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Pool::new(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(PoolVisitor)
    }
}

/// Serializes a [`BigUint`] token as its decimal string.
///
/// Integer tokens easily exceed what JSON numbers can carry, so use this with
/// `#[serde(with = "randtok::as_decimal_string")]` to keep them lossless.
///
/// [`BigUint`]: crate::BigUint
pub mod as_decimal_string {
    use super::*;
    use crate::BigUint;

    pub fn serialize<S>(n: &BigUint, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(n)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl Visitor<'_> for DecimalVisitor {
            type Value = BigUint;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string of decimal digits")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(de::Error::invalid_value(de::Unexpected::Str(v), &self));
                }
                BigUint::parse_bytes(v.as_bytes(), 10)
                    .ok_or_else(|| de::Error::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        d.deserialize_str(DecimalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BigUint, CharacterPool};
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Config {
        pool: Pool,
        #[serde(with = "as_decimal_string")]
        seed: BigUint,
    }

    #[test]
    fn pool_roundtrip() {
        let config = Config {
            pool: Pool::new("89ab").unwrap(),
            seed: BigUint::from(10_u32).pow(40),
        };

        let value = serde_json::to_value(&config).expect("serialize");
        assert_eq!(
            value,
            json!({ "pool": "89ab", "seed": "10000000000000000000000000000000000000000" })
        );
        let back: Config = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, config);
        assert_eq!(back.pool.characters(), &['8', '9', 'a', 'b']);
    }

    #[test]
    fn pool_keeps_multibyte_symbols() {
        let pool = Pool::new("αβγ").unwrap();
        let json = serde_json::to_string(&pool).expect("serialize");
        assert_eq!(json, r#""αβγ""#);
        assert_eq!(serde_json::from_str::<Pool>(&json).expect("deserialize"), pool);
    }

    #[test]
    fn rejects_invalid_pool() {
        let err = serde_json::from_str::<Pool>(r#""x""#).unwrap_err();
        assert!(err.to_string().contains("pool has 1 symbol(s), at least 2 required"));
        assert!(serde_json::from_str::<Pool>("42").is_err());
    }

    #[test]
    fn rejects_non_decimal_seed() {
        for bad in [r#""""#, r#""12a""#, r#""-1""#, r#""+5""#] {
            let json = format!(r#"{{"pool":"ab","seed":{bad}}}"#);
            assert!(serde_json::from_str::<Config>(&json).is_err(), "{bad}");
        }
    }
}
