use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, Same};

/// Integer written as a string, read from either a string or a number.
pub(crate) type StrInt = PickFirst<(DisplayFromStr, Same)>;

pub(crate) fn code_from_str_or_int<'de, D>(de: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeI64 {
        Int(i64),
        Str(String),
    }

    match MaybeI64::deserialize(de)? {
        MaybeI64::Int(value) => Ok(value),
        MaybeI64::Str(value) => value
            .trim()
            .parse::<i64>()
            .map_err(serde::de::Error::custom),
    }
}

/// Nested object that PHP serialises as `[]` when it is empty.
pub(crate) fn object_or_empty<'de, D, T>(de: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::StrInt;
    use serde::{Deserialize, Serialize};
    use serde_with::serde_as;

    #[serde_as]
    #[derive(Debug, Deserialize, Serialize)]
    struct Sample {
        #[serde_as(as = "StrInt")]
        value: i32,
    }

    #[test]
    fn str_int_accepts_string_and_number() {
        let from_str: Sample = serde_json::from_str(r#"{"value":"63"}"#).unwrap();
        let from_num: Sample = serde_json::from_str(r#"{"value":63}"#).unwrap();
        assert_eq!(from_str.value, 63);
        assert_eq!(from_num.value, 63);
        assert!(serde_json::from_str::<Sample>(r#"{"value":"sixty"}"#).is_err());
    }

    #[test]
    fn str_int_writes_strings() {
        let json = serde_json::to_value(Sample { value: 7 }).unwrap();
        assert_eq!(json, serde_json::json!({ "value": "7" }));
    }
}
