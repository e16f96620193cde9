use std::time::Duration;

use humantime::parse_duration;
use serde::Deserialize;
use serde_with::DeserializeAs;

/// Humantime duration in a config file, `10s` or `1m 30s`.
pub(crate) struct HumantimeDuration;

impl<'de> DeserializeAs<'de, Duration> for HumantimeDuration {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_duration(raw.trim()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::Deserialize;
    use serde_with::serde_as;

    use super::HumantimeDuration;

    #[serde_as]
    #[derive(Debug, Deserialize)]
    struct Timeouts {
        #[serde_as(as = "HumantimeDuration")]
        timeout: Duration,
    }

    #[test]
    fn parses_compound_durations() {
        let parsed: Timeouts = serde_json::from_str(r#"{"timeout":"1m 30s"}"#).unwrap();
        assert_eq!(parsed.timeout, Duration::from_secs(90));
    }

    #[test]
    fn rejects_bare_numbers_and_garbage() {
        assert!(serde_json::from_str::<Timeouts>(r#"{"timeout":"soon"}"#).is_err());
        assert!(serde_json::from_str::<Timeouts>(r#"{"timeout":"30"}"#).is_err());
    }
}
