use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use serde_with::serde_as;
use url::Url;

use crate::Result;
use crate::error::ConfigError;
use crate::zbx_client::AuthTransport;

use super::defaults::{default_connect_timeout, default_timeout};
use super::env::{env_bool, env_duration, env_string};
use super::{Auth, Config, HumantimeDuration};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    load_with_env(path, None)
}

/// File first, then `ZABBIX__<SECTION>__<KEY>` variables, so the url is
/// `ZABBIX__ZABBIX__URL`. Values stay strings: an all-digit token keeps its
/// leading zeros and typed members are converted on deserialisation.
fn load_with_env(
    path: impl AsRef<Path>,
    env: Option<::config::Map<String, String>>,
) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("ZABBIX")
            .separator("__")
            .try_parsing(false)
            .source(env),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) zabbix: RawZabbix,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawZabbix {
    pub(super) url: Option<String>,
    pub(super) token: Option<String>,
    pub(super) user: Option<String>,
    pub(super) password: Option<String>,
    #[serde(default)]
    pub(super) auth_transport: Option<String>,
    #[serde(default = "default_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) timeout: Duration,
    #[serde(default = "default_connect_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) connect_timeout: Duration,
    #[serde(default)]
    pub(super) insecure: bool,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(url) = env_string("ZBX_URL")? {
            self.zabbix.url = Some(url);
        }
        if let Some(token) = env_string("ZBX_TOKEN")? {
            self.zabbix.token = Some(token);
        }
        if let Some(user) = env_string("ZBX_USER")? {
            self.zabbix.user = Some(user);
        }
        if let Some(password) = env_string("ZBX_PASSWORD")? {
            self.zabbix.password = Some(password);
        }
        if let Some(transport) = env_string("ZBX_AUTH_TRANSPORT")? {
            self.zabbix.auth_transport = Some(transport);
        }
        if let Some(timeout) = env_duration("ZBX_TIMEOUT")? {
            self.zabbix.timeout = timeout;
        }
        if let Some(timeout) = env_duration("ZBX_CONNECT_TIMEOUT")? {
            self.zabbix.connect_timeout = timeout;
        }
        if let Some(insecure) = env_bool("ZBX_INSECURE")? {
            self.zabbix.insecure = insecure;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let zabbix = self.zabbix;
        let url_str = zabbix.url.ok_or(ConfigError::MissingField {
            field: "zabbix.url",
        })?;
        let url = Url::parse(&url_str).map_err(|err| ConfigError::InvalidField {
            field: "zabbix.url",
            message: err.to_string(),
        })?;

        let auth = match (zabbix.token, zabbix.user, zabbix.password) {
            (Some(token), _, _) if !token.trim().is_empty() => Auth::Token(token.into()),
            (_, Some(user), Some(password)) if !user.trim().is_empty() => Auth::Credentials {
                user,
                password: SecretString::from(password),
            },
            (_, Some(_), None) => {
                return Err(ConfigError::MissingField {
                    field: "zabbix.password",
                }
                .into());
            }
            (Some(_), _, _) => {
                return Err(ConfigError::InvalidField {
                    field: "zabbix.token",
                    message: "token cannot be empty".to_string(),
                }
                .into());
            }
            _ => {
                return Err(ConfigError::MissingField {
                    field: "zabbix.token",
                }
                .into());
            }
        };

        let auth_transport = zabbix
            .auth_transport
            .as_deref()
            .map(AuthTransport::from_str)
            .transpose()
            .map_err(|message| ConfigError::InvalidField {
                field: "zabbix.auth_transport",
                message,
            })?
            .unwrap_or_default();

        if zabbix.timeout.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "zabbix.timeout",
                message: "timeout must be greater than zero".to_string(),
            }
            .into());
        }
        if zabbix.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "zabbix.connect_timeout",
                message: "connect timeout must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(Config {
            url,
            auth,
            auth_transport,
            request_timeout: zabbix.timeout,
            connect_timeout: zabbix.connect_timeout,
            insecure: zabbix.insecure,
        })
    }
}

impl Default for RawZabbix {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            user: None,
            password: None,
            auth_transport: None,
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            insecure: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::ExposeSecret;

    use super::{RawConfig, RawZabbix, load_with_env};
    use crate::config::Auth;
    use crate::error::{ConfigError, Error};
    use crate::zbx_client::AuthTransport;

    fn raw(zabbix: RawZabbix) -> RawConfig {
        RawConfig { zabbix }
    }

    fn with_url() -> RawZabbix {
        RawZabbix {
            url: Some("https://zabbix.example.com/api_jsonrpc.php".to_string()),
            ..RawZabbix::default()
        }
    }

    #[test]
    fn token_takes_precedence_over_credentials() {
        let config = raw(RawZabbix {
            token: Some("0123abcd".to_string()),
            user: Some("Admin".to_string()),
            password: Some("zabbix".to_string()),
            auth_transport: Some("header".to_string()),
            ..with_url()
        })
        .validate_and_build()
        .unwrap();

        match config.auth {
            Auth::Token(token) => assert_eq!(token.expose_secret(), "0123abcd"),
            Auth::Credentials { .. } => panic!("expected token auth"),
        }
        assert_eq!(config.auth_transport, AuthTransport::Header);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn credentials_are_used_without_token() {
        let config = raw(RawZabbix {
            user: Some("Admin".to_string()),
            password: Some("zabbix".to_string()),
            ..with_url()
        })
        .validate_and_build()
        .unwrap();

        assert!(matches!(config.auth, Auth::Credentials { ref user, .. } if user == "Admin"));
        assert_eq!(config.auth_transport, AuthTransport::Body);
    }

    #[test]
    fn missing_auth_and_password_are_reported() {
        let err = raw(with_url()).validate_and_build().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "zabbix.token"
            })
        ));

        let err = raw(RawZabbix {
            user: Some("Admin".to_string()),
            ..with_url()
        })
        .validate_and_build()
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "zabbix.password"
            })
        ));
    }

    #[test]
    fn rejects_bad_url_transport_and_zero_timeout() {
        let err = raw(RawZabbix {
            token: Some("t".to_string()),
            ..RawZabbix::default()
        })
        .validate_and_build()
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { field: "zabbix.url" })
        ));

        let err = raw(RawZabbix {
            url: Some("not a url".to_string()),
            token: Some("t".to_string()),
            ..RawZabbix::default()
        })
        .validate_and_build()
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidField { field: "zabbix.url", .. })
        ));

        let err = raw(RawZabbix {
            token: Some("t".to_string()),
            auth_transport: Some("cookie".to_string()),
            ..with_url()
        })
        .validate_and_build()
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidField {
                field: "zabbix.auth_transport",
                ..
            })
        ));

        let err = raw(RawZabbix {
            token: Some("t".to_string()),
            timeout: Duration::ZERO,
            ..with_url()
        })
        .validate_and_build()
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidField {
                field: "zabbix.timeout",
                ..
            })
        ));
    }

    #[test]
    fn numeric_looking_env_token_keeps_leading_zeros() {
        let env = [
            ("ZABBIX__ZABBIX__URL", "https://zabbix.example.com/api_jsonrpc.php"),
            ("ZABBIX__ZABBIX__TOKEN", "0042"),
            ("ZABBIX__ZABBIX__TIMEOUT", "30s"),
            ("ZABBIX__ZABBIX__INSECURE", "true"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let raw = load_with_env("zbx-test-surely-missing.toml", Some(env)).unwrap();
        assert_eq!(raw.zabbix.token.as_deref(), Some("0042"));
        assert_eq!(raw.zabbix.timeout, Duration::from_secs(30));
        assert!(raw.zabbix.insecure);

        let config = raw.validate_and_build().unwrap();
        match config.auth {
            Auth::Token(token) => assert_eq!(token.expose_secret(), "0042"),
            Auth::Credentials { .. } => panic!("expected token auth"),
        }
    }
}
