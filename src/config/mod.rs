use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::error::Error as ZabbixError;
use crate::zbx_client::AuthTransport;

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use serde::HumantimeDuration;

/// Connection settings for [`crate::ZbxClient::connect`].
#[derive(Debug, Clone)]
pub struct Config {
    pub url: Url,
    pub auth: Auth,
    pub auth_transport: AuthTransport,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Accept plain `http://` endpoints.
    pub insecure: bool,
}

#[derive(Debug, Clone)]
pub enum Auth {
    /// API token, used as is.
    Token(SecretString),
    /// Exchanged for a session id through `user.login`.
    Credentials { user: String, password: SecretString },
}

impl Config {
    /// Load configuration from a file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be parsed, when
    /// environment overrides are invalid, or when the resulting values fail
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ZabbixError::from)?;
        raw.apply_env_overrides().map_err(ZabbixError::from)?;
        raw.validate_and_build()
    }
}
