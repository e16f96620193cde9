use std::fmt::{self, Display};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::info;

use crate::Result;
use crate::error::ZbxError;

use super::{Params, ZbxClient};

/// Server API version as reported by `apiinfo.version`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ApiVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    #[must_use]
    pub const fn at_least(self, major: u32, minor: u32) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }

    /// Parameter name carrying the login name: `user` was renamed to
    /// `username` in 5.4.
    #[must_use]
    pub const fn login_field(self) -> &'static str {
        if self.at_least(5, 4) {
            "username"
        } else {
            "user"
        }
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    /// Accepts `7.0`, `6.0.25` and pre-releases such as `5.4.0rc1`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '.').map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok()
        });
        let major = parts
            .next()
            .flatten()
            .ok_or_else(|| format!("invalid API version: {s}"))?;
        let minor = parts.next().flatten().unwrap_or_default();
        let patch = parts.next().flatten().unwrap_or_default();
        Ok(Self::new(major, minor, patch))
    }
}

impl ZbxClient {
    /// `apiinfo.version`
    ///
    /// # Errors
    ///
    /// Transport and API errors, or `InvalidField` when the server reports a
    /// version string that does not parse.
    pub async fn api_version(&self) -> Result<ApiVersion> {
        let raw: String = self.call("apiinfo.version", &json!([])).await?;
        raw.parse::<ApiVersion>().map_err(|message| {
            ZbxError::InvalidField {
                field: "apiinfo.version",
                message,
            }
            .into()
        })
    }

    /// `user.login`. The returned session id becomes the client token.
    ///
    /// # Errors
    ///
    /// Transport and API errors; wrong credentials surface as an `Api` error.
    pub async fn login(&mut self, user: &str, password: &SecretString) -> Result<SecretString> {
        let version = self.api_version().await?;
        let params = Params::new()
            .set(version.login_field(), user)
            .set("password", password.expose_secret());
        let session: String = self.call("user.login", &params).await?;
        info!(%version, user, "logged in to zabbix api");

        let session = SecretString::from(session);
        self.token = Some(session.clone());
        Ok(session)
    }

    /// `user.logout`; clears the client token on success.
    ///
    /// # Errors
    ///
    /// Transport and API errors.
    pub async fn logout(&mut self) -> Result<()> {
        let _: Value = self.call("user.logout", &json!([])).await?;
        self.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiVersion;

    #[test]
    fn parses_release_and_prerelease_versions() {
        assert_eq!("6.0.25".parse(), Ok(ApiVersion::new(6, 0, 25)));
        assert_eq!("7.0".parse(), Ok(ApiVersion::new(7, 0, 0)));
        assert_eq!("5.4.0rc1".parse(), Ok(ApiVersion::new(5, 4, 0)));
        assert!("beta".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn login_field_follows_the_5_4_rename() {
        assert_eq!(ApiVersion::new(5, 2, 7).login_field(), "user");
        assert_eq!(ApiVersion::new(5, 4, 0).login_field(), "username");
        assert_eq!(ApiVersion::new(7, 0, 3).login_field(), "username");
        assert!(ApiVersion::new(6, 4, 0) > ApiVersion::new(6, 0, 25));
    }
}
