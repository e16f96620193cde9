use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::Result;
use crate::config::{Auth, Config};
use crate::error::{ConfigError, Error, ZbxError};

use super::rpc::{RpcEnvelope, RpcRequest, body_preview};

const CORRELATION_HEADER: &str = "x-correlation-id";

/// Methods the server rejects when they carry an auth token.
const ANONYMOUS_METHODS: &[&str] = &["apiinfo.version", "user.login"];

/// Where the session or API token travels.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthTransport {
    /// Legacy `auth` member of the request envelope. Removed in Zabbix 7.2.
    #[default]
    Body,
    /// `Authorization: Bearer` header, Zabbix 6.4 and later.
    Header,
}

impl FromStr for AuthTransport {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "body" | "auth" => Ok(Self::Body),
            "header" | "bearer" => Ok(Self::Header),
            other => Err(format!("unknown auth transport: {other}")),
        }
    }
}

#[derive(Clone)]
pub struct ZbxClient {
    http: reqwest::Client,
    base: Url,
    pub(super) token: Option<SecretString>,
    auth_transport: AuthTransport,
    next_id: Arc<AtomicU64>,
}

impl ZbxClient {
    /// Build a client for the `api_jsonrpc.php` endpoint at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTPS is required but the URL uses another
    /// scheme, or if the underlying HTTP client fails to build.
    pub fn new(
        base: Url,
        timeout: Duration,
        connect_timeout: Duration,
        insecure_http: bool,
    ) -> Result<Self> {
        if base.scheme() != "https" && !insecure_http {
            return Err(Error::Config(ConfigError::InvalidField {
                field: "zabbix.url",
                message: "only https URLs are accepted without --insecure".to_string(),
            }));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json-rpc"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(concat!("zabbix-api/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(30));

        if !insecure_http {
            builder = builder.https_only(true);
        }

        let http = builder
            .build()
            .map_err(|err| ZbxError::Client { source: err })?;

        Ok(Self {
            http,
            base,
            token: None,
            auth_transport: AuthTransport::default(),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Build a client from validated configuration, logging in first when
    /// credentials rather than a token are configured.
    ///
    /// # Errors
    ///
    /// Client construction errors and, for credentials, login errors.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = Self::new(
            config.url.clone(),
            config.request_timeout,
            config.connect_timeout,
            config.insecure,
        )?
        .with_auth_transport(config.auth_transport);

        match &config.auth {
            Auth::Token(token) => Ok(client.with_token(token.clone())),
            Auth::Credentials { user, password } => {
                let mut client = client;
                client.login(user, password).await?;
                Ok(client)
            }
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    #[must_use]
    pub const fn with_auth_transport(mut self, transport: AuthTransport) -> Self {
        self.auth_transport = transport;
        self
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    #[must_use]
    pub const fn auth_transport(&self) -> AuthTransport {
        self.auth_transport
    }

    /// Call `method` and return the raw `result` member.
    ///
    /// # Errors
    ///
    /// See [`ZbxClient::call`].
    pub async fn call_value<P>(&self, method: &str, params: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        self.call(method, params).await
    }

    /// Call `method` once and decode its `result` member into `T`.
    ///
    /// # Errors
    ///
    /// `Request` on transport failures and timeouts, `HttpStatus` on a
    /// non-2xx reply, `Json` when the body is not a valid envelope for `T`,
    /// `Api` when the server answered with an error member and
    /// `MissingField` when it answered with neither.
    pub async fn call<T, P>(&self, method: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let correlation_id = Uuid::now_v7().to_string();
        let started = Instant::now();

        let token = self.auth_for(method);
        let payload = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
            auth: match self.auth_transport {
                AuthTransport::Body => token,
                AuthTransport::Header => None,
            },
        };
        let mut request = self
            .http
            .post(self.base.clone())
            .header(CORRELATION_HEADER, &correlation_id)
            .json(&payload);
        if let (AuthTransport::Header, Some(token)) = (self.auth_transport, token) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| {
            let zerr = ZbxError::from(err);
            warn!(method, request_id = id, %correlation_id, error = %zerr, "zabbix request failed");
            zerr
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(method, request_id = id, %correlation_id, %status, "unexpected HTTP status");
            return Err(ZbxError::HttpStatus { status }.into());
        }

        let body = response.bytes().await.map_err(ZbxError::from)?;

        let envelope: RpcEnvelope<T> = serde_json::from_slice(&body).map_err(|err| {
            let preview = body_preview(&body);
            ZbxError::Json {
                message: format!("error decoding response body: {err}; body preview: {preview}"),
            }
        })?;

        if let Some(err) = envelope.error {
            debug!(
                method,
                request_id = id,
                %correlation_id,
                code = err.code,
                "zabbix api returned an error"
            );
            return Err(ZbxError::Api {
                code: err.code,
                message: err.message,
                data: err.data,
            }
            .into());
        }

        let Some(result) = envelope.result else {
            return Err(ZbxError::MissingField { field: "result" }.into());
        };

        debug!(
            method,
            request_id = id,
            %correlation_id,
            latency_ms = started.elapsed().as_millis(),
            "zabbix call succeeded"
        );
        Ok(result)
    }

    fn auth_for(&self, method: &str) -> Option<&str> {
        if ANONYMOUS_METHODS.contains(&method) {
            return None;
        }
        self.token.as_ref().map(|token| token.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::time::Duration;

    use secrecy::SecretString;
    use url::Url;

    use super::{AuthTransport, ZbxClient};
    use crate::error::{ConfigError, Error};

    fn client(url: &str, insecure: bool) -> crate::Result<ZbxClient> {
        ZbxClient::new(
            Url::parse(url).unwrap(),
            Duration::from_secs(1),
            Duration::from_secs(1),
            insecure,
        )
    }

    #[test]
    fn rejects_plain_http_without_insecure_flag() {
        let err = client("http://zabbix.local/api_jsonrpc.php", false)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidField {
                field: "zabbix.url",
                ..
            })
        ));
        assert!(client("http://zabbix.local/api_jsonrpc.php", true).is_ok());
    }

    #[test]
    fn anonymous_methods_never_carry_the_token() {
        let client = client("https://zabbix.local/api_jsonrpc.php", false)
            .unwrap()
            .with_token(SecretString::from("abc"));
        assert_eq!(client.auth_for("apiinfo.version"), None);
        assert_eq!(client.auth_for("user.login"), None);
        assert_eq!(client.auth_for("user.get"), Some("abc"));
    }

    #[test]
    fn auth_transport_parses_aliases() {
        assert_eq!(AuthTransport::from_str("Bearer"), Ok(AuthTransport::Header));
        assert_eq!(AuthTransport::from_str("body"), Ok(AuthTransport::Body));
        assert!(AuthTransport::from_str("cookie").is_err());
    }
}
