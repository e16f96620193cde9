use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Zabbix(#[from] ZbxError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("missing required configuration field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ZbxError {
    #[error("failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: reqwest::StatusCode },
    #[error("invalid JSON payload: {message}")]
    Json { message: String },
    #[error("invalid field {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    /// Error member of a JSON-RPC response.
    #[error("Zabbix API error {code}: {message}{}", data_suffix(.data))]
    Api {
        code: i64,
        message: String,
        data: Option<String>,
    },
    #[error("missing field in API response: {field}")]
    MissingField { field: &'static str },
    #[error("expected exactly one result, got {got}")]
    ExpectedOneResult { got: usize },
    #[error("expected {expected} results, got {got}")]
    ExpectedMore { expected: usize, got: usize },
}

impl From<reqwest::Error> for ZbxError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_status() {
            if let Some(status) = source.status() {
                return Self::HttpStatus { status };
            }
        }
        Self::Request { source }
    }
}

impl From<serde_json::Error> for ZbxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

fn data_suffix(data: &Option<String>) -> String {
    data.as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl Error {
    /// API error code reported by the server, if this is an API error.
    #[must_use]
    pub const fn api_code(&self) -> Option<i64> {
        match self {
            Self::Zabbix(ZbxError::Api { code, .. }) => Some(*code),
            _ => None,
        }
    }
}
