#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

//! Typed bindings for the Zabbix JSON-RPC API.
//!
//! [`ZbxClient`] owns the transport and the generic request/response path;
//! [`objects`] mirrors the Zabbix schemas and adds one typed wrapper per
//! remote method.

pub mod config;
pub mod error;
pub mod objects;
pub mod telemetry;
pub mod zbx_client;

pub use zbx_client::{ApiVersion, AuthTransport, Params, ZbxClient};

pub type Result<T> = std::result::Result<T, error::Error>;
