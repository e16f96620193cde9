pub(crate) mod client;
pub(crate) mod ops;
pub(crate) mod params;
pub(crate) mod rpc;
pub(crate) mod session;

pub use client::{AuthTransport, ZbxClient};
pub use params::Params;
pub use session::ApiVersion;
